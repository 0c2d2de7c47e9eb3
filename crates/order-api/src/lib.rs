//! # order-api
//!
//! HTTP API layer for rapid-order-rs.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - REST endpoints for order creation, payment verification, and history
//! - Authenticated-user extraction from the upstream auth collaborator
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | POST | `/api/order/create-order` | Create order + gateway registration |
//! | POST | `/api/order/verify-payment` | Verify payment signature |
//! | GET | `/api/order/user-orders` | List caller's orders, newest first |
//! | DELETE | `/api/order/{order_id}` | Delete an order |
//! | DELETE | `/api/cart/clear` | Clear the caller's cart |

pub mod auth;
pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppConfig, AppState};
