//! # order-razorpay
//!
//! Razorpay payment gateway adapter for rapid-order-rs.
//!
//! This crate provides:
//!
//! 1. **RazorpayGateway** - `PaymentGateway` implementation over the
//!    Razorpay Orders API (`POST /v1/orders`, basic auth)
//! 2. **Signature verification** - HMAC-SHA256 check binding a gateway
//!    order id and payment id to the signature Razorpay's checkout
//!    returns to the frontend
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use order_razorpay::RazorpayGateway;
//! use order_core::{Currency, PaymentGateway};
//!
//! // Create gateway from environment (RAZORPAY_KEY_ID / RAZORPAY_KEY_SECRET)
//! let gateway = RazorpayGateway::from_env()?;
//!
//! // Register an order ahead of payment collection
//! let gw_order = gateway
//!     .create_gateway_order(10_000, Currency::INR, "order_user1_1700000000")
//!     .await?;
//!
//! // Later: check the signature posted back by the checkout
//! let ok = gateway.verify_payment_signature(
//!     &gw_order.gateway_order_id,
//!     "pay_abc123",
//!     "supplied-signature",
//! );
//! ```

pub mod client;
pub mod config;
pub mod signature;

// Re-exports
pub use client::RazorpayGateway;
pub use config::RazorpayConfig;
pub use signature::verify_signature;
