//! # order-core
//!
//! Core types and ports for the rapid-order checkout engine.
//!
//! This crate provides:
//! - `Order` and `OrderStatus` for the order lifecycle
//! - `PaymentGateway` trait for payment providers
//! - `OrderStore` and `CartStore` persistence ports with in-memory backends
//! - `OrderService` orchestrating create → gateway → verify → finalize
//! - `OrderError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use order_core::{CreateOrderRequest, InMemoryCartStore, InMemoryOrderStore, OrderService};
//! use std::sync::Arc;
//!
//! let service = OrderService::new(
//!     gateway,                              // any Arc<dyn PaymentGateway>
//!     Arc::new(InMemoryOrderStore::new()),
//!     Arc::new(InMemoryCartStore::new()),
//! );
//!
//! let order = service.create_order("user_1", request).await?;
//! // ... customer pays out-of-band, then:
//! service.verify_payment("user_1", &order.id, payment_id, gateway_order_id, signature).await?;
//! ```

pub mod error;
pub mod gateway;
pub mod money;
pub mod order;
pub mod service;
pub mod store;

// Re-exports for convenience
pub use error::{OrderError, OrderResult};
pub use gateway::{BoxedPaymentGateway, GatewayOrder, PaymentGateway};
pub use money::Currency;
pub use order::{Order, OrderStatus};
pub use service::{CreateOrderRequest, OrderService, VerifyPaymentRequest};
pub use store::{
    BoxedCartStore, BoxedOrderStore, CartStore, InMemoryCartStore, InMemoryOrderStore,
    OrderStore,
};
