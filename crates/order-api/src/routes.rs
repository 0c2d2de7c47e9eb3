//! # Routes
//!
//! Axum router configuration for the order API.

use crate::handlers;
use crate::state::AppState;
use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Create the main application router
///
/// Routes:
/// - Orders:
///   - POST   /api/order/create-order   - Create order + gateway registration
///   - POST   /api/order/verify-payment - Verify payment signature
///   - GET    /api/order/user-orders    - List caller's orders
///   - DELETE /api/order/{order_id}     - Delete an order
///
/// - Cart:
///   - DELETE /api/cart/clear - Clear the caller's cart
///
/// - Health:
///   - GET /health
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let order_routes = Router::new()
        .route("/create-order", post(handlers::create_order))
        .route("/verify-payment", post(handlers::verify_payment))
        .route("/user-orders", get(handlers::user_orders))
        .route("/{order_id}", delete(handlers::delete_order));

    let cart_routes = Router::new().route("/clear", delete(handlers::clear_cart));

    Router::new()
        .route("/health", get(handlers::health))
        .nest("/api/order", order_routes)
        .nest("/api/cart", cart_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
