//! # Request Handlers
//!
//! Axum request handlers for the order API. Every response uses the
//! `{success, message, ...}` envelope; errors carry no internals beyond
//! the message.

use crate::auth::AuthUser;
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use order_core::{CreateOrderRequest, Order, OrderError, VerifyPaymentRequest};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{error, instrument};

// =============================================================================
// Request/Response Types
// =============================================================================

/// Plain `{success, message}` envelope
#[derive(Debug, Serialize)]
pub struct ApiMessage {
    pub success: bool,
    pub message: String,
}

impl ApiMessage {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Payment-verification request body. Field names follow the Razorpay
/// checkout callback; `orderId` is accepted as an alias because the
/// original storefront sends camelCase.
#[derive(Debug, Deserialize)]
pub struct VerifyPaymentBody {
    #[serde(default, alias = "orderId")]
    pub order_id: String,
    #[serde(default)]
    pub razorpay_payment_id: String,
    #[serde(default)]
    pub razorpay_order_id: String,
    #[serde(default)]
    pub razorpay_signature: String,
}

/// Order summary returned from create-order
#[derive(Debug, Serialize)]
pub struct OrderSummary {
    pub id: String,
    pub amount: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub razorpay_order_id: Option<String>,
}

/// Create-order response
#[derive(Debug, Serialize)]
pub struct CreateOrderResponse {
    pub success: bool,
    pub message: String,
    pub order: OrderSummary,
}

/// One entry in the order-history listing
#[derive(Debug, Serialize)]
pub struct OrderHistoryEntry {
    pub id: String,
    pub items: serde_json::Value,
    pub amount: Decimal,
    pub status: String,
    pub created_at: String,
}

impl From<Order> for OrderHistoryEntry {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            items: order.items,
            amount: order.amount,
            status: order.status.to_string(),
            created_at: order.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

/// Order-history response
#[derive(Debug, Serialize)]
pub struct UserOrdersResponse {
    pub success: bool,
    pub orders: Vec<OrderHistoryEntry>,
}

fn error_to_response(err: OrderError) -> (StatusCode, Json<ApiMessage>) {
    if !err.is_client_error() {
        error!(error = %err, "Request failed");
    }
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(ApiMessage::fail(err.to_string())))
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "rapid-order",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Create an order and register it with the payment gateway
#[instrument(skip(state, request), fields(user_id = %user.0))]
pub async fn create_order(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<CreateOrderRequest>,
) -> Result<impl IntoResponse, (StatusCode, Json<ApiMessage>)> {
    let order = state
        .service
        .create_order(&user.0, request)
        .await
        .map_err(error_to_response)?;

    Ok((
        StatusCode::CREATED,
        Json(CreateOrderResponse {
            success: true,
            message: "Order created successfully".to_string(),
            order: OrderSummary {
                id: order.id,
                amount: order.amount,
                razorpay_order_id: order.gateway_order_id,
            },
        }),
    ))
}

/// Verify a payment signature and finalize the order
#[instrument(skip(state, body), fields(user_id = %user.0))]
pub async fn verify_payment(
    State(state): State<AppState>,
    user: AuthUser,
    Json(body): Json<VerifyPaymentBody>,
) -> Result<impl IntoResponse, (StatusCode, Json<ApiMessage>)> {
    let request = VerifyPaymentRequest {
        order_id: body.order_id,
        payment_id: body.razorpay_payment_id,
        gateway_order_id: body.razorpay_order_id,
        signature: body.razorpay_signature,
    };

    state
        .service
        .verify_payment(&user.0, request)
        .await
        .map_err(error_to_response)?;

    Ok(Json(ApiMessage::ok("Payment verified successfully")))
}

/// Delete one of the caller's orders
#[instrument(skip(state), fields(user_id = %user.0, order_id = %order_id))]
pub async fn delete_order(
    State(state): State<AppState>,
    user: AuthUser,
    Path(order_id): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, Json<ApiMessage>)> {
    state
        .service
        .delete_order(&user.0, &order_id)
        .await
        .map_err(error_to_response)?;

    Ok(Json(ApiMessage::ok("Order deleted successfully")))
}

/// List the caller's orders, newest first
#[instrument(skip(state), fields(user_id = %user.0))]
pub async fn user_orders(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<impl IntoResponse, (StatusCode, Json<ApiMessage>)> {
    let orders = state
        .service
        .list_user_orders(&user.0)
        .await
        .map_err(error_to_response)?;

    Ok(Json(UserOrdersResponse {
        success: true,
        orders: orders.into_iter().map(OrderHistoryEntry::from).collect(),
    }))
}

/// Clear the caller's cart
#[instrument(skip(state), fields(user_id = %user.0))]
pub async fn clear_cart(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<impl IntoResponse, (StatusCode, Json<ApiMessage>)> {
    state
        .service
        .clear_cart(&user.0)
        .await
        .map_err(error_to_response)?;

    Ok(Json(ApiMessage::ok("Cart cleared successfully")))
}
