//! # Order Service
//!
//! Orchestrates the order lifecycle: validate → register with the payment
//! gateway → persist PENDING → verify payment → finalize. Ownership checks
//! and state transitions all live here; the gateway and stores are injected
//! ports, so the service itself carries no provider- or storage-specific
//! code.

use crate::error::{OrderError, OrderResult};
use crate::gateway::BoxedPaymentGateway;
use crate::money::Currency;
use crate::order::{Order, OrderStatus};
use crate::store::{BoxedCartStore, BoxedOrderStore};
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{error, info, instrument, warn};

/// Input for `OrderService::create_order`.
///
/// `items` and `address` are opaque payloads; only their presence and
/// non-emptiness are validated.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrderRequest {
    #[serde(default)]
    pub items: serde_json::Value,
    #[serde(default)]
    pub amount: Decimal,
    #[serde(default)]
    pub address: serde_json::Value,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub currency: Currency,
}

/// Input for `OrderService::verify_payment`.
#[derive(Debug, Clone)]
pub struct VerifyPaymentRequest {
    /// Our order id
    pub order_id: String,
    /// Gateway payment id
    pub payment_id: String,
    /// Gateway-side order id
    pub gateway_order_id: String,
    /// Signature supplied by the gateway checkout callback
    pub signature: String,
}

/// The order lifecycle orchestrator.
///
/// Holds the payment gateway and persistence ports as injected trait
/// objects (no process-global client), which keeps every collaborator
/// swappable in tests.
#[derive(Clone)]
pub struct OrderService {
    gateway: BoxedPaymentGateway,
    orders: BoxedOrderStore,
    carts: BoxedCartStore,
}

impl OrderService {
    pub fn new(
        gateway: BoxedPaymentGateway,
        orders: BoxedOrderStore,
        carts: BoxedCartStore,
    ) -> Self {
        Self {
            gateway,
            orders,
            carts,
        }
    }

    /// Create an order: validate, register with the gateway, persist PENDING.
    ///
    /// Strict sequence: the gateway call must succeed before anything is
    /// persisted, so a gateway failure leaves no record. The reverse gap
    /// (persistence failing after the gateway call) orphans the gateway-side
    /// order; the orphan is logged with its id and no compensating cancel is
    /// attempted (unpaid gateway orders expire on their own).
    #[instrument(skip(self, request), fields(user_id = %user_id))]
    pub async fn create_order(
        &self,
        user_id: &str,
        request: CreateOrderRequest,
    ) -> OrderResult<Order> {
        let items_empty = match &request.items {
            serde_json::Value::Array(items) => items.is_empty(),
            _ => true,
        };
        if items_empty || request.amount <= Decimal::ZERO {
            return Err(OrderError::Validation(
                "Items and amount are required".to_string(),
            ));
        }

        let amount_minor = request
            .currency
            .to_minor_units(request.amount)
            .ok_or_else(|| {
                OrderError::Validation(format!(
                    "Amount {} is not representable in {} minor units",
                    request.amount, request.currency
                ))
            })?;

        // Unique per attempt, to avoid gateway-side idempotency collisions
        let receipt = format!("order_{}_{}", user_id, Utc::now().timestamp());

        let gateway_order = self
            .gateway
            .create_gateway_order(amount_minor, request.currency, &receipt)
            .await?;

        let order = Order::new(
            user_id,
            request.amount,
            request.currency,
            request.items,
            request.address,
            request.email,
            request.phone,
        )
        .with_gateway_order_id(gateway_order.gateway_order_id.clone());

        if let Err(e) = self.orders.create(order.clone()).await {
            error!(
                gateway_order_id = %gateway_order.gateway_order_id,
                "Order persistence failed after gateway registration; gateway order is orphaned"
            );
            return Err(e);
        }

        info!(
            order_id = %order.id,
            gateway_order_id = %gateway_order.gateway_order_id,
            "Order created"
        );
        Ok(order)
    }

    /// Verify a completed payment and finalize the order.
    ///
    /// On a signature mismatch the order is best-effort marked FAILED: the
    /// mark only happens when the order loads and belongs to the caller,
    /// and the rejection is returned either way.
    #[instrument(skip(self, request), fields(user_id = %user_id, order_id = %request.order_id))]
    pub async fn verify_payment(
        &self,
        user_id: &str,
        request: VerifyPaymentRequest,
    ) -> OrderResult<()> {
        if request.order_id.is_empty()
            || request.payment_id.is_empty()
            || request.gateway_order_id.is_empty()
            || request.signature.is_empty()
        {
            return Err(OrderError::Validation(
                "Missing payment details".to_string(),
            ));
        }

        let valid = self.gateway.verify_payment_signature(
            &request.gateway_order_id,
            &request.payment_id,
            &request.signature,
        );

        if !valid {
            self.mark_failed_best_effort(user_id, &request.order_id).await;
            return Err(OrderError::SignatureMismatch);
        }

        let order = self
            .orders
            .get(&request.order_id)
            .await?
            .ok_or_else(|| OrderError::NotFound {
                order_id: request.order_id.clone(),
            })?;

        if !order.is_owned_by(user_id) {
            return Err(OrderError::Unauthorized {
                order_id: request.order_id.clone(),
            });
        }

        self.orders
            .update_status(
                &request.order_id,
                OrderStatus::Success,
                Some(&request.payment_id),
            )
            .await?;

        info!(payment_id = %request.payment_id, "Payment verified");
        Ok(())
    }

    /// Delete an order after not-found and ownership checks.
    ///
    /// Deletion is allowed in any lifecycle state.
    #[instrument(skip(self), fields(user_id = %user_id, order_id = %order_id))]
    pub async fn delete_order(&self, user_id: &str, order_id: &str) -> OrderResult<()> {
        let order = self
            .orders
            .get(order_id)
            .await?
            .ok_or_else(|| OrderError::NotFound {
                order_id: order_id.to_string(),
            })?;

        if !order.is_owned_by(user_id) {
            return Err(OrderError::Unauthorized {
                order_id: order_id.to_string(),
            });
        }

        self.orders.delete(order_id).await
    }

    /// All of a user's orders, newest first.
    pub async fn list_user_orders(&self, user_id: &str) -> OrderResult<Vec<Order>> {
        self.orders.list_by_user(user_id).await
    }

    /// Clear a user's cart.
    pub async fn clear_cart(&self, user_id: &str) -> OrderResult<()> {
        self.carts.clear(user_id).await
    }

    /// Mark an order FAILED after a rejected signature, when possible.
    async fn mark_failed_best_effort(&self, user_id: &str, order_id: &str) {
        match self.orders.get(order_id).await {
            Ok(Some(order)) if order.is_owned_by(user_id) => {
                if let Err(e) = self
                    .orders
                    .update_status(order_id, OrderStatus::Failed, None)
                    .await
                {
                    warn!(error = %e, "Could not mark order FAILED after signature mismatch");
                }
            }
            Ok(Some(_)) => {
                warn!("Signature mismatch for an order owned by another user; skipping FAILED mark");
            }
            Ok(None) => {
                warn!("Signature mismatch for an unknown order; skipping FAILED mark");
            }
            Err(e) => {
                warn!(error = %e, "Could not load order after signature mismatch; skipping FAILED mark");
            }
        }
    }
}
