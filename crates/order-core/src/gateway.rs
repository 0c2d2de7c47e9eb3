//! # Payment Gateway Port
//!
//! Core trait for payment gateway integrations. The order service only
//! ever talks to this trait, so providers can be swapped (and faked in
//! tests) without touching the lifecycle logic.

use crate::error::OrderResult;
use crate::money::Currency;
use async_trait::async_trait;
use std::sync::Arc;

/// A gateway-side order, created before the customer pays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayOrder {
    /// Identifier assigned by the gateway (e.g. `order_Nxq...` for Razorpay)
    pub gateway_order_id: String,
}

/// Trait implemented by payment gateway adapters.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Register an order with the gateway ahead of payment collection.
    ///
    /// # Arguments
    /// * `amount_minor` - amount in the currency's smallest unit (paise, cents)
    /// * `currency` - settlement currency
    /// * `receipt` - caller-supplied receipt id, unique per attempt
    async fn create_gateway_order(
        &self,
        amount_minor: i64,
        currency: Currency,
        receipt: &str,
    ) -> OrderResult<GatewayOrder>;

    /// Check a payment signature against the gateway's shared secret.
    ///
    /// Pure: no side effects, no I/O. Returns true only on an exact match
    /// of `HMAC-SHA256(secret, "{gateway_order_id}|{payment_id}")`.
    fn verify_payment_signature(
        &self,
        gateway_order_id: &str,
        payment_id: &str,
        signature: &str,
    ) -> bool;

    /// Gateway name (for logging and error reporting)
    fn provider_name(&self) -> &'static str;
}

/// Type alias for a shared gateway (dynamic dispatch)
pub type BoxedPaymentGateway = Arc<dyn PaymentGateway>;
