//! # Order Types
//!
//! The order entity and its lifecycle state.

use crate::money::Currency;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle state of an order.
///
/// An order starts `Pending` and moves to exactly one of the terminal
/// states when its payment is verified (or fails verification). There is
/// no refund or retry transition out of a terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Created, awaiting payment verification
    Pending,
    /// Payment verified
    Success,
    /// Payment verification failed
    Failed,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Success => "SUCCESS",
            OrderStatus::Failed => "FAILED",
        }
    }

    /// Terminal states accept no further transition
    pub fn is_terminal(&self) -> bool {
        !matches!(self, OrderStatus::Pending)
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Pending
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One checkout attempt.
///
/// `items` and `address` are opaque JSON payloads: this module validates
/// them only for presence and non-emptiness, downstream consumers own
/// their structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Unique order ID (generated, immutable)
    pub id: String,

    /// Owning user (immutable)
    pub user_id: String,

    /// Lifecycle state
    #[serde(default)]
    pub status: OrderStatus,

    /// Order total in major units (immutable after creation)
    pub amount: Decimal,

    /// Currency of `amount`
    #[serde(default)]
    pub currency: Currency,

    /// Line items, serialized opaquely
    pub items: serde_json::Value,

    /// Delivery address, serialized opaquely
    pub address: serde_json::Value,

    /// Contact email
    pub email: String,

    /// Contact phone
    pub phone: String,

    /// Gateway-side order id, set at creation time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gateway_order_id: Option<String>,

    /// Gateway payment id, set only on successful verification
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_id: Option<String>,

    /// Creation timestamp (immutable)
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Create a new pending order with a generated id
    pub fn new(
        user_id: impl Into<String>,
        amount: Decimal,
        currency: Currency,
        items: serde_json::Value,
        address: serde_json::Value,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.into(),
            status: OrderStatus::Pending,
            amount,
            currency,
            items,
            address,
            email: email.into(),
            phone: phone.into(),
            gateway_order_id: None,
            payment_id: None,
            created_at: Utc::now(),
        }
    }

    /// Builder: set the gateway-side order id
    pub fn with_gateway_order_id(mut self, id: impl Into<String>) -> Self {
        self.gateway_order_id = Some(id.into());
        self
    }

    /// Whether this order belongs to the given user
    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.user_id == user_id
    }
}
