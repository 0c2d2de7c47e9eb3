//! # Razorpay Gateway Client
//!
//! `PaymentGateway` implementation over the Razorpay Orders API.
//! Gateway-side orders are registered with `POST /v1/orders` before the
//! customer is handed to the checkout; payment capture is automatic.

use crate::config::RazorpayConfig;
use crate::signature;
use async_trait::async_trait;
use order_core::{Currency, GatewayOrder, OrderError, OrderResult, PaymentGateway};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument};

/// Razorpay payment gateway adapter
pub struct RazorpayGateway {
    config: RazorpayConfig,
    client: Client,
}

impl RazorpayGateway {
    /// Create a new Razorpay gateway adapter
    pub fn new(config: RazorpayConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Create from environment variables
    pub fn from_env() -> OrderResult<Self> {
        let config = RazorpayConfig::from_env()?;
        Ok(Self::new(config))
    }

    fn gateway_error(message: impl Into<String>) -> OrderError {
        OrderError::Gateway {
            provider: "razorpay".to_string(),
            message: message.into(),
        }
    }
}

#[async_trait]
impl PaymentGateway for RazorpayGateway {
    #[instrument(skip(self), fields(currency = %currency))]
    async fn create_gateway_order(
        &self,
        amount_minor: i64,
        currency: Currency,
        receipt: &str,
    ) -> OrderResult<GatewayOrder> {
        let body = RazorpayOrderRequest {
            amount: amount_minor,
            currency: currency.as_str(),
            receipt,
            payment_capture: 1,
        };

        let url = format!("{}/v1/orders", self.config.api_base_url);

        debug!("Registering gateway order: amount={} {}", amount_minor, currency);

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.config.key_id, Some(&self.config.key_secret))
            .json(&body)
            .send()
            .await
            .map_err(|e| Self::gateway_error(format!("request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Self::gateway_error(format!("reading response failed: {}", e)))?;

        if !status.is_success() {
            error!("Razorpay API error: status={}", status);

            if let Ok(error_response) = serde_json::from_str::<RazorpayErrorResponse>(&body) {
                return Err(Self::gateway_error(error_response.error.description));
            }

            return Err(Self::gateway_error(format!("HTTP {}", status)));
        }

        let order_response: RazorpayOrderResponse = serde_json::from_str(&body)
            .map_err(|e| OrderError::Serialization(format!("Failed to parse Razorpay response: {}", e)))?;

        info!("Created gateway order: id={}", order_response.id);

        Ok(GatewayOrder {
            gateway_order_id: order_response.id,
        })
    }

    fn verify_payment_signature(
        &self,
        gateway_order_id: &str,
        payment_id: &str,
        supplied_signature: &str,
    ) -> bool {
        signature::verify_signature(
            gateway_order_id,
            payment_id,
            supplied_signature,
            &self.config.key_secret,
        )
    }

    fn provider_name(&self) -> &'static str {
        "razorpay"
    }
}

// =============================================================================
// Razorpay API Types
// =============================================================================

#[derive(Debug, Serialize)]
struct RazorpayOrderRequest<'a> {
    /// Amount in the currency's smallest unit (paise for INR)
    amount: i64,
    currency: &'a str,
    receipt: &'a str,
    /// 1 = capture the payment automatically on authorization
    payment_capture: u8,
}

#[derive(Debug, Deserialize)]
struct RazorpayOrderResponse {
    id: String,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    amount: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct RazorpayErrorResponse {
    error: RazorpayApiError,
}

#[derive(Debug, Deserialize)]
struct RazorpayApiError {
    #[serde(default)]
    code: Option<String>,
    description: String,
}
