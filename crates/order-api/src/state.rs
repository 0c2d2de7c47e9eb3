//! # Application State
//!
//! Shared state for the Axum application: the order service with its
//! injected gateway and stores, plus server configuration.

use order_core::{
    BoxedCartStore, BoxedOrderStore, BoxedPaymentGateway, InMemoryCartStore, InMemoryOrderStore,
    OrderService,
};
use order_razorpay::RazorpayGateway;
use std::sync::Arc;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Environment (development, staging, production)
    pub environment: String,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> std::net::SocketAddr {
        format!("{}:{}", self.host, self.port)
            .parse()
            .expect("Invalid socket address")
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Order lifecycle service
    pub service: OrderService,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Create an AppState with the Razorpay gateway and in-memory stores
    pub fn new() -> anyhow::Result<Self> {
        let config = AppConfig::from_env();

        let gateway = RazorpayGateway::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to initialize Razorpay: {}", e))?;

        Ok(Self::with_components(
            config,
            Arc::new(gateway),
            Arc::new(InMemoryOrderStore::new()),
            Arc::new(InMemoryCartStore::new()),
        ))
    }

    /// Create an AppState from explicit components (used by tests to
    /// inject a fake gateway or pre-seeded stores)
    pub fn with_components(
        config: AppConfig,
        gateway: BoxedPaymentGateway,
        orders: BoxedOrderStore,
        carts: BoxedCartStore,
    ) -> Self {
        Self {
            service: OrderService::new(gateway, orders, carts),
            config,
        }
    }
}
