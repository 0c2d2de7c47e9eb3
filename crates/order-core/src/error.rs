//! # Order Error Types
//!
//! Typed error handling for the order engine.
//! All order operations return `Result<T, OrderError>`.

use thiserror::Error;

/// Core error type for all order operations
#[derive(Debug, Error)]
pub enum OrderError {
    /// Configuration errors (missing keys, invalid config)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Invalid request data (missing fields, bad amounts)
    #[error("Invalid request: {0}")]
    Validation(String),

    /// Order not found
    #[error("Order not found: {order_id}")]
    NotFound { order_id: String },

    /// Order belongs to a different user
    #[error("Unauthorized access to order {order_id}")]
    Unauthorized { order_id: String },

    /// Payment gateway unreachable or rejected the call
    #[error("Gateway error [{provider}]: {message}")]
    Gateway { provider: String, message: String },

    /// Supplied payment signature does not match the expected HMAC
    #[error("Invalid payment signature")]
    SignatureMismatch,

    /// Storage unavailable or a write failed
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl OrderError {
    /// Returns the HTTP status code appropriate for this error.
    ///
    /// Gateway and storage failures map to 500 rather than 502/503: the
    /// HTTP contract surfaces them as generic server errors.
    pub fn status_code(&self) -> u16 {
        match self {
            OrderError::Configuration(_) => 500,
            OrderError::Validation(_) => 400,
            OrderError::NotFound { .. } => 404,
            OrderError::Unauthorized { .. } => 403,
            OrderError::Gateway { .. } => 500,
            OrderError::SignatureMismatch => 400,
            OrderError::Storage(_) => 500,
            OrderError::Serialization(_) => 500,
        }
    }

    /// Returns true if the caller can fix this error by changing the request
    pub fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }
}

/// Result type alias for order operations
pub type OrderResult<T> = Result<T, OrderError>;
