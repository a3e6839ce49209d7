//! # Gateway Error Types
//!
//! Typed error handling for the WioPayments SDK.
//! All gateway operations return `Result<T, WioError>`.

use thiserror::Error;

/// Boxed underlying cause of a transport failure
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Local precondition failures. These never reach the network.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Amount must be a positive number")]
    InvalidAmount,

    #[error("Unsupported currency")]
    UnsupportedCurrency,

    #[error("Invalid success URL")]
    InvalidSuccessUrl,

    #[error("Invalid cancel URL")]
    InvalidCancelUrl,
}

/// Core error type for all gateway operations
#[derive(Debug, Error)]
pub enum WioError {
    /// Request parameters failed validation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Network/connection/timeout failure talking to the gateway
    #[error("Transport error: {message}")]
    Transport {
        message: String,
        timeout: bool,
        #[source]
        source: Option<BoxError>,
    },

    /// Non-2xx response, server-reported error object, or malformed body
    #[error("API error [{status}]: {message}")]
    Api {
        status: u16,
        code: Option<String>,
        message: String,
    },

    /// Client configuration errors (missing key, invalid base URL)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Request could not be encoded
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl WioError {
    /// Build a transport error from an underlying cause
    pub fn transport(
        message: impl Into<String>,
        timeout: bool,
        source: impl Into<BoxError>,
    ) -> Self {
        WioError::Transport {
            message: message.into(),
            timeout,
            source: Some(source.into()),
        }
    }

    /// Build an API error
    pub fn api(status: u16, code: Option<String>, message: impl Into<String>) -> Self {
        WioError::Api {
            status,
            code,
            message: message.into(),
        }
    }

    /// Returns true if re-issuing the same call may succeed.
    ///
    /// Nothing in the SDK retries on its own; re-sending a create call after a
    /// transport failure can produce a duplicate payment.
    pub fn is_retryable(&self) -> bool {
        match self {
            WioError::Transport { .. } => true,
            WioError::Api { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    /// Returns true if the request was rejected before any network call
    pub fn is_validation(&self) -> bool {
        matches!(self, WioError::Validation(_))
    }

    /// Server error code, if the gateway supplied one
    pub fn api_code(&self) -> Option<&str> {
        match self {
            WioError::Api { code, .. } => code.as_deref(),
            _ => None,
        }
    }
}

/// Result type alias for gateway operations
pub type WioResult<T> = Result<T, WioError>;
