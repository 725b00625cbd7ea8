//! Client error types

use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// Connect, DNS, timeout or body read failure
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Response body does not have the expected shape
    #[error("Invalid response from {endpoint} (HTTP {status}): {source}")]
    Decode {
        endpoint: String,
        status: u16,
        #[source]
        source: serde_json::Error,
    },

    /// Order identifier rejected before any request was made
    #[error("Invalid order ID: {0:?}")]
    InvalidOrderId(String),

    /// Required environment variable is unset or empty
    #[error("Missing environment variable: {0}")]
    MissingEnv(&'static str),

    /// Configuration value is present but unusable
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

impl ClientError {
    /// The service refused the credential (HTTP 401/403 with an unusable body)
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Decode { status: 401 | 403, .. })
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
