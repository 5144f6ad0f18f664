//! Error types for the REST store client.

use thiserror::Error;

/// Result type alias for store client operations.
pub type Result<T> = std::result::Result<T, StoreClientError>;

/// Errors that can occur while talking to the remote store.
#[derive(Debug, Error)]
pub enum StoreClientError {
    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error response from the store's REST API
    #[error("store error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Invalid request (missing required data, etc.)
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Authentication error (missing or invalid credentials)
    #[error("authentication error: {0}")]
    Auth(String),
}

impl StoreClientError {
    /// Create an API error from status and message
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Create an invalid request error
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Create an auth error
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth(message.into())
    }

    /// HTTP status if this is an API error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Repositories consume store failures as rollback-triggering remote errors
/// carrying the store's human-readable message.
impl From<StoreClientError> for swimlog_core::Error {
    fn from(err: StoreClientError) -> Self {
        swimlog_core::Error::remote(err.to_string())
    }
}
