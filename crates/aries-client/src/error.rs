//! Error types for API operations.

use thiserror::Error;

/// Errors that can occur during API operations.
///
/// Transport failure, non-2xx status, and malformed payloads are all
/// normalized into one value carrying a message. No retries happen at this
/// layer; retry policy, if any, belongs to the caller.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Network or HTTP transport error.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Server returned a non-2xx status.
    #[error("server error: {status} - {message}")]
    Server {
        /// HTTP status code.
        status: u16,
        /// Error message from the server body.
        message: String,
    },

    /// Server answered 2xx but the envelope reported `success: false`.
    #[error("{0}")]
    Rejected(String),

    /// Failed to deserialize the response.
    #[error("invalid response format: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    /// Short human-readable reason suitable for store `Failed` status.
    #[must_use]
    pub fn reason(&self) -> String {
        match self {
            Self::Network(e) if e.is_timeout() => "request timed out".to_string(),
            Self::Network(_) => "network error".to_string(),
            Self::Server { status, message } => {
                if message.is_empty() {
                    format!("server error ({status})")
                } else {
                    message.clone()
                }
            }
            Self::Rejected(message) => message.clone(),
            Self::InvalidResponse(_) => "invalid server response".to_string(),
        }
    }

    /// Whether this error came from an unauthorized (401) response.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Server { status: 401, .. })
    }
}

/// Result type for API operations.
pub type ApiResult<T> = Result<T, ApiError>;
