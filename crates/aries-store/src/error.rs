//! Error types for store operations.

use thiserror::Error;

use aries_client::ApiError;

/// Errors that can occur in store operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The gateway reported a failure.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The payload failed local validation; no request was sent.
    #[error("invalid payload: {0}")]
    Invalid(String),
}

impl StoreError {
    pub(crate) fn invalid(errors: validator::ValidationErrors) -> Self {
        Self::Invalid(errors.to_string())
    }

    /// Short human-readable reason recorded in `Status::Failed`.
    #[must_use]
    pub fn reason(&self) -> String {
        match self {
            Self::Api(e) => e.reason(),
            Self::Invalid(message) => message.clone(),
        }
    }
}
