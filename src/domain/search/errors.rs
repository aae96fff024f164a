//! Search error types.

use thiserror::Error;

use crate::domain::foundation::ValidationError;

/// Failures a guided search surfaces to its caller.
///
/// Everything else (malformed model output, summary or ranking failures,
/// catalog and session log failures) degrades to a fallback and never appears here.
#[derive(Debug, Clone, Error)]
pub enum SearchError {
    #[error("{0}")]
    InvalidRequest(String),

    #[error("{0} not configured")]
    NotConfigured(&'static str),

    #[error("Chat failed: {0}")]
    ChatFailed(String),
}

impl SearchError {
    /// Creates an invalid request error.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }
}

impl From<ValidationError> for SearchError {
    fn from(err: ValidationError) -> Self {
        Self::InvalidRequest(err.to_string())
    }
}
