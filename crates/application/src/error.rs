//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
///
/// The first four variants are the outcomes of the admin guard; the rest are
/// raised by handlers working against the document store.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Admission refused until the client's window closes
    #[error("Rate limit exceeded, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    /// Missing or wrong admin secret
    #[error("Invalid secret key")]
    Unauthenticated,

    /// Secret accepted but bearer token missing or not allowed
    #[error("Invalid or missing admin token")]
    Forbidden,

    /// Requested document does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Request parameters failed validation
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Document store failure
    #[error("Storage error: {0}")]
    Storage(String),

    /// Unexpected failure anywhere in the pipeline
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Check if this error is retryable without changing the request
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimited { .. } | Self::Storage(_))
    }
}

impl From<DomainError> for ApplicationError {
    fn from(err: DomainError) -> Self {
        Self::InvalidInput(err.to_string())
    }
}
