//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Rate policy parameters out of range
    #[error("Invalid rate policy: {0}")]
    InvalidRatePolicy(String),

    /// Document key does not satisfy naming rules
    #[error("Invalid document key: {0}")]
    InvalidDocumentKey(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_rate_policy_message() {
        let err = DomainError::InvalidRatePolicy("max_requests must be positive".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid rate policy: max_requests must be positive"
        );
    }

    #[test]
    fn invalid_document_key_message() {
        let err = DomainError::InvalidDocumentKey("a/b".to_string());
        assert_eq!(err.to_string(), "Invalid document key: a/b");
    }
}
