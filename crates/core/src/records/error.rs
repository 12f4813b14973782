use thiserror::Error;

use crate::storage::RepositoryError;

use super::types::DraftState;

/// Errors raised while validating a request, before any store access.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid entry in required timestamp field: {0:?}")]
    InvalidTimestamp(String),
    #[error("Update must set at least one field")]
    EmptyPatch,
    #[error("Invalid draft state transition: {from} -> {to}")]
    InvalidStateTransition { from: DraftState, to: DraftState },
    #[error("Invalid request body: {0}")]
    InvalidBody(String),
}

/// Errors returned by record operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        assert_eq!(
            ValidationError::InvalidTimestamp("soon".to_string()).to_string(),
            "Invalid entry in required timestamp field: \"soon\""
        );
        assert_eq!(
            ValidationError::EmptyPatch.to_string(),
            "Update must set at least one field"
        );
        assert_eq!(
            ValidationError::InvalidStateTransition {
                from: DraftState::Outbox,
                to: DraftState::Pending,
            }
            .to_string(),
            "Invalid draft state transition: outbox -> pending"
        );
    }

    #[test]
    fn test_record_error_is_transparent() {
        let error = RecordError::from(RepositoryError::QueryFailed("boom".to_string()));
        assert_eq!(error.to_string(), "Query failed: boom");
    }
}
