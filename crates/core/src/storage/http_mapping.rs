//! Pure functions for mapping core errors to HTTP status codes.

use crate::records::{RecordError, ValidationError};

use super::RepositoryError;

/// Maps a [`RepositoryError`] to an HTTP status code.
///
/// - `NotFound` -> 404 (Not Found)
/// - `AlreadyExists` -> 409 (Conflict)
/// - `Conflict` -> 409 (Conflict)
/// - `ConnectionFailed` -> 503 (Service Unavailable)
/// - `QueryFailed` -> 500 (Internal Server Error)
/// - `Serialization` -> 500 (Internal Server Error)
/// - `InvalidData` -> 400 (Bad Request)
///
/// # Examples
///
/// ```
/// use drafts_core::storage::{RepositoryError, repository_error_to_status_code};
///
/// let error = RepositoryError::NotFound {
///     entity_type: "Rule",
///     id: "rule#2024-05-01T10:00:00.000Z".to_string(),
/// };
/// assert_eq!(repository_error_to_status_code(&error), 404);
/// ```
pub fn repository_error_to_status_code(error: &RepositoryError) -> u16 {
    match error {
        RepositoryError::NotFound { .. } => 404,
        RepositoryError::AlreadyExists { .. } | RepositoryError::Conflict { .. } => 409,
        RepositoryError::ConnectionFailed(_) => 503,
        RepositoryError::QueryFailed(_) => 500,
        RepositoryError::Serialization(_) => 500,
        RepositoryError::InvalidData(_) => 400,
    }
}

/// Every validation failure is the caller's fault: 400 (Bad Request).
pub fn validation_error_to_status_code(_error: &ValidationError) -> u16 {
    400
}

/// Maps a [`RecordError`] to an HTTP status code.
pub fn record_error_to_status_code(error: &RecordError) -> u16 {
    match error {
        RecordError::Validation(e) => validation_error_to_status_code(e),
        RecordError::Repository(e) => repository_error_to_status_code(e),
    }
}
