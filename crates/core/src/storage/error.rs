use thiserror::Error;

/// Errors that can occur during repository operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },
    #[error("{entity_type} already exists: {id}")]
    AlreadyExists {
        entity_type: &'static str,
        id: String,
    },
    #[error("{entity_type} was changed concurrently: {id}")]
    Conflict {
        entity_type: &'static str,
        id: String,
    },
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Query failed: {0}")]
    QueryFailed(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_error_not_found_display() {
        let error = RepositoryError::NotFound {
            entity_type: "Draft",
            id: "draft#2024-05-01T10:00:00.000Z".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Draft not found: draft#2024-05-01T10:00:00.000Z"
        );
    }

    #[test]
    fn test_repository_error_already_exists_display() {
        let error = RepositoryError::AlreadyExists {
            entity_type: "Rule",
            id: "rule#2024-05-01T10:00:00.000Z".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Rule already exists: rule#2024-05-01T10:00:00.000Z"
        );
    }

    #[test]
    fn test_repository_error_conflict_display() {
        let error = RepositoryError::Conflict {
            entity_type: "Draft",
            id: "draft#2024-05-01T10:00:00.000Z".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Draft was changed concurrently: draft#2024-05-01T10:00:00.000Z"
        );
    }

    #[test]
    fn test_repository_error_messages() {
        assert_eq!(
            RepositoryError::ConnectionFailed("timeout".to_string()).to_string(),
            "Connection failed: timeout"
        );
        assert_eq!(
            RepositoryError::Serialization("bad json".to_string()).to_string(),
            "Serialization error: bad json"
        );
        assert_eq!(
            RepositoryError::InvalidData("missing data".to_string()).to_string(),
            "Invalid data: missing data"
        );
    }
}
