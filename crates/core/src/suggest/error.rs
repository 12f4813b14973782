use thiserror::Error;

use crate::storage::RepositoryError;

/// Errors raised while generating a suggestion.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SuggestionError {
    #[error("Not a draft key: {0}")]
    NotADraft(String),
    #[error("Draft not found: {0}")]
    DraftNotFound(String),
    #[error("Invocation failed: {0}")]
    Invocation(String),
    #[error("Undecodable suggestion payload: {0}")]
    Decode(String),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
