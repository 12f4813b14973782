use async_trait::async_trait;
use serde_json::Value;

use crate::records::DraftRecord;

use super::{SuggestionError, SuggestionRequest};

/// Hands a suggestion job off for asynchronous execution.
///
/// Returning `Ok` only means the job was accepted, not that it succeeded.
#[async_trait]
pub trait SuggestionDispatcher: Send + Sync {
    async fn dispatch(&self, request: SuggestionRequest) -> Result<(), SuggestionError>;
}

/// External collaborator that turns a draft into an opaque suggestion.
#[async_trait]
pub trait RuleEngine: Send + Sync {
    async fn suggest(&self, draft: &DraftRecord) -> Result<Value, SuggestionError>;
}
