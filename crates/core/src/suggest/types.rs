use serde::{Deserialize, Serialize};

use crate::records::{OwnerId, Record};
use crate::storage::RecordKey;

/// Event addressing the draft a suggestion should be generated for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionRequest {
    pub user_id: OwnerId,
    pub type_and_timestamp: String,
}

impl SuggestionRequest {
    pub fn for_record<T>(record: &Record<T>) -> Self {
        Self {
            user_id: record.user_id.clone(),
            type_and_timestamp: record.type_and_timestamp.clone(),
        }
    }

    pub fn key(&self) -> RecordKey {
        RecordKey {
            owner: self.user_id.clone(),
            sort_key: self.type_and_timestamp.clone(),
        }
    }
}
