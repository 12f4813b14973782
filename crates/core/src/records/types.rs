use std::fmt;

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

use crate::storage::{RecordKey, RepositoryError};

use super::keys::{self, RecordKind};

/// Identity of the partition owner whose records are being accessed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerId(String);

impl OwnerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OwnerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for OwnerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Review state of a draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DraftState {
    /// Waiting for a user decision.
    Pending,
    /// Decision made, ready to be pulled.
    Outbox,
}

impl DraftState {
    pub fn as_str(self) -> &'static str {
        match self {
            DraftState::Pending => "pending",
            DraftState::Outbox => "outbox",
        }
    }

    /// Drafts only ever move forward: `pending -> outbox`.
    pub fn can_transition_to(self, next: DraftState) -> bool {
        matches!(
            (self, next),
            (DraftState::Pending, _) | (DraftState::Outbox, DraftState::Outbox)
        )
    }
}

impl fmt::Display for DraftState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload of a draft record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Draft {
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub state: DraftState,
    /// Opaque value produced by the rule engine.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<Value>,
}

/// Payload of a rule record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub id: String,
    #[serde(rename = "type")]
    pub rule_type: String,
    #[serde(default)]
    pub parameters: Value,
    #[serde(default)]
    pub priority: i64,
}

/// A record as laid out in the table: partition key, sort key and payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record<T> {
    pub user_id: OwnerId,
    pub type_and_timestamp: String,
    pub data: T,
}

pub type DraftRecord = Record<Draft>;
pub type RuleRecord = Record<Rule>;

/// Untyped record exchanged with storage backends.
pub type StoredRecord = Record<Value>;

impl<T> Record<T> {
    /// Creates a record of the given kind stamped with `timestamp`.
    pub fn new(owner: OwnerId, kind: RecordKind, timestamp: &str, data: T) -> Self {
        Self {
            user_id: owner,
            type_and_timestamp: keys::sort_key(kind, timestamp),
            data,
        }
    }

    pub fn key(&self) -> RecordKey {
        RecordKey {
            owner: self.user_id.clone(),
            sort_key: self.type_and_timestamp.clone(),
        }
    }

    /// The timestamp part of the sort key, if the key carries a known prefix.
    pub fn timestamp(&self) -> Option<&str> {
        keys::split_sort_key(&self.type_and_timestamp).map(|(_, ts)| ts)
    }
}

impl<T: Serialize> Record<T> {
    /// Erases the payload type for storage.
    pub fn to_stored(&self) -> Result<StoredRecord, RepositoryError> {
        let data = serde_json::to_value(&self.data)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;

        Ok(Record {
            user_id: self.user_id.clone(),
            type_and_timestamp: self.type_and_timestamp.clone(),
            data,
        })
    }
}

impl StoredRecord {
    /// Decodes the payload into a typed record.
    pub fn decode<T: DeserializeOwned>(self) -> Result<Record<T>, RepositoryError> {
        let data = serde_json::from_value(self.data).map_err(|e| {
            RepositoryError::InvalidData(format!(
                "Record {} has an invalid payload: {}",
                self.type_and_timestamp, e
            ))
        })?;

        Ok(Record {
            user_id: self.user_id,
            type_and_timestamp: self.type_and_timestamp,
            data,
        })
    }
}
