use serde_json::Value;

use crate::records::{OwnerId, RecordKind, StoredRecord};

/// Primary key of one record: `(userId, typeAndTimestamp)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordKey {
    pub owner: OwnerId,
    pub sort_key: String,
}

impl RecordKey {
    /// Builds the key of a `kind` record created at `timestamp`.
    pub fn new(owner: OwnerId, kind: RecordKind, timestamp: &str) -> Self {
        Self {
            owner,
            sort_key: crate::records::sort_key(kind, timestamp),
        }
    }
}

/// Equality filter on one top-level payload field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldFilter {
    pub field: String,
    pub value: Value,
}

/// Prefix query within one owner's partition.
///
/// Results come back in ascending sort key order, which is creation order.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordQuery {
    pub owner: OwnerId,
    pub kind: RecordKind,
    pub filter: Option<FieldFilter>,
}

impl RecordQuery {
    pub fn new(owner: OwnerId, kind: RecordKind) -> Self {
        Self {
            owner,
            kind,
            filter: None,
        }
    }

    /// Only return records whose `data.<field>` equals `value`.
    pub fn with_filter(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filter = Some(FieldFilter {
            field: field.into(),
            value: value.into(),
        });
        self
    }

    pub fn sort_key_prefix(&self) -> &'static str {
        self.kind.prefix()
    }

    /// Whether `record` belongs to the result set of this query.
    pub fn matches(&self, record: &StoredRecord) -> bool {
        if record.user_id != self.owner
            || !record.type_and_timestamp.starts_with(self.sort_key_prefix())
        {
            return false;
        }

        match &self.filter {
            Some(filter) => record.data.get(&filter.field) == Some(&filter.value),
            None => true,
        }
    }
}
