//! Sort key generation functions.
//!
//! Pure functions for templating the composite sort key of the single-table design.
//! Both record kinds share one partition per owner and are told apart by a prefix.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Key prefixes
// ============================================================================

pub const DRAFT_PREFIX: &str = "draft#";
pub const RULE_PREFIX: &str = "rule#";

/// Kind of record, encoded as the sort key prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Draft,
    Rule,
}

impl RecordKind {
    /// Pattern: `draft#` / `rule#`
    pub fn prefix(self) -> &'static str {
        match self {
            RecordKind::Draft => DRAFT_PREFIX,
            RecordKind::Rule => RULE_PREFIX,
        }
    }

    /// Name used in error messages.
    pub fn entity_type(self) -> &'static str {
        match self {
            RecordKind::Draft => "Draft",
            RecordKind::Rule => "Rule",
        }
    }
}

// ============================================================================
// Sort keys
// ============================================================================

/// Generate the sort key for a record.
///
/// Pattern: `<kind>#<timestamp>`
pub fn sort_key(kind: RecordKind, timestamp: &str) -> String {
    format!("{}{timestamp}", kind.prefix())
}

/// Split a sort key into its kind and timestamp.
pub fn split_sort_key(sort_key: &str) -> Option<(RecordKind, &str)> {
    [RecordKind::Draft, RecordKind::Rule]
        .into_iter()
        .find_map(|kind| sort_key.strip_prefix(kind.prefix()).map(|ts| (kind, ts)))
}

/// Format a creation time the way it is embedded in sort keys.
///
/// Pattern: `YYYY-MM-DDTHH:MM:SS.sssZ` (UTC, millisecond precision), which sorts
/// lexicographically in chronological order.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}
