mod error;
mod keys;
mod operations;
mod patch;
mod requests;
mod timestamp;
mod types;

pub use error::{RecordError, ValidationError};
pub use keys::{format_timestamp, sort_key, split_sort_key, RecordKind, DRAFT_PREFIX, RULE_PREFIX};
pub use operations::{
    create_draft, create_drafts, create_rule, delete_draft, delete_rule, drafts_in_state,
    get_draft, list_drafts, list_rules, next_pending_draft, outbox_drafts, update_draft,
    update_rule, DraftBatch,
};
pub use patch::Patch;
pub use requests::{CreateDraft, CreateRule, DumpRequest, UpdateDraft, UpdateRule};
pub use timestamp::{is_valid_iso_timestamp, validate_timestamp};
pub use types::{
    Draft, DraftRecord, DraftState, OwnerId, Record, Rule, RuleRecord, StoredRecord,
};
