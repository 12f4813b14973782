//! Record operations over any [`RecordStore`].
//!
//! Each operation validates its input first, then performs a single store call.
//! Updates of a draft's `state` additionally read the current record, and a
//! create whose key is taken looks up the newest key before retrying. The
//! owner is always passed in explicitly.

use chrono::{DateTime, Duration, Utc};
use serde::{de::DeserializeOwned, Serialize};

use crate::storage::{RecordKey, RecordQuery, RecordStore, RepositoryError};

use super::error::{RecordError, ValidationError};
use super::keys::{format_timestamp, sort_key, split_sort_key, RecordKind};
use super::requests::{CreateDraft, CreateRule, UpdateDraft, UpdateRule};
use super::timestamp::validate_timestamp;
use super::types::{Draft, DraftRecord, DraftState, OwnerId, Record, RuleRecord};

type Result<T> = std::result::Result<T, RecordError>;

// ============================================================================
// Shared helpers
// ============================================================================

/// Puts tried per record before a taken key is reported.
const MAX_KEY_ATTEMPTS: usize = 4;

/// Puts a new record stamped with `now`, moving its key past taken ones.
///
/// Returns the record with the creation time its key ended up with.
async fn insert_record<T: Serialize>(
    store: &dyn RecordStore,
    owner: &OwnerId,
    kind: RecordKind,
    data: T,
    now: DateTime<Utc>,
) -> Result<(Record<T>, DateTime<Utc>)> {
    let mut at = now;
    let mut record = Record::new(owner.clone(), kind, &format_timestamp(at), data);
    let mut attempt = 1;

    loop {
        match store.put_record(&record.to_stored()?).await {
            Ok(()) => return Ok((record, at)),
            Err(RepositoryError::AlreadyExists { .. }) if attempt < MAX_KEY_ATTEMPTS => {
                at = next_free_time(store, owner, kind, at).await?;
                record.type_and_timestamp = sort_key(kind, &format_timestamp(at));
                attempt += 1;
            }
            Err(err) => return Err(err.into()),
        }
    }
}

/// One millisecond past both `taken` and the newest stored key of `kind`.
async fn next_free_time(
    store: &dyn RecordStore,
    owner: &OwnerId,
    kind: RecordKind,
    taken: DateTime<Utc>,
) -> Result<DateTime<Utc>> {
    let records = store
        .query_records(&RecordQuery::new(owner.clone(), kind))
        .await?;
    let newest = records
        .last()
        .and_then(|r| split_sort_key(&r.type_and_timestamp))
        .and_then(|(_, ts)| DateTime::parse_from_rfc3339(ts).ok())
        .map(|ts| ts.with_timezone(&Utc));

    let latest = newest.map_or(taken, |newest| newest.max(taken));
    Ok(latest + Duration::milliseconds(1))
}

async fn create_record<T: Serialize>(
    store: &dyn RecordStore,
    owner: &OwnerId,
    kind: RecordKind,
    data: T,
    now: DateTime<Utc>,
) -> Result<Record<T>> {
    Ok(insert_record(store, owner, kind, data, now).await?.0)
}

async fn query_typed<T: DeserializeOwned>(
    store: &dyn RecordStore,
    query: &RecordQuery,
) -> Result<Vec<Record<T>>> {
    let records = store.query_records(query).await?;
    let decoded = records
        .into_iter()
        .map(|r| r.decode::<T>())
        .collect::<std::result::Result<Vec<_>, RepositoryError>>()?;
    Ok(decoded)
}

fn lookup_key(owner: &OwnerId, kind: RecordKind, timestamp: &str) -> Result<RecordKey> {
    let timestamp = validate_timestamp(timestamp)?;
    Ok(RecordKey::new(owner.clone(), kind, timestamp))
}

// ============================================================================
// Rules
// ============================================================================

/// Creates a rule stamped with `now`.
pub async fn create_rule(
    store: &dyn RecordStore,
    owner: &OwnerId,
    request: CreateRule,
    now: DateTime<Utc>,
) -> Result<RuleRecord> {
    create_record(store, owner, RecordKind::Rule, request.into_rule(), now).await
}

/// Lists every rule of `owner`, oldest first.
pub async fn list_rules(store: &dyn RecordStore, owner: &OwnerId) -> Result<Vec<RuleRecord>> {
    query_typed(store, &RecordQuery::new(owner.clone(), RecordKind::Rule)).await
}

/// Overwrites the given fields of the rule created at `timestamp`.
pub async fn update_rule(
    store: &dyn RecordStore,
    owner: &OwnerId,
    timestamp: &str,
    request: UpdateRule,
) -> Result<()> {
    let key = lookup_key(owner, RecordKind::Rule, timestamp)?;
    let patch = request.into_patch()?;
    store.update_record(&key, &patch).await?;
    Ok(())
}

/// Deletes the rule created at `timestamp`.
pub async fn delete_rule(store: &dyn RecordStore, owner: &OwnerId, timestamp: &str) -> Result<()> {
    let key = lookup_key(owner, RecordKind::Rule, timestamp)?;
    store.delete_record(&key).await?;
    Ok(())
}

// ============================================================================
// Drafts
// ============================================================================

/// Creates a pending draft stamped with `now`.
pub async fn create_draft(
    store: &dyn RecordStore,
    owner: &OwnerId,
    request: CreateDraft,
    now: DateTime<Utc>,
) -> Result<DraftRecord> {
    create_record(store, owner, RecordKind::Draft, request.into_draft(), now).await
}

/// Outcome of [`create_drafts`].
#[derive(Debug)]
pub struct DraftBatch {
    /// Drafts stored before the batch stopped, in submission order.
    pub created: Vec<DraftRecord>,
    /// The error that stopped the batch, if any.
    pub failure: Option<RecordError>,
}

/// Creates a batch of drafts.
///
/// Each draft is stamped at least 1 ms after the previous one, so keys stay
/// unique and sort in submission order. Stops at the first failure; drafts
/// created before it stay stored and are reported in `created`.
pub async fn create_drafts(
    store: &dyn RecordStore,
    owner: &OwnerId,
    requests: Vec<CreateDraft>,
    now: DateTime<Utc>,
) -> DraftBatch {
    let mut created = Vec::with_capacity(requests.len());
    let mut next_at = now;

    for request in requests {
        match insert_record(store, owner, RecordKind::Draft, request.into_draft(), next_at).await {
            Ok((draft, at)) => {
                next_at = at + Duration::milliseconds(1);
                created.push(draft);
            }
            Err(err) => {
                return DraftBatch {
                    created,
                    failure: Some(err),
                };
            }
        }
    }

    DraftBatch {
        created,
        failure: None,
    }
}

/// Gets a draft by key.
pub async fn get_draft(store: &dyn RecordStore, key: &RecordKey) -> Result<Option<DraftRecord>> {
    match store.get_record(key).await? {
        Some(record) => Ok(Some(record.decode()?)),
        None => Ok(None),
    }
}

/// Lists every draft of `owner`, oldest first.
pub async fn list_drafts(store: &dyn RecordStore, owner: &OwnerId) -> Result<Vec<DraftRecord>> {
    query_typed(store, &RecordQuery::new(owner.clone(), RecordKind::Draft)).await
}

/// Lists the drafts of `owner` in `state`, oldest first.
pub async fn drafts_in_state(
    store: &dyn RecordStore,
    owner: &OwnerId,
    state: DraftState,
) -> Result<Vec<DraftRecord>> {
    let query =
        RecordQuery::new(owner.clone(), RecordKind::Draft).with_filter("state", state.as_str());
    query_typed(store, &query).await
}

/// The oldest pending draft, if any.
pub async fn next_pending_draft(
    store: &dyn RecordStore,
    owner: &OwnerId,
) -> Result<Option<DraftRecord>> {
    Ok(drafts_in_state(store, owner, DraftState::Pending)
        .await?
        .into_iter()
        .next())
}

/// Drafts whose decision has been made and are ready to be pulled.
pub async fn outbox_drafts(store: &dyn RecordStore, owner: &OwnerId) -> Result<Vec<DraftRecord>> {
    drafts_in_state(store, owner, DraftState::Outbox).await
}

/// Overwrites the given fields of the draft created at `timestamp`.
///
/// A state change is checked against the stored state first: drafts only
/// move from `pending` to `outbox`. The write then only lands while the
/// stored state is still the one that was checked.
pub async fn update_draft(
    store: &dyn RecordStore,
    owner: &OwnerId,
    timestamp: &str,
    request: UpdateDraft,
) -> Result<()> {
    let key = lookup_key(owner, RecordKind::Draft, timestamp)?;
    let next_state = request.state;
    let mut patch = request.into_patch()?;

    if let Some(next) = next_state {
        let current: Record<Draft> = get_draft(store, &key).await?.ok_or_else(|| {
            RepositoryError::NotFound {
                entity_type: RecordKind::Draft.entity_type(),
                id: key.sort_key.clone(),
            }
        })?;

        if !current.data.state.can_transition_to(next) {
            return Err(ValidationError::InvalidStateTransition {
                from: current.data.state,
                to: next,
            }
            .into());
        }

        patch = patch.expecting("state", current.data.state.as_str());
    }

    store.update_record(&key, &patch).await?;
    Ok(())
}

/// Deletes the draft created at `timestamp`.
pub async fn delete_draft(store: &dyn RecordStore, owner: &OwnerId, timestamp: &str) -> Result<()> {
    let key = lookup_key(owner, RecordKind::Draft, timestamp)?;
    store.delete_record(&key).await?;
    Ok(())
}
