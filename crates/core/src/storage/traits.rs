use async_trait::async_trait;

use crate::records::{Patch, StoredRecord};

use super::{RecordKey, RecordQuery, Result};

/// Key-value access to the single records table.
///
/// Every method maps to exactly one call against the underlying store.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Gets a record by its key.
    async fn get_record(&self, key: &RecordKey) -> Result<Option<StoredRecord>>;

    /// Creates a new record. Fails with `AlreadyExists` if the key is taken.
    async fn put_record(&self, record: &StoredRecord) -> Result<()>;

    /// Lists the records matching a prefix query, oldest first.
    async fn query_records(&self, query: &RecordQuery) -> Result<Vec<StoredRecord>>;

    /// Overwrites the patched payload fields of an existing record.
    ///
    /// Fails with `NotFound` if the key is missing and with `Conflict` if the
    /// patch's expected field value no longer matches.
    async fn update_record(&self, key: &RecordKey, patch: &Patch) -> Result<()>;

    /// Deletes a record. Deleting a missing key is not an error.
    async fn delete_record(&self, key: &RecordKey) -> Result<()>;
}
