//! In-memory record store implementation.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use drafts_core::records::{split_sort_key, OwnerId, Patch, StoredRecord};
use drafts_core::storage::{RecordKey, RecordQuery, RecordStore, RepositoryError, Result};

type Partition = BTreeMap<String, Value>;

/// In-memory storage backend for local runs and tests.
///
/// Partitions are keyed by owner and sorted by sort key, so prefix queries
/// come back oldest first like the table's range queries.
/// Data is not persisted and will be lost when the store is dropped.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRecordStore {
    partitions: Arc<RwLock<HashMap<OwnerId, Partition>>>,
}

impl InMemoryRecordStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn entity_type(sort_key: &str) -> &'static str {
    split_sort_key(sort_key)
        .map(|(kind, _)| kind.entity_type())
        .unwrap_or("Record")
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn get_record(&self, key: &RecordKey) -> Result<Option<StoredRecord>> {
        let partitions = self.partitions.read().await;
        Ok(partitions
            .get(&key.owner)
            .and_then(|p| p.get(&key.sort_key))
            .map(|data| StoredRecord {
                user_id: key.owner.clone(),
                type_and_timestamp: key.sort_key.clone(),
                data: data.clone(),
            }))
    }

    async fn put_record(&self, record: &StoredRecord) -> Result<()> {
        let mut partitions = self.partitions.write().await;
        let partition = partitions.entry(record.user_id.clone()).or_default();
        if partition.contains_key(&record.type_and_timestamp) {
            return Err(RepositoryError::AlreadyExists {
                entity_type: entity_type(&record.type_and_timestamp),
                id: record.type_and_timestamp.clone(),
            });
        }
        partition.insert(record.type_and_timestamp.clone(), record.data.clone());
        Ok(())
    }

    async fn query_records(&self, query: &RecordQuery) -> Result<Vec<StoredRecord>> {
        let partitions = self.partitions.read().await;
        let Some(partition) = partitions.get(&query.owner) else {
            return Ok(Vec::new());
        };

        let prefix = query.sort_key_prefix();
        Ok(partition
            .range(prefix.to_string()..)
            .take_while(|(sort_key, _)| sort_key.starts_with(prefix))
            .map(|(sort_key, data)| StoredRecord {
                user_id: query.owner.clone(),
                type_and_timestamp: sort_key.clone(),
                data: data.clone(),
            })
            .filter(|record| query.matches(record))
            .collect())
    }

    async fn update_record(&self, key: &RecordKey, patch: &Patch) -> Result<()> {
        let mut partitions = self.partitions.write().await;
        let data = partitions
            .get_mut(&key.owner)
            .and_then(|p| p.get_mut(&key.sort_key))
            .ok_or_else(|| RepositoryError::NotFound {
                entity_type: entity_type(&key.sort_key),
                id: key.sort_key.clone(),
            })?;

        let Value::Object(fields) = data else {
            return Err(RepositoryError::InvalidData(format!(
                "Record {} has a non-object payload",
                key.sort_key
            )));
        };
        if !patch.precondition_holds(fields) {
            return Err(RepositoryError::Conflict {
                entity_type: entity_type(&key.sort_key),
                id: key.sort_key.clone(),
            });
        }
        patch.apply_to(fields);
        Ok(())
    }

    async fn delete_record(&self, key: &RecordKey) -> Result<()> {
        let mut partitions = self.partitions.write().await;
        if let Some(partition) = partitions.get_mut(&key.owner) {
            partition.remove(&key.sort_key);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drafts_core::records::RecordKind;
    use serde_json::json;

    fn record(owner: &str, sort_key: &str, data: Value) -> StoredRecord {
        StoredRecord {
            user_id: OwnerId::from(owner),
            type_and_timestamp: sort_key.to_string(),
            data,
        }
    }

    #[tokio::test]
    async fn test_put_and_get() {
        let store = InMemoryRecordStore::new();
        let rule = record("abw", "rule#2024-05-01T10:00:00.000Z", json!({"id": "r-1"}));

        store.put_record(&rule).await.unwrap();

        let fetched = store.get_record(&rule.key()).await.unwrap();
        assert_eq!(fetched, Some(rule));
    }

    #[tokio::test]
    async fn test_put_existing_key_fails() {
        let store = InMemoryRecordStore::new();
        let rule = record("abw", "rule#2024-05-01T10:00:00.000Z", json!({"id": "r-1"}));

        store.put_record(&rule).await.unwrap();
        let result = store.put_record(&rule).await;

        assert!(matches!(
            result,
            Err(RepositoryError::AlreadyExists {
                entity_type: "Rule",
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_query_is_scoped_by_owner_and_prefix_in_order() {
        let store = InMemoryRecordStore::new();
        for r in [
            record("abw", "draft#2024-05-02T00:00:00.000Z", json!({"n": 2})),
            record("abw", "rule#2024-05-01T00:00:00.000Z", json!({"n": 0})),
            record("abw", "draft#2024-05-01T00:00:00.000Z", json!({"n": 1})),
            record("other", "draft#2024-05-01T00:00:00.000Z", json!({"n": 9})),
        ] {
            store.put_record(&r).await.unwrap();
        }

        let drafts = store
            .query_records(&RecordQuery::new(OwnerId::from("abw"), RecordKind::Draft))
            .await
            .unwrap();

        let numbers: Vec<_> = drafts.iter().map(|d| d.data["n"].clone()).collect();
        assert_eq!(numbers, vec![json!(1), json!(2)]);
    }

    #[tokio::test]
    async fn test_query_with_filter() {
        let store = InMemoryRecordStore::new();
        store
            .put_record(&record(
                "abw",
                "draft#2024-05-01T00:00:00.000Z",
                json!({"state": "pending"}),
            ))
            .await
            .unwrap();
        store
            .put_record(&record(
                "abw",
                "draft#2024-05-02T00:00:00.000Z",
                json!({"state": "outbox"}),
            ))
            .await
            .unwrap();

        let query =
            RecordQuery::new(OwnerId::from("abw"), RecordKind::Draft).with_filter("state", "outbox");
        let outbox = store.query_records(&query).await.unwrap();

        assert_eq!(outbox.len(), 1);
        assert_eq!(outbox[0].type_and_timestamp, "draft#2024-05-02T00:00:00.000Z");
    }

    #[tokio::test]
    async fn test_update_overwrites_only_patched_fields() {
        let store = InMemoryRecordStore::new();
        let draft = record(
            "abw",
            "draft#2024-05-01T00:00:00.000Z",
            json!({"title": "a", "content": "b"}),
        );
        store.put_record(&draft).await.unwrap();

        store
            .update_record(&draft.key(), &Patch::new().set("title", "x"))
            .await
            .unwrap();

        let fetched = store.get_record(&draft.key()).await.unwrap().unwrap();
        assert_eq!(fetched.data, json!({"title": "x", "content": "b"}));
    }

    #[tokio::test]
    async fn test_update_with_stale_expectation_conflicts() {
        let store = InMemoryRecordStore::new();
        let draft = record(
            "abw",
            "draft#2024-05-01T00:00:00.000Z",
            json!({"state": "outbox", "title": "a"}),
        );
        store.put_record(&draft).await.unwrap();

        let result = store
            .update_record(
                &draft.key(),
                &Patch::new()
                    .set("title", "x")
                    .expecting("state", "pending"),
            )
            .await;

        assert!(matches!(
            result,
            Err(RepositoryError::Conflict {
                entity_type: "Draft",
                ..
            })
        ));
        let fetched = store.get_record(&draft.key()).await.unwrap().unwrap();
        assert_eq!(fetched.data, json!({"state": "outbox", "title": "a"}));
    }

    #[tokio::test]
    async fn test_update_missing_record() {
        let store = InMemoryRecordStore::new();
        let key = RecordKey::new(
            OwnerId::from("abw"),
            RecordKind::Draft,
            "2024-05-01T00:00:00.000Z",
        );

        let result = store
            .update_record(&key, &Patch::new().set("title", "x"))
            .await;

        assert!(matches!(
            result,
            Err(RepositoryError::NotFound {
                entity_type: "Draft",
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_delete_missing_key_succeeds() {
        let store = InMemoryRecordStore::new();
        let key = RecordKey::new(
            OwnerId::from("abw"),
            RecordKind::Rule,
            "2024-05-01T00:00:00.000Z",
        );

        assert!(store.delete_record(&key).await.is_ok());
    }
}
