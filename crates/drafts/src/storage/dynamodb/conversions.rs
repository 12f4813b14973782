//! DynamoDB attribute conversion functions.
//!
//! Pure functions for converting between DynamoDB items and stored records.
//! These are testable in isolation without DynamoDB access.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use serde_dynamo::aws_sdk_dynamodb_1::{from_item, to_attribute_value, to_item};
use serde_json::Value;

use drafts_core::records::StoredRecord;
use drafts_core::storage::{RecordKey, RepositoryError};

/// Partition key attribute.
pub const PARTITION_KEY: &str = "userId";
/// Sort key attribute.
pub const SORT_KEY: &str = "typeAndTimestamp";
/// Payload map attribute.
pub const DATA_ATTRIBUTE: &str = "data";

pub type Item = HashMap<String, AttributeValue>;

/// Convert a stored record to a DynamoDB item.
pub fn record_to_item(record: &StoredRecord) -> Result<Item, RepositoryError> {
    if !record.data.is_object() {
        return Err(RepositoryError::Serialization(format!(
            "Record {} payload must be an object",
            record.type_and_timestamp
        )));
    }

    to_item(record).map_err(|e| RepositoryError::Serialization(e.to_string()))
}

/// Convert a DynamoDB item to a stored record.
pub fn item_to_record(item: Item) -> Result<StoredRecord, RepositoryError> {
    from_item(item).map_err(|e| RepositoryError::InvalidData(e.to_string()))
}

/// Convert a payload value to an attribute value.
pub fn value_to_attribute(value: &Value) -> Result<AttributeValue, RepositoryError> {
    to_attribute_value(value).map_err(|e| RepositoryError::Serialization(e.to_string()))
}

/// Key attributes addressing one record.
pub fn key_attributes(key: &RecordKey) -> Item {
    HashMap::from([
        (
            PARTITION_KEY.to_string(),
            AttributeValue::S(key.owner.to_string()),
        ),
        (
            SORT_KEY.to_string(),
            AttributeValue::S(key.sort_key.clone()),
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use drafts_core::records::OwnerId;
    use serde_json::json;

    fn rule() -> StoredRecord {
        StoredRecord {
            user_id: OwnerId::from("abw"),
            type_and_timestamp: "rule#2024-05-01T10:00:00.000Z".to_string(),
            data: json!({"id": "r-1", "type": "regex", "priority": 2}),
        }
    }

    #[test]
    fn test_record_to_item_layout() {
        let item = record_to_item(&rule()).unwrap();

        assert_eq!(item.len(), 3);
        assert_eq!(item.get(PARTITION_KEY), Some(&AttributeValue::S("abw".to_string())));
        assert_eq!(
            item.get(SORT_KEY),
            Some(&AttributeValue::S("rule#2024-05-01T10:00:00.000Z".to_string()))
        );

        let data = item.get(DATA_ATTRIBUTE).unwrap().as_m().unwrap();
        assert_eq!(data.get("type"), Some(&AttributeValue::S("regex".to_string())));
        assert_eq!(data.get("priority"), Some(&AttributeValue::N("2".to_string())));
    }

    #[test]
    fn test_item_to_record() {
        let item = record_to_item(&rule()).unwrap();

        assert_eq!(item_to_record(item).unwrap(), rule());
    }

    #[test]
    fn test_non_object_payload_is_rejected() {
        let mut record = rule();
        record.data = json!("flat");

        assert!(matches!(
            record_to_item(&record),
            Err(RepositoryError::Serialization(_))
        ));
    }

    #[test]
    fn test_item_missing_key_is_invalid() {
        let mut item = record_to_item(&rule()).unwrap();
        item.remove(SORT_KEY);

        assert!(matches!(
            item_to_record(item),
            Err(RepositoryError::InvalidData(_))
        ));
    }

    #[test]
    fn test_key_attributes() {
        let key = rule().key();
        let attributes = key_attributes(&key);

        assert_eq!(attributes.len(), 2);
        assert_eq!(
            attributes.get(SORT_KEY),
            Some(&AttributeValue::S(key.sort_key.clone()))
        );
    }
}
