//! DynamoDB record store implementation.
//!
//! Implements `RecordStore` from `drafts_core::storage` against the single
//! records table. Every trait method issues exactly one request; conditions
//! are evaluated by DynamoDB in the same request.

use async_trait::async_trait;
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValuesOnConditionCheckFailure};
use aws_sdk_dynamodb::Client;

use drafts_core::records::{split_sort_key, Patch, StoredRecord};
use drafts_core::storage::{RecordKey, RecordQuery, RecordStore, Result};

use super::conversions::{
    item_to_record, key_attributes, record_to_item, value_to_attribute, DATA_ATTRIBUTE,
    PARTITION_KEY, SORT_KEY,
};
use super::error::{
    map_delete_item_error, map_get_item_error, map_put_item_error, map_query_error,
    map_update_item_error,
};
use super::expressions::{build_data_update, DATA_PLACEHOLDER};

/// DynamoDB-based record store.
pub struct DynamoDbRecordStore {
    client: Client,
    table_name: String,
}

impl DynamoDbRecordStore {
    /// Creates a new store with the given DynamoDB client and table name.
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    /// Creates a new store from a loaded AWS configuration.
    pub fn from_sdk_config(config: &aws_config::SdkConfig, table_name: impl Into<String>) -> Self {
        Self::new(Client::new(config), table_name)
    }
}

fn entity_type(sort_key: &str) -> &'static str {
    split_sort_key(sort_key)
        .map(|(kind, _)| kind.entity_type())
        .unwrap_or("Record")
}

#[async_trait]
impl RecordStore for DynamoDbRecordStore {
    async fn get_record(&self, key: &RecordKey) -> Result<Option<StoredRecord>> {
        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .set_key(Some(key_attributes(key)))
            .send()
            .await
            .map_err(map_get_item_error)?;

        result.item.map(item_to_record).transpose()
    }

    async fn put_record(&self, record: &StoredRecord) -> Result<()> {
        let item = record_to_item(record)?;

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .condition_expression("attribute_not_exists(#sk)")
            .expression_attribute_names("#sk", SORT_KEY)
            .send()
            .await
            .map_err(|e| {
                map_put_item_error(
                    e,
                    entity_type(&record.type_and_timestamp),
                    record.type_and_timestamp.clone(),
                )
            })?;

        tracing::debug!(sort_key = %record.type_and_timestamp, "Put record");
        Ok(())
    }

    async fn query_records(&self, query: &RecordQuery) -> Result<Vec<StoredRecord>> {
        let mut request = self
            .client
            .query()
            .table_name(&self.table_name)
            .key_condition_expression("#pk = :pk AND begins_with(#sk, :prefix)")
            .expression_attribute_names("#pk", PARTITION_KEY)
            .expression_attribute_names("#sk", SORT_KEY)
            .expression_attribute_values(":pk", AttributeValue::S(query.owner.to_string()))
            .expression_attribute_values(
                ":prefix",
                AttributeValue::S(query.sort_key_prefix().to_string()),
            )
            .scan_index_forward(true);

        if let Some(filter) = &query.filter {
            request = request
                .filter_expression(format!("{DATA_PLACEHOLDER}.#filter = :filter"))
                .expression_attribute_names(DATA_PLACEHOLDER, DATA_ATTRIBUTE)
                .expression_attribute_names("#filter", &filter.field)
                .expression_attribute_values(":filter", value_to_attribute(&filter.value)?);
        }

        let result = request.send().await.map_err(map_query_error)?;

        result
            .items
            .unwrap_or_default()
            .into_iter()
            .map(item_to_record)
            .collect()
    }

    async fn update_record(&self, key: &RecordKey, patch: &Patch) -> Result<()> {
        let update = build_data_update(patch)?;

        self.client
            .update_item()
            .table_name(&self.table_name)
            .set_key(Some(key_attributes(key)))
            .update_expression(update.expression)
            .condition_expression(update.condition)
            .set_expression_attribute_names(Some(update.names))
            .expression_attribute_names("#sk", SORT_KEY)
            .set_expression_attribute_values(Some(update.values))
            .return_values_on_condition_check_failure(ReturnValuesOnConditionCheckFailure::AllOld)
            .send()
            .await
            .map_err(|e| map_update_item_error(e, entity_type(&key.sort_key), key.sort_key.clone()))?;

        tracing::debug!(sort_key = %key.sort_key, fields = patch.len(), "Updated record");
        Ok(())
    }

    async fn delete_record(&self, key: &RecordKey) -> Result<()> {
        self.client
            .delete_item()
            .table_name(&self.table_name)
            .set_key(Some(key_attributes(key)))
            .send()
            .await
            .map_err(map_delete_item_error)?;

        Ok(())
    }
}
