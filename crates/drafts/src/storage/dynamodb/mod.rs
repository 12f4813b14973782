//! DynamoDB storage backend implementation.
//!
//! Items live in a single table keyed by `userId` (partition) and
//! `typeAndTimestamp` (sort), with the record payload in the `data` map.

mod conversions;
mod error;
mod expressions;
mod repository;

pub use expressions::{build_data_update, UpdateExpression};
pub use repository::DynamoDbRecordStore;
