//! Storage backend implementations.
//!
//! This module provides concrete implementations of `RecordStore` from
//! `drafts_core::storage`.
//!
//! # Feature Flags
//!
//! - default: in-memory store, for local runs and tests
//! - `dynamodb`: AWS DynamoDB store using `aws-sdk-dynamodb`
//!
//! The in-memory store is always compiled. When `dynamodb` is enabled the
//! application state uses the DynamoDB store instead.
//!
//! # Examples
//!
//! Build with DynamoDB:
//! ```bash
//! cargo build -p drafts_assistant --features dynamodb
//! ```

pub mod inmemory;

#[cfg(feature = "dynamodb")]
pub mod dynamodb;

pub use inmemory::InMemoryRecordStore;

#[cfg(feature = "dynamodb")]
pub use dynamodb::DynamoDbRecordStore;
