//! In-memory storage backend.
//!
//! Stores every partition in a `BTreeMap` wrapped in `Arc<RwLock<_>>`. Used
//! for local runs and tests where persistence is not required.
//!
//! # Example
//!
//! ```rust,ignore
//! use drafts_assistant::storage::inmemory::InMemoryRecordStore;
//!
//! let store = InMemoryRecordStore::new();
//! ```

mod repository;

pub use repository::InMemoryRecordStore;
