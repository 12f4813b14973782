//! Functional core for drafts-assistant.
//!
//! Pure types and functions shared by every storage backend and entry point:
//! record shapes, key templating, timestamp validation, partial updates and
//! the traits the imperative shell implements. Nothing here performs I/O.

pub mod records;
pub mod storage;
pub mod suggest;
