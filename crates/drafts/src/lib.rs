//! Imperative shell for drafts-assistant.
//!
//! Wires the pure operations from `drafts_core` to concrete storage backends,
//! suggestion dispatchers and the HTTP router shared by every entry point.

pub mod app;
pub mod config;
pub mod context;
pub mod handlers;
pub mod state;
pub mod storage;
pub mod suggest;

pub use app::create_app;
pub use config::Config;
pub use state::AppState;
