//! Suggestion generation for drafts.
//!
//! A draft is handed to an external rule engine and the opaque value it
//! returns is stored on the draft. The job runs out of band of the request
//! that created the draft.

mod error;
mod operations;
mod traits;
mod types;

pub use error::SuggestionError;
pub use operations::generate_suggestion;
pub use traits::{RuleEngine, SuggestionDispatcher};
pub use types::SuggestionRequest;
