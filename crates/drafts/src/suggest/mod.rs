//! Suggestion job dispatch and execution.
//!
//! - `LocalDispatcher` runs jobs on the current runtime
//! - `LambdaDispatcher` hands them to the suggestion function (feature `lambda`)

mod job;
#[cfg(feature = "lambda")]
mod lambda;
mod local;

pub use job::run_suggestion_job;
#[cfg(feature = "lambda")]
pub use lambda::{decode_engine_response, LambdaDispatcher, LambdaRuleEngine};
pub use local::{LocalDispatcher, UnconfiguredRuleEngine};
