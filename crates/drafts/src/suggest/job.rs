use drafts_core::storage::RecordStore;
use drafts_core::suggest::{generate_suggestion, RuleEngine, SuggestionRequest};

/// Runs one suggestion job to completion.
///
/// Failures are logged and dropped; the draft is left without a suggestion.
pub async fn run_suggestion_job(
    store: &dyn RecordStore,
    engine: &dyn RuleEngine,
    request: &SuggestionRequest,
) {
    match generate_suggestion(store, engine, request).await {
        Ok(suggestion) => tracing::info!(
            owner = %request.user_id,
            sort_key = %request.type_and_timestamp,
            %suggestion,
            "Stored suggestion"
        ),
        Err(err) => tracing::error!(
            owner = %request.user_id,
            sort_key = %request.type_and_timestamp,
            error = %err,
            "Suggestion job failed"
        ),
    }
}
