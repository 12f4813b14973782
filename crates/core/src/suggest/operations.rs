use serde_json::Value;

use crate::records::{split_sort_key, Draft, Patch, RecordKind};
use crate::storage::RecordStore;

use super::{RuleEngine, SuggestionError, SuggestionRequest};

/// Generates a suggestion for one draft and stores it under `data.suggestion`.
///
/// Returns the stored suggestion.
pub async fn generate_suggestion(
    store: &dyn RecordStore,
    engine: &dyn RuleEngine,
    request: &SuggestionRequest,
) -> Result<Value, SuggestionError> {
    if !matches!(
        split_sort_key(&request.type_and_timestamp),
        Some((RecordKind::Draft, _))
    ) {
        return Err(SuggestionError::NotADraft(
            request.type_and_timestamp.clone(),
        ));
    }

    let key = request.key();
    let draft = store
        .get_record(&key)
        .await?
        .ok_or_else(|| SuggestionError::DraftNotFound(key.sort_key.clone()))?
        .decode::<Draft>()?;

    let suggestion = engine.suggest(&draft).await?;

    let patch = Patch::new().set("suggestion", suggestion.clone());
    store.update_record(&key, &patch).await?;

    Ok(suggestion)
}
