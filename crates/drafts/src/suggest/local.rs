//! In-process suggestion dispatch and the fallback rule engine.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use drafts_core::records::DraftRecord;
use drafts_core::storage::RecordStore;
use drafts_core::suggest::{RuleEngine, SuggestionDispatcher, SuggestionError, SuggestionRequest};

use super::job::run_suggestion_job;

/// Runs suggestion jobs on a spawned tokio task.
#[derive(Clone)]
pub struct LocalDispatcher {
    store: Arc<dyn RecordStore>,
    engine: Arc<dyn RuleEngine>,
}

impl LocalDispatcher {
    pub fn new(store: Arc<dyn RecordStore>, engine: Arc<dyn RuleEngine>) -> Self {
        Self { store, engine }
    }
}

#[async_trait]
impl SuggestionDispatcher for LocalDispatcher {
    async fn dispatch(&self, request: SuggestionRequest) -> Result<(), SuggestionError> {
        let store = self.store.clone();
        let engine = self.engine.clone();

        tracing::debug!(sort_key = %request.type_and_timestamp, "Spawning suggestion job");
        tokio::spawn(async move {
            run_suggestion_job(store.as_ref(), engine.as_ref(), &request).await;
        });

        Ok(())
    }
}

/// Rule engine used when no engine function is reachable.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredRuleEngine;

#[async_trait]
impl RuleEngine for UnconfiguredRuleEngine {
    async fn suggest(&self, _draft: &DraftRecord) -> Result<Value, SuggestionError> {
        Err(SuggestionError::Invocation(
            "No rule engine configured".to_string(),
        ))
    }
}
