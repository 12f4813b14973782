//! Suggestion job handler.
//!
//! Receives one `SuggestionRequest` per invocation, asks the rule engine
//! function for a suggestion and stores it on the draft.

use std::sync::Arc;

use lambda_runtime::{service_fn, Error, LambdaEvent};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use drafts_assistant::storage::DynamoDbRecordStore;
use drafts_assistant::suggest::{run_suggestion_job, LambdaRuleEngine};
use drafts_assistant::Config;
use drafts_core::suggest::SuggestionRequest;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "drafts_assistant=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .without_time()
                .with_current_span(false),
        )
        .init();

    let config = Config::from_env();
    let sdk_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let store = Arc::new(DynamoDbRecordStore::from_sdk_config(
        &sdk_config,
        &config.table_name,
    ));
    let engine = Arc::new(LambdaRuleEngine::from_sdk_config(
        &sdk_config,
        &config.rule_engine_function_name,
    ));

    lambda_runtime::run(service_fn(move |event: LambdaEvent<SuggestionRequest>| {
        let store = store.clone();
        let engine = engine.clone();
        async move {
            run_suggestion_job(store.as_ref(), engine.as_ref(), &event.payload).await;
            Ok::<(), Error>(())
        }
    }))
    .await
}
