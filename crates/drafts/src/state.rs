//! Application state with trait-object backends.
//!
//! This module defines the shared application state passed to all request
//! handlers. Backends are selected at compile time via feature flags.

use std::sync::Arc;

use drafts_core::storage::RecordStore;
use drafts_core::suggest::SuggestionDispatcher;

use crate::config::Config;

/// Shared application state.
///
/// Cloned for each request handler.
#[derive(Clone)]
pub struct AppState {
    /// Record store for rules and drafts.
    pub store: Arc<dyn RecordStore>,
    /// Hand-off point for suggestion jobs.
    pub dispatcher: Arc<dyn SuggestionDispatcher>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates a new AppState from already constructed backends.
    pub fn build(
        store: Arc<dyn RecordStore>,
        dispatcher: Arc<dyn SuggestionDispatcher>,
        config: Config,
    ) -> Self {
        Self {
            store,
            dispatcher,
            config: Arc::new(config),
        }
    }

    /// Creates AppState with the backends enabled by the build's features.
    ///
    /// - `dynamodb`: DynamoDB store, otherwise in-memory
    /// - `lambda`: suggestion jobs go to the suggestion function, otherwise
    ///   they run in-process against an unconfigured rule engine
    pub async fn new(config: Config) -> Result<Self, anyhow::Error> {
        #[cfg(any(feature = "dynamodb", feature = "lambda"))]
        let sdk_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;

        #[cfg(feature = "dynamodb")]
        let store: Arc<dyn RecordStore> = Arc::new(
            crate::storage::DynamoDbRecordStore::from_sdk_config(&sdk_config, &config.table_name),
        );
        #[cfg(not(feature = "dynamodb"))]
        let store: Arc<dyn RecordStore> = Arc::new(crate::storage::InMemoryRecordStore::new());

        #[cfg(feature = "lambda")]
        let dispatcher: Arc<dyn SuggestionDispatcher> = Arc::new(
            crate::suggest::LambdaDispatcher::from_sdk_config(
                &sdk_config,
                &config.suggestion_function_name,
            ),
        );
        #[cfg(not(feature = "lambda"))]
        let dispatcher: Arc<dyn SuggestionDispatcher> = Arc::new(
            crate::suggest::LocalDispatcher::new(
                store.clone(),
                Arc::new(crate::suggest::UnconfiguredRuleEngine),
            ),
        );

        tracing::info!(
            table = %config.table_name,
            dynamodb = cfg!(feature = "dynamodb"),
            lambda = cfg!(feature = "lambda"),
            draft_routes = config.expose_draft_routes,
            "Application state ready"
        );

        Ok(Self::build(store, dispatcher, config))
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use drafts_core::suggest::{SuggestionError, SuggestionRequest};

    use super::*;
    use crate::storage::InMemoryRecordStore;

    /// Dispatcher that records requests instead of running them.
    #[derive(Default)]
    pub struct RecordingDispatcher {
        pub requests: Mutex<Vec<SuggestionRequest>>,
        pub fail: bool,
    }

    #[async_trait]
    impl SuggestionDispatcher for RecordingDispatcher {
        async fn dispatch(&self, request: SuggestionRequest) -> Result<(), SuggestionError> {
            self.requests.lock().unwrap().push(request);
            if self.fail {
                return Err(SuggestionError::Invocation("dispatch refused".to_string()));
            }
            Ok(())
        }
    }

    impl AppState {
        /// In-memory state with a recording dispatcher.
        pub fn for_tests(config: Config) -> (Self, Arc<RecordingDispatcher>) {
            Self::with_dispatcher(config, RecordingDispatcher::default())
        }

        pub fn with_dispatcher(
            config: Config,
            dispatcher: RecordingDispatcher,
        ) -> (Self, Arc<RecordingDispatcher>) {
            let dispatcher = Arc::new(dispatcher);
            let state = Self::build(
                Arc::new(InMemoryRecordStore::new()),
                dispatcher.clone(),
                config,
            );
            (state, dispatcher)
        }
    }

    impl Default for AppState {
        fn default() -> Self {
            Self::for_tests(Config::default()).0
        }
    }
}
