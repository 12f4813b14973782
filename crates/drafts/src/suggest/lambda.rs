//! Lambda-backed suggestion dispatch and rule engine.

use async_trait::async_trait;
use aws_sdk_lambda::primitives::Blob;
use aws_sdk_lambda::types::InvocationType;
use aws_sdk_lambda::Client;
use serde_json::Value;

use drafts_core::records::DraftRecord;
use drafts_core::suggest::{RuleEngine, SuggestionDispatcher, SuggestionError, SuggestionRequest};

/// Dispatches suggestion jobs as asynchronous `Event` invocations.
pub struct LambdaDispatcher {
    client: Client,
    function_name: String,
}

impl LambdaDispatcher {
    pub fn new(client: Client, function_name: impl Into<String>) -> Self {
        Self {
            client,
            function_name: function_name.into(),
        }
    }

    pub fn from_sdk_config(config: &aws_config::SdkConfig, function_name: impl Into<String>) -> Self {
        Self::new(Client::new(config), function_name)
    }
}

#[async_trait]
impl SuggestionDispatcher for LambdaDispatcher {
    async fn dispatch(&self, request: SuggestionRequest) -> Result<(), SuggestionError> {
        let payload = serde_json::to_vec(&request)
            .map_err(|e| SuggestionError::Invocation(format!("Unencodable request: {e}")))?;

        self.client
            .invoke()
            .function_name(&self.function_name)
            .invocation_type(InvocationType::Event)
            .payload(Blob::new(payload))
            .send()
            .await
            .map_err(|e| {
                SuggestionError::Invocation(format!("Failed to invoke {}: {e}", self.function_name))
            })?;

        tracing::debug!(
            function = %self.function_name,
            sort_key = %request.type_and_timestamp,
            "Dispatched suggestion job"
        );
        Ok(())
    }
}

/// Rule engine reached through a synchronous `RequestResponse` invocation.
///
/// The function receives the full draft record and returns the suggestion.
pub struct LambdaRuleEngine {
    client: Client,
    function_name: String,
}

impl LambdaRuleEngine {
    pub fn new(client: Client, function_name: impl Into<String>) -> Self {
        Self {
            client,
            function_name: function_name.into(),
        }
    }

    pub fn from_sdk_config(config: &aws_config::SdkConfig, function_name: impl Into<String>) -> Self {
        Self::new(Client::new(config), function_name)
    }
}

#[async_trait]
impl RuleEngine for LambdaRuleEngine {
    async fn suggest(&self, draft: &DraftRecord) -> Result<Value, SuggestionError> {
        let payload = serde_json::to_vec(draft)
            .map_err(|e| SuggestionError::Invocation(format!("Unencodable draft: {e}")))?;

        let output = self
            .client
            .invoke()
            .function_name(&self.function_name)
            .invocation_type(InvocationType::RequestResponse)
            .payload(Blob::new(payload))
            .send()
            .await
            .map_err(|e| {
                SuggestionError::Invocation(format!("Failed to invoke {}: {e}", self.function_name))
            })?;

        decode_engine_response(
            output.function_error(),
            output.payload().map(|blob| blob.as_ref()),
        )
    }
}

/// Interprets the outcome of a rule engine invocation.
pub fn decode_engine_response(
    function_error: Option<&str>,
    payload: Option<&[u8]>,
) -> Result<Value, SuggestionError> {
    if let Some(kind) = function_error {
        let detail = payload
            .map(|p| String::from_utf8_lossy(p).into_owned())
            .unwrap_or_default();
        return Err(SuggestionError::Invocation(format!(
            "Rule engine raised {kind}: {detail}"
        )));
    }

    let payload = payload.ok_or_else(|| SuggestionError::Decode("Empty payload".to_string()))?;
    serde_json::from_slice(payload).map_err(|e| SuggestionError::Decode(e.to_string()))
}
