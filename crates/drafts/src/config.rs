use std::{env, time::Duration};

use drafts_core::records::OwnerId;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Name of the records table (default: "DraftsAssistantData")
    pub table_name: String,
    /// Owner used when a request carries no `x-owner-id` header (default: "abw")
    pub default_owner: OwnerId,
    /// Function invoked asynchronously per dumped draft (default: "GenerateSuggestion")
    pub suggestion_function_name: String,
    /// Function producing suggestions for a draft (default: "runRuleEngine")
    pub rule_engine_function_name: String,
    /// Mount the plain draft CRUD routes (default: false)
    pub expose_draft_routes: bool,
    /// Request timeout in seconds (default: 10)
    pub request_timeout_seconds: u64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `TABLE_NAME` - Records table name (default: "DraftsAssistantData")
    /// - `DEFAULT_OWNER_ID` - Fallback owner id (default: "abw")
    /// - `SUGGESTION_FUNCTION_NAME` - Suggestion job function (default: "GenerateSuggestion")
    /// - `RULE_ENGINE_FUNCTION_NAME` - Rule engine function (default: "runRuleEngine")
    /// - `EXPOSE_DRAFT_ROUTES` - Mount draft CRUD routes (default: false)
    /// - `REQUEST_TIMEOUT_SECONDS` - Request timeout (default: 10)
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            table_name: lookup("TABLE_NAME").unwrap_or_else(|| "DraftsAssistantData".to_string()),
            default_owner: lookup("DEFAULT_OWNER_ID")
                .filter(|v| !v.trim().is_empty())
                .map(OwnerId::from)
                .unwrap_or_else(|| OwnerId::from("abw")),
            suggestion_function_name: lookup("SUGGESTION_FUNCTION_NAME")
                .unwrap_or_else(|| "GenerateSuggestion".to_string()),
            rule_engine_function_name: lookup("RULE_ENGINE_FUNCTION_NAME")
                .unwrap_or_else(|| "runRuleEngine".to_string()),
            expose_draft_routes: lookup("EXPOSE_DRAFT_ROUTES")
                .map(|v| parse_flag(&v))
                .unwrap_or(false),
            request_timeout_seconds: lookup("REQUEST_TIMEOUT_SECONDS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
        }
    }

    /// Get the request timeout as a Duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    /// Builder method to mount the draft CRUD routes.
    pub fn with_draft_routes(mut self, expose: bool) -> Self {
        self.expose_draft_routes = expose;
        self
    }
}

/// Built-in defaults, ignoring the environment.
impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
