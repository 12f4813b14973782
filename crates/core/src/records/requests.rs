//! API request types for record operations.
//!
//! Pure data types with no I/O. Update requests reject unknown fields so a
//! stored payload always decodes back into its record type.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::error::ValidationError;
use super::patch::Patch;
use super::types::{Draft, DraftState, Rule};

/// Request payload for creating a new draft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateDraft {
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl CreateDraft {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            content: content.into(),
            tags: Vec::new(),
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// New drafts always start out pending, without a suggestion.
    pub fn into_draft(self) -> Draft {
        Draft {
            id: self.id,
            title: self.title,
            content: self.content,
            tags: self.tags,
            state: DraftState::Pending,
            suggestion: None,
        }
    }
}

/// Body of `POST /drafts/dump`: a single draft or a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DumpRequest {
    Many(Vec<CreateDraft>),
    One(CreateDraft),
}

impl DumpRequest {
    pub fn into_drafts(self) -> Vec<CreateDraft> {
        match self {
            DumpRequest::Many(drafts) => drafts,
            DumpRequest::One(draft) => vec![draft],
        }
    }
}

/// Keeps an explicit JSON `null` as `Some(Value::Null)`.
///
/// Only runs when the field is present; absent fields fall back to `default`.
fn present_value<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Request payload for updating draft fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<DraftState>,
    /// `null` clears the suggestion; only an absent field leaves it unchanged.
    #[serde(
        default,
        deserialize_with = "present_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub suggestion: Option<Value>,
}

impl UpdateDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_state(mut self, state: DraftState) -> Self {
        self.state = Some(state);
        self
    }

    /// Converts the set fields into a patch; an update with no fields is rejected.
    pub fn into_patch(self) -> Result<Patch, ValidationError> {
        let mut patch = Patch::new();
        if let Some(id) = self.id {
            patch.insert("id", id);
        }
        if let Some(title) = self.title {
            patch.insert("title", title);
        }
        if let Some(content) = self.content {
            patch.insert("content", content);
        }
        if let Some(tags) = self.tags {
            patch.insert("tags", tags);
        }
        if let Some(state) = self.state {
            patch.insert("state", state.as_str());
        }
        if let Some(suggestion) = self.suggestion {
            patch.insert("suggestion", suggestion);
        }
        patch.non_empty()
    }
}

/// Request payload for creating a new rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateRule {
    pub id: String,
    #[serde(rename = "type")]
    pub rule_type: String,
    #[serde(default)]
    pub parameters: Value,
    #[serde(default)]
    pub priority: i64,
}

impl CreateRule {
    pub fn into_rule(self) -> Rule {
        Rule {
            id: self.id,
            rule_type: self.rule_type,
            parameters: self.parameters,
            priority: self.priority,
        }
    }
}

/// Request payload for updating rule fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub rule_type: Option<String>,
    /// `null` is stored as given; only an absent field leaves it unchanged.
    #[serde(
        default,
        deserialize_with = "present_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub parameters: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
}

impl UpdateRule {
    /// Converts the set fields into a patch; an update with no fields is rejected.
    pub fn into_patch(self) -> Result<Patch, ValidationError> {
        let mut patch = Patch::new();
        if let Some(id) = self.id {
            patch.insert("id", id);
        }
        if let Some(rule_type) = self.rule_type {
            patch.insert("type", rule_type);
        }
        if let Some(parameters) = self.parameters {
            patch.insert("parameters", parameters);
        }
        if let Some(priority) = self.priority {
            patch.insert("priority", priority);
        }
        patch.non_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_draft_starts_pending() {
        let draft = CreateDraft::new("d-1", "Title", "Body")
            .with_tags(["a"])
            .into_draft();

        assert_eq!(draft.state, DraftState::Pending);
        assert_eq!(draft.tags, vec!["a".to_string()]);
        assert!(draft.suggestion.is_none());
    }

    #[test]
    fn test_dump_request_accepts_single_or_batch() {
        let one: DumpRequest =
            serde_json::from_value(json!({"id": "1", "title": "t", "content": "c"})).unwrap();
        assert_eq!(one.into_drafts().len(), 1);

        let many: DumpRequest = serde_json::from_value(json!([
            {"id": "1", "title": "t", "content": "c"},
            {"id": "2", "title": "t", "content": "c", "tags": ["x"]}
        ]))
        .unwrap();
        assert_eq!(many.into_drafts().len(), 2);
    }

    #[test]
    fn test_update_draft_patch_contains_only_set_fields() {
        let patch = UpdateDraft::new().with_title("x").into_patch().unwrap();

        assert_eq!(patch.len(), 1);
        assert_eq!(patch.get("title"), Some(&json!("x")));
    }

    #[test]
    fn test_update_draft_state_is_stored_as_string() {
        let patch = UpdateDraft::new()
            .with_state(DraftState::Outbox)
            .into_patch()
            .unwrap();

        assert_eq!(patch.get("state"), Some(&json!("outbox")));
    }

    #[test]
    fn test_empty_updates_are_rejected() {
        assert_eq!(
            UpdateDraft::new().into_patch(),
            Err(ValidationError::EmptyPatch)
        );
        assert_eq!(
            UpdateRule::default().into_patch(),
            Err(ValidationError::EmptyPatch)
        );
    }

    #[test]
    fn test_explicit_null_is_an_update() {
        let rule: UpdateRule = serde_json::from_value(json!({"parameters": null})).unwrap();
        let patch = rule.into_patch().unwrap();
        assert_eq!(patch.get("parameters"), Some(&Value::Null));

        let draft: UpdateDraft =
            serde_json::from_value(json!({"title": "x", "suggestion": null})).unwrap();
        let patch = draft.into_patch().unwrap();
        assert_eq!(patch.len(), 2);
        assert_eq!(patch.get("suggestion"), Some(&Value::Null));
    }

    #[test]
    fn test_absent_value_fields_are_left_out() {
        let draft: UpdateDraft = serde_json::from_value(json!({"title": "x"})).unwrap();
        assert_eq!(draft.suggestion, None);

        let rule: UpdateRule = serde_json::from_value(json!({"priority": 2})).unwrap();
        assert_eq!(rule.into_patch().unwrap().get("parameters"), None);
    }

    #[test]
    fn test_update_rejects_unknown_fields() {
        let result: Result<UpdateDraft, _> =
            serde_json::from_value(json!({"title": "x", "colour": "red"}));
        assert!(result.is_err());

        let result: Result<UpdateRule, _> = serde_json::from_value(json!({"state": "pending"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_update_rule_uses_type_field() {
        let update: UpdateRule =
            serde_json::from_value(json!({"type": "length", "priority": 3})).unwrap();
        let patch = update.into_patch().unwrap();

        assert_eq!(patch.get("type"), Some(&json!("length")));
        assert_eq!(patch.get("priority"), Some(&json!(3)));
    }

    #[test]
    fn test_update_rejects_invalid_state() {
        let result: Result<UpdateDraft, _> = serde_json::from_value(json!({"state": "archived"}));
        assert!(result.is_err());
    }
}
