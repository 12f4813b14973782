//! Partial-update expression builder.
//!
//! Field names and values never appear in the expression text. Every field
//! gets an indexed `#f{i}` name placeholder and `:v{i}` value placeholder,
//! so arbitrary field names are safe and placeholders cannot collide.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;

use drafts_core::records::Patch;
use drafts_core::storage::RepositoryError;

use super::conversions::{value_to_attribute, DATA_ATTRIBUTE};

/// Placeholder aliasing the payload map attribute.
pub const DATA_PLACEHOLDER: &str = "#data";

/// Condition every update carries: the record must exist.
pub const RECORD_EXISTS: &str = "attribute_exists(#sk)";

/// A complete `SET` update over the payload map.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateExpression {
    pub expression: String,
    /// `attribute_exists(#sk)`, plus the patch's expected field value if any.
    /// `#sk` is left for the caller to bind.
    pub condition: String,
    pub names: HashMap<String, String>,
    pub values: HashMap<String, AttributeValue>,
}

/// Builds `SET #data.#f0 = :v0, #data.#f1 = :v1, ...` for `patch`.
///
/// Fields are numbered in the patch's iteration order (sorted by name).
pub fn build_data_update(patch: &Patch) -> Result<UpdateExpression, RepositoryError> {
    if patch.is_empty() {
        return Err(RepositoryError::InvalidData(
            "Update requires at least one field".to_string(),
        ));
    }

    let mut names = HashMap::from([(DATA_PLACEHOLDER.to_string(), DATA_ATTRIBUTE.to_string())]);
    let mut values = HashMap::with_capacity(patch.len());
    let mut assignments = Vec::with_capacity(patch.len());

    for (i, (field, value)) in patch.iter().enumerate() {
        let name = format!("#f{i}");
        let placeholder = format!(":v{i}");

        assignments.push(format!("{DATA_PLACEHOLDER}.{name} = {placeholder}"));
        names.insert(name, field.to_string());
        values.insert(placeholder, value_to_attribute(value)?);
    }

    let condition = match patch.expected() {
        Some(expected) => {
            names.insert("#expected".to_string(), expected.field.clone());
            values.insert(":expected".to_string(), value_to_attribute(&expected.value)?);
            format!("{RECORD_EXISTS} AND {DATA_PLACEHOLDER}.#expected = :expected")
        }
        None => RECORD_EXISTS.to_string(),
    };

    Ok(UpdateExpression {
        expression: format!("SET {}", assignments.join(", ")),
        condition,
        names,
        values,
    })
}
