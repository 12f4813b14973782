//! Store-agnostic partial updates of a record payload.
//!
//! A [`Patch`] is a mapping of payload field to new value. Every entry
//! overwrites the whole field; nested values are never merged. Each storage
//! backend translates a patch into its own update primitive.
//!
//! A patch may also carry an expected value for one payload field. Backends
//! check it in the same atomic step as the write and fail with
//! `RepositoryError::Conflict` when the stored value differs.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use super::error::ValidationError;
use crate::storage::FieldFilter;

/// Field overwrites applied to the `data` payload of one record.
///
/// Fields iterate in name order, so backends produce deterministic updates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Patch {
    fields: BTreeMap<String, Value>,
    expected: Option<FieldFilter>,
}

impl Patch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `field` to `value`, replacing any earlier value for the same field.
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Only apply the patch while `data.<field>` still equals `value`.
    pub fn expecting(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.expected = Some(FieldFilter {
            field: field.into(),
            value: value.into(),
        });
        self
    }

    pub fn expected(&self) -> Option<&FieldFilter> {
        self.expected.as_ref()
    }

    /// Whether `data` satisfies the expected field value, if any.
    pub fn precondition_holds(&self, data: &Map<String, Value>) -> bool {
        match &self.expected {
            Some(expected) => data.get(&expected.field) == Some(&expected.value),
            None => true,
        }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Rejects a patch that would not change anything.
    pub fn non_empty(self) -> Result<Self, ValidationError> {
        if self.is_empty() {
            Err(ValidationError::EmptyPatch)
        } else {
            Ok(self)
        }
    }

    /// Overwrites the patched fields of `data`, leaving all others untouched.
    pub fn apply_to(&self, data: &mut Map<String, Value>) {
        for (field, value) in &self.fields {
            data.insert(field.clone(), value.clone());
        }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Patch {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            expected: None,
        }
    }
}
