use std::collections::BTreeMap;

use serde::Serialize;

use crate::field::{Field, FieldValue};

/// Aggregate state of one form instance.
///
/// A new value is produced for every dispatched action; nothing mutates a
/// `FormState` in place. `data` always holds the same field names in the
/// same order as `original_data`.
///
/// `is_valid` means "safe to enable submit right now" and its exact
/// predicate depends on the action that last computed it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormState {
    /// Snapshot captured at initialization; the source for reset.
    pub original_data: Vec<Field>,
    /// Current working set.
    pub data: Vec<Field>,
    /// Form-level validity.
    pub is_valid: bool,
    /// True while a submission is in flight.
    pub is_loading: bool,
}

impl Default for FormState {
    fn default() -> Self {
        // Pristine forms count as valid until the first initialize pass.
        Self {
            original_data: Vec::new(),
            data: Vec::new(),
            is_valid: true,
            is_loading: false,
        }
    }
}

impl FormState {
    /// Find a field by name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.data.iter().find(|field| field.name == name)
    }

    /// Get a field's current value.
    pub fn value(&self, name: &str) -> Option<&FieldValue> {
        self.field(name).map(|field| &field.value)
    }

    /// Get a field's active error, regardless of touched state.
    pub fn error(&self, name: &str) -> Option<&str> {
        self.field(name)
            .and_then(|field| field.error.as_deref())
            .filter(|error| !error.is_empty())
    }

    /// Map of every field carrying a non-empty error, keyed by name.
    pub fn errors(&self) -> BTreeMap<String, String> {
        self.data
            .iter()
            .filter_map(|field| {
                field
                    .error
                    .as_ref()
                    .filter(|error| !error.is_empty())
                    .map(|error| (field.name.clone(), error.clone()))
            })
            .collect()
    }

    /// Check whether any field in the working set is invalid.
    pub fn has_invalid_fields(&self) -> bool {
        self.data.iter().any(|field| !field.is_valid)
    }
}
