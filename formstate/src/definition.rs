//! Form definitions loaded from JSON.
//!
//! ```json
//! {
//!   "title": "Sign in",
//!   "config": { "submitLabel": "Sign in", "showReset": true },
//!   "fields": [
//!     { "name": "email", "label": "Email", "value": "",
//!       "validation": { "required": true, "pattern": "^.+@.+$" } },
//!     { "name": "age", "label": "Age", "value": 30,
//!       "validation": { "min": 18, "max": 120 } }
//!   ]
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::controller::FormConfig;
use crate::error::FormError;
use crate::field::{Field, ensure_unique_names};

/// An ordered field list plus form-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormDefinition {
    /// Optional display title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Labels and lifecycle messages.
    #[serde(default)]
    pub config: FormConfig,
    /// Fields in display order.
    pub fields: Vec<Field>,
}

impl FormDefinition {
    /// Parse a definition from a JSON string.
    ///
    /// Field names must be unique.
    pub fn from_json(json: &str) -> Result<Self, FormError> {
        let definition: Self = serde_json::from_str(json)?;
        ensure_unique_names(&definition.fields)?;
        log::debug!(
            "Loaded form definition with {} fields",
            definition.fields.len()
        );
        Ok(definition)
    }

    /// Read and parse a definition file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FormError> {
        let json = fs::read_to_string(path.as_ref())?;
        Self::from_json(&json)
    }

    /// Serialize the definition back to pretty JSON.
    pub fn to_json(&self) -> Result<String, FormError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldValue;

    const SIGN_IN: &str = r#"{
        "title": "Sign in",
        "config": { "submitLabel": "Sign in" },
        "fields": [
            { "name": "email", "label": "Email", "value": "",
              "validation": { "required": true, "pattern": "^.+@.+$" } },
            { "name": "age", "label": "Age", "value": 30,
              "validation": { "min": 18, "max": 120, "error": "Adults only" } },
            { "name": "terms", "label": "Terms", "value": false }
        ]
    }"#;

    #[test]
    fn test_parse_definition() {
        let definition = FormDefinition::from_json(SIGN_IN).unwrap();
        assert_eq!(definition.title.as_deref(), Some("Sign in"));
        assert_eq!(definition.config.submit_label, "Sign in");
        assert_eq!(definition.config.reset_label, "Reset");

        let names: Vec<&str> = definition.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["email", "age", "terms"]);

        let age = &definition.fields[1];
        assert_eq!(age.value, FieldValue::Number(30.0));
        assert_eq!(age.validation.min, Some(18.0));
        assert_eq!(age.validation.error.as_deref(), Some("Adults only"));
        assert!(!age.touched);
        assert_eq!(definition.fields[2].value, FieldValue::Bool(false));
    }

    #[test]
    fn test_missing_fields_is_an_error() {
        let err = FormDefinition::from_json(r#"{ "title": "x" }"#).unwrap_err();
        assert!(matches!(err, FormError::Definition(_)));
    }

    #[test]
    fn test_bad_pattern_is_an_error() {
        let json = r#"{ "fields": [ { "name": "a", "validation": { "pattern": "(" } } ] }"#;
        assert!(matches!(
            FormDefinition::from_json(json),
            Err(FormError::Definition(_))
        ));
    }

    #[test]
    fn test_duplicate_names_are_rejected() {
        let json = r#"{ "fields": [
            { "name": "email", "validation": { "required": true } },
            { "name": "email", "validation": { "required": true } }
        ] }"#;
        let err = FormDefinition::from_json(json).unwrap_err();
        assert!(matches!(err, FormError::DuplicateField(ref name) if name == "email"));
    }

    #[test]
    fn test_json_round_trip_keeps_patterns() {
        let definition = FormDefinition::from_json(SIGN_IN).unwrap();
        let reparsed = FormDefinition::from_json(&definition.to_json().unwrap()).unwrap();
        assert_eq!(reparsed, definition);
    }

    #[test]
    fn test_missing_file() {
        let err = FormDefinition::from_path("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, FormError::Io(_)));
    }
}
