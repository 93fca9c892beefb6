//! Field model.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::FormError;
use crate::validation::ValidationRule;

/// The value held by a form field.
///
/// Deserializes from plain JSON scalars: `null`, booleans, numbers and
/// strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// No value.
    #[default]
    Null,
    /// Checkbox-style value.
    Bool(bool),
    /// Numeric value.
    Number(f64),
    /// Text value.
    Text(String),
}

impl FieldValue {
    /// Check if the value counts as empty (`Null` or an empty string).
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Text(text) => text.is_empty(),
            _ => false,
        }
    }

    /// Get the text value, if this is text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Get the numeric value, if this is a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Get the boolean value, if this is a bool.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "{}", b),
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(text) => write!(f, "{:?}", text),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Self::Null)
    }
}

/// One named, independently validated unit of form data.
///
/// `is_valid` and `error` move together: an invalid field always carries
/// its active message, a valid one never does.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    /// Identity key, unique within a form.
    pub name: String,
    /// Current value.
    #[serde(default)]
    pub value: FieldValue,
    /// Human-readable name.
    #[serde(default)]
    pub label: String,
    /// Declared constraints.
    #[serde(default)]
    pub validation: ValidationRule,
    /// Result of the last validation pass.
    #[serde(default)]
    pub is_valid: bool,
    /// Whether the user (or an explicit validation) has reached this field.
    #[serde(default)]
    pub touched: bool,
    /// Active error message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Field {
    /// Create an unconstrained field with a `Null` value.
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: FieldValue::Null,
            label: label.into(),
            validation: ValidationRule::default(),
            is_valid: false,
            touched: false,
            error: None,
        }
    }

    /// Set the initial value.
    pub fn with_value(mut self, value: impl Into<FieldValue>) -> Self {
        self.value = value.into();
        self
    }

    /// Set the validation rule.
    pub fn with_validation(mut self, validation: ValidationRule) -> Self {
        self.validation = validation;
        self
    }

    /// Set the touched flag.
    pub fn with_touched(mut self, touched: bool) -> Self {
        self.touched = touched;
        self
    }

    /// Mark the field valid and clear its error.
    pub(crate) fn into_valid(mut self) -> Self {
        self.is_valid = true;
        self.error = None;
        self
    }

    /// Mark the field invalid with the given active message.
    pub(crate) fn into_invalid(mut self, message: impl Into<String>) -> Self {
        self.is_valid = false;
        self.error = Some(message.into());
        self
    }

    /// Get the active error, only if the field has been touched.
    pub fn visible_error(&self) -> Option<&str> {
        if self.touched {
            self.error.as_deref().filter(|e| !e.is_empty())
        } else {
            None
        }
    }
}

/// Check that no two fields share a name.
///
/// Commands address fields by name, so a repeated name would leave every
/// field after the first unreachable.
pub fn ensure_unique_names(fields: &[Field]) -> Result<(), FormError> {
    let mut seen = HashSet::new();
    match fields.iter().find(|field| !seen.insert(field.name.as_str())) {
        Some(field) => Err(FormError::duplicate_field(&field.name)),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_values() {
        assert!(FieldValue::Null.is_empty());
        assert!(FieldValue::from("").is_empty());
        assert!(!FieldValue::from(" ").is_empty());
        assert!(!FieldValue::from(0).is_empty());
        assert!(!FieldValue::from(false).is_empty());
    }

    #[test]
    fn test_option_conversion() {
        assert_eq!(FieldValue::from(None::<&str>), FieldValue::Null);
        assert_eq!(FieldValue::from(Some(2.5)), FieldValue::Number(2.5));
    }

    #[test]
    fn test_deserialize_scalars() {
        let values: Vec<FieldValue> = serde_json::from_str(r#"[null, true, 3, "x"]"#).unwrap();
        assert_eq!(
            values,
            vec![
                FieldValue::Null,
                FieldValue::Bool(true),
                FieldValue::Number(3.0),
                FieldValue::Text("x".to_string()),
            ]
        );
    }

    #[test]
    fn test_visible_error_requires_touch() {
        let field = Field::new("name", "Name").into_invalid("bad");
        assert_eq!(field.visible_error(), None);
        assert_eq!(field.with_touched(true).visible_error(), Some("bad"));
    }

    #[test]
    fn test_unique_names() {
        let fields = vec![Field::new("email", "Email"), Field::new("age", "Age")];
        assert!(ensure_unique_names(&fields).is_ok());

        let fields = vec![
            Field::new("email", "Email"),
            Field::new("age", "Age"),
            Field::new("email", "Email again"),
        ];
        let err = ensure_unique_names(&fields).unwrap_err();
        assert!(matches!(err, FormError::DuplicateField(ref name) if name == "email"));
    }
}
