//! Declarative validation rules.

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::FormError;

/// A compiled regular expression used as a format constraint.
///
/// Serialized as its source string.
#[derive(Debug, Clone)]
pub struct Pattern(Regex);

impl Pattern {
    /// Compile a pattern.
    pub fn new(pattern: &str) -> Result<Self, FormError> {
        Regex::new(pattern)
            .map(Self)
            .map_err(|e| FormError::invalid_pattern(pattern, e))
    }

    /// Get the pattern source.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Check whether the pattern matches anywhere in `text`.
    pub fn is_match(&self, text: &str) -> bool {
        self.0.is_match(text)
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl From<Regex> for Pattern {
    fn from(regex: Regex) -> Self {
        Self(regex)
    }
}

impl Serialize for Pattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Pattern {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let source = String::deserialize(deserializer)?;
        Regex::new(&source)
            .map(Self)
            .map_err(serde::de::Error::custom)
    }
}

/// Constraint set attached to a field.
///
/// Every constraint is optional; an absent constraint does not apply.
/// `error` is the configured override message: when non-empty it replaces
/// every generated message for the field.
///
/// # Example
///
/// ```
/// use formstate::validation::ValidationRule;
///
/// let rule = ValidationRule::new()
///     .required()
///     .min_length(8)
///     .with_error("Password must be at least 8 characters");
/// assert!(rule.is_required());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ValidationRule {
    pub required: Option<bool>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub pattern: Option<Pattern>,
    pub error: Option<String>,
}

impl ValidationRule {
    /// Create an unconstrained rule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Require a non-empty value.
    pub fn required(mut self) -> Self {
        self.required = Some(true);
        self
    }

    /// Require a numeric value of at least `min`.
    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    /// Require a numeric value of at most `max`.
    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// Require text of at least `min` characters.
    pub fn min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    /// Require text of at most `max` characters.
    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    /// Require text to match a regex pattern.
    pub fn pattern(mut self, pattern: &str) -> Result<Self, FormError> {
        self.pattern = Some(Pattern::new(pattern)?);
        Ok(self)
    }

    /// Set the override message.
    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    /// Check if the rule requires a value.
    pub fn is_required(&self) -> bool {
        self.required.unwrap_or(false)
    }

    /// Resolve a message: the override when set and non-empty, else `default`.
    pub(crate) fn message_or(&self, default: impl Into<String>) -> String {
        match self.error.as_deref() {
            Some(error) if !error.is_empty() => error.to_string(),
            _ => default.into(),
        }
    }
}
