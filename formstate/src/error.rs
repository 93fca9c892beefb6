//! Error types

/// Errors raised while building or loading forms.
///
/// Field validation failures are not errors: they live on
/// [`Field::error`](crate::field::Field::error) and never escalate.
#[derive(Debug, thiserror::Error)]
pub enum FormError {
    /// A validation pattern failed to compile.
    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        /// The pattern source as given.
        pattern: String,
        /// Underlying regex error.
        #[source]
        source: regex::Error,
    },

    /// The requested field does not exist in the form.
    #[error("Field '{0}' not found in form")]
    UnknownField(String),

    /// Two fields in one form share a name.
    #[error("Field '{0}' is defined more than once")]
    DuplicateField(String),

    /// A form definition could not be parsed.
    #[error("Form definition error: {0}")]
    Definition(#[from] serde_json::Error),

    /// A form definition could not be read.
    #[error("Failed to read form definition: {0}")]
    Io(#[from] std::io::Error),
}

impl FormError {
    /// Creates a new invalid pattern error.
    pub fn invalid_pattern(pattern: impl Into<String>, source: regex::Error) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            source,
        }
    }

    /// Creates a new unknown field error.
    pub fn unknown_field(name: impl Into<String>) -> Self {
        Self::UnknownField(name.into())
    }

    /// Creates a new duplicate field error.
    pub fn duplicate_field(name: impl Into<String>) -> Self {
        Self::DuplicateField(name.into())
    }
}
