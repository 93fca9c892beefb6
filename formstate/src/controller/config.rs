//! Form configuration types.

use serde::{Deserialize, Serialize};

/// Message used when a failed submission carries none of its own.
pub(crate) const DEFAULT_FALLBACK_ERROR: &str = "An error occurred while submitting the form";

/// Per-form configuration.
///
/// Controls command labels and the messages reported through the
/// submission lifecycle callbacks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormConfig {
    /// Label of the submit command.
    pub submit_label: String,

    /// Label of the submit command while a submission is in flight.
    pub loading_label: String,

    /// Whether a reset command is offered.
    pub show_reset: bool,

    /// Label of the reset command.
    pub reset_label: String,

    /// Passed to `on_success` after the submit handler completes.
    pub success_message: String,

    /// Passed to `on_error` when validation blocks a submission.
    pub invalid_message: String,

    /// Passed to `on_error` when a failed submission carries no message.
    pub fallback_error_message: String,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            submit_label: "Submit".to_string(),
            loading_label: "Submitting...".to_string(),
            show_reset: false,
            reset_label: "Reset".to_string(),
            success_message: "Form submitted successfully".to_string(),
            invalid_message: "Please fix the errors in the form".to_string(),
            fallback_error_message: DEFAULT_FALLBACK_ERROR.to_string(),
        }
    }
}

impl FormConfig {
    /// Create a config with default labels and messages.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the submit label.
    pub fn submit_label(mut self, label: impl Into<String>) -> Self {
        self.submit_label = label.into();
        self
    }

    /// Set the label shown while submitting.
    pub fn loading_label(mut self, label: impl Into<String>) -> Self {
        self.loading_label = label.into();
        self
    }

    /// Offer a reset command with the given label.
    pub fn with_reset(mut self, label: impl Into<String>) -> Self {
        self.show_reset = true;
        self.reset_label = label.into();
        self
    }

    /// Set the success message.
    pub fn success_message(mut self, message: impl Into<String>) -> Self {
        self.success_message = message.into();
        self
    }

    /// Set the message reported when validation blocks a submission.
    pub fn invalid_message(mut self, message: impl Into<String>) -> Self {
        self.invalid_message = message.into();
        self
    }

    /// Set the fallback message for failed submissions.
    pub fn fallback_error_message(mut self, message: impl Into<String>) -> Self {
        self.fallback_error_message = message.into();
        self
    }
}
