//! Submission contract.

use std::any::Any;
use std::future::Future;

use async_trait::async_trait;
use thiserror::Error;

use super::config::DEFAULT_FALLBACK_ERROR;
use crate::field::Field;
use crate::form::{FormAction, FormStore};

/// Error returned by a submit handler.
///
/// The message is forwarded to `on_error`; without one the form's fallback
/// message is used instead.
#[derive(Debug, Clone, Error)]
#[error("{}", .message.as_deref().unwrap_or(DEFAULT_FALLBACK_ERROR))]
pub struct SubmitError {
    message: Option<String>,
}

impl SubmitError {
    /// Create a submit error with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }

    /// Create a submit error without a message.
    pub fn unspecified() -> Self {
        Self { message: None }
    }

    /// Get the message, if one was given.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref().filter(|message| !message.is_empty())
    }
}

impl From<std::io::Error> for SubmitError {
    fn from(err: std::io::Error) -> Self {
        Self::new(err.to_string())
    }
}

impl From<String> for SubmitError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<&str> for SubmitError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

/// How a call to `handle_submit` ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed; the handler was not called.
    Invalid,
    /// The handler completed.
    Submitted,
    /// The handler failed or panicked, with the reported message.
    Failed(String),
}

impl SubmitOutcome {
    /// Check if the submission went through.
    pub fn is_submitted(&self) -> bool {
        matches!(self, Self::Submitted)
    }
}

/// Operations available to a submit handler while it runs.
#[derive(Debug, Clone)]
pub struct SubmitHelpers {
    store: FormStore,
}

impl SubmitHelpers {
    pub(crate) fn new(store: FormStore) -> Self {
        Self { store }
    }

    /// Set the loading flag.
    pub fn set_loading(&self, loading: bool) {
        self.store.dispatch(FormAction::SetLoading(loading));
    }

    /// Mark a field invalid with a server-side message.
    pub fn set_error(&self, name: impl Into<String>, message: impl Into<String>) {
        self.store.dispatch(FormAction::SetError {
            name: name.into(),
            message: message.into(),
        });
    }

    /// Restore the form to its initial fields.
    pub fn reset(&self) {
        self.store.dispatch(FormAction::Reset);
    }
}

/// Receives validated fields when a form is submitted.
///
/// Implemented for any `Fn(Vec<Field>, SubmitHelpers) -> impl Future` so
/// closures work directly:
///
/// ```
/// use formstate::controller::{SubmitError, SubmitHelpers};
/// use formstate::field::Field;
///
/// let handler = |_fields: Vec<Field>, helpers: SubmitHelpers| async move {
///     helpers.set_loading(false);
///     Ok::<(), SubmitError>(())
/// };
/// ```
#[async_trait]
pub trait SubmitHandler: Send + Sync {
    /// Submit the form. Returning `Err` reports a failed submission.
    async fn submit(&self, fields: Vec<Field>, helpers: SubmitHelpers) -> Result<(), SubmitError>;
}

#[async_trait]
impl<F, Fut> SubmitHandler for F
where
    F: Fn(Vec<Field>, SubmitHelpers) -> Fut + Send + Sync,
    Fut: Future<Output = Result<(), SubmitError>> + Send + 'static,
{
    async fn submit(&self, fields: Vec<Field>, helpers: SubmitHelpers) -> Result<(), SubmitError> {
        (self)(fields, helpers).await
    }
}

/// Extract a human-readable message from a panic payload.
///
/// Panics can contain either `&str` or `String` payloads; anything else
/// yields `None`.
pub(crate) fn panic_message(panic: &(dyn Any + Send)) -> Option<String> {
    if let Some(s) = panic.downcast_ref::<&str>() {
        Some((*s).to_string())
    } else {
        panic.downcast_ref::<String>().cloned()
    }
}
