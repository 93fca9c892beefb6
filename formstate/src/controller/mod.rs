//! Form controller: owns one form's state and runs its submission lifecycle.
//!
//! The controller is constructed once per form and handed to whatever
//! renders the fields, either directly or through [`FieldBinding`]s and a
//! [`FormHandle`]. Nothing is reachable through global state.
//!
//! # Example
//!
//! ```
//! use formstate::controller::{FormController, SubmitError, SubmitHelpers, SubmitOutcome};
//! use formstate::field::Field;
//! use formstate::validation::ValidationRule;
//!
//! # futures::executor::block_on(async {
//! let fields = vec![
//!     Field::new("email", "Email").with_validation(ValidationRule::new().required()),
//! ];
//!
//! let form = FormController::new(
//!     fields,
//!     |_fields: Vec<Field>, helpers: SubmitHelpers| async move {
//!         helpers.set_loading(false);
//!         Ok::<(), SubmitError>(())
//!     },
//! );
//!
//! assert_eq!(form.handle_submit().await, SubmitOutcome::Invalid);
//!
//! form.handle_change("email", "ada@example.com");
//! assert_eq!(form.handle_submit().await, SubmitOutcome::Submitted);
//! # });
//! ```

mod config;
mod handle;
mod submit;

pub use config::FormConfig;
pub use handle::FormHandle;
pub use submit::{SubmitError, SubmitHandler, SubmitHelpers, SubmitOutcome};

use std::collections::BTreeMap;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use uuid::Uuid;

use crate::binding::{FieldBinding, FormCommands};
use crate::error::FormError;
use crate::field::{Field, FieldValue, ensure_unique_names};
use crate::form::{FormAction, FormState, FormStore};

use submit::panic_message;

type SuccessCallback = Box<dyn Fn(Option<&str>) + Send + Sync>;
type ErrorCallback = Box<dyn Fn(&str) + Send + Sync>;

/// Unique identifier for a form instance.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct FormId(Uuid);

impl FormId {
    /// Create a new unique form ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the underlying UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for FormId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for FormId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Owner of one mounted form.
///
/// Construction initializes the form exactly once. Commands dispatch
/// synchronously; only [`handle_submit`](Self::handle_submit) awaits.
pub struct FormController {
    id: FormId,
    store: FormStore,
    config: FormConfig,
    handler: Arc<dyn SubmitHandler>,
    on_success: Option<SuccessCallback>,
    on_error: Option<ErrorCallback>,
}

impl FormController {
    /// Create a controller, rejecting field lists with repeated names.
    pub fn try_new(
        initial_fields: Vec<Field>,
        handler: impl SubmitHandler + 'static,
    ) -> Result<Self, FormError> {
        ensure_unique_names(&initial_fields)?;
        Ok(Self::new(initial_fields, handler))
    }

    /// Create a controller for the given fields and initialize it.
    ///
    /// Field names are expected to be unique; only the first field with a
    /// given name is reachable. Use [`try_new`](Self::try_new) for field
    /// lists that have not been checked.
    pub fn new(initial_fields: Vec<Field>, handler: impl SubmitHandler + 'static) -> Self {
        let id = FormId::new();
        let store = FormStore::default();

        log::debug!("Form {}: initializing {} fields", id, initial_fields.len());
        if let Err(err) = ensure_unique_names(&initial_fields) {
            log::warn!("Form {}: {}", id, err);
        }
        store.dispatch(FormAction::Initialize(initial_fields));

        Self {
            id,
            store,
            config: FormConfig::default(),
            handler: Arc::new(handler),
            on_success: None,
            on_error: None,
        }
    }

    /// Set the form configuration.
    pub fn with_config(mut self, config: FormConfig) -> Self {
        self.config = config;
        self
    }

    /// Register the callback invoked after a successful submission.
    pub fn on_success(mut self, callback: impl Fn(Option<&str>) + Send + Sync + 'static) -> Self {
        self.on_success = Some(Box::new(callback));
        self
    }

    /// Register the callback invoked when a submission is blocked or fails.
    pub fn on_error(mut self, callback: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.on_error = Some(Box::new(callback));
        self
    }

    /// Get the form ID.
    pub fn id(&self) -> FormId {
        self.id
    }

    /// Get the form configuration.
    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    // -------------------------------------------------------------------------
    // Read methods
    // -------------------------------------------------------------------------

    /// Get a clone of the current state.
    pub fn state(&self) -> FormState {
        self.store.snapshot()
    }

    /// Get a clone of the current fields.
    pub fn fields(&self) -> Vec<Field> {
        self.store.read(|state| state.data.clone())
    }

    /// Get a clone of one field.
    pub fn field(&self, name: &str) -> Option<Field> {
        self.store.read(|state| state.field(name).cloned())
    }

    /// Check whether submit should currently be enabled.
    pub fn is_valid(&self) -> bool {
        self.store.read(|state| state.is_valid)
    }

    /// Check whether a submission is in flight.
    pub fn is_loading(&self) -> bool {
        self.store.read(|state| state.is_loading)
    }

    /// Get a field's current value.
    pub fn get_field_value(&self, name: &str) -> Option<FieldValue> {
        self.store.read(|state| state.value(name).cloned())
    }

    /// Get a field's active error.
    ///
    /// Not filtered by touched state; gate display on
    /// [`Field::touched`] or use [`FieldBinding::visible_error`].
    pub fn get_field_error(&self, name: &str) -> Option<String> {
        self.store.read(|state| state.error(name).map(str::to_string))
    }

    /// Every current field error, keyed by field name.
    pub fn errors(&self) -> BTreeMap<String, String> {
        self.store.read(FormState::errors)
    }

    /// Check if the state has changed since the last [`clear_dirty`](Self::clear_dirty).
    pub fn is_dirty(&self) -> bool {
        self.store.is_dirty()
    }

    /// Clear the dirty flag after rendering.
    pub fn clear_dirty(&self) {
        self.store.clear_dirty();
    }

    // -------------------------------------------------------------------------
    // Write methods
    // -------------------------------------------------------------------------

    /// Set a value without marking the field touched (pre-population).
    pub fn set_field_value(&self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.store.dispatch(FormAction::SetFieldValue {
            name: name.into(),
            value: value.into(),
        });
    }

    /// Force a field invalid with the given message.
    pub fn set_field_error(&self, name: impl Into<String>, message: impl Into<String>) {
        self.store.dispatch(FormAction::SetError {
            name: name.into(),
            message: message.into(),
        });
    }

    /// Validate one field and mark it touched. Returns the field's validity.
    pub fn validate_field(&self, name: &str) -> bool {
        self.store.dispatch_then(
            FormAction::ValidateField {
                name: name.to_string(),
            },
            |state| state.field(name).is_some_and(|field| field.is_valid),
        )
    }

    /// Validate every field and mark all touched. Returns the form's validity.
    pub fn validate_all(&self) -> bool {
        self.store
            .dispatch_then(FormAction::ValidateAll, |state| state.is_valid)
    }

    /// Handle a field losing focus.
    pub fn handle_blur(&self, name: impl Into<String>) {
        self.store
            .dispatch(FormAction::ValidateField { name: name.into() });
    }

    /// Handle a user edit.
    pub fn handle_change(&self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.store.dispatch(FormAction::UpdateField {
            name: name.into(),
            value: value.into(),
        });
    }

    /// Restore the form to its initial fields.
    pub fn reset(&self) {
        self.store.dispatch(FormAction::Reset);
    }

    /// Set the loading flag.
    pub fn set_loading(&self, loading: bool) {
        self.store.dispatch(FormAction::SetLoading(loading));
    }

    // -------------------------------------------------------------------------
    // Adapters
    // -------------------------------------------------------------------------

    /// Bind a single field for a renderer.
    pub fn bind(&self, name: &str) -> Result<FieldBinding, FormError> {
        if self.store.read(|state| state.field(name).is_none()) {
            return Err(FormError::unknown_field(name));
        }
        Ok(FieldBinding::new(name, self.store.clone()))
    }

    /// View model for the submit and reset commands.
    pub fn commands(&self) -> FormCommands {
        FormCommands::new(self.store.clone(), self.config.clone())
    }

    /// Imperative handle for callers outside the field tree.
    pub fn handle(&self) -> FormHandle {
        FormHandle::new(self.store.clone())
    }

    // -------------------------------------------------------------------------
    // Submission
    // -------------------------------------------------------------------------

    /// Validate and submit the form.
    ///
    /// Invalid forms report `invalid_message` through `on_error` without
    /// entering the loading state. Otherwise loading is set and the handler
    /// runs; on success `on_success` fires and loading is left to the
    /// handler. On failure (error or panic) `on_error` receives the failure's
    /// message and loading is cleared.
    pub async fn handle_submit(&self) -> SubmitOutcome {
        let (fields, has_errors) = self.store.dispatch_then(FormAction::ValidateAll, |state| {
            (state.data.clone(), state.has_invalid_fields())
        });

        if has_errors {
            log::info!("Form {}: submission blocked by invalid fields", self.id);
            self.report_error(&self.config.invalid_message);
            return SubmitOutcome::Invalid;
        }

        self.store.dispatch(FormAction::SetLoading(true));
        log::debug!("Form {}: submitting {} fields", self.id, fields.len());

        let helpers = SubmitHelpers::new(self.store.clone());
        let result = AssertUnwindSafe(self.handler.submit(fields, helpers))
            .catch_unwind()
            .await;

        let failure = match result {
            Ok(Ok(())) => None,
            Ok(Err(err)) => Some(err.message().map(str::to_string)),
            Err(panic) => Some(panic_message(panic.as_ref())),
        };

        match failure {
            None => {
                log::info!("Form {}: submitted", self.id);
                if let Some(on_success) = &self.on_success {
                    on_success(Some(&self.config.success_message));
                }
                SubmitOutcome::Submitted
            }
            Some(message) => {
                let message =
                    message.unwrap_or_else(|| self.config.fallback_error_message.clone());
                log::error!("Form {}: submission failed: {}", self.id, message);
                self.report_error(&message);
                self.store.dispatch(FormAction::SetLoading(false));
                SubmitOutcome::Failed(message)
            }
        }
    }

    fn report_error(&self, message: &str) {
        if let Some(on_error) = &self.on_error {
            on_error(message);
        }
    }
}

impl std::fmt::Debug for FormController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormController")
            .field("id", &self.id)
            .field("store", &self.store)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
