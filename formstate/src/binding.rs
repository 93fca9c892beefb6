//! Adapters between a form and the widgets that render it.

use crate::controller::FormConfig;
use crate::field::FieldValue;
use crate::form::{FormAction, FormStore};

/// One named field bound to its form.
///
/// Renderers read the value and the touched-gated error from here and
/// report edits and focus loss back through [`on_change`](Self::on_change)
/// and [`on_blur`](Self::on_blur).
#[derive(Debug, Clone)]
pub struct FieldBinding {
    name: String,
    store: FormStore,
}

impl FieldBinding {
    pub(crate) fn new(name: impl Into<String>, store: FormStore) -> Self {
        Self {
            name: name.into(),
            store,
        }
    }

    /// Get the bound field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the field label.
    pub fn label(&self) -> String {
        self.store
            .read(|state| state.field(&self.name).map(|f| f.label.clone()))
            .unwrap_or_default()
    }

    /// Check whether the label should be marked as required.
    pub fn required(&self) -> bool {
        self.store.read(|state| {
            state
                .field(&self.name)
                .is_some_and(|f| f.validation.is_required())
        })
    }

    /// Get the current value.
    pub fn value(&self) -> FieldValue {
        self.store
            .read(|state| state.value(&self.name).cloned())
            .unwrap_or_default()
    }

    /// Check if the field has been touched.
    pub fn touched(&self) -> bool {
        self.store
            .read(|state| state.field(&self.name).is_some_and(|f| f.touched))
    }

    /// Get the error to display: only present once the field is touched.
    pub fn visible_error(&self) -> Option<String> {
        self.store.read(|state| {
            state
                .field(&self.name)
                .and_then(|f| f.visible_error())
                .map(str::to_string)
        })
    }

    /// Check if the field should render in its error style.
    pub fn has_error(&self) -> bool {
        self.visible_error().is_some()
    }

    /// Report a user edit.
    pub fn on_change(&self, value: impl Into<FieldValue>) {
        self.store.dispatch(FormAction::UpdateField {
            name: self.name.clone(),
            value: value.into(),
        });
    }

    /// Report focus leaving the field.
    pub fn on_blur(&self) {
        self.store.dispatch(FormAction::ValidateField {
            name: self.name.clone(),
        });
    }

    /// Mark the field invalid with a message from a widget-level check
    /// (file size, accepted types) that the declarative rules cannot express.
    pub fn set_error(&self, message: impl Into<String>) {
        self.store.dispatch(FormAction::SetError {
            name: self.name.clone(),
            message: message.into(),
        });
    }
}

/// View model for a form's submit and reset commands.
#[derive(Debug, Clone)]
pub struct FormCommands {
    store: FormStore,
    config: FormConfig,
}

impl FormCommands {
    pub(crate) fn new(store: FormStore, config: FormConfig) -> Self {
        Self { store, config }
    }

    fn is_loading(&self) -> bool {
        self.store.read(|state| state.is_loading)
    }

    /// Label for the submit command; switches while submitting.
    pub fn submit_label(&self) -> &str {
        if self.is_loading() {
            &self.config.loading_label
        } else {
            &self.config.submit_label
        }
    }

    /// Submit is disabled while a submission is in flight.
    ///
    /// This is the only guard against double submission.
    pub fn submit_disabled(&self) -> bool {
        self.is_loading()
    }

    /// Check whether a reset command is offered.
    pub fn show_reset(&self) -> bool {
        self.config.show_reset
    }

    /// Label for the reset command.
    pub fn reset_label(&self) -> &str {
        &self.config.reset_label
    }

    /// Reset is disabled while a submission is in flight.
    pub fn reset_disabled(&self) -> bool {
        self.is_loading()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Field;
    use crate::form::FormState;
    use crate::validation::ValidationRule;

    fn store() -> FormStore {
        let store = FormStore::new(FormState::default());
        store.dispatch(FormAction::Initialize(vec![
            Field::new("city", "City").with_validation(ValidationRule::new().required()),
            Field::new("avatar", "Avatar").with_value("me.png"),
        ]));
        store
    }

    #[test]
    fn test_error_hidden_until_blur() {
        let binding = FieldBinding::new("city", store());
        assert_eq!(binding.label(), "City");
        assert!(!binding.has_error());

        binding.on_blur();
        assert!(binding.touched());
        assert_eq!(binding.visible_error().as_deref(), Some("This field is required"));

        binding.on_change("Ghent");
        assert_eq!(binding.value(), FieldValue::from("Ghent"));
        assert!(!binding.has_error());
    }

    #[test]
    fn test_required_marker() {
        let store = store();
        assert!(FieldBinding::new("city", store.clone()).required());
        assert!(!FieldBinding::new("avatar", store.clone()).required());
        assert!(!FieldBinding::new("missing", store).required());
    }

    #[test]
    fn test_set_error_from_widget_check() {
        let store = store();
        let binding = FieldBinding::new("avatar", store.clone());
        assert!(!binding.has_error());

        binding.set_error("File is too large");
        assert!(binding.touched());
        assert_eq!(binding.visible_error().as_deref(), Some("File is too large"));
        assert!(!store.read(|state| state.is_valid));

        // The next validation pass replaces the widget's verdict.
        binding.on_blur();
        assert!(!binding.has_error());
    }

    #[test]
    fn test_unknown_binding_reads_defaults() {
        let binding = FieldBinding::new("missing", store());
        assert_eq!(binding.value(), FieldValue::Null);
        assert_eq!(binding.label(), "");
        assert!(!binding.touched());
    }

    #[test]
    fn test_commands_follow_loading() {
        let store = store();
        let commands = FormCommands::new(store.clone(), FormConfig::new().with_reset("Clear"));
        assert_eq!(commands.submit_label(), "Submit");
        assert!(!commands.submit_disabled());
        assert!(commands.show_reset());
        assert_eq!(commands.reset_label(), "Clear");

        store.dispatch(FormAction::SetLoading(true));
        assert_eq!(commands.submit_label(), "Submitting...");
        assert!(commands.submit_disabled());
        assert!(commands.reset_disabled());
    }
}
