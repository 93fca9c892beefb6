use crate::field::FieldValue;
use crate::form::{FormAction, FormStore};

/// Imperative handle for driving a form from outside its field tree.
///
/// Typical uses are pre-populating fields in edit mode or clearing a
/// server-detected error. Cheap to clone; all clones drive the same form.
#[derive(Debug, Clone)]
pub struct FormHandle {
    store: FormStore,
}

impl FormHandle {
    pub(crate) fn new(store: FormStore) -> Self {
        Self { store }
    }

    /// Restore the form to its initial fields.
    pub fn reset(&self) {
        self.store.dispatch(FormAction::Reset);
    }

    /// Validate every field, revealing all errors. Returns the new validity.
    pub fn validate_all(&self) -> bool {
        self.store
            .dispatch_then(FormAction::ValidateAll, |state| state.is_valid)
    }

    /// Set a value without marking the field touched.
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

    /// Get a field's current value.
    pub fn get_field_value(&self, name: &str) -> Option<FieldValue> {
        self.store.read(|state| state.value(name).cloned())
    }

    /// Set the loading flag.
    pub fn set_loading(&self, loading: bool) {
        self.store.dispatch(FormAction::SetLoading(loading));
    }
}
