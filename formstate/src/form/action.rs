use crate::field::{Field, FieldValue};

/// Transitions understood by [`reduce`](super::reduce).
#[derive(Debug, Clone, PartialEq)]
pub enum FormAction {
    /// Validate the given fields and capture them as the pristine snapshot.
    Initialize(Vec<Field>),
    /// Programmatic value update (pre-population). Validates, stays untouched.
    SetFieldValue { name: String, value: FieldValue },
    /// User edit. Marks touched; validates only if already touched.
    UpdateField { name: String, value: FieldValue },
    /// Validate one field and mark it touched.
    ValidateField { name: String },
    /// Validate every field and mark all touched.
    ValidateAll,
    /// Toggle the submission-in-flight flag.
    SetLoading(bool),
    /// Restore the pristine snapshot.
    Reset,
    /// Force a field invalid with a caller-supplied message.
    SetError { name: String, message: String },
}

impl FormAction {
    /// Short action name for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Initialize(_) => "initialize",
            Self::SetFieldValue { .. } => "set_field_value",
            Self::UpdateField { .. } => "update_field",
            Self::ValidateField { .. } => "validate_field",
            Self::ValidateAll => "validate_all",
            Self::SetLoading(_) => "set_loading",
            Self::Reset => "reset",
            Self::SetError { .. } => "set_error",
        }
    }
}
