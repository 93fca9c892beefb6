//! Form state management.
//!
//! A form is an ordered list of [`Field`](field::Field)s with declarative
//! validation rules. A pure reducer ([`form::reduce`]) moves the form between
//! states; a [`FormController`](controller::FormController) owns that state,
//! exposes read and command operations to the widgets rendering the fields,
//! and runs the asynchronous submission lifecycle.

pub mod binding;
pub mod controller;
pub mod definition;
pub mod error;
pub mod field;
pub mod form;
pub mod validation;

pub mod prelude {
    pub use crate::binding::{FieldBinding, FormCommands};
    pub use crate::controller::{
        FormConfig, FormController, FormHandle, FormId, SubmitError, SubmitHandler,
        SubmitHelpers, SubmitOutcome,
    };
    pub use crate::definition::FormDefinition;
    pub use crate::error::FormError;
    pub use crate::field::{Field, FieldValue, ensure_unique_names};
    pub use crate::form::{FormAction, FormState, FormStore, reduce};
    pub use crate::validation::{
        Pattern, ValidationRule, is_field_valid, validate_all_fields, validate_field,
    };
}
