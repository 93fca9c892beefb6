//! Field validation.
//!
//! Rules are declarative ([`ValidationRule`]) and evaluated by pure
//! functions that return new fields rather than mutating their input.
//!
//! # Example
//!
//! ```
//! use formstate::field::Field;
//! use formstate::validation::{ValidationRule, validate_field};
//!
//! let email = Field::new("email", "Email")
//!     .with_value("bad")
//!     .with_validation(ValidationRule::new().required().pattern("^.+@.+$").unwrap());
//!
//! let checked = validate_field(&email);
//! assert!(!checked.is_valid);
//! assert_eq!(checked.error.as_deref(), Some("Invalid format"));
//! ```

mod rule;
mod validator;

pub use rule::{Pattern, ValidationRule};
pub use validator::{is_field_valid, validate_all_fields, validate_field};
