//! Rule evaluation for single fields and field sets.

use crate::field::{Field, FieldValue};

const REQUIRED_MESSAGE: &str = "This field is required";
const INVALID_FORMAT_MESSAGE: &str = "Invalid format";

/// Validate a field against its rule.
///
/// Returns a new field with `is_valid` and `error` recomputed. Checks run in
/// a fixed order and the first violation wins:
///
/// 1. required and empty
/// 2. empty and optional (valid, nothing else applies)
/// 3. text: `min_length`, `max_length`, `pattern`
/// 4. number: `min`, `max`
pub fn validate_field(field: &Field) -> Field {
    let rule = &field.validation;
    let value = &field.value;

    if rule.is_required() && value.is_empty() {
        return field.clone().into_invalid(rule.message_or(REQUIRED_MESSAGE));
    }

    if value.is_empty() {
        return field.clone().into_valid();
    }

    let mut errors = Vec::new();

    match value {
        FieldValue::Text(text) => {
            let length = text.chars().count();
            if let Some(min) = rule.min_length
                && length < min
            {
                errors.push(rule.message_or(format!("Minimum length is {}", min)));
            }
            if let Some(max) = rule.max_length
                && length > max
            {
                errors.push(rule.message_or(format!("Maximum length is {}", max)));
            }
            if let Some(pattern) = &rule.pattern
                && !pattern.is_match(text)
            {
                errors.push(rule.message_or(INVALID_FORMAT_MESSAGE));
            }
        }
        FieldValue::Number(number) => {
            if let Some(min) = rule.min
                && *number < min
            {
                errors.push(rule.message_or(format!("Minimum value is {}", min)));
            }
            if let Some(max) = rule.max
                && *number > max
            {
                errors.push(rule.message_or(format!("Maximum value is {}", max)));
            }
        }
        FieldValue::Bool(_) | FieldValue::Null => {}
    }

    match errors.into_iter().next() {
        Some(message) => field.clone().into_invalid(message),
        None => field.clone().into_valid(),
    }
}

/// Validate every field, preserving order.
///
/// Returns the validated fields and whether all of them passed.
pub fn validate_all_fields(fields: &[Field]) -> (Vec<Field>, bool) {
    let validated: Vec<Field> = fields.iter().map(validate_field).collect();
    let is_valid = validated.iter().all(|field| field.is_valid);
    (validated, is_valid)
}

/// Check whether a field would pass validation, without producing a new field.
pub fn is_field_valid(field: &Field) -> bool {
    validate_field(field).is_valid
}
