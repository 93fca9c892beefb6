use crate::field::Field;
use crate::validation::{validate_all_fields, validate_field};

use super::{FormAction, FormState};

/// Compute the state that follows `state` under `action`.
///
/// Pure: the input is never modified and no side effects run besides
/// logging. Actions naming an unknown field leave every field as it was.
pub fn reduce(state: &FormState, action: FormAction) -> FormState {
    log::debug!("Reducing form action '{}'", action.kind());

    match action {
        FormAction::Initialize(fields) => {
            // Errors are computed but stay hidden until interaction.
            let data: Vec<Field> = fields
                .iter()
                .map(|field| validate_field(field).with_touched(false))
                .collect();
            let is_valid = all_valid(&data);

            FormState {
                original_data: data.clone(),
                data,
                is_valid,
                is_loading: false,
            }
        }

        FormAction::SetFieldValue { name, value } => {
            let data = map_field(&state.data, &name, |field| {
                validate_field(&field.with_value(value)).with_touched(false)
            });
            let is_valid = all_valid(&data);
            with_data(state, data, is_valid)
        }

        FormAction::UpdateField { name, value } => {
            let data = map_field(&state.data, &name, |field| {
                let was_touched = field.touched;
                let updated = field.with_value(value).with_touched(true);
                if was_touched {
                    validate_field(&updated)
                } else {
                    updated
                }
            });
            // Fields the user never reached cannot block submit.
            let is_valid = data.iter().all(|field| !field.touched || field.is_valid);
            with_data(state, data, is_valid)
        }

        FormAction::ValidateField { name } => {
            if state.field(&name).is_none() {
                log::warn!("Cannot validate unknown field '{}'", name);
                return state.clone();
            }

            let data = map_field(&state.data, &name, |field| {
                validate_field(&field).with_touched(true)
            });
            let is_valid = all_valid(&data);
            with_data(state, data, is_valid)
        }

        FormAction::ValidateAll => {
            let (validated, is_valid) = validate_all_fields(&state.data);
            let data = validated
                .into_iter()
                .map(|field| field.with_touched(true))
                .collect();
            with_data(state, data, is_valid)
        }

        FormAction::SetLoading(is_loading) => FormState {
            is_loading,
            ..state.clone()
        },

        FormAction::Reset => FormState {
            original_data: state.original_data.clone(),
            data: state
                .original_data
                .iter()
                .cloned()
                .map(|field| field.with_touched(false))
                .collect(),
            is_valid: all_valid(&state.original_data),
            is_loading: false,
        },

        FormAction::SetError { name, message } => {
            let data = map_field(&state.data, &name, |field| {
                field.into_invalid(message).with_touched(true)
            });
            let is_valid = all_valid(&data);
            with_data(state, data, is_valid)
        }
    }
}

fn all_valid(fields: &[Field]) -> bool {
    fields.iter().all(|field| field.is_valid)
}

/// Copy `fields`, replacing the one named `name` with `update(field)`.
fn map_field(fields: &[Field], name: &str, update: impl FnOnce(Field) -> Field) -> Vec<Field> {
    let mut data = fields.to_vec();
    match data.iter().position(|field| field.name == name) {
        Some(index) => {
            let field = data[index].clone();
            data[index] = update(field);
        }
        None => log::warn!("Ignoring action for unknown field '{}'", name),
    }
    data
}

fn with_data(state: &FormState, data: Vec<Field>, is_valid: bool) -> FormState {
    FormState {
        original_data: state.original_data.clone(),
        data,
        is_valid,
        is_loading: state.is_loading,
    }
}
