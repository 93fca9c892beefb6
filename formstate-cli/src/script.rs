//! Line-oriented event scripts.
//!
//! One command per line; blank lines and lines starting with `#` are
//! skipped. Values are read as JSON scalars when they parse (`42`, `true`,
//! `null`, `"quoted"`), otherwise as raw text. Values that start like a
//! number (`016`, `+5`) are read as numbers and rejected if they are not
//! one; quote them (`"555-0100"`) to keep them as text.
//!
//! ```text
//! change email bad
//! blur email
//! change email ada@example.com
//! submit reject email Already registered
//! print
//! ```

use std::fs;
use std::path::Path;

use formstate::field::FieldValue;
use thiserror::Error;

/// How the scripted submit handler should respond.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitPlan {
    /// Complete and clear the loading flag.
    Accept,
    /// Complete and leave the form loading (e.g. before a redirect).
    AcceptKeepLoading,
    /// Fail with an optional message.
    Fail(Option<String>),
    /// Mark a field invalid, then fail with the same message.
    Reject { field: String, message: String },
}

/// One scripted form event.
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptCommand {
    Change { field: String, value: FieldValue },
    Set { field: String, value: FieldValue },
    Blur { field: String },
    Validate { field: String },
    ValidateAll,
    Error { field: String, message: String },
    Loading(bool),
    Reset,
    Submit(SubmitPlan),
    Print,
}

/// Errors raised while reading a script.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("line {line}: unknown command '{command}'")]
    UnknownCommand { line: usize, command: String },

    #[error("line {line}: {message}")]
    Syntax { line: usize, message: String },

    #[error("failed to read script: {0}")]
    Io(#[from] std::io::Error),
}

impl ScriptError {
    fn syntax(line: usize, message: impl Into<String>) -> Self {
        Self::Syntax {
            line,
            message: message.into(),
        }
    }
}

/// Read and parse a script file.
pub fn load(path: impl AsRef<Path>) -> Result<Vec<ScriptCommand>, ScriptError> {
    parse(&fs::read_to_string(path)?)
}

/// Parse a script.
pub fn parse(source: &str) -> Result<Vec<ScriptCommand>, ScriptError> {
    source
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .map(|(number, line)| parse_line(number, line))
        .collect()
}

fn parse_line(number: usize, line: &str) -> Result<ScriptCommand, ScriptError> {
    let (command, rest) = split_word(line);

    let command = match command {
        "change" | "set" => {
            let (field, value) = split_word(rest);
            let field = require(number, field, "field name")?;
            let value = parse_value(number, value)?;
            if command == "change" {
                ScriptCommand::Change { field, value }
            } else {
                ScriptCommand::Set { field, value }
            }
        }
        "blur" => ScriptCommand::Blur {
            field: require(number, rest, "field name")?,
        },
        "validate" => ScriptCommand::Validate {
            field: require(number, rest, "field name")?,
        },
        "validate-all" => ScriptCommand::ValidateAll,
        "error" => {
            let (field, message) = split_word(rest);
            ScriptCommand::Error {
                field: require(number, field, "field name")?,
                message: require(number, message, "error message")?,
            }
        }
        "loading" => match rest {
            "on" => ScriptCommand::Loading(true),
            "off" => ScriptCommand::Loading(false),
            _ => return Err(ScriptError::syntax(number, "expected 'loading on|off'")),
        },
        "reset" => ScriptCommand::Reset,
        "submit" => ScriptCommand::Submit(parse_plan(number, rest)?),
        "print" => ScriptCommand::Print,
        other => {
            return Err(ScriptError::UnknownCommand {
                line: number,
                command: other.to_string(),
            });
        }
    };

    Ok(command)
}

fn parse_plan(number: usize, rest: &str) -> Result<SubmitPlan, ScriptError> {
    let (mode, rest) = split_word(rest);
    match mode {
        "" | "ok" => Ok(SubmitPlan::Accept),
        "keep-loading" => Ok(SubmitPlan::AcceptKeepLoading),
        "fail" => Ok(SubmitPlan::Fail(
            Some(rest.to_string()).filter(|message| !message.is_empty()),
        )),
        "reject" => {
            let (field, message) = split_word(rest);
            Ok(SubmitPlan::Reject {
                field: require(number, field, "field name")?,
                message: require(number, message, "error message")?,
            })
        }
        other => Err(ScriptError::syntax(
            number,
            format!("unknown submit mode '{}'", other),
        )),
    }
}

/// Split off the first whitespace-delimited word.
fn split_word(text: &str) -> (&str, &str) {
    match text.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (text, ""),
    }
}

fn require(number: usize, text: &str, what: &str) -> Result<String, ScriptError> {
    if text.is_empty() {
        Err(ScriptError::syntax(number, format!("missing {}", what)))
    } else {
        Ok(text.to_string())
    }
}

fn parse_value(number: usize, text: &str) -> Result<FieldValue, ScriptError> {
    if let Ok(value) = serde_json::from_str::<FieldValue>(text) {
        return Ok(value);
    }
    if !looks_numeric(text) {
        return Ok(FieldValue::from(text));
    }
    text.parse::<f64>().map(FieldValue::Number).map_err(|_| {
        ScriptError::syntax(
            number,
            format!("'{}' is not a number; quote it to use it as text", text),
        )
    })
}

fn looks_numeric(text: &str) -> bool {
    let digits = text.strip_prefix(['+', '-']).unwrap_or(text);
    let digits = digits.strip_prefix('.').unwrap_or(digits);
    digits.starts_with(|c: char| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_script() {
        let script = "\
# sign in
change email bad
set age 42
blur email

submit reject email Already registered
print";
        let commands = parse(script).unwrap();
        assert_eq!(
            commands,
            vec![
                ScriptCommand::Change {
                    field: "email".to_string(),
                    value: FieldValue::from("bad"),
                },
                ScriptCommand::Set {
                    field: "age".to_string(),
                    value: FieldValue::Number(42.0),
                },
                ScriptCommand::Blur {
                    field: "email".to_string(),
                },
                ScriptCommand::Submit(SubmitPlan::Reject {
                    field: "email".to_string(),
                    message: "Already registered".to_string(),
                }),
                ScriptCommand::Print,
            ]
        );
    }

    #[test]
    fn test_values() {
        let value = |text: &str| parse_value(1, text).unwrap();
        assert_eq!(value(""), FieldValue::from(""));
        assert_eq!(value("null"), FieldValue::Null);
        assert_eq!(value("true"), FieldValue::Bool(true));
        assert_eq!(value("\"42\""), FieldValue::from("42"));
        assert_eq!(value("two words"), FieldValue::from("two words"));
        assert_eq!(value("-"), FieldValue::from("-"));
    }

    #[test]
    fn test_loose_numbers() {
        assert_eq!(parse_value(1, "016").unwrap(), FieldValue::Number(16.0));
        assert_eq!(parse_value(1, "+5").unwrap(), FieldValue::Number(5.0));
        assert_eq!(parse_value(1, ".5").unwrap(), FieldValue::Number(0.5));

        let err = parse("change phone 555-0100").unwrap_err();
        assert!(matches!(err, ScriptError::Syntax { line: 1, .. }));
        assert_eq!(
            parse("change phone \"555-0100\"").unwrap(),
            vec![ScriptCommand::Change {
                field: "phone".to_string(),
                value: FieldValue::from("555-0100"),
            }]
        );
    }

    #[test]
    fn test_submit_modes() {
        assert_eq!(parse_plan(1, "").unwrap(), SubmitPlan::Accept);
        assert_eq!(parse_plan(1, "keep-loading").unwrap(), SubmitPlan::AcceptKeepLoading);
        assert_eq!(parse_plan(1, "fail").unwrap(), SubmitPlan::Fail(None));
        assert_eq!(
            parse_plan(1, "fail Server down").unwrap(),
            SubmitPlan::Fail(Some("Server down".to_string()))
        );
        assert!(parse_plan(1, "maybe").is_err());
    }

    #[test]
    fn test_errors_carry_line_numbers() {
        let err = parse("print\n\njump email").unwrap_err();
        assert!(matches!(err, ScriptError::UnknownCommand { line: 3, .. }));

        let err = parse("blur").unwrap_err();
        assert_eq!(err.to_string(), "line 1: missing field name");
    }
}
