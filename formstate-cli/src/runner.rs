//! Replays scripted events against a form controller.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use clap::ValueEnum;
use formstate::prelude::*;

use crate::script::{ScriptCommand, SubmitPlan};

/// How form state is printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Submit handler whose response is chosen by the script.
struct ScriptedSubmitter {
    plan: Arc<Mutex<SubmitPlan>>,
}

#[async_trait]
impl SubmitHandler for ScriptedSubmitter {
    async fn submit(&self, fields: Vec<Field>, helpers: SubmitHelpers) -> Result<(), SubmitError> {
        let plan = self
            .plan
            .lock()
            .map(|plan| plan.clone())
            .unwrap_or(SubmitPlan::Accept);
        log::info!("Scripted submit of {} fields: {:?}", fields.len(), plan);

        match plan {
            SubmitPlan::Accept => {
                helpers.set_loading(false);
                Ok(())
            }
            SubmitPlan::AcceptKeepLoading => Ok(()),
            SubmitPlan::Fail(Some(message)) => Err(SubmitError::new(message)),
            SubmitPlan::Fail(None) => Err(SubmitError::unspecified()),
            SubmitPlan::Reject { field, message } => {
                helpers.set_error(field, message.clone());
                Err(SubmitError::new(message))
            }
        }
    }
}

/// Drives one form through a script, writing results to `out`.
pub struct Runner<W: Write> {
    form: FormController,
    plan: Arc<Mutex<SubmitPlan>>,
    notices: Arc<Mutex<Vec<String>>>,
    format: OutputFormat,
    out: W,
}

impl<W: Write> Runner<W> {
    /// Create a runner for a form definition.
    pub fn new(definition: FormDefinition, format: OutputFormat, out: W) -> Self {
        let plan = Arc::new(Mutex::new(SubmitPlan::Accept));
        let notices = Arc::new(Mutex::new(Vec::new()));

        let success = Arc::clone(&notices);
        let failure = Arc::clone(&notices);

        let form = FormController::new(
            definition.fields,
            ScriptedSubmitter {
                plan: Arc::clone(&plan),
            },
        )
        .with_config(definition.config)
        .on_success(move |message| {
            if let Ok(mut notices) = success.lock() {
                notices.push(format!("success: {}", message.unwrap_or("")));
            }
        })
        .on_error(move |message| {
            if let Ok(mut notices) = failure.lock() {
                notices.push(format!("error: {}", message));
            }
        });

        Self {
            form,
            plan,
            notices,
            format,
            out,
        }
    }

    /// Get the driven form.
    pub fn form(&self) -> &FormController {
        &self.form
    }

    /// Apply every command in order.
    pub async fn run(&mut self, commands: Vec<ScriptCommand>) -> io::Result<()> {
        for command in commands {
            self.apply(command).await?;
        }
        Ok(())
    }

    /// Apply one command.
    pub async fn apply(&mut self, command: ScriptCommand) -> io::Result<()> {
        log::debug!("Applying {:?}", command);

        match command {
            ScriptCommand::Change { field, value } => self.form.handle_change(field, value),
            ScriptCommand::Set { field, value } => self.form.set_field_value(field, value),
            ScriptCommand::Blur { field } => self.form.handle_blur(field),
            ScriptCommand::Validate { field } => {
                let valid = self.form.validate_field(&field);
                writeln!(self.out, "validate {}: {}", field, verdict(valid))?;
            }
            ScriptCommand::ValidateAll => {
                let valid = self.form.validate_all();
                writeln!(self.out, "validate-all: {}", verdict(valid))?;
            }
            ScriptCommand::Error { field, message } => self.form.set_field_error(field, message),
            ScriptCommand::Loading(loading) => self.form.set_loading(loading),
            ScriptCommand::Reset => self.form.reset(),
            ScriptCommand::Submit(plan) => {
                if let Ok(mut current) = self.plan.lock() {
                    *current = plan;
                }
                let outcome = self.form.handle_submit().await;
                log::debug!("Submit outcome: {:?}", outcome);
                self.flush_notices()?;
            }
            ScriptCommand::Print => self.print_state()?,
        }

        Ok(())
    }

    fn flush_notices(&mut self) -> io::Result<()> {
        let notices = self
            .notices
            .lock()
            .map(|mut notices| std::mem::take(&mut *notices))
            .unwrap_or_default();
        for notice in notices {
            writeln!(self.out, "{}", notice)?;
        }
        Ok(())
    }

    /// Print the current form state.
    pub fn print_state(&mut self) -> io::Result<()> {
        let state = self.form.state();

        if self.format == OutputFormat::Json {
            let json = serde_json::to_string_pretty(&state).map_err(io::Error::other)?;
            return writeln!(self.out, "{}", json);
        }

        let commands = self.form.commands();
        writeln!(
            self.out,
            "form valid={} loading={} submit={:?}",
            state.is_valid,
            state.is_loading,
            commands.submit_label()
        )?;

        for field in &state.data {
            write!(
                self.out,
                "  {:<16} {:<24} {:<8} {:<7}",
                field.name,
                field.value.to_string(),
                if field.touched { "touched" } else { "pristine" },
                verdict(field.is_valid),
            )?;
            match field.visible_error() {
                Some(error) => writeln!(self.out, " {}", error)?,
                None => writeln!(self.out)?,
            }
        }

        Ok(())
    }
}

fn verdict(valid: bool) -> &'static str {
    if valid { "valid" } else { "invalid" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script;

    const DEFINITION: &str = r#"{
        "fields": [
            { "name": "email", "label": "Email", "value": "",
              "validation": { "required": true, "pattern": "^.+@.+$" } },
            { "name": "age", "label": "Age", "value": 30,
              "validation": { "min": 18 } }
        ]
    }"#;

    fn runner() -> Runner<Vec<u8>> {
        let definition = FormDefinition::from_json(DEFINITION).unwrap();
        Runner::new(definition, OutputFormat::Text, Vec::new())
    }

    async fn run(source: &str) -> (Runner<Vec<u8>>, String) {
        let mut runner = runner();
        runner.run(script::parse(source).unwrap()).await.unwrap();
        let output = String::from_utf8(runner.out.clone()).unwrap();
        (runner, output)
    }

    #[tokio::test]
    async fn test_invalid_submit() {
        let (runner, output) = run("submit").await;
        assert_eq!(output, "error: Please fix the errors in the form\n");
        assert!(!runner.form().is_loading());
    }

    #[tokio::test]
    async fn test_accepted_submit() {
        let (runner, output) = run("change email ada@example.com\nsubmit ok").await;
        assert_eq!(output, "success: Form submitted successfully\n");
        assert!(!runner.form().is_loading());
    }

    #[tokio::test]
    async fn test_keep_loading_submit() {
        let (runner, _) = run("set email ada@example.com\nsubmit keep-loading").await;
        assert!(runner.form().is_loading());
        assert_eq!(runner.form().commands().submit_label(), "Submitting...");
    }

    #[tokio::test]
    async fn test_rejected_submit() {
        let (runner, output) =
            run("change email ada@example.com\nsubmit reject email Already registered").await;
        assert_eq!(output, "error: Already registered\n");
        assert_eq!(
            runner.form().get_field_error("email").as_deref(),
            Some("Already registered")
        );
        assert!(!runner.form().is_loading());
    }

    #[tokio::test]
    async fn test_failed_submit_uses_fallback() {
        let (_, output) = run("change email ada@example.com\nsubmit fail").await;
        assert_eq!(output, "error: An error occurred while submitting the form\n");
    }

    #[tokio::test]
    async fn test_print_shows_touched_errors_only() {
        let (_, output) = run("change age 10\nblur age\nprint").await;
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines[0], "form valid=false loading=false submit=\"Submit\"");
        assert!(lines[1].starts_with("  email"));
        assert!(lines[1].trim_end().ends_with("invalid"));
        assert!(lines[2].starts_with("  age"));
        assert!(lines[2].ends_with("Minimum value is 18"));
    }

    #[tokio::test]
    async fn test_validate_commands_report_verdicts() {
        let (_, output) = run("validate email\nchange email a@b\nvalidate-all").await;
        assert_eq!(output, "validate email: invalid\nvalidate-all: valid\n");
    }

    #[tokio::test]
    async fn test_json_output() {
        let definition = FormDefinition::from_json(DEFINITION).unwrap();
        let mut runner = Runner::new(definition, OutputFormat::Json, Vec::new());
        runner.apply(ScriptCommand::Print).await.unwrap();

        let json: serde_json::Value = serde_json::from_slice(&runner.out).unwrap();
        assert_eq!(json["isValid"], false);
        assert_eq!(json["data"][1]["value"], 30.0);
    }
}
