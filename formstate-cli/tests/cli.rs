//! End-to-end tests running the CLI against the bundled demo form.

use std::path::PathBuf;
use std::process::{Command, Output};

use tempfile::TempDir;

fn demo(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../demos")
        .join(name)
}

fn formstate(args: &[&str]) -> Output {
    let log_dir = TempDir::new().unwrap();
    Command::new(env!("CARGO_BIN_EXE_formstate"))
        .arg("--log-file")
        .arg(log_dir.path().join("formstate.log"))
        .args(args)
        .output()
        .expect("failed to run formstate")
}

#[test]
fn test_check_prints_initial_state() {
    let definition = demo("sign-up.json");
    let output = formstate(&["check", definition.to_str().unwrap()]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[0], "Create account");
    assert_eq!(lines[1], "form valid=false loading=false submit=\"Create account\"");
    assert_eq!(lines.len(), 6);
}

#[test]
fn test_run_demo_script() {
    let definition = demo("sign-up.json");
    let script = demo("sign-up.txt");
    let output = formstate(&[
        "run",
        definition.to_str().unwrap(),
        script.to_str().unwrap(),
    ]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Minimum length is 3"));
    assert!(stdout.contains("You must be an adult"));
    assert!(stdout.contains("error: Username is already taken"));
    assert!(stdout.contains("success: Form submitted successfully"));
    assert!(stdout.lines().last().is_some_and(|line| line.contains("newsletter")));
    assert!(stdout.contains("form valid=true loading=false"));
}

#[test]
fn test_missing_definition_fails() {
    let output = formstate(&["check", "/definitely/not/here.json"]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("loading form definition"));
}

#[test]
fn test_verbose_run_writes_log_file() {
    let log_dir = TempDir::new().unwrap();
    let log_file = log_dir.path().join("formstate.log");
    let definition = demo("sign-up.json");
    let script = demo("sign-up.txt");

    let status = Command::new(env!("CARGO_BIN_EXE_formstate"))
        .arg("--log-file")
        .arg(&log_file)
        .arg("--verbose")
        .args(["run", definition.to_str().unwrap(), script.to_str().unwrap()])
        .output()
        .expect("failed to run formstate")
        .status;
    assert!(status.success());

    let log = std::fs::read_to_string(&log_file).unwrap();
    assert!(log.contains("Script finished, form valid=true"));
}
