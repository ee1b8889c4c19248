//! Basic CLI E2E tests.
//!
//! Tests invoke the binary via cargo run with HOME pointed at a temp dir so
//! settings and tracked state stay isolated. Only commands that never reach
//! the network or the OS keyring are exercised here.

use std::path::Path;
use std::process::Command;

const INSTANCE: &str =
    "/subscriptions/e4d1ff1d-54a6-4f6c-a0f0-7d1e1a8cf9b1/resourceGroups/rg-data/managedInstances/sqlmi-prod";

/// Run the CLI with an isolated HOME and return (stdout, stderr, code).
fn run_cli(home: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "offhours-cli", "--"])
        .args(args)
        .env("HOME", home)
        .env_remove("OFFHOURS_ENV")
        .env_remove("OFFHOURS_TOKEN")
        .output()
        .expect("failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn valid_declaration() -> String {
    format!(
        r#"managed_instance_id = "{INSTANCE}"
description = "weekday hours"

[[schedule_list]]
start_day = "Monday"
start_time = "08:00"
stop_day = "Friday"
stop_time = "18:00"
"#
    )
}

#[test]
fn test_help_exits_zero() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["--help"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("start/stop schedules"));
}

#[test]
fn test_validate_accepts_good_declaration() {
    let home = tempfile::tempdir().unwrap();
    let file = home.path().join("schedule.toml");
    std::fs::write(&file, valid_declaration()).unwrap();

    let (stdout, stderr, code) = run_cli(home.path(), &["validate", "-f", file.to_str().unwrap()]);
    assert_eq!(code, 0, "stderr: {stderr}");
    assert!(stdout.contains("is valid"));
}

#[test]
fn test_validate_reports_violations() {
    let home = tempfile::tempdir().unwrap();
    let file = home.path().join("schedule.toml");
    std::fs::write(
        &file,
        format!("managed_instance_id = \"{INSTANCE}\"\nschedule_list = []\n"),
    )
    .unwrap();

    let (_, stderr, code) = run_cli(home.path(), &["validate", "-f", file.to_str().unwrap()]);
    assert_ne!(code, 0);
    assert!(stderr.contains("schedule_list"));
}

#[test]
fn test_validate_rejects_unknown_day() {
    let home = tempfile::tempdir().unwrap();
    let file = home.path().join("schedule.toml");
    std::fs::write(
        &file,
        valid_declaration().replace("\"Monday\"", "\"Funday\""),
    )
    .unwrap();

    let (_, _, code) = run_cli(home.path(), &["validate", "-f", file.to_str().unwrap()]);
    assert_ne!(code, 0);
}

#[test]
fn test_config_set_and_show_round_trip() {
    let home = tempfile::tempdir().unwrap();

    let (_, stderr, code) = run_cli(
        home.path(),
        &["config", "set", "--endpoint", "https://mgmt.example", "--api-version", "2024-06-01"],
    );
    assert_eq!(code, 0, "stderr: {stderr}");

    let (stdout, _, code) = run_cli(home.path(), &["config", "show"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("https://mgmt.example"));
    assert!(stdout.contains("2024-06-01"));
}

#[test]
fn test_config_set_rejects_bad_endpoint() {
    let home = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(home.path(), &["config", "set", "--endpoint", "not a url"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("not a valid url"));
}

#[test]
fn test_show_without_tracked_state_fails() {
    let home = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(home.path(), &["show"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("no schedule is tracked"));
}

#[test]
fn test_destroy_without_tracked_state_fails() {
    let home = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(home.path(), &["destroy"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("nothing to destroy"));
}

#[test]
fn test_import_rejects_malformed_id() {
    let home = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(home.path(), &["import", "not-an-id"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("invalid schedule id"));
}
