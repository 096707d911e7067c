//! CLI surface specs
//!
//! Black-box checks of the binary: help text, completions, and the
//! unreachable-backend error path.

use assert_cmd::Command;
use predicates::prelude::*;

fn mlc() -> Command {
    let mut command = Command::cargo_bin("mlc").unwrap();
    // Keep specs hermetic: never pick up a developer's real config.
    command.env("MLC_API_URL", "http://127.0.0.1:9");
    command.env("MLC_TIMEOUT_MS", "2000");
    command.env_remove("MLC_API_TOKEN");
    command
}

#[test]
fn help_lists_the_pipeline_commands() {
    mlc()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("status"))
        .stdout(predicate::str::contains("source"))
        .stdout(predicate::str::contains("train"));
}

#[test]
fn unknown_subcommand_fails() {
    mlc().arg("definitely-not-a-command").assert().failure();
}

#[test]
fn completions_print_a_script() {
    mlc()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("mlc"));
}

#[test]
fn unreachable_backend_reports_a_recoverable_error() {
    mlc()
        .args(["project", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("could not reach the backend"));
}

#[test]
fn map_requires_both_columns() {
    mlc()
        .args(["map", "1", "--date", "date"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--value"));
}
