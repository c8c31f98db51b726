//! Integration tests for the dbup CLI surface.
//!
//! These verify argument parsing, help output, and the failure paths that
//! never reach the network.

#![allow(clippy::expect_used)]

use assert_cmd::Command;
use predicates::prelude::*;

fn dbup() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("dbup"));
    cmd.env("NO_COLOR", "1");
    // Keep test runs independent of the developer's real config.
    cmd.env("DBUP_CONFIG", "/nonexistent/dbup-config.yaml");
    cmd.env_remove("DBUP_DB_PASSWORD");
    cmd.env_remove("DBUP_API_TOKEN");
    cmd
}

// --- Help and version tests ---

#[test]
fn test_cli_no_args_shows_help_and_exits_two() {
    // clap with arg_required_else_help shows help on stderr and exits 2
    dbup().assert().code(2).stderr(predicate::str::contains(
        "Managed PostgreSQL provisioning",
    ));
}

#[test]
fn test_cli_help_flag_shows_help() {
    dbup()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("Commands:"));
}

#[test]
fn test_help_lists_all_commands() {
    dbup()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("deploy"))
        .stdout(predicate::str::contains("status"))
        .stdout(predicate::str::contains("config"))
        .stdout(predicate::str::contains("version"));
}

#[test]
fn test_version_command_shows_version() {
    dbup()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("dbup 0.1.0"));
}

#[test]
fn test_version_command_json_outputs_valid_json() {
    dbup()
        .arg("version")
        .arg("--json")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""version": "0.1.0""#));
}

// --- Deploy argument handling (fails before any network call) ---

#[test]
fn test_deploy_without_name_fails_when_prompts_disabled() {
    dbup()
        .args(["deploy", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--name is required"));
}

#[test]
fn test_deploy_without_password_fails_when_prompts_disabled() {
    dbup()
        .args(["deploy", "--yes", "--name", "app-db"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("DBUP_DB_PASSWORD"));
}

#[test]
fn test_deploy_short_password_fails_validation_offline() {
    // Control plane points at a closed port: validation must reject the
    // short password before anything tries to connect.
    dbup()
        .args(["deploy", "--yes", "--name", "app-db"])
        .env("DBUP_DB_PASSWORD", "short77")
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least 8 characters"));
}

#[test]
fn test_deploy_invalid_name_fails_validation_offline() {
    dbup()
        .args(["deploy", "--yes", "--name", "Not_Valid"])
        .env("DBUP_DB_PASSWORD", "hunter2222")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid instance identifier"));
}

// --- Status argument handling ---

#[test]
fn test_status_requires_identifier() {
    dbup()
        .arg("status")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("IDENTIFIER"));
}
