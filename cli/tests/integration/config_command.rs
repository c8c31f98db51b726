//! Integration tests for `dbup config`.

#![allow(clippy::expect_used)]

use assert_cmd::Command;
use predicates::prelude::*;

fn dbup_with_config(path: &std::path::Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("dbup"));
    cmd.env("NO_COLOR", "1");
    cmd.env("DBUP_CONFIG", path);
    cmd
}

#[test]
fn test_config_show_prints_defaults_without_a_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    dbup_with_config(&dir.path().join("config.yaml"))
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("poll.interval_seconds"))
        .stdout(predicate::str::contains("30"))
        .stdout(predicate::str::contains("1800"));
}

#[test]
fn test_config_set_then_show_roundtrips() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("config.yaml");

    dbup_with_config(&path)
        .args(["config", "set", "poll.interval_seconds", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Set poll.interval_seconds = 10"));

    dbup_with_config(&path)
        .args(["config", "show", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""interval_seconds": 10"#));
}

#[test]
fn test_config_set_unknown_key_fails() {
    let dir = tempfile::tempdir().expect("temp dir");
    dbup_with_config(&dir.path().join("config.yaml"))
        .args(["config", "set", "poll.cadence", "10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown setting"));
}

#[test]
fn test_config_set_zero_interval_fails() {
    let dir = tempfile::tempdir().expect("temp dir");
    dbup_with_config(&dir.path().join("config.yaml"))
        .args(["config", "set", "poll.interval_seconds", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("positive"));
}

#[test]
fn test_config_set_persists_to_the_given_path() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("config.yaml");

    dbup_with_config(&path)
        .args(["config", "set", "defaults.storage_gb", "100"])
        .assert()
        .success();

    let content = std::fs::read_to_string(&path).expect("config written");
    assert!(content.contains("storage_gb: 100"), "got: {content}");
}
