//! Tests for the YAML config store, exercising the `DBUP_CONFIG` override.
//!
//! These tests mutate process-wide environment variables and are therefore
//! serialized.

#![allow(clippy::expect_used)]

use serial_test::serial;

use dbup_cli::application::ports::ConfigStore;
use dbup_cli::domain::config::DbupConfig;
use dbup_cli::infra::config::YamlConfigStore;

// SAFETY: callers are #[serial]; no concurrent env access in this process.
#[allow(unsafe_code)]
fn set_config_env(path: &std::path::Path) {
    unsafe { std::env::set_var("DBUP_CONFIG", path) }
}

#[allow(unsafe_code)]
fn clear_config_env() {
    unsafe { std::env::remove_var("DBUP_CONFIG") }
}

#[test]
#[serial]
fn env_override_redirects_the_config_path() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("custom.yaml");
    set_config_env(&path);

    let resolved = YamlConfigStore.path().expect("path resolves");
    assert_eq!(resolved, path);

    clear_config_env();
}

#[test]
#[serial]
fn missing_file_loads_defaults() {
    let dir = tempfile::tempdir().expect("temp dir");
    set_config_env(&dir.path().join("nonexistent.yaml"));

    let config = YamlConfigStore.load().expect("defaults load");
    assert_eq!(config.poll.interval_seconds, 30);
    assert_eq!(config.poll.deadline_seconds, 1800);

    clear_config_env();
}

#[test]
#[serial]
fn save_then_load_roundtrips() {
    let dir = tempfile::tempdir().expect("temp dir");
    set_config_env(&dir.path().join("config.yaml"));

    let mut config = DbupConfig::default();
    config.poll.deadline_seconds = 900;
    config.defaults.storage_gb = 50;
    YamlConfigStore.save(&config).expect("save");

    let back = YamlConfigStore.load().expect("load");
    assert_eq!(back.poll.deadline_seconds, 900);
    assert_eq!(back.defaults.storage_gb, 50);

    clear_config_env();
}
