//! Tests for configuration key/value validation.

#![allow(clippy::expect_used)]

use dbup_cli::domain::config::{VALID_CONFIG_KEYS, validate_config_key, validate_config_value};

#[test]
fn every_published_key_validates() {
    for key in VALID_CONFIG_KEYS {
        assert!(validate_config_key(key).is_ok(), "key {key} should be valid");
    }
}

#[test]
fn unknown_key_error_lists_alternatives() {
    let msg = validate_config_key("poll.interval")
        .expect_err("unknown key")
        .to_string();
    assert!(msg.contains("poll.interval_seconds"), "got: {msg}");
}

#[test]
fn poll_values_must_be_positive_integers() {
    assert!(validate_config_value("poll.interval_seconds", "30").is_ok());
    assert!(validate_config_value("poll.interval_seconds", "0").is_err());
    assert!(validate_config_value("poll.deadline_seconds", "-5").is_err());
    assert!(validate_config_value("poll.deadline_seconds", "tomorrow").is_err());
}

#[test]
fn base_url_must_carry_a_scheme() {
    assert!(validate_config_value("api.base_url", "http://localhost:8080").is_ok());
    assert!(validate_config_value("api.base_url", "ftp://cp.internal").is_err());
}
