//! Domain types and validators for dbup configuration.
//!
//! Pure functions only — no I/O, no async, no filesystem access.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::domain::error::ConfigError;

// ── Constants ────────────────────────────────────────────────────────────────

pub const VALID_CONFIG_KEYS: &[&str] = &[
    "api.base_url",
    "defaults.instance_class",
    "defaults.storage_gb",
    "defaults.username",
    "poll.interval_seconds",
    "poll.deadline_seconds",
];

/// Time between status checks while waiting for an instance.
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 30;
/// Maximum total wait before declaring timeout.
pub const DEFAULT_POLL_DEADLINE_SECS: u64 = 1800;

// ── Config schema ────────────────────────────────────────────────────────────

/// Top-level configuration stored in `~/.dbup/config.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DbupConfig {
    /// Control-plane API settings.
    #[serde(default)]
    pub api: ApiConfig,
    /// Default sizing applied when flags and prompts are skipped.
    #[serde(default)]
    pub defaults: DeployDefaults,
    /// Readiness-poll settings.
    #[serde(default)]
    pub poll: PollConfig,
}

/// Control-plane API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the control-plane API.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

/// Default sizing for new instances.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeployDefaults {
    #[serde(default = "default_instance_class")]
    pub instance_class: String,
    #[serde(default = "default_storage_gb")]
    pub storage_gb: u32,
    #[serde(default = "default_username")]
    pub username: String,
}

impl Default for DeployDefaults {
    fn default() -> Self {
        Self {
            instance_class: default_instance_class(),
            storage_gb: default_storage_gb(),
            username: default_username(),
        }
    }
}

/// Readiness-poll settings: `{interval, deadline}` in whole seconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollConfig {
    #[serde(default = "default_poll_interval")]
    pub interval_seconds: u64,
    #[serde(default = "default_poll_deadline")]
    pub deadline_seconds: u64,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval_seconds: default_poll_interval(),
            deadline_seconds: default_poll_deadline(),
        }
    }
}

fn default_base_url() -> String {
    "https://api.dbup.dev".to_string()
}

fn default_instance_class() -> String {
    "db.t3.micro".to_string()
}

fn default_storage_gb() -> u32 {
    20
}

fn default_username() -> String {
    "postgres".to_string()
}

fn default_poll_interval() -> u64 {
    DEFAULT_POLL_INTERVAL_SECS
}

fn default_poll_deadline() -> u64 {
    DEFAULT_POLL_DEADLINE_SECS
}

// ── Validators ───────────────────────────────────────────────────────────────

/// Validates a configuration key against the whitelist.
///
/// # Errors
///
/// Returns an error if the key is not in the allowed list.
pub fn validate_config_key(key: &str) -> Result<()> {
    if !VALID_CONFIG_KEYS.contains(&key) {
        return Err(ConfigError::UnknownKey {
            key: key.to_string(),
            valid: VALID_CONFIG_KEYS.join(", "),
        }
        .into());
    }
    Ok(())
}

/// Validates a configuration value for the given key.
///
/// # Errors
///
/// Returns an error if the value is not valid for the key.
pub fn validate_config_value(key: &str, value: &str) -> Result<()> {
    let invalid = |reason: &str| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    };

    match key {
        "api.base_url" => {
            if !value.starts_with("http://") && !value.starts_with("https://") {
                return Err(invalid("Expected an http:// or https:// URL.").into());
            }
        }
        "defaults.storage_gb" | "poll.interval_seconds" | "poll.deadline_seconds" => {
            match value.parse::<u64>() {
                Ok(n) if n > 0 => {}
                _ => return Err(invalid("Expected a positive whole number.").into()),
            }
        }
        "defaults.instance_class" | "defaults.username" => {
            if value.trim().is_empty() {
                return Err(invalid("Expected a non-empty value.").into());
            }
        }
        _ => {}
    }
    Ok(())
}

// ── Unit tests ───────────────────────────────────────────────────────────────
