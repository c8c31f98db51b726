//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use thiserror::Error;

use crate::domain::resource::ResourceState;

// ── Request validation errors ─────────────────────────────────────────────────

/// Errors raised while building a `ProvisionRequest` from caller input.
///
/// Purely caller-correctable: no variant depends on external-system state.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Instance identifier must not be empty.")]
    IdentifierEmpty,

    #[error(
        "Invalid instance identifier '{0}': must start with a letter and \
         contain only lowercase letters, digits, and hyphens (max 63 chars)."
    )]
    IdentifierInvalid(String),

    #[error("Master password must be at least {min} characters.")]
    SecretTooShort { min: usize },

    #[error("Storage size must be a positive number of gigabytes.")]
    StorageZero,

    #[error("Database name must not be empty.")]
    DatabaseEmpty,

    #[error("Master username must not be empty.")]
    UsernameEmpty,
}

// ── Provisioning pipeline errors ──────────────────────────────────────────────

/// Fatal outcomes of the provisioning pipeline.
///
/// Every variant aborts the run. Only status reads are ever retried, and
/// those retries happen inside the poll loop without surfacing here.
#[derive(Debug, Error)]
pub enum ProvisionError {
    #[error("Credential check failed: {reason}")]
    Credentials { reason: String },

    #[error(
        "Instance '{identifier}' already exists.\n\
         Pick another name, or reuse the existing instance: dbup status {identifier}"
    )]
    AlreadyExists { identifier: String },

    #[error("Creating instance '{identifier}' failed: {reason}")]
    Creation { identifier: String, reason: String },

    #[error(
        "Instance '{identifier}' did not become available within {deadline_secs}s.\n\
         Check progress with: dbup status {identifier}"
    )]
    PollTimeout {
        identifier: String,
        deadline_secs: u64,
    },

    #[error("Instance '{identifier}' entered a failed state while provisioning.")]
    ProvisioningFailed { identifier: String },

    #[error(
        "Could not read the endpoint for '{identifier}': {reason}\n\
         The instance was created and still exists. Retry with: dbup status {identifier}"
    )]
    Lookup { identifier: String, reason: String },
}

// ── Resource state errors ─────────────────────────────────────────────────────

/// Violation of the monotonic state machine: an attempted transition out of
/// a terminal state.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Instance '{identifier}' is already {state} and cannot change state.")]
pub struct StateError {
    pub identifier: String,
    pub state: ResourceState,
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to configuration key/value validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown setting: {key}\n\nValid settings: {valid}")]
    UnknownKey { key: String, valid: String },

    #[error("Invalid value for {key}: {value}\n\n{reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
}
