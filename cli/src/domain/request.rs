//! Provision request building — pure validation and normalization, no I/O.
//!
//! All functions in this module are synchronous and take data in, returning
//! data out. Zero imports from `tokio`, `std::fs`, `crate::infra`,
//! `crate::commands`, or `crate::application`.

use std::collections::BTreeMap;

use regex::Regex;
use std::sync::LazyLock;

use dbup_common::CreateInstance;

use crate::domain::error::ValidationError;

// ── Constants ────────────────────────────────────────────────────────────────

/// Minimum master-password length enforced before any network call.
pub const MIN_SECRET_LEN: usize = 8;

/// Engine fixed by the product: managed PostgreSQL only.
pub const DB_ENGINE: &str = "postgres";
pub const DB_ENGINE_VERSION: &str = "15.3";

/// Storage parameters applied to every instance.
pub const STORAGE_TYPE: &str = "gp3";
pub const BACKUP_RETENTION_DAYS: u32 = 7;

/// Same charset rule the control plane enforces; checked here so collisions
/// and rejections surface before any network call.
// Safety: this is a compile-time constant pattern — cannot fail.
#[allow(clippy::expect_used)]
pub static IDENTIFIER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z]([a-z0-9-]{0,62})$").expect("valid regex"));

// ── Raw parameters ───────────────────────────────────────────────────────────

/// Caller-supplied parameters, unvalidated. Collected from flags, prompts,
/// and config defaults by the command layer.
#[derive(Debug, Clone)]
pub struct ProvisionParams {
    pub identifier: String,
    pub database: String,
    pub username: String,
    pub secret: String,
    pub instance_class: String,
    pub storage_gb: u32,
    pub tags: BTreeMap<String, String>,
}

// ── Validated request ────────────────────────────────────────────────────────

/// Immutable, validated creation request. Constructed once per deployment
/// attempt via [`build`]; fields are private so it can never be mutated
/// after validation.
#[derive(Debug, Clone)]
pub struct ProvisionRequest {
    identifier: String,
    database: String,
    username: String,
    secret: String,
    instance_class: String,
    storage_gb: u32,
    tags: BTreeMap<String, String>,
}

impl ProvisionRequest {
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    #[must_use]
    pub fn database(&self) -> &str {
        &self.database
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    #[must_use]
    pub fn instance_class(&self) -> &str {
        &self.instance_class
    }

    #[must_use]
    pub fn storage_gb(&self) -> u32 {
        self.storage_gb
    }

    #[must_use]
    pub fn tags(&self) -> &BTreeMap<String, String> {
        &self.tags
    }

    /// Wire payload for the control plane's create call. The secret leaves
    /// the process only here.
    #[must_use]
    pub fn to_create_payload(&self) -> CreateInstance {
        CreateInstance {
            identifier: self.identifier.clone(),
            instance_class: self.instance_class.clone(),
            engine: DB_ENGINE.to_string(),
            engine_version: DB_ENGINE_VERSION.to_string(),
            username: self.username.clone(),
            secret: self.secret.clone(),
            storage_gb: self.storage_gb,
            storage_type: STORAGE_TYPE.to_string(),
            storage_encrypted: true,
            backup_retention_days: BACKUP_RETENTION_DAYS,
            database: self.database.clone(),
            tags: self.tags.clone(),
        }
    }
}

/// Build a validated `ProvisionRequest` from raw parameters.
///
/// Pure — performs no I/O, so it can fail only on caller-supplied data,
/// never on external-system state.
///
/// # Errors
///
/// Returns a [`ValidationError`] if the identifier is empty or malformed,
/// the secret is shorter than [`MIN_SECRET_LEN`], the storage size is zero,
/// or the database/username is empty.
pub fn build(params: ProvisionParams) -> Result<ProvisionRequest, ValidationError> {
    let identifier = params.identifier.trim().to_string();
    if identifier.is_empty() {
        return Err(ValidationError::IdentifierEmpty);
    }
    if !IDENTIFIER_RE.is_match(&identifier) {
        return Err(ValidationError::IdentifierInvalid(identifier));
    }
    if params.secret.len() < MIN_SECRET_LEN {
        return Err(ValidationError::SecretTooShort {
            min: MIN_SECRET_LEN,
        });
    }
    if params.storage_gb == 0 {
        return Err(ValidationError::StorageZero);
    }
    let database = params.database.trim().to_string();
    if database.is_empty() {
        return Err(ValidationError::DatabaseEmpty);
    }
    let username = params.username.trim().to_string();
    if username.is_empty() {
        return Err(ValidationError::UsernameEmpty);
    }

    Ok(ProvisionRequest {
        identifier,
        database,
        username,
        secret: params.secret,
        instance_class: params.instance_class,
        storage_gb: params.storage_gb,
        tags: params.tags,
    })
}
