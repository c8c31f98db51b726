//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain` and `dbup_common` — never
//! from `crate::infra`, `crate::commands`, or `crate::output`.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use thiserror::Error;

use dbup_common::{CreateInstance, CreateReply, Identity, InstanceDescription};

use crate::domain::DbupConfig;

// ── Provisioning API Port ─────────────────────────────────────────────────────

/// Creation faults, classified at the port boundary so the service layer can
/// tell an identifier collision from everything else without parsing
/// transport details.
#[derive(Debug, Error)]
pub enum CreateFault {
    /// The identifier collides with a pre-existing instance.
    #[error("an instance with this identifier already exists")]
    AlreadyExists,
    /// Any other creation failure: quota, server-side rejection, transport.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// The managed-resource control plane: one mutating call, one read.
#[allow(async_fn_in_trait)]
pub trait ProvisioningApi {
    /// Issue the creation call. Callers invoke this at most once per
    /// identifier and never retry it.
    async fn create_instance(&self, request: &CreateInstance)
    -> Result<CreateReply, CreateFault>;

    /// Query current instance status. Idempotent and side-effect-free;
    /// the poller retries this freely within its deadline.
    async fn describe_instance(&self, identifier: &str) -> Result<InstanceDescription>;
}

// ── Identity Port ─────────────────────────────────────────────────────────────

/// The identity/credential service.
#[allow(async_fn_in_trait)]
pub trait IdentityApi {
    /// Resolve the caller's identity. Any failure means the caller has no
    /// usable credentials.
    async fn whoami(&self) -> Result<Identity>;
}

// ── Clock Port ────────────────────────────────────────────────────────────────

/// Abstracts time so the poll loop can run against a simulated clock in
/// tests instead of real wall-clock delay.
#[allow(async_fn_in_trait)]
pub trait Clock {
    /// Monotonic reading since an arbitrary fixed origin.
    fn now(&self) -> Duration;
    /// Suspend the calling flow for `duration`. Cooperative — the caller
    /// performs no other work while waiting.
    async fn sleep(&self, duration: Duration);
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait — no async needed.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
}

// ── Config Store Port ─────────────────────────────────────────────────────────

/// Abstracts configuration persistence (load/save/path).
pub trait ConfigStore {
    /// Load the configuration, falling back to defaults when no file exists.
    fn load(&self) -> Result<DbupConfig>;
    /// Persist the configuration.
    fn save(&self, config: &DbupConfig) -> Result<()>;
    /// Location of the backing file.
    fn path(&self) -> Result<PathBuf>;
}
