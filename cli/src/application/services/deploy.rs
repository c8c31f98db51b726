//! Application service — the deploy use-case.
//!
//! Runs the full provisioning pipeline: build → credential check → create →
//! poll → resolve. Imports only from `crate::domain` and
//! `crate::application::ports`; all I/O is routed through injected port
//! traits.

use anyhow::{Context, Result};
use chrono::Utc;

use dbup_common::Identity;

use crate::application::ports::{
    Clock, CreateFault, IdentityApi, ProgressReporter, ProvisioningApi,
};
use crate::application::services::{identity, poller, resolve};
use crate::domain::connection::ConnectionDetails;
use crate::domain::error::ProvisionError;
use crate::domain::request::{self, ProvisionParams, ProvisionRequest};
use crate::domain::resource::ResourceHandle;

pub use crate::application::services::poller::PollSettings;

/// Outcome of a successful deploy run.
#[derive(Debug)]
pub struct Deployment {
    pub identity: Identity,
    pub handle: ResourceHandle,
    pub details: ConnectionDetails,
}

/// Provision one instance end to end.
///
/// Stages run strictly in sequence and each failure is terminal for the
/// pipeline — no stage is ever restarted. Request validation is pure and
/// runs first, so malformed input fails before any external call; the
/// credential check still precedes the one mutating call.
///
/// # Errors
///
/// Returns the typed error of whichever stage failed: `ValidationError`,
/// or a [`ProvisionError`] variant for the credential, create, poll, and
/// resolve stages.
pub async fn deploy_instance(
    api: &impl ProvisioningApi,
    ident: &impl IdentityApi,
    clock: &impl Clock,
    reporter: &impl ProgressReporter,
    params: ProvisionParams,
    settings: &PollSettings,
) -> Result<Deployment> {
    let request = build_request(params)?;

    let caller = identity::check_credentials(ident, reporter).await?;

    let mut handle = create_instance(api, reporter, &request).await?;

    reporter.step("waiting for instance to be available... (this may take 10-15 minutes)");
    poller::await_available(api, clock, reporter, &mut handle, settings).await?;

    let details =
        resolve::resolve_endpoint(api, handle.identifier(), request.database(), request.username())
            .await?;

    Ok(Deployment {
        identity: caller,
        handle,
        details,
    })
}

/// Validate caller parameters into an immutable request, stamping the
/// standard tags the control plane expects on every instance.
fn build_request(mut params: ProvisionParams) -> Result<ProvisionRequest> {
    let name = params.identifier.trim().to_string();
    params
        .tags
        .entry("Name".to_string())
        .or_insert_with(|| name);
    params
        .tags
        .entry("ManagedBy".to_string())
        .or_insert_with(|| "dbup".to_string());
    params
        .tags
        .entry("CreatedAt".to_string())
        .or_insert_with(|| Utc::now().to_rfc3339());

    let request = request::build(params).context("invalid deployment parameters")?;
    Ok(request)
}

/// Issue the single creation call.
///
/// Exactly one external call, never retried: a collision is surfaced as
/// [`ProvisionError::AlreadyExists`] and anything else as
/// [`ProvisionError::Creation`]. Retrying a possibly-partially-applied
/// creation risks duplicate side effects on the external system, so both
/// outcomes abort the pipeline.
///
/// # Errors
///
/// Returns [`ProvisionError::AlreadyExists`] or [`ProvisionError::Creation`].
pub async fn create_instance(
    api: &impl ProvisioningApi,
    reporter: &impl ProgressReporter,
    request: &ProvisionRequest,
) -> Result<ResourceHandle> {
    reporter.step("creating managed PostgreSQL instance...");
    let payload = request.to_create_payload();
    let reply = api
        .create_instance(&payload)
        .await
        .map_err(|fault| match fault {
            CreateFault::AlreadyExists => ProvisionError::AlreadyExists {
                identifier: request.identifier().to_string(),
            },
            CreateFault::Other(e) => ProvisionError::Creation {
                identifier: request.identifier().to_string(),
                reason: format!("{e:#}"),
            },
        })?;
    reporter.success("instance creation initiated");
    Ok(ResourceHandle::new(reply.identifier))
}
