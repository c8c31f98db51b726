//! Application service — credential validation.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use anyhow::Result;

use dbup_common::Identity;

use crate::application::ports::{IdentityApi, ProgressReporter};
use crate::domain::error::ProvisionError;

/// Confirm the caller has a usable identity before any mutating call.
///
/// Calls the identity service exactly once; any failure (network, missing
/// configuration, malformed identity) is fatal to the pipeline. No retry.
///
/// # Errors
///
/// Returns [`ProvisionError::Credentials`] when the identity check fails.
pub async fn check_credentials(
    api: &impl IdentityApi,
    reporter: &impl ProgressReporter,
) -> Result<Identity> {
    let identity = api.whoami().await.map_err(|e| ProvisionError::Credentials {
        reason: format!("{e:#}"),
    })?;

    reporter.success("credentials valid");
    reporter.step(&format!("account: {}", identity.account_id));
    reporter.step(&format!("principal: {}", identity.principal));
    Ok(identity)
}
