//! Application service — endpoint resolution after a successful wait.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use anyhow::Result;

use crate::application::ports::ProvisioningApi;
use crate::domain::connection::ConnectionDetails;
use crate::domain::error::ProvisionError;

/// Read the connection metadata for an instance with a final describe call,
/// distinct from the poller's internal queries.
///
/// A failure here does not roll anything back — the instance exists
/// externally regardless; the caller is told to retry the read.
///
/// # Errors
///
/// Returns [`ProvisionError::Lookup`] if the describe call fails or the
/// payload carries no endpoint.
pub async fn resolve_endpoint(
    api: &impl ProvisioningApi,
    identifier: &str,
    database: &str,
    username: &str,
) -> Result<ConnectionDetails> {
    let lookup = |reason: String| ProvisionError::Lookup {
        identifier: identifier.to_string(),
        reason,
    };

    let description = api
        .describe_instance(identifier)
        .await
        .map_err(|e| lookup(format!("{e:#}")))?;

    let endpoint = description
        .endpoint
        .ok_or_else(|| lookup(format!("no endpoint in status '{}'", description.status)))?;

    Ok(ConnectionDetails {
        host: endpoint.host,
        port: endpoint.port,
        database: database.to_string(),
        username: username.to_string(),
    })
}
