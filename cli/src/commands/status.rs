//! `dbup status` — show current state and endpoint of an instance.

use anyhow::{Context, Result};
use clap::Args;

use crate::app::AppContext;
use crate::application::ports::ProvisioningApi;
use crate::domain::resource::PollObservation;

/// Arguments for the status command.
#[derive(Args)]
pub struct StatusArgs {
    /// Instance identifier
    pub identifier: String,
}

/// Run `dbup status`.
///
/// # Errors
///
/// Returns an error if the status query fails.
pub async fn run(args: &StatusArgs, app: &AppContext) -> Result<()> {
    let description = app
        .api
        .describe_instance(&args.identifier)
        .await
        .with_context(|| format!("querying status of '{}'", args.identifier))?;

    let observation =
        PollObservation::from_description(description.status, description.endpoint.clone());

    if app.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "identifier": description.identifier,
                "status": description.status.to_string(),
                "state": observation.state,
                "endpoint": description.endpoint,
            }))?
        );
        return Ok(());
    }

    let ctx = &app.output;
    ctx.header(&args.identifier);
    ctx.kv("Status", &description.status.to_string());
    ctx.kv("State", &observation.state.to_string());
    match &observation.endpoint {
        Some(ep) => {
            ctx.kv("Endpoint", &format!("{}:{}", ep.host, ep.port));
        }
        None => {
            ctx.kv("Endpoint", "not yet published");
        }
    }
    Ok(())
}
