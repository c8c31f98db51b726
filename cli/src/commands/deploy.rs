//! `dbup deploy` — provision a managed PostgreSQL instance end to end.
//!
//! Gathers parameters from flags, environment, and interactive prompts,
//! shows a configuration summary, then drives the provisioning pipeline and
//! renders the connection details.

use std::collections::BTreeMap;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;

use crate::app::AppContext;
use crate::application::services::deploy::{self as service, Deployment, PollSettings};
use crate::domain::connection::PASSWORD_PLACEHOLDER;
use crate::domain::request::{MIN_SECRET_LEN, ProvisionParams};
use crate::infra::clock::TokioClock;
use crate::output::OutputContext;

/// Environment variable consulted for the master password before prompting.
const PASSWORD_ENV: &str = "DBUP_DB_PASSWORD";

/// Arguments for the deploy command.
#[derive(Args, Default)]
pub struct DeployArgs {
    /// Instance identifier (prompted when omitted)
    #[arg(long)]
    pub name: Option<String>,

    /// Database name (defaults to the instance name with hyphens replaced)
    #[arg(long)]
    pub database: Option<String>,

    /// Master username
    #[arg(long)]
    pub username: Option<String>,

    /// Instance class, e.g. db.t3.micro
    #[arg(long = "class")]
    pub instance_class: Option<String>,

    /// Storage size in whole gigabytes
    #[arg(long)]
    pub storage: Option<u32>,

    /// Seconds between status checks (overrides config)
    #[arg(long)]
    pub poll_interval: Option<u64>,

    /// Maximum seconds to wait for availability (overrides config)
    #[arg(long)]
    pub deadline: Option<u64>,
}

/// Run `dbup deploy`.
///
/// # Errors
///
/// Returns an error if parameter gathering, validation, or any pipeline
/// stage fails.
pub async fn run(args: &DeployArgs, app: &AppContext) -> Result<()> {
    let params = gather_params(args, app)?;

    print_summary(&params, &app.output);
    if !confirm(app)? {
        app.output.info("Deployment cancelled");
        return Ok(());
    }

    let settings = poll_settings(args, app);
    let reporter = app.terminal_reporter();
    let clock = TokioClock::new();

    let result =
        service::deploy_instance(&app.api, &app.api, &clock, &reporter, params, &settings).await;
    reporter.clear();
    let deployment = result?;

    render(&deployment, app)?;
    Ok(())
}

fn poll_settings(args: &DeployArgs, app: &AppContext) -> PollSettings {
    let mut settings = PollSettings::from(&app.config.poll);
    if let Some(secs) = args.poll_interval {
        settings.interval = Duration::from_secs(secs);
    }
    if let Some(secs) = args.deadline {
        settings.deadline = Duration::from_secs(secs);
    }
    settings
}

/// Resolve every deployment parameter from flags, environment, config
/// defaults, and interactive prompts, in that order of precedence.
fn gather_params(args: &DeployArgs, app: &AppContext) -> Result<ProvisionParams> {
    let defaults = &app.config.defaults;

    let name = match &args.name {
        Some(name) => name.clone(),
        None if app.non_interactive => {
            anyhow::bail!("--name is required when prompts are disabled")
        }
        None => dialoguer::Input::new()
            .with_prompt("Instance name")
            .default("app-db".to_string())
            .interact_text()
            .context("reading instance name")?,
    };

    let database = match &args.database {
        Some(database) => database.clone(),
        None => name.replace('-', "_"),
    };
    let username = args
        .username
        .clone()
        .unwrap_or_else(|| defaults.username.clone());
    let instance_class = args
        .instance_class
        .clone()
        .unwrap_or_else(|| defaults.instance_class.clone());
    let storage_gb = args.storage.unwrap_or(defaults.storage_gb);

    let secret = match std::env::var(PASSWORD_ENV) {
        Ok(secret) => secret,
        Err(_) if app.non_interactive => {
            anyhow::bail!("set {PASSWORD_ENV} when prompts are disabled")
        }
        Err(_) => dialoguer::Password::new()
            .with_prompt(format!(
                "Master password (minimum {MIN_SECRET_LEN} characters)"
            ))
            .interact()
            .context("reading master password")?,
    };

    Ok(ProvisionParams {
        identifier: name,
        database,
        username,
        secret,
        instance_class,
        storage_gb,
        tags: BTreeMap::new(),
    })
}

fn print_summary(params: &ProvisionParams, ctx: &OutputContext) {
    ctx.header("Deployment configuration");
    ctx.kv("Instance", &params.identifier);
    ctx.kv("Database", &params.database);
    ctx.kv("Username", &params.username);
    ctx.kv("Class", &params.instance_class);
    ctx.kv("Storage", &format!("{} GB", params.storage_gb));
}

fn confirm(app: &AppContext) -> Result<bool> {
    if app.non_interactive {
        return Ok(true);
    }
    dialoguer::Confirm::new()
        .with_prompt("Continue with deployment?")
        .default(false)
        .interact()
        .context("reading confirmation")
}

fn render(deployment: &Deployment, app: &AppContext) -> Result<()> {
    let details = &deployment.details;

    if app.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "identifier": deployment.handle.identifier(),
                "state": deployment.handle.state(),
                "endpoint": details.host,
                "port": details.port,
                "database": details.database,
                "username": details.username,
                "connection_string": details.connection_string(),
            }))?
        );
        return Ok(());
    }

    let ctx = &app.output;
    ctx.success("Deployment complete");
    ctx.kv("Endpoint", &details.host);
    ctx.kv("Port", &details.port.to_string());
    ctx.kv("Database", &details.database);
    ctx.kv("Username", &details.username);
    ctx.kv("Connect", &details.connection_string());
    ctx.info(&format!(
        "Add to your environment (substitute {PASSWORD_PLACEHOLDER}):"
    ));
    ctx.kv("Env", &details.database_url_line());
    Ok(())
}
