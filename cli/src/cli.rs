//! CLI argument parsing with clap derive

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::app::{AppContext, AppFlags};
use crate::commands;
use crate::domain::error::{ProvisionError, ValidationError};

/// Managed PostgreSQL provisioning for deploy pipelines
#[derive(Parser)]
#[command(
    name = "dbup",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Skip confirmation prompts
    #[arg(short = 'y', long, global = true)]
    pub yes: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Provision a managed PostgreSQL instance and wait until it is ready
    Deploy(commands::deploy::DeployArgs),

    /// Show current state and endpoint of an instance
    Status(commands::status::StatusArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(commands::config::ConfigCommand),

    /// Show version
    Version,
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails.
    pub async fn run(self) -> Result<()> {
        let Cli { json, quiet, no_color, yes, command } = self;

        if let Command::Version = command {
            return commands::version::run(json);
        }

        let app = AppContext::new(&AppFlags {
            no_color,
            quiet,
            json,
            yes,
        })?;

        let result = match command {
            Command::Deploy(args) => commands::deploy::run(&args, &app).await,
            Command::Status(args) => commands::status::run(&args, &app).await,
            Command::Config(cmd) => commands::config::run(cmd, &app),
            Command::Version => unreachable!("handled above"),
        };

        // JSON consumers read errors from stdout as a structured object;
        // the human-readable line still goes to stderr in main.
        if app.json
            && let Err(e) = &result
        {
            println!(
                "{}",
                crate::output::json::format_error(&format!("{e:#}"), error_code(e))?
            );
        }
        result
    }
}

/// Stable machine-readable code for a pipeline error.
fn error_code(err: &anyhow::Error) -> &'static str {
    if err.downcast_ref::<ValidationError>().is_some() {
        return "invalid_parameters";
    }
    match err.downcast_ref::<ProvisionError>() {
        Some(ProvisionError::Credentials { .. }) => "credentials",
        Some(ProvisionError::AlreadyExists { .. }) => "already_exists",
        Some(ProvisionError::Creation { .. }) => "creation_failed",
        Some(ProvisionError::PollTimeout { .. }) => "poll_timeout",
        Some(ProvisionError::ProvisioningFailed { .. }) => "provisioning_failed",
        Some(ProvisionError::Lookup { .. }) => "lookup_failed",
        None => "error",
    }
}
