//! `dbup config` — show and set configuration values.

use anyhow::Result;
use clap::Subcommand;

use crate::app::AppContext;
use crate::application::ports::ConfigStore;
use crate::application::services::config_service;
use crate::domain::config::{DbupConfig, validate_config_key, validate_config_value};

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,
    /// Set configuration value
    Set {
        /// Configuration key
        key: String,
        /// Configuration value
        value: String,
    },
}

/// Run the config command.
///
/// # Errors
///
/// Returns an error if the key or value is invalid, or the config file
/// cannot be read or written.
pub fn run(cmd: ConfigCommand, app: &AppContext) -> Result<()> {
    match cmd {
        ConfigCommand::Show => show_config(app),
        ConfigCommand::Set { key, value } => set_config(app, &key, &value),
    }
}

fn show_config(app: &AppContext) -> Result<()> {
    let config = config_service::load_config(&app.config_store)?;
    let path = app.config_store.path()?;

    if app.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "path": path,
                "config": config,
            }))?
        );
        return Ok(());
    }

    let ctx = &app.output;
    ctx.header("Configuration");
    ctx.kv("Path", &path.display().to_string());
    ctx.kv("api.base_url", &config.api.base_url);
    ctx.kv("defaults.instance_class", &config.defaults.instance_class);
    ctx.kv("defaults.storage_gb", &config.defaults.storage_gb.to_string());
    ctx.kv("defaults.username", &config.defaults.username);
    ctx.kv("poll.interval_seconds", &config.poll.interval_seconds.to_string());
    ctx.kv("poll.deadline_seconds", &config.poll.deadline_seconds.to_string());
    Ok(())
}

fn set_config(app: &AppContext, key: &str, value: &str) -> Result<()> {
    validate_config_key(key)?;
    validate_config_value(key, value)?;

    let mut config = config_service::load_config(&app.config_store)?;
    apply(&mut config, key, value)?;
    config_service::save_config(&app.config_store, &config)?;

    app.output.success(&format!("Set {key} = {value}"));
    Ok(())
}

fn apply(config: &mut DbupConfig, key: &str, value: &str) -> Result<()> {
    match key {
        "api.base_url" => config.api.base_url = value.to_string(),
        "defaults.instance_class" => config.defaults.instance_class = value.to_string(),
        "defaults.storage_gb" => config.defaults.storage_gb = value.parse()?,
        "defaults.username" => config.defaults.username = value.to_string(),
        "poll.interval_seconds" => config.poll.interval_seconds = value.parse()?,
        "poll.deadline_seconds" => config.poll.deadline_seconds = value.parse()?,
        _ => anyhow::bail!("Unknown setting: {key}"),
    }
    Ok(())
}
