//! Application context — unified state passed to every command handler.
//!
//! `AppContext` bundles the output context, loaded configuration, and the
//! control-plane client so command handlers receive one parameter instead
//! of loose instances. Adding a new cross-cutting concern requires only one
//! field change here — zero command signatures change.

use anyhow::{Context, Result};

use crate::application::services::config_service;
use crate::domain::config::DbupConfig;
use crate::infra::api::HttpControlPlane;
use crate::infra::config::YamlConfigStore;
use crate::output::OutputContext;
use crate::output::reporter::TerminalReporter;

/// Flags passed from the top-level CLI to `AppContext::new`.
pub struct AppFlags {
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress non-error output.
    pub quiet: bool,
    /// Enable JSON output mode.
    pub json: bool,
    /// Skip interactive prompts (also set by `CI` / `DBUP_YES` env vars).
    pub yes: bool,
}

/// Unified application context passed to every command handler.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
    /// Whether to render machine-readable JSON output.
    pub json: bool,
    /// Configuration loaded at startup.
    pub config: DbupConfig,
    /// Config persistence for the `config` command.
    pub config_store: YamlConfigStore,
    /// Control-plane client (provisioning + identity).
    pub api: HttpControlPlane,
    /// When `true`, skip interactive prompts and use defaults.
    pub non_interactive: bool,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or the HTTP
    /// client cannot be built.
    pub fn new(flags: &AppFlags) -> Result<Self> {
        let ci_env = std::env::var("CI").is_ok() || std::env::var("DBUP_YES").is_ok();
        let non_interactive = flags.yes || ci_env || flags.json;

        let config_store = YamlConfigStore;
        let config = config_service::load_config(&config_store).context("loading configuration")?;

        let token = std::env::var("DBUP_API_TOKEN").ok();
        let api = HttpControlPlane::new(&config.api.base_url, token)
            .context("configuring control-plane client")?;

        // JSON mode keeps stdout machine-readable: progress goes nowhere.
        let quiet = flags.quiet || flags.json;
        Ok(Self {
            output: OutputContext::new(flags.no_color, quiet),
            json: flags.json,
            config,
            config_store,
            api,
            non_interactive,
        })
    }

    /// Progress reporter bound to this context's terminal settings.
    #[must_use]
    pub fn terminal_reporter(&self) -> TerminalReporter {
        TerminalReporter::new(&self.output)
    }
}
