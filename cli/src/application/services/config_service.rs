//! Application service — configuration use-cases.

use anyhow::Result;

use crate::application::ports::ConfigStore;
use crate::domain::config::DbupConfig;

/// Load configuration.
pub fn load_config(store: &impl ConfigStore) -> Result<DbupConfig> {
    store.load()
}

/// Save configuration.
pub fn save_config(store: &impl ConfigStore, config: &DbupConfig) -> Result<()> {
    store.save(config)
}
