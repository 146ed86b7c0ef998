//! Configuration service implementation.
//!
//! Loads [`ClientConfig`] from `~/.config/superagent/config.toml` (or an
//! explicit path) and applies environment overrides on top.

use std::path::PathBuf;

use superagent_core::config::ClientConfig;
use superagent_core::{Result, SuperAgentError};

use crate::paths::SuperAgentPaths;
use crate::storage::{ConfigStorage, ConfigStorageError};

pub const ENV_DASHBOARD_URL: &str = "SUPERAGENT_DASHBOARD_URL";
pub const ENV_CONSOLE_URL: &str = "SUPERAGENT_CONSOLE_URL";
pub const ENV_LOG: &str = "SUPERAGENT_LOG";

/// Resolves and loads the client configuration.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
}

impl ConfigService {
    /// Uses `path` when given, the platform config file otherwise.
    pub fn new(path: Option<PathBuf>) -> Result<Self> {
        let path = match path {
            Some(path) => path,
            None => SuperAgentPaths::config_file()
                .map_err(|e| SuperAgentError::config(e.to_string()))?,
        };
        Ok(Self { path })
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Reads the file (defaults when missing) and applies env overrides.
    pub fn load(&self) -> Result<ClientConfig> {
        let from_file: Option<ClientConfig> =
            ConfigStorage::new(self.path.clone()).load().map_err(storage_error)?;

        let mut config = from_file.unwrap_or_default();
        apply_overrides(&mut config, |key| std::env::var(key).ok());

        tracing::debug!(
            "[Config] dashboard={} console={} (from {})",
            config.dashboard.base_url,
            config.console.base_url,
            self.path.display()
        );
        Ok(config)
    }

    /// Writes the default configuration unless a file already exists.
    ///
    /// Returns the configuration now on disk.
    pub fn init_default_file(&self) -> Result<ClientConfig> {
        let storage = ConfigStorage::new(self.path.clone());
        let config = storage
            .update(ClientConfig::default(), |_| Ok(()))
            .map_err(storage_error)?;
        tracing::info!("[Config] Wrote {}", self.path.display());
        Ok(config)
    }
}

/// Applies `SUPERAGENT_*` overrides. Empty values are ignored.
pub fn apply_overrides<F>(config: &mut ClientConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

    if let Some(url) = lookup(ENV_DASHBOARD_URL) {
        config.dashboard.base_url = url;
    }
    if let Some(url) = lookup(ENV_CONSOLE_URL) {
        config.console.base_url = url;
    }
    if let Some(level) = lookup(ENV_LOG) {
        config.logging.level = level;
    }
}

fn storage_error(err: ConfigStorageError) -> SuperAgentError {
    match err {
        ConfigStorageError::IoError(e) => e.into(),
        ConfigStorageError::TomlParseError(e) => e.into(),
        ConfigStorageError::TomlSerError(e) => e.into(),
        ConfigStorageError::LockError(message) => SuperAgentError::config(message),
    }
}
