//! Path management for Super Agent configuration files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/superagent/        # Config directory (platform config dir)
//! ├── config.toml              # Client configuration
//! └── logs/                    # Daily log files
//!     └── superagent.log.YYYY-MM-DD
//! ```

use std::path::PathBuf;

const APP_DIR: &str = "superagent";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Platform config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find configuration directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Resolves every path the client reads or writes.
pub struct SuperAgentPaths;

impl SuperAgentPaths {
    /// Returns the Super Agent configuration directory (e.g. `~/.config/superagent/`).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Returns the path to the main configuration file.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the path to the logs directory.
    pub fn logs_dir() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("logs"))
    }
}
