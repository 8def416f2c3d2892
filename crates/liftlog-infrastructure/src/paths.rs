//! Path resolution for liftlog files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/liftlog/           # Config directory (platform specific)
//! ├── config.toml              # Application configuration
//! └── state.json               # Persisted workout state
//! ```

use std::path::PathBuf;
use thiserror::Error;

const APP_DIR: &str = "liftlog";
const CONFIG_FILE: &str = "config.toml";
const STATE_FILE: &str = "state.json";

#[derive(Debug, Error)]
pub enum PathError {
    #[error("Cannot determine the platform config directory")]
    ConfigDirNotFound,
}

/// Resolves liftlog paths, either under the platform config directory or
/// under an explicit base directory.
#[derive(Debug, Clone, Default)]
pub struct LiftlogPaths {
    base_override: Option<PathBuf>,
}

impl LiftlogPaths {
    /// Uses `base` in place of `<config dir>/liftlog` when given.
    pub fn new(base_override: Option<PathBuf>) -> Self {
        Self { base_override }
    }

    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        if let Some(base) = &self.base_override {
            return Ok(base.clone());
        }
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::ConfigDirNotFound)
    }

    pub fn config_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join(CONFIG_FILE))
    }

    /// Default location of the state document.
    pub fn state_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join(STATE_FILE))
    }
}
