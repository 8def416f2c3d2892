//! TOML configuration.
//!
//! ```toml
//! state_file = "/path/to/state.json"
//! export_dir = "/path/to/backups"
//! log_level = "info"
//! ```
//!
//! Every key is optional; a missing file means all defaults.

use crate::paths::LiftlogPaths;
use crate::storage::AtomicTomlFile;
use liftlog_core::{LiftlogError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LiftlogConfig {
    /// Overrides the default `<config dir>/liftlog/state.json`.
    pub state_file: Option<PathBuf>,
    /// Where `export` writes backups when no directory is given.
    pub export_dir: Option<PathBuf>,
    /// Tracing filter used when `RUST_LOG` is unset, e.g. `info` or `liftlog=debug`.
    pub log_level: Option<String>,
}

impl LiftlogConfig {
    /// Loads the config file, falling back to defaults when it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        let file = AtomicTomlFile::<LiftlogConfig>::new(path.to_path_buf());
        let config = file
            .load()
            .map_err(|e| LiftlogError::config(format!("{}: {}", path.display(), e)))?;
        Ok(config.unwrap_or_default())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        AtomicTomlFile::<LiftlogConfig>::new(path.to_path_buf())
            .save(self)
            .map_err(LiftlogError::from)
    }

    /// Loads the config file from its standard location.
    pub fn load(paths: &LiftlogPaths) -> Result<Self> {
        let path = paths
            .config_file()
            .map_err(|e| LiftlogError::config(e.to_string()))?;
        Self::load_from(&path)
    }

    /// The state document path: configured value or the default location.
    pub fn resolve_state_file(&self, paths: &LiftlogPaths) -> Result<PathBuf> {
        match &self.state_file {
            Some(path) => Ok(path.clone()),
            None => paths
                .state_file()
                .map_err(|e| LiftlogError::config(e.to_string())),
        }
    }

    /// The export directory: configured value or the current directory.
    pub fn resolve_export_dir(&self) -> PathBuf {
        self.export_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
