//! File-backed state repository.
//!
//! The whole `AppState` lives in one JSON document. Loading never fails:
//! anything unreadable is logged and replaced by a fresh state.

use crate::migration::migrate_document;
use crate::storage::{read_optional, write_atomic};
use liftlog_core::{LiftlogError, Result};
use liftlog_core::state::{AppState, StateRepository};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct FileStateRepository {
    path: PathBuf,
}

impl FileStateRepository {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads, migrates and deserializes the document.
    ///
    /// `Ok(None)` means there is nothing stored yet. A document that cannot
    /// be brought to the current schema is a [`LiftlogError::Migration`].
    pub fn try_load(&self) -> Result<Option<AppState>> {
        let Some(raw) = read_optional(&self.path)? else {
            return Ok(None);
        };

        let doc: serde_json::Value = serde_json::from_str(&raw)?;
        let migrated =
            migrate_document(doc).map_err(|e| LiftlogError::migration(format!("{:#}", e)))?;
        let state = serde_json::from_value(migrated)?;
        Ok(Some(state))
    }
}

impl StateRepository for FileStateRepository {
    fn load_state(&self) -> AppState {
        match self.try_load() {
            Ok(Some(state)) => {
                tracing::info!("Loaded state from {}", self.path.display());
                state
            }
            Ok(None) => {
                tracing::info!(
                    "No stored state at {}, starting fresh",
                    self.path.display()
                );
                AppState::new()
            }
            Err(e) => {
                tracing::warn!(
                    "Discarding unreadable state at {}: {}",
                    self.path.display(),
                    e
                );
                AppState::new()
            }
        }
    }

    fn save_state(&self, state: &AppState) -> Result<()> {
        let json = serde_json::to_string(state)?;
        write_atomic(&self.path, json.as_bytes())?;
        tracing::debug!("Saved state to {}", self.path.display());
        Ok(())
    }
}
