//! Backup export and import.
//!
//! A backup is the exact `AppState` document, pretty printed. Importing
//! checks the minimal shape, migrates, and hands back a state for the caller
//! to dispatch as `LOAD_STATE` once the user has confirmed.

use crate::migration::migrate_document;
use crate::storage::write_atomic;
use chrono::NaiveDate;
use liftlog_core::Result;
use liftlog_core::state::AppState;
use serde_json::Value;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Why an import file was rejected. The message is shown to the user.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Could not read backup file: {0}")]
    Parse(String),

    #[error("Invalid backup file format: missing or malformed '{0}'")]
    MissingField(&'static str),

    #[error("Invalid backup file: {0}")]
    Invalid(String),
}

/// Serializes `state` as a pretty-printed backup document.
pub fn export_state(state: &AppState) -> Result<String> {
    Ok(serde_json::to_string_pretty(state)?)
}

/// `workout-backup-YYYY-MM-DD.json`
pub fn export_file_name(date: NaiveDate) -> String {
    format!("workout-backup-{}.json", date.format("%Y-%m-%d"))
}

/// Writes a backup named for `date` into `dir` and returns its path.
pub fn export_to_dir(state: &AppState, dir: &Path, date: NaiveDate) -> Result<PathBuf> {
    let path = dir.join(export_file_name(date));
    let json = export_state(state)?;
    write_atomic(&path, json.as_bytes())?;
    tracing::info!("Exported backup to {}", path.display());
    Ok(path)
}

/// Validates and converts backup text into a state.
pub fn parse_import(text: &str) -> std::result::Result<AppState, ImportError> {
    let doc: Value = serde_json::from_str(text).map_err(|e| ImportError::Parse(e.to_string()))?;

    let has_version = doc
        .get("schemaVersion")
        .and_then(Value::as_u64)
        .is_some_and(|version| version > 0);
    if !has_version {
        return Err(ImportError::MissingField("schemaVersion"));
    }
    if !doc.get("days").is_some_and(Value::is_object) {
        return Err(ImportError::MissingField("days"));
    }
    if !doc.get("history").is_some_and(Value::is_array) {
        return Err(ImportError::MissingField("history"));
    }

    let migrated = migrate_document(doc).map_err(|e| ImportError::Invalid(format!("{:#}", e)))?;
    serde_json::from_value(migrated).map_err(|e| ImportError::Invalid(e.to_string()))
}
