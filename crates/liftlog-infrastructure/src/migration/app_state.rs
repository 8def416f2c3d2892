//! Migrations for the persisted `AppState` document.
//!
//! Steps operate on the raw JSON value so that documents written by older
//! builds can be repaired before they are deserialized into the current
//! model.

use super::registry::MigrationRegistry;
use super::traits::{Migration, MigrationChain, TypedMigration};
use anyhow::{Result, bail};
use liftlog_core::state::CURRENT_SCHEMA_VERSION;
use serde_json::{Map, Value};
use std::sync::Arc;

/// Upgrades a schema 1 document to schema 2.
///
/// - template `burndown` values not shaped like `{enabled, dropCount >= 1}` become null
/// - `unit` defaults to `"lbs"`
/// - the active session gets `notes`, `skipped` and `repsFromLastSession` backfilled
#[derive(Debug, Default)]
pub struct AppStateV1ToV2Migration;

impl Migration for AppStateV1ToV2Migration {
    fn from_version(&self) -> u32 {
        1
    }

    fn to_version(&self) -> u32 {
        2
    }

    fn description(&self) -> &str {
        "Normalize template burndown, default unit, backfill active session fields"
    }
}

impl TypedMigration<Value, Value> for AppStateV1ToV2Migration {
    fn migrate(&self, mut doc: Value) -> Result<Value> {
        let Some(root) = doc.as_object_mut() else {
            bail!("State document is not a JSON object");
        };

        if let Some(days) = root.get_mut("days").and_then(Value::as_object_mut) {
            for day in days.values_mut() {
                let exercises = day
                    .get_mut("exercises")
                    .and_then(Value::as_object_mut)
                    .into_iter()
                    .flat_map(|exercises| exercises.values_mut());
                for exercise in exercises {
                    if let Some(template) = exercise.as_object_mut()
                        && let Some(burndown) = template.get_mut("burndown")
                        && !is_valid_burndown(burndown)
                    {
                        *burndown = Value::Null;
                    }
                }
            }
        }

        if !root.get("unit").is_some_and(Value::is_string) {
            root.insert("unit".to_string(), Value::from("lbs"));
        }

        if let Some(session) = root.get_mut("activeSession").and_then(Value::as_object_mut) {
            backfill_session(session);
        }

        root.insert("schemaVersion".to_string(), Value::from(self.to_version()));
        Ok(doc)
    }
}

fn is_valid_burndown(value: &Value) -> bool {
    if value.is_null() {
        return true;
    }
    let enabled = value.get("enabled").is_some_and(Value::is_boolean);
    let drop_count = value
        .get("dropCount")
        .and_then(Value::as_u64)
        .is_some_and(|count| count >= 1 && count <= u64::from(u32::MAX));
    enabled && drop_count
}

fn backfill_session(session: &mut Map<String, Value>) {
    let Some(exercises) = session.get_mut("exercises").and_then(Value::as_array_mut) else {
        return;
    };
    for exercise in exercises.iter_mut().filter_map(Value::as_object_mut) {
        exercise
            .entry("notes")
            .or_insert_with(|| Value::from(""));
        exercise
            .entry("skipped")
            .or_insert(Value::Bool(false));

        let sets = exercise
            .get_mut("sets")
            .and_then(Value::as_array_mut)
            .into_iter()
            .flat_map(|sets| sets.iter_mut())
            .filter_map(Value::as_object_mut);
        for set in sets {
            set.entry("repsFromLastSession").or_insert(Value::Null);
        }
    }
}

/// Builds the registry of all `AppState` schema steps.
pub fn build_state_registry() -> MigrationRegistry<Value> {
    let mut registry = MigrationRegistry::new(CURRENT_SCHEMA_VERSION);
    registry.register(Arc::new(AppStateV1ToV2Migration));
    registry
}

/// Reads `schemaVersion`; missing, zero or non-numeric means schema 1.
pub fn document_version(doc: &Value) -> u32 {
    doc.get("schemaVersion")
        .and_then(Value::as_u64)
        .filter(|version| *version > 0)
        .map(|version| u32::try_from(version).unwrap_or(u32::MAX))
        .unwrap_or(1)
}

/// Brings a raw state document up to the current schema.
///
/// A document already at the current version is returned untouched.
pub fn migrate_document(doc: Value) -> Result<Value> {
    if !doc.is_object() {
        bail!("State document is not a JSON object");
    }
    let version = document_version(&doc);
    build_state_registry().migrate_to_latest(doc, version)
}
