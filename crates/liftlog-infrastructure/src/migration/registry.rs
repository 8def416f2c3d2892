//! Linear migration chains.

use super::traits::{MigrationChain, TypedMigration};
use anyhow::{Context, Result};
use std::sync::Arc;

/// Registry holding a continuous chain of migrations: v1 → v2 → v3 → ...
///
/// `register` checks that each new step starts where the previous one ended.
#[derive(Debug)]
pub struct MigrationRegistry<T> {
    migrations: Vec<Arc<dyn TypedMigration<T, T>>>,
    latest_version: u32,
}

impl<T> MigrationRegistry<T> {
    pub fn new(latest_version: u32) -> Self {
        Self {
            migrations: Vec::new(),
            latest_version,
        }
    }

    /// Registers a single migration, validating chain continuity.
    ///
    /// # Panics
    ///
    /// Panics if the step does not start at the previous step's target
    /// version, or targets a version beyond `latest_version`.
    pub fn register(&mut self, migration: Arc<dyn TypedMigration<T, T>>) {
        if let Some(last) = self.migrations.last() {
            assert_eq!(
                last.to_version(),
                migration.from_version(),
                "Migration chain broken: expected migration from v{} but got v{}. \
                 Description: '{}' (previous) -> '{}' (current)",
                last.to_version(),
                migration.from_version(),
                last.description(),
                migration.description()
            );
        }

        if migration.to_version() > self.latest_version {
            panic!(
                "Migration target version v{} exceeds registry's latest version v{}",
                migration.to_version(),
                self.latest_version
            );
        }

        self.migrations.push(migration);
    }

    fn find_start_index(&self, from_version: u32) -> Option<usize> {
        self.migrations
            .iter()
            .position(|m| m.can_migrate(from_version))
    }
}

impl<T> MigrationChain<T> for MigrationRegistry<T> {
    fn migrate_to_latest(&self, mut data: T, current_version: u32) -> Result<T> {
        if current_version == self.latest_version {
            tracing::debug!(
                "Data is already at the latest version (v{}), no migration needed",
                current_version
            );
            return Ok(data);
        }

        if current_version > self.latest_version {
            anyhow::bail!(
                "Data version (v{}) is newer than the latest supported version (v{})",
                current_version,
                self.latest_version
            );
        }

        let start_idx = self.find_start_index(current_version).ok_or_else(|| {
            let available: Vec<String> = self
                .migrations
                .iter()
                .map(|m| format!("v{} -> v{}", m.from_version(), m.to_version()))
                .collect();
            anyhow::anyhow!(
                "No migration found starting from version v{}. Available migrations: [{}]",
                current_version,
                available.join(", ")
            )
        })?;

        let steps = self.migrations.len() - start_idx;
        tracing::info!(
            "Starting migration from v{} to v{} ({} steps)",
            current_version,
            self.latest_version,
            steps
        );

        for (i, migration) in self.migrations[start_idx..].iter().enumerate() {
            tracing::info!(
                "Migration step {}/{}: v{} -> v{} ({})",
                i + 1,
                steps,
                migration.from_version(),
                migration.to_version(),
                migration.description()
            );

            data = migration.migrate(data).with_context(|| {
                format!(
                    "Migration failed at step {}: v{} -> v{}",
                    i + 1,
                    migration.from_version(),
                    migration.to_version()
                )
            })?;
        }

        tracing::info!(
            "Migration completed successfully: v{} -> v{}",
            current_version,
            self.latest_version
        );

        Ok(data)
    }
}
