//! Core traits for the migration framework.

use anyhow::Result;

/// Version information and metadata about a single migration step.
pub trait Migration: Send + Sync {
    /// Schema version this step starts from.
    fn from_version(&self) -> u32;

    /// Schema version this step produces.
    fn to_version(&self) -> u32;

    fn can_migrate(&self, version: u32) -> bool {
        version == self.from_version()
    }

    /// Human-readable description, used in logs.
    fn description(&self) -> &str;
}

/// A migration step that transforms data of type `From` into `To`.
pub trait TypedMigration<From, To>: Migration + std::fmt::Debug {
    fn migrate(&self, from: From) -> Result<To>;
}

/// A chain of migrations that upgrades data to the latest version.
///
/// Implementations apply every intermediate step in order; none is skipped.
pub trait MigrationChain<T> {
    /// Migrates `data`, currently at `current_version`, to the latest version.
    ///
    /// Fails when no step starts at `current_version`, when the data is newer
    /// than the latest version, or when any step fails.
    fn migrate_to_latest(&self, data: T, current_version: u32) -> Result<T>;
}
