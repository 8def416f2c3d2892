//! Schema migration framework.
//!
//! Persisted documents carry a `schemaVersion`. On load the raw document is
//! passed through a linear chain of versioned steps (v1 → v2 → ...) until it
//! reaches [`CURRENT_SCHEMA_VERSION`](liftlog_core::state::CURRENT_SCHEMA_VERSION).
//!
//! # Adding a schema version
//!
//! 1. Bump `CURRENT_SCHEMA_VERSION` in `liftlog-core`.
//! 2. Add a step struct implementing [`Migration`] and [`TypedMigration`] in
//!    `app_state.rs`.
//! 3. Register it in [`build_state_registry`]. Registration panics if the
//!    chain is not continuous.

mod app_state;
mod registry;
mod traits;

pub use app_state::{
    AppStateV1ToV2Migration, build_state_registry, document_version, migrate_document,
};
pub use registry::MigrationRegistry;
pub use traits::{Migration, MigrationChain, TypedMigration};
