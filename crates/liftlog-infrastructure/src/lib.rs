//! File system adapters for liftlog: state persistence, schema migration,
//! backups and configuration.

pub mod config;
pub mod migration;
pub mod paths;
pub mod state_repository;
pub mod storage;
pub mod transfer;

pub use config::LiftlogConfig;
pub use paths::LiftlogPaths;
pub use state_repository::FileStateRepository;
pub use transfer::{ImportError, export_file_name, export_state, export_to_dir, parse_import};
