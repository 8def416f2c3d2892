pub mod dispatch;
pub mod history;
pub mod show;
pub mod transfer;

use liftlog_core::{Environment, WorkoutStore};
use liftlog_infrastructure::FileStateRepository;
use std::path::Path;
use std::sync::Arc;

/// Opens the store backed by the state file at `path`.
pub fn open_store(path: &Path) -> WorkoutStore {
    let repository = Arc::new(FileStateRepository::new(path.to_path_buf()));
    WorkoutStore::open(repository, Environment::system())
}
