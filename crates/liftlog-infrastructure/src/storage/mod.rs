//! File storage primitives.

pub mod atomic_file;

pub use atomic_file::{AtomicTomlFile, StorageError, read_optional, write_atomic};
