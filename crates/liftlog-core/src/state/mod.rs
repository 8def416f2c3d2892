//! Application state domain module.
//!
//! - `model`: the persisted `AppState` and everything it owns
//! - `order`: helpers for the ordered ID lists
//! - `repository`: persistence interface

pub mod model;
pub mod order;
pub mod repository;

pub use model::{
    AppState, BurndownConfig, CURRENT_SCHEMA_VERSION, DEFAULT_DROP_COUNT, DayId, DayTemplate,
    DropEntry, ExerciseId, ExerciseTemplate, MAX_DROP_COUNT, MAX_SET_COUNT, SessionBurndown,
    SessionExercise, SessionId, SessionProgress, SetEntry, Unit, WorkoutSession,
};
pub use order::{is_permutation_of, reorder};
pub use repository::{InMemoryStateRepository, StateRepository};
