//! Workout state domain models.
//!
//! These types are the persisted document as well as the in-memory state.
//! Field names serialize in camelCase so the JSON matches the exported
//! backup format exactly.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Identifier of a [`DayTemplate`].
pub type DayId = String;
/// Identifier of an [`ExerciseTemplate`], shared by the session exercises snapshotted from it.
pub type ExerciseId = String;
/// Identifier of a [`WorkoutSession`].
pub type SessionId = String;

/// The schema version written by this build.
pub const CURRENT_SCHEMA_VERSION: u32 = 2;

/// Number of drops a burndown starts with when none is configured.
pub const DEFAULT_DROP_COUNT: usize = 3;

/// Upper bound on the sets a template or session exercise starts with.
pub const MAX_SET_COUNT: u32 = 100;

/// Upper bound on the drops a burndown can hold.
pub const MAX_DROP_COUNT: usize = 50;

/// Display unit for weights. Purely a label; stored numbers are never converted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    #[default]
    Lbs,
    Kg,
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unit::Lbs => write!(f, "lbs"),
            Unit::Kg => write!(f, "kg"),
        }
    }
}

/// Template-level drop set configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BurndownConfig {
    pub enabled: bool,
    /// How many drop sets a session for this exercise carries (at least 1).
    pub drop_count: u32,
}

impl BurndownConfig {
    pub fn new(drop_count: u32) -> Self {
        Self {
            enabled: true,
            drop_count: drop_count.clamp(1, MAX_DROP_COUNT as u32),
        }
    }
}

/// A planned exercise within a day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseTemplate {
    pub id: ExerciseId,
    pub name: String,
    pub default_set_count: u32,
    #[serde(default)]
    pub burndown: Option<BurndownConfig>,
    #[serde(default)]
    pub skipped: bool,
}

/// A reusable workout template: an ordered set of exercises.
///
/// `exercise_order` is a permutation of the keys of `exercises`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayTemplate {
    pub id: DayId,
    pub name: String,
    #[serde(default)]
    pub exercise_order: Vec<ExerciseId>,
    #[serde(default)]
    pub exercises: BTreeMap<ExerciseId, ExerciseTemplate>,
}

impl DayTemplate {
    /// Creates a day with no exercises.
    pub fn new(id: DayId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            exercise_order: Vec::new(),
            exercises: BTreeMap::new(),
        }
    }

    /// Iterates the exercises in display order.
    pub fn ordered_exercises(&self) -> impl Iterator<Item = &ExerciseTemplate> {
        self.exercise_order
            .iter()
            .filter_map(|id| self.exercises.get(id))
    }
}

/// One logged set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetEntry {
    pub weight: Option<f64>,
    /// Reps as typed; fractional values are kept.
    pub reps: Option<f64>,
    pub completed: bool,
    /// Rep count from the previous session, shown as a placeholder until the set is completed.
    #[serde(default)]
    pub reps_from_last_session: Option<f64>,
}

impl SetEntry {
    /// A blank set with no pre-fill hint.
    pub fn blank() -> Self {
        Self::default()
    }
}

/// One burndown drop set. Not counted towards completion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DropEntry {
    pub weight: Option<f64>,
    pub reps: Option<f64>,
}

/// Drop sets logged for a session exercise.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionBurndown {
    pub drops: Vec<DropEntry>,
}

impl SessionBurndown {
    /// Creates `count` blank drops.
    pub fn with_blank_drops(count: usize) -> Self {
        Self {
            drops: vec![DropEntry::default(); count],
        }
    }
}

/// An exercise as performed in a session, snapshotted from its template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionExercise {
    pub exercise_id: ExerciseId,
    pub name: String,
    pub sets: Vec<SetEntry>,
    #[serde(default)]
    pub burndown: Option<SessionBurndown>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub skipped: bool,
}

impl SessionExercise {
    /// Formats the sets that have both weight and reps as `100x8, 100x6`.
    pub fn sets_summary(&self) -> String {
        self.sets
            .iter()
            .filter_map(|set| match (set.weight, set.reps) {
                (Some(weight), Some(reps)) => Some(format!("{}x{}", weight, reps)),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Completed and total set counts for a session, skipped exercises excluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionProgress {
    pub completed: usize,
    pub total: usize,
}

impl fmt::Display for SessionProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.completed, self.total)
    }
}

/// A concrete workout started from a day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutSession {
    pub id: SessionId,
    pub day_id: DayId,
    /// Day name at session start; later renames do not touch it.
    pub day_name: String,
    /// Calendar date (`YYYY-MM-DD`).
    pub date: String,
    /// RFC 3339 timestamp.
    pub started_at: String,
    /// `None` while the session is active.
    pub completed_at: Option<String>,
    pub exercises: Vec<SessionExercise>,
}

impl WorkoutSession {
    pub fn is_finished(&self) -> bool {
        self.completed_at.is_some()
    }

    pub fn progress(&self) -> SessionProgress {
        self.exercises
            .iter()
            .filter(|exercise| !exercise.skipped)
            .fold(
                SessionProgress {
                    completed: 0,
                    total: 0,
                },
                |acc, exercise| SessionProgress {
                    completed: acc.completed
                        + exercise.sets.iter().filter(|set| set.completed).count(),
                    total: acc.total + exercise.sets.len(),
                },
            )
    }

    pub fn exercise(&self, exercise_id: &str) -> Option<&SessionExercise> {
        self.exercises
            .iter()
            .find(|exercise| exercise.exercise_id == exercise_id)
    }
}

/// Root application state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub schema_version: u32,
    #[serde(default)]
    pub day_order: Vec<DayId>,
    #[serde(default)]
    pub days: BTreeMap<DayId, DayTemplate>,
    #[serde(default)]
    pub active_day_id: Option<DayId>,
    #[serde(default)]
    pub active_session: Option<WorkoutSession>,
    /// Finished sessions, newest first.
    #[serde(default)]
    pub history: Vec<WorkoutSession>,
    #[serde(default)]
    pub unit: Unit,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            day_order: Vec::new(),
            days: BTreeMap::new(),
            active_day_id: None,
            active_session: None,
            history: Vec::new(),
            unit: Unit::default(),
        }
    }
}

impl AppState {
    /// Creates a freshly initialized state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Iterates the days in display order.
    pub fn ordered_days(&self) -> impl Iterator<Item = &DayTemplate> {
        self.day_order.iter().filter_map(|id| self.days.get(id))
    }

    pub fn active_day(&self) -> Option<&DayTemplate> {
        self.active_day_id
            .as_ref()
            .and_then(|id| self.days.get(id))
    }
}
