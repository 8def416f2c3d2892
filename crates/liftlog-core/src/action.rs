//! Actions accepted by the reducer.
//!
//! Actions serialize as tagged JSON objects so presentation layers outside
//! Rust can drive the store:
//!
//! ```json
//! {"type": "ADD_DAY", "payload": {"name": "Push"}}
//! {"type": "FINISH_SESSION"}
//! ```

use serde::{Deserialize, Serialize};

use crate::state::{AppState, BurndownConfig, DayId, ExerciseId, SessionExercise, Unit};

/// Which numeric field of a set or drop an update targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SetField {
    Weight,
    Reps,
}

/// Every state transition the reducer knows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    content = "payload",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum Action {
    /// Replaces the whole state (initial load and import).
    LoadState(Box<AppState>),

    // Days
    AddDay {
        name: String,
    },
    RenameDay {
        day_id: DayId,
        name: String,
    },
    DeleteDay {
        day_id: DayId,
    },
    ReorderDays {
        day_order: Vec<DayId>,
    },
    SetActiveDay {
        day_id: Option<DayId>,
    },

    // Exercise templates
    AddExercise {
        day_id: DayId,
        name: String,
        default_set_count: u32,
        #[serde(default)]
        burndown: Option<BurndownConfig>,
    },
    EditExercise {
        day_id: DayId,
        exercise_id: ExerciseId,
        name: String,
        default_set_count: u32,
        #[serde(default)]
        burndown: Option<BurndownConfig>,
    },
    DeleteExercise {
        day_id: DayId,
        exercise_id: ExerciseId,
    },
    ReorderExercises {
        day_id: DayId,
        exercise_order: Vec<ExerciseId>,
    },
    ToggleSkip {
        day_id: DayId,
        exercise_id: ExerciseId,
    },
    ToggleBurndown {
        day_id: DayId,
        exercise_id: ExerciseId,
    },
    SetDropCount {
        day_id: DayId,
        exercise_id: ExerciseId,
        count: u32,
    },

    // Session lifecycle
    StartSession {
        day_id: DayId,
    },
    FinishSession,
    DiscardSession,

    // In-session editing
    UpdateSet {
        exercise_index: usize,
        set_index: usize,
        field: SetField,
        value: Option<f64>,
    },
    ToggleSetComplete {
        exercise_index: usize,
        set_index: usize,
    },
    AddSet {
        exercise_index: usize,
    },
    RemoveSet {
        exercise_index: usize,
        set_index: usize,
    },
    UpdateExerciseNotes {
        exercise_index: usize,
        notes: String,
    },
    ReorderSessionExercises {
        exercises: Vec<SessionExercise>,
    },
    ToggleSessionExerciseSkip {
        exercise_index: usize,
    },

    // Burndown in session
    ToggleSessionBurndown {
        exercise_index: usize,
    },
    SetSessionDropCount {
        exercise_index: usize,
        count: usize,
    },
    UpdateBurndownDrop {
        exercise_index: usize,
        drop_index: usize,
        field: SetField,
        value: Option<f64>,
    },

    // Global
    SetUnit {
        unit: Unit,
    },
}

impl Action {
    /// Every tag the dispatch contract accepts.
    pub const TAGS: &'static [&'static str] = &[
        "LOAD_STATE",
        "ADD_DAY",
        "RENAME_DAY",
        "DELETE_DAY",
        "REORDER_DAYS",
        "SET_ACTIVE_DAY",
        "ADD_EXERCISE",
        "EDIT_EXERCISE",
        "DELETE_EXERCISE",
        "REORDER_EXERCISES",
        "TOGGLE_SKIP",
        "TOGGLE_BURNDOWN",
        "SET_DROP_COUNT",
        "START_SESSION",
        "FINISH_SESSION",
        "DISCARD_SESSION",
        "UPDATE_SET",
        "TOGGLE_SET_COMPLETE",
        "ADD_SET",
        "REMOVE_SET",
        "UPDATE_EXERCISE_NOTES",
        "REORDER_SESSION_EXERCISES",
        "TOGGLE_SESSION_EXERCISE_SKIP",
        "TOGGLE_SESSION_BURNDOWN",
        "SET_SESSION_DROP_COUNT",
        "UPDATE_BURNDOWN_DROP",
        "SET_UNIT",
    ];

    /// The wire tag of this action.
    pub fn kind(&self) -> &'static str {
        match self {
            Action::LoadState(_) => "LOAD_STATE",
            Action::AddDay { .. } => "ADD_DAY",
            Action::RenameDay { .. } => "RENAME_DAY",
            Action::DeleteDay { .. } => "DELETE_DAY",
            Action::ReorderDays { .. } => "REORDER_DAYS",
            Action::SetActiveDay { .. } => "SET_ACTIVE_DAY",
            Action::AddExercise { .. } => "ADD_EXERCISE",
            Action::EditExercise { .. } => "EDIT_EXERCISE",
            Action::DeleteExercise { .. } => "DELETE_EXERCISE",
            Action::ReorderExercises { .. } => "REORDER_EXERCISES",
            Action::ToggleSkip { .. } => "TOGGLE_SKIP",
            Action::ToggleBurndown { .. } => "TOGGLE_BURNDOWN",
            Action::SetDropCount { .. } => "SET_DROP_COUNT",
            Action::StartSession { .. } => "START_SESSION",
            Action::FinishSession => "FINISH_SESSION",
            Action::DiscardSession => "DISCARD_SESSION",
            Action::UpdateSet { .. } => "UPDATE_SET",
            Action::ToggleSetComplete { .. } => "TOGGLE_SET_COMPLETE",
            Action::AddSet { .. } => "ADD_SET",
            Action::RemoveSet { .. } => "REMOVE_SET",
            Action::UpdateExerciseNotes { .. } => "UPDATE_EXERCISE_NOTES",
            Action::ReorderSessionExercises { .. } => "REORDER_SESSION_EXERCISES",
            Action::ToggleSessionExerciseSkip { .. } => "TOGGLE_SESSION_EXERCISE_SKIP",
            Action::ToggleSessionBurndown { .. } => "TOGGLE_SESSION_BURNDOWN",
            Action::SetSessionDropCount { .. } => "SET_SESSION_DROP_COUNT",
            Action::UpdateBurndownDrop { .. } => "UPDATE_BURNDOWN_DROP",
            Action::SetUnit { .. } => "SET_UNIT",
        }
    }

    /// Parses a tagged JSON action.
    ///
    /// Returns `Ok(None)` when the `type` tag is not one this build knows, so
    /// callers can treat unknown actions as a no-op. A known tag with a
    /// malformed payload is an error.
    pub fn from_json(input: &str) -> Result<Option<Action>, serde_json::Error> {
        let value: serde_json::Value = serde_json::from_str(input)?;
        Self::from_value(value)
    }

    /// Same as [`Action::from_json`] for an already parsed value.
    pub fn from_value(value: serde_json::Value) -> Result<Option<Action>, serde_json::Error> {
        let known = value
            .get("type")
            .and_then(|tag| tag.as_str())
            .is_some_and(|tag| Self::TAGS.contains(&tag));
        if !known {
            return Ok(None);
        }
        serde_json::from_value(value).map(Some)
    }
}
