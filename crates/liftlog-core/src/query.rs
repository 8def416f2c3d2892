//! Read-only views over finished sessions.

use crate::state::{AppState, SessionExercise, WorkoutSession};

/// One appearance of an exercise in a finished session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExerciseHistoryEntry<'a> {
    pub session: &'a WorkoutSession,
    pub exercise: &'a SessionExercise,
}

impl ExerciseHistoryEntry<'_> {
    pub fn date(&self) -> &str {
        &self.session.date
    }
}

/// All finished sessions that contain `exercise_id`, in history order (newest first).
pub fn exercise_history<'a>(state: &'a AppState, exercise_id: &str) -> Vec<ExerciseHistoryEntry<'a>> {
    state
        .history
        .iter()
        .filter_map(|session| {
            session.exercise(exercise_id).map(|exercise| ExerciseHistoryEntry {
                session,
                exercise,
            })
        })
        .collect()
}

/// The most recent history entry for `exercise_id`.
pub fn last_exercise_entry<'a>(
    state: &'a AppState,
    exercise_id: &str,
) -> Option<ExerciseHistoryEntry<'a>> {
    state.history.iter().find_map(|session| {
        session
            .exercise(exercise_id)
            .map(|exercise| ExerciseHistoryEntry { session, exercise })
    })
}

/// Per-session performance figures for charting.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendPoint {
    pub date: String,
    /// Best Epley estimate across the session's sets.
    pub best_e1rm: Option<u32>,
    /// Total weight moved, burndown drops included.
    pub volume: Option<f64>,
}

/// Epley estimate `weight * (1 + reps / 30)`, rounded.
///
/// Returns 0 when either input is not a positive finite number.
pub fn estimated_one_rep_max(weight: f64, reps: f64) -> u32 {
    if !(weight > 0.0 && reps > 0.0) || !(weight * reps).is_finite() {
        return 0;
    }
    (weight * (1.0 + reps / 30.0)).round() as u32
}

/// Turns history entries into trend points, oldest first.
pub fn exercise_trend(entries: &[ExerciseHistoryEntry<'_>]) -> Vec<TrendPoint> {
    entries
        .iter()
        .rev()
        .map(|entry| {
            let exercise = entry.exercise;
            let logged = exercise
                .sets
                .iter()
                .filter_map(|set| set.weight.zip(set.reps));
            let dropped = exercise
                .burndown
                .iter()
                .flat_map(|burndown| burndown.drops.iter())
                .filter_map(|drop| drop.weight.zip(drop.reps));

            let best = logged
                .clone()
                .map(|(weight, reps)| estimated_one_rep_max(weight, reps))
                .max()
                .unwrap_or(0);
            let volume: f64 = logged
                .chain(dropped)
                .map(|(weight, reps)| weight * reps)
                .sum();

            TrendPoint {
                date: entry.date().to_string(),
                best_e1rm: (best > 0).then_some(best),
                volume: (volume > 0.0).then_some(volume),
            }
        })
        .collect()
}
