use liftlog_core::query::{ExerciseHistoryEntry, exercise_history, exercise_trend};
use liftlog_core::state::Unit;
use std::fmt::Write;
use std::path::Path;

pub fn run(state_file: &Path, exercise_id: &str) -> anyhow::Result<()> {
    let store = super::open_store(state_file);
    let state = store.state();
    let entries = exercise_history(state, exercise_id);
    print!("{}", render(&entries, state.unit));
    Ok(())
}

/// Lists history entries (newest first) followed by the trend (oldest first).
pub fn render(entries: &[ExerciseHistoryEntry<'_>], unit: Unit) -> String {
    let mut out = String::new();
    if entries.is_empty() {
        let _ = writeln!(out, "No history for this exercise.");
        return out;
    }

    for entry in entries {
        let summary = entry.exercise.sets_summary();
        let _ = writeln!(
            out,
            "{}  {}  {}",
            entry.date(),
            entry.session.day_name,
            if summary.is_empty() { "-" } else { summary.as_str() }
        );
        if !entry.exercise.notes.is_empty() {
            let _ = writeln!(out, "    note: {}", entry.exercise.notes);
        }
    }

    let _ = writeln!(out, "\nTrend (est. 1RM / volume, {}):", unit);
    for point in exercise_trend(entries) {
        let e1rm = point
            .best_e1rm
            .map_or_else(|| "-".to_string(), |value| value.to_string());
        let volume = point
            .volume
            .map_or_else(|| "-".to_string(), |value| value.to_string());
        let _ = writeln!(out, "{}  {}  {}", point.date, e1rm, volume);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use liftlog_core::state::{AppState, SessionExercise, SetEntry, WorkoutSession};

    fn state() -> AppState {
        let mut state = AppState::new();
        state.history = vec![WorkoutSession {
            id: "s1".to_string(),
            day_id: "push".to_string(),
            day_name: "Push".to_string(),
            date: "2024-03-01".to_string(),
            started_at: "2024-03-01T09:00:00.000Z".to_string(),
            completed_at: Some("2024-03-01T10:00:00.000Z".to_string()),
            exercises: vec![SessionExercise {
                exercise_id: "bench".to_string(),
                name: "Bench".to_string(),
                sets: vec![SetEntry {
                    weight: Some(100.0),
                    reps: Some(8.0),
                    completed: true,
                    reps_from_last_session: None,
                }],
                burndown: None,
                notes: "felt heavy".to_string(),
                skipped: false,
            }],
        }];
        state
    }

    #[test]
    fn test_render_entries_and_trend() {
        let state = state();
        let text = render(&exercise_history(&state, "bench"), state.unit);
        assert!(text.contains("2024-03-01  Push  100x8"));
        assert!(text.contains("note: felt heavy"));
        assert!(text.contains("Trend (est. 1RM / volume, lbs):"));
        assert!(text.contains("2024-03-01  127  800"));
    }

    #[test]
    fn test_render_unknown_exercise() {
        let state = state();
        let text = render(&exercise_history(&state, "squat"), state.unit);
        assert_eq!(text, "No history for this exercise.\n");
    }
}
