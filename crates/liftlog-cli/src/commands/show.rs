use liftlog_core::state::{AppState, ExerciseTemplate, WorkoutSession};
use std::fmt::Write;
use std::path::Path;

pub fn run(state_file: &Path) -> anyhow::Result<()> {
    let store = super::open_store(state_file);
    print!("{}", render(store.state()));
    Ok(())
}

/// Human-readable overview of days, the active session and history size.
pub fn render(state: &AppState) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Unit: {}", state.unit);

    if state.day_order.is_empty() {
        let _ = writeln!(out, "No workout days yet.");
    }
    for day in state.ordered_days() {
        let marker = if state.active_day_id.as_deref() == Some(day.id.as_str()) {
            "*"
        } else {
            " "
        };
        let _ = writeln!(out, "{} {} [{}]", marker, day.name, day.id);
        for exercise in day.ordered_exercises() {
            let _ = writeln!(out, "    {}", describe_template(exercise));
        }
    }

    match &state.active_session {
        Some(session) => render_session(&mut out, session),
        None => {
            let _ = writeln!(out, "No active session.");
        }
    }

    let _ = writeln!(out, "Finished sessions: {}", state.history.len());
    out
}

fn describe_template(exercise: &ExerciseTemplate) -> String {
    let mut line = format!(
        "{} [{}] x{} sets",
        exercise.name, exercise.id, exercise.default_set_count
    );
    if let Some(burndown) = exercise.burndown.filter(|config| config.enabled) {
        let _ = write!(line, ", burndown {} drops", burndown.drop_count);
    }
    if exercise.skipped {
        line.push_str(" (skipped)");
    }
    line
}

fn render_session(out: &mut String, session: &WorkoutSession) {
    let _ = writeln!(
        out,
        "Active session: {} on {} ({} sets done)",
        session.day_name,
        session.date,
        session.progress()
    );
    for (index, exercise) in session.exercises.iter().enumerate() {
        let done = exercise.sets.iter().filter(|set| set.completed).count();
        let _ = write!(
            out,
            "  {}. {} {}/{}",
            index,
            exercise.name,
            done,
            exercise.sets.len()
        );
        let summary = exercise.sets_summary();
        if !summary.is_empty() {
            let _ = write!(out, "  {}", summary);
        }
        if exercise.skipped {
            out.push_str(" (skipped)");
        }
        out.push('\n');
        if !exercise.notes.is_empty() {
            let _ = writeln!(out, "     note: {}", exercise.notes);
        }
    }
}
