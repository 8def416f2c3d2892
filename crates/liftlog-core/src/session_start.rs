//! Building a new session from a day template.

use crate::environment::Environment;
use crate::state::{
    DayTemplate, ExerciseTemplate, MAX_DROP_COUNT, MAX_SET_COUNT, SessionBurndown, SessionExercise,
    SetEntry, WorkoutSession,
};

/// Finds the session whose values pre-fill a new session for `day_id`.
///
/// This is the first entry for the day in stored (newest first) order, not
/// the closest by date.
pub fn last_session_for_day<'a>(
    history: &'a [WorkoutSession],
    day_id: &str,
) -> Option<&'a WorkoutSession> {
    history.iter().find(|session| session.day_id == day_id)
}

/// Creates the active session for `day`.
///
/// Skipped templates are left out. Each set copies the weight of the same
/// set index from the previous session of this day; the previous rep count
/// only becomes a `reps_from_last_session` hint, so reps start empty.
/// Set and drop counts from a loaded document are capped at
/// [`MAX_SET_COUNT`] and [`MAX_DROP_COUNT`].
pub fn build_session(
    day: &DayTemplate,
    history: &[WorkoutSession],
    env: &Environment,
) -> WorkoutSession {
    let previous = last_session_for_day(history, &day.id);

    let exercises = day
        .ordered_exercises()
        .filter(|template| !template.skipped)
        .map(|template| {
            let prior = previous.and_then(|session| session.exercise(&template.id));
            session_exercise(template, prior)
        })
        .collect();

    WorkoutSession {
        id: env.next_id(),
        day_id: day.id.clone(),
        day_name: day.name.clone(),
        date: env.today(),
        started_at: env.timestamp(),
        completed_at: None,
        exercises,
    }
}

fn session_exercise(template: &ExerciseTemplate, prior: Option<&SessionExercise>) -> SessionExercise {
    let sets = (0..template.default_set_count.min(MAX_SET_COUNT))
        .map(|index| {
            let prior_set = prior.and_then(|exercise| exercise.sets.get(index as usize));
            SetEntry {
                weight: prior_set.and_then(|set| set.weight),
                reps: None,
                completed: false,
                reps_from_last_session: prior_set.and_then(|set| set.reps),
            }
        })
        .collect();

    let burndown = template
        .burndown
        .filter(|config| config.enabled)
        .map(|config| {
            let count = (config.drop_count.max(1) as usize).min(MAX_DROP_COUNT);
            SessionBurndown::with_blank_drops(count)
        });

    SessionExercise {
        exercise_id: template.id.clone(),
        name: template.name.clone(),
        sets,
        burndown,
        notes: String::new(),
        skipped: false,
    }
}
