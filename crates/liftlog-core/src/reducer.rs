//! The state transition function.
//!
//! [`reduce`] never touches its input: it clones the state and edits the
//! clone. Actions that reference a day, exercise or index that does not
//! exist leave the state unchanged instead of panicking.

use crate::action::{Action, SetField};
use crate::environment::Environment;
use crate::session_start::build_session;
use crate::state::{
    AppState, BurndownConfig, DEFAULT_DROP_COUNT, DayTemplate, DropEntry, ExerciseTemplate,
    MAX_DROP_COUNT, MAX_SET_COUNT, SessionBurndown, SessionExercise, SetEntry, is_permutation_of,
};

/// Computes the state that follows `action`.
pub fn reduce(state: &AppState, action: Action, env: &Environment) -> AppState {
    let mut next = state.clone();

    match action {
        Action::LoadState(payload) => return *payload,

        // ====================================================================
        // Days
        // ====================================================================
        Action::AddDay { name } => {
            let id = env.next_id();
            next.day_order.push(id.clone());
            next.days.insert(id.clone(), DayTemplate::new(id.clone(), name));
            if next.active_day_id.is_none() {
                next.active_day_id = Some(id);
            }
        }
        Action::RenameDay { day_id, name } => {
            if let Some(day) = next.days.get_mut(&day_id) {
                day.name = name;
            }
        }
        Action::DeleteDay { day_id } => {
            if next.days.remove(&day_id).is_some() {
                next.day_order.retain(|id| *id != day_id);
                if next.active_day_id.as_deref() == Some(day_id.as_str()) {
                    next.active_day_id = next.day_order.first().cloned();
                }
            }
        }
        Action::ReorderDays { day_order } => {
            if is_permutation_of(&day_order, &next.days) {
                next.day_order = day_order;
            }
        }
        Action::SetActiveDay { day_id } => {
            next.active_day_id = day_id;
        }

        // ====================================================================
        // Exercise templates
        // ====================================================================
        Action::AddExercise {
            day_id,
            name,
            default_set_count,
            burndown,
        } => {
            if let Some(day) = next.days.get_mut(&day_id) {
                let id = env.next_id();
                day.exercise_order.push(id.clone());
                day.exercises.insert(
                    id.clone(),
                    ExerciseTemplate {
                        id,
                        name,
                        default_set_count: default_set_count.clamp(1, MAX_SET_COUNT),
                        burndown: burndown.map(normalize_burndown),
                        skipped: false,
                    },
                );
            }
        }
        Action::EditExercise {
            day_id,
            exercise_id,
            name,
            default_set_count,
            burndown,
        } => {
            if let Some(template) = template_mut(&mut next, &day_id, &exercise_id) {
                template.name = name;
                template.default_set_count = default_set_count.clamp(1, MAX_SET_COUNT);
                template.burndown = burndown.map(normalize_burndown);
            }
        }
        Action::DeleteExercise {
            day_id,
            exercise_id,
        } => {
            if let Some(day) = next.days.get_mut(&day_id)
                && day.exercises.remove(&exercise_id).is_some()
            {
                day.exercise_order.retain(|id| *id != exercise_id);
            }
        }
        Action::ReorderExercises {
            day_id,
            exercise_order,
        } => {
            if let Some(day) = next.days.get_mut(&day_id)
                && is_permutation_of(&exercise_order, &day.exercises)
            {
                day.exercise_order = exercise_order;
            }
        }
        Action::ToggleSkip {
            day_id,
            exercise_id,
        } => {
            if let Some(template) = template_mut(&mut next, &day_id, &exercise_id) {
                template.skipped = !template.skipped;
            }
        }
        Action::ToggleBurndown {
            day_id,
            exercise_id,
        } => {
            if let Some(template) = template_mut(&mut next, &day_id, &exercise_id) {
                template.burndown = match template.burndown {
                    None => Some(BurndownConfig::new(DEFAULT_DROP_COUNT as u32)),
                    Some(config) => Some(BurndownConfig {
                        enabled: !config.enabled,
                        ..config
                    }),
                };
            }
        }
        Action::SetDropCount {
            day_id,
            exercise_id,
            count,
        } => {
            if let Some(template) = template_mut(&mut next, &day_id, &exercise_id)
                && let Some(config) = template.burndown.as_mut()
            {
                config.drop_count = count.clamp(1, MAX_DROP_COUNT as u32);
            }
        }

        // ====================================================================
        // Session lifecycle
        // ====================================================================
        Action::StartSession { day_id } => {
            // An active session is replaced without confirmation; the UI asks first.
            if let Some(day) = next.days.get(&day_id) {
                let session = build_session(day, &next.history, env);
                next.active_session = Some(session);
            }
        }
        Action::FinishSession => {
            if let Some(mut session) = next.active_session.take() {
                session.completed_at = Some(env.timestamp());
                next.history.insert(0, session);
            }
        }
        Action::DiscardSession => {
            next.active_session = None;
        }

        // ====================================================================
        // In-session editing
        // ====================================================================
        Action::UpdateSet {
            exercise_index,
            set_index,
            field,
            value,
        } => {
            if let Some(set) = set_mut(&mut next, exercise_index, set_index) {
                match field {
                    SetField::Weight => set.weight = value,
                    SetField::Reps => set.reps = value,
                }
            }
        }
        Action::ToggleSetComplete {
            exercise_index,
            set_index,
        } => {
            if let Some(set) = set_mut(&mut next, exercise_index, set_index) {
                let completing = !set.completed;
                set.completed = completing;
                // Completing locks in the ghost rep count if nothing was typed.
                if completing && set.reps.is_none() {
                    set.reps = set.reps_from_last_session;
                }
            }
        }
        Action::AddSet { exercise_index } => {
            if let Some(exercise) = session_exercise_mut(&mut next, exercise_index) {
                exercise.sets.push(SetEntry::blank());
            }
        }
        Action::RemoveSet {
            exercise_index,
            set_index,
        } => {
            if let Some(exercise) = session_exercise_mut(&mut next, exercise_index)
                && set_index < exercise.sets.len()
            {
                exercise.sets.remove(set_index);
            }
        }
        Action::UpdateExerciseNotes {
            exercise_index,
            notes,
        } => {
            if let Some(exercise) = session_exercise_mut(&mut next, exercise_index) {
                exercise.notes = notes;
            }
        }
        Action::ReorderSessionExercises { exercises } => {
            if let Some(session) = next.active_session.as_mut() {
                session.exercises = exercises;
            }
        }
        Action::ToggleSessionExerciseSkip { exercise_index } => {
            if let Some(exercise) = session_exercise_mut(&mut next, exercise_index) {
                exercise.skipped = !exercise.skipped;
            }
        }

        // ====================================================================
        // Burndown in session
        // ====================================================================
        Action::ToggleSessionBurndown { exercise_index } => {
            if let Some(exercise) = session_exercise_mut(&mut next, exercise_index) {
                exercise.burndown = match exercise.burndown {
                    Some(_) => None,
                    None => Some(SessionBurndown::with_blank_drops(DEFAULT_DROP_COUNT)),
                };
            }
        }
        Action::SetSessionDropCount {
            exercise_index,
            count,
        } => {
            if let Some(burndown) = session_exercise_mut(&mut next, exercise_index)
                .and_then(|exercise| exercise.burndown.as_mut())
            {
                burndown
                    .drops
                    .resize(count.min(MAX_DROP_COUNT), DropEntry::default());
            }
        }
        Action::UpdateBurndownDrop {
            exercise_index,
            drop_index,
            field,
            value,
        } => {
            if let Some(drop) = session_exercise_mut(&mut next, exercise_index)
                .and_then(|exercise| exercise.burndown.as_mut())
                .and_then(|burndown| burndown.drops.get_mut(drop_index))
            {
                match field {
                    SetField::Weight => drop.weight = value,
                    SetField::Reps => drop.reps = value,
                }
            }
        }

        // ====================================================================
        // Global
        // ====================================================================
        Action::SetUnit { unit } => {
            next.unit = unit;
        }
    }

    next
}

fn normalize_burndown(config: BurndownConfig) -> BurndownConfig {
    BurndownConfig {
        drop_count: config.drop_count.clamp(1, MAX_DROP_COUNT as u32),
        ..config
    }
}

fn template_mut<'a>(
    state: &'a mut AppState,
    day_id: &str,
    exercise_id: &str,
) -> Option<&'a mut ExerciseTemplate> {
    state
        .days
        .get_mut(day_id)
        .and_then(|day| day.exercises.get_mut(exercise_id))
}

fn session_exercise_mut(state: &mut AppState, exercise_index: usize) -> Option<&mut SessionExercise> {
    state
        .active_session
        .as_mut()
        .and_then(|session| session.exercises.get_mut(exercise_index))
}

fn set_mut(state: &mut AppState, exercise_index: usize, set_index: usize) -> Option<&mut SetEntry> {
    session_exercise_mut(state, exercise_index).and_then(|exercise| exercise.sets.get_mut(set_index))
}
