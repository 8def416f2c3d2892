//! End-to-end persistence: store, file repository and migrations together.

use std::fs;
use std::sync::Arc;

use liftlog_core::environment::{FixedClock, SequentialIdGenerator};
use liftlog_core::state::{StateRepository, Unit};
use liftlog_core::{Action, Environment, SetField, WorkoutStore};
use liftlog_infrastructure::migration::migrate_document;
use liftlog_infrastructure::{FileStateRepository, export_state, parse_import};
use serde_json::{Value, json};
use tempfile::TempDir;

fn env() -> Environment {
    Environment::new(
        Arc::new(SequentialIdGenerator::new()),
        Arc::new(FixedClock::at("2024-03-01T10:00:00+00:00").unwrap()),
    )
}

fn v1_document() -> Value {
    json!({
        "schemaVersion": 1,
        "dayOrder": ["push"],
        "days": {
            "push": {
                "id": "push",
                "name": "Push",
                "exerciseOrder": ["bench"],
                "exercises": {
                    "bench": {
                        "id": "bench",
                        "name": "Bench",
                        "defaultSetCount": 2,
                        "burndown": {"enabled": "yes"}
                    }
                }
            }
        },
        "activeDayId": "push",
        "activeSession": {
            "id": "s2",
            "dayId": "push",
            "dayName": "Push",
            "date": "2024-02-28",
            "startedAt": "2024-02-28T09:00:00.000Z",
            "completedAt": null,
            "exercises": [{
                "exerciseId": "bench",
                "name": "Bench",
                "sets": [
                    {"weight": 100, "reps": 8, "completed": true},
                    {"weight": 100, "reps": null, "completed": false}
                ],
                "burndown": null
            }]
        },
        "history": [{
            "id": "s1",
            "dayId": "push",
            "dayName": "Push",
            "date": "2024-02-26",
            "startedAt": "2024-02-26T09:00:00.000Z",
            "completedAt": "2024-02-26T10:00:00.000Z",
            "exercises": [{
                "exerciseId": "bench",
                "name": "Bench",
                "sets": [{"weight": 95, "reps": 8, "completed": true}],
                "burndown": null
            }]
        }]
    })
}

#[test]
fn test_v1_document_loads_as_current_state() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("state.json");
    fs::write(&path, v1_document().to_string()).unwrap();

    let state = FileStateRepository::new(path).load_state();
    assert_eq!(state.schema_version, 2);
    assert_eq!(state.unit, Unit::Lbs);
    assert!(state.days["push"].exercises["bench"].burndown.is_none());

    let session = state.active_session.as_ref().unwrap();
    assert_eq!(session.exercises[0].notes, "");
    assert!(!session.exercises[0].skipped);
    assert_eq!(session.exercises[0].sets[1].reps_from_last_session, None);
    assert_eq!(session.progress().to_string(), "1/2");
    assert_eq!(state.history[0].exercises[0].sets[0].weight, Some(95.0));
}

#[test]
fn test_migrating_a_current_document_twice_is_byte_identical() {
    let once = migrate_document(v1_document()).unwrap();
    let once_text = serde_json::to_string(&once).unwrap();

    let twice = migrate_document(serde_json::from_str(&once_text).unwrap()).unwrap();
    let thrice = migrate_document(twice.clone()).unwrap();
    assert_eq!(serde_json::to_string(&twice).unwrap(), once_text);
    assert_eq!(serde_json::to_string(&thrice).unwrap(), once_text);
}

#[test]
fn test_saved_state_reloads_identically() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("state.json");
    let repo = Arc::new(FileStateRepository::new(path.clone()));

    let mut store = WorkoutStore::open(repo.clone(), env());
    store.dispatch(Action::AddDay {
        name: "Push".to_string(),
    });
    store.dispatch(Action::AddExercise {
        day_id: "id-1".to_string(),
        name: "Bench".to_string(),
        default_set_count: 3,
        burndown: None,
    });
    store.dispatch(Action::StartSession {
        day_id: "id-1".to_string(),
    });
    store.dispatch(Action::UpdateSet {
        exercise_index: 0,
        set_index: 0,
        field: SetField::Weight,
        value: Some(100.0),
    });
    store.dispatch(Action::FinishSession);

    let reopened = WorkoutStore::open(Arc::new(FileStateRepository::new(path.clone())), env());
    assert_eq!(reopened.state(), store.state());

    let on_disk: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(migrate_document(on_disk.clone()).unwrap(), on_disk);
}

#[test]
fn test_import_replaces_state_through_load_state() {
    let temp_dir = TempDir::new().unwrap();
    let repo = Arc::new(FileStateRepository::new(temp_dir.path().join("state.json")));
    let mut store = WorkoutStore::open(repo.clone(), env());
    store.dispatch(Action::AddDay {
        name: "Old".to_string(),
    });

    let imported = parse_import(&v1_document().to_string()).unwrap();
    store.dispatch(Action::LoadState(Box::new(imported.clone())));
    assert_eq!(store.state(), &imported);
    assert_eq!(repo.load_state(), imported);

    let backup = export_state(store.state()).unwrap();
    assert_eq!(parse_import(&backup).unwrap(), imported);
}

#[test]
fn test_rejected_import_leaves_state_untouched() {
    let temp_dir = TempDir::new().unwrap();
    let repo = Arc::new(FileStateRepository::new(temp_dir.path().join("state.json")));
    let mut store = WorkoutStore::open(repo, env());
    store.dispatch(Action::AddDay {
        name: "Keep".to_string(),
    });
    let before = store.state().clone();

    assert!(parse_import(r#"{"schemaVersion": 2, "days": {}}"#).is_err());
    assert_eq!(store.state(), &before);
}
