//! The state coordinator.
//!
//! `WorkoutStore` owns the canonical [`AppState`] and is the single dispatch
//! entry point. Every dispatch runs the reducer synchronously, notifies
//! subscribers and persists the result when it changed.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::action::Action;
use crate::environment::Environment;
use crate::error::Result;
use crate::reducer::reduce;
use crate::state::{AppState, StateRepository};

/// Handle returned by [`WorkoutStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&AppState)>;

pub struct WorkoutStore {
    state: AppState,
    env: Environment,
    repository: Arc<dyn StateRepository>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl WorkoutStore {
    /// Creates a store seeded from whatever `repository` currently holds.
    pub fn open(repository: Arc<dyn StateRepository>, env: Environment) -> Self {
        let state = repository.load_state();
        info!(
            days = state.days.len(),
            history = state.history.len(),
            active_session = state.active_session.is_some(),
            "Loaded workout state"
        );
        Self {
            state,
            env,
            repository,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Current state snapshot.
    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn environment(&self) -> &Environment {
        &self.env
    }

    /// Applies `action`, notifies subscribers and saves the new state.
    ///
    /// Save failures are logged and otherwise ignored; the in-memory state
    /// stays authoritative.
    pub fn dispatch(&mut self, action: Action) {
        let kind = action.kind();
        debug!(action = kind, "Dispatching action");

        let next = reduce(&self.state, action, &self.env);
        if next == self.state {
            debug!(action = kind, "Action left state unchanged");
            return;
        }
        self.state = next;

        for (_, listener) in self.listeners.iter_mut() {
            listener(&self.state);
        }

        if let Err(e) = self.repository.save_state(&self.state) {
            warn!(action = kind, "Failed to persist state: {}", e);
        }
    }

    /// Parses a tagged JSON action and dispatches it.
    ///
    /// Unknown action tags are ignored. A known tag with an invalid payload
    /// is a serialization error and nothing is dispatched.
    pub fn dispatch_json(&mut self, input: &str) -> Result<()> {
        match Action::from_json(input)? {
            Some(action) => self.dispatch(action),
            None => debug!("Ignoring action with unknown type tag"),
        }
        Ok(())
    }

    /// Registers a listener called after every state change.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&AppState) + 'static,
    {
        self.next_subscription += 1;
        let id = SubscriptionId(self.next_subscription);
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a listener. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }
}

impl std::fmt::Debug for WorkoutStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkoutStore")
            .field("state", &self.state)
            .field("env", &self.env)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::{FixedClock, SequentialIdGenerator};
    use crate::error::LiftlogError;
    use crate::state::InMemoryStateRepository;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn env() -> Environment {
        Environment::new(
            Arc::new(SequentialIdGenerator::new()),
            Arc::new(FixedClock::at("2024-03-01T10:00:00+00:00").unwrap()),
        )
    }

    struct FailingRepository;

    impl StateRepository for FailingRepository {
        fn load_state(&self) -> AppState {
            AppState::new()
        }

        fn save_state(&self, _state: &AppState) -> Result<()> {
            Err(LiftlogError::io("disk full"))
        }
    }

    #[test]
    fn test_open_loads_from_repository() {
        let mut seeded = AppState::new();
        seeded.active_day_id = Some("d".to_string());
        let repo = Arc::new(InMemoryStateRepository::with_state(seeded.clone()));

        let store = WorkoutStore::open(repo, env());
        assert_eq!(store.state(), &seeded);
    }

    #[test]
    fn test_dispatch_saves_changed_state() {
        let repo = Arc::new(InMemoryStateRepository::new());
        let mut store = WorkoutStore::open(repo.clone(), env());

        store.dispatch(Action::AddDay {
            name: "Push".to_string(),
        });
        assert_eq!(repo.stored().as_ref(), Some(store.state()));
    }

    #[test]
    fn test_noop_action_is_not_saved() {
        let repo = Arc::new(InMemoryStateRepository::new());
        let mut store = WorkoutStore::open(repo.clone(), env());

        store.dispatch(Action::FinishSession);
        assert!(repo.stored().is_none());
    }

    #[test]
    fn test_save_failure_keeps_memory_state() {
        let mut store = WorkoutStore::open(Arc::new(FailingRepository), env());
        store.dispatch(Action::AddDay {
            name: "Legs".to_string(),
        });
        assert_eq!(store.state().days.len(), 1);
    }

    #[test]
    fn test_subscribers_see_every_change() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut store = WorkoutStore::open(Arc::new(InMemoryStateRepository::new()), env());

        let sink = seen.clone();
        let id = store.subscribe(move |state| sink.borrow_mut().push(state.days.len()));

        store.dispatch(Action::AddDay {
            name: "A".to_string(),
        });
        store.dispatch(Action::AddDay {
            name: "B".to_string(),
        });
        assert!(store.unsubscribe(id));
        store.dispatch(Action::AddDay {
            name: "C".to_string(),
        });

        assert_eq!(*seen.borrow(), vec![1, 2]);
        assert!(!store.unsubscribe(id));
    }

    #[test]
    fn test_dispatch_json() {
        let mut store = WorkoutStore::open(Arc::new(InMemoryStateRepository::new()), env());

        store
            .dispatch_json(r#"{"type":"ADD_DAY","payload":{"name":"Pull"}}"#)
            .unwrap();
        assert_eq!(store.state().days["id-1"].name, "Pull");

        let before = store.state().clone();
        store.dispatch_json(r#"{"type":"NOT_AN_ACTION"}"#).unwrap();
        assert_eq!(store.state(), &before);

        let err = store
            .dispatch_json(r#"{"type":"RENAME_DAY","payload":{}}"#)
            .unwrap_err();
        assert!(err.is_serialization());
    }

    #[test]
    fn test_dispatch_json_with_huge_drop_count_is_capped() {
        let mut store = WorkoutStore::open(Arc::new(InMemoryStateRepository::new()), env());
        for action in [
            r#"{"type":"ADD_DAY","payload":{"name":"Push"}}"#,
            r#"{"type":"ADD_EXERCISE","payload":{"dayId":"id-1","name":"Bench","defaultSetCount":3}}"#,
            r#"{"type":"START_SESSION","payload":{"dayId":"id-1"}}"#,
            r#"{"type":"TOGGLE_SESSION_BURNDOWN","payload":{"exerciseIndex":0}}"#,
            r#"{"type":"SET_SESSION_DROP_COUNT","payload":{"exerciseIndex":0,"count":18446744073709551615}}"#,
        ] {
            store.dispatch_json(action).unwrap();
        }

        let session = store.state().active_session.as_ref().unwrap();
        let drops = &session.exercises[0].burndown.as_ref().unwrap().drops;
        assert_eq!(drops.len(), crate::state::MAX_DROP_COUNT);
    }
}
