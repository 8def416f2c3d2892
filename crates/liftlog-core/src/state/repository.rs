//! State repository trait.

use std::sync::Mutex;

use crate::error::{LiftlogError, Result};
use crate::state::model::AppState;

/// Repository for loading and saving the whole application state.
///
/// There is exactly one persisted document. Implementations apply any
/// schema migration on load.
pub trait StateRepository: Send + Sync {
    /// Loads the persisted state, or a fresh state if nothing usable is stored.
    fn load_state(&self) -> AppState;

    /// Saves the whole state, replacing what was stored before.
    fn save_state(&self, state: &AppState) -> Result<()>;
}

/// Keeps the state in memory. Used by tests and ephemeral runs.
#[derive(Debug, Default)]
pub struct InMemoryStateRepository {
    state: Mutex<Option<AppState>>,
}

impl InMemoryStateRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository that already holds `state`.
    pub fn with_state(state: AppState) -> Self {
        Self {
            state: Mutex::new(Some(state)),
        }
    }

    /// Returns the last saved state, if any.
    pub fn stored(&self) -> Option<AppState> {
        self.state.lock().ok().and_then(|guard| guard.clone())
    }
}

impl StateRepository for InMemoryStateRepository {
    fn load_state(&self) -> AppState {
        self.stored().unwrap_or_default()
    }

    fn save_state(&self, state: &AppState) -> Result<()> {
        let mut guard = self
            .state
            .lock()
            .map_err(|e| LiftlogError::internal(format!("state lock poisoned: {}", e)))?;
        *guard = Some(state.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_without_save_returns_fresh_state() {
        let repo = InMemoryStateRepository::new();
        assert_eq!(repo.load_state(), AppState::new());
        assert!(repo.stored().is_none());
    }

    #[test]
    fn test_save_then_load() {
        let repo = InMemoryStateRepository::new();
        let mut state = AppState::new();
        state.active_day_id = Some("d-1".to_string());

        repo.save_state(&state).unwrap();
        assert_eq!(repo.load_state(), state);
    }
}
