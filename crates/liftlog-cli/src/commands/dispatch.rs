use anyhow::{Context, Result};
use liftlog_core::Action;
use std::path::Path;

/// Applies one tagged JSON action to the stored state.
pub fn run(state_file: &Path, action_json: &str) -> Result<()> {
    let action = Action::from_json(action_json).context("Invalid action JSON")?;
    let Some(action) = action else {
        println!("Unknown action type, nothing changed.");
        return Ok(());
    };

    let mut store = super::open_store(state_file);
    let kind = action.kind();
    store.dispatch(action);

    match &store.state().active_session {
        Some(session) => println!("✅ {} (session {})", kind, session.progress()),
        None => println!("✅ {}", kind),
    }
    Ok(())
}
