use anyhow::{Context, Result};
use chrono::Local;
use liftlog_core::Action;
use liftlog_infrastructure::{export_to_dir, parse_import};
use std::io::{self, BufRead, Write};
use std::path::Path;

pub fn export(state_file: &Path, dir: &Path) -> Result<()> {
    let store = super::open_store(state_file);
    let path = export_to_dir(store.state(), dir, Local::now().date_naive())?;
    println!("📦 Backup written to {}", path.display());
    Ok(())
}

/// Replaces the stored state with a backup file after confirmation.
pub fn import(state_file: &Path, backup: &Path, assume_yes: bool) -> Result<()> {
    let text = std::fs::read_to_string(backup)
        .with_context(|| format!("Failed to read {}", backup.display()))?;
    let state = parse_import(&text)?;

    if !assume_yes {
        let stdin = io::stdin();
        let confirmed = confirm(
            "This will replace all current data. Continue? [y/N] ",
            &mut stdin.lock(),
            &mut io::stdout(),
        )?;
        if !confirmed {
            println!("Import cancelled.");
            return Ok(());
        }
    }

    let mut store = super::open_store(state_file);
    store.dispatch(Action::LoadState(Box::new(state)));
    println!(
        "✅ Imported {} days and {} finished sessions",
        store.state().days.len(),
        store.state().history.len()
    );
    Ok(())
}

/// Asks a yes/no question; anything but `y`/`yes` is a no.
pub fn confirm<R: BufRead, W: Write>(prompt: &str, input: &mut R, output: &mut W) -> io::Result<bool> {
    write!(output, "{}", prompt)?;
    output.flush()?;
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}
