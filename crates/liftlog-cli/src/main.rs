use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use liftlog_infrastructure::{LiftlogConfig, LiftlogPaths};
use std::path::PathBuf;

mod commands;
mod logging;

#[derive(Parser, Debug)]
#[command(name = "liftlog")]
#[command(about = "liftlog - workout day templates, live sessions and history", long_about = None)]
struct Cli {
    /// State document to use instead of the configured one
    #[arg(long, global = true, value_name = "PATH")]
    state_file: Option<PathBuf>,

    /// Directory holding config.toml and the default state file
    #[arg(long, global = true, value_name = "DIR")]
    config_dir: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show days, exercises and the active session
    Show,
    /// Apply one JSON action, e.g. '{"type":"ADD_DAY","payload":{"name":"Push"}}'
    Dispatch {
        /// Tagged action JSON
        action: String,
    },
    /// Show logged sets and trend for an exercise
    History {
        /// Exercise template ID
        exercise_id: String,
    },
    /// Write a dated backup file
    Export {
        /// Target directory (defaults to export_dir from config, then the current directory)
        #[arg(long)]
        dir: Option<PathBuf>,
    },
    /// Replace all data with a backup file
    Import {
        /// Backup file to read
        file: PathBuf,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = LiftlogPaths::new(cli.config_dir.clone());
    let config = LiftlogConfig::load(&paths).context("Failed to load configuration")?;

    logging::init_logging(&logging::LogConfig::from_verbosity(
        cli.verbose,
        config.log_level.as_deref(),
    ));

    let state_file = match cli.state_file {
        Some(path) => path,
        None => config.resolve_state_file(&paths)?,
    };
    tracing::debug!("Using state file {}", state_file.display());

    match cli.command {
        Commands::Show => commands::show::run(&state_file)?,
        Commands::Dispatch { action } => commands::dispatch::run(&state_file, &action)?,
        Commands::History { exercise_id } => commands::history::run(&state_file, &exercise_id)?,
        Commands::Export { dir } => {
            let dir = dir.unwrap_or_else(|| config.resolve_export_dir());
            commands::transfer::export(&state_file, &dir)?
        }
        Commands::Import { file, yes } => commands::transfer::import(&state_file, &file, yes)?,
    }

    Ok(())
}
