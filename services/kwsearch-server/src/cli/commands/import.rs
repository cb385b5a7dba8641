//! Import command - load a JSON snapshot into the SQLite database

use crate::cli::output::{colors, print_success};
use crate::cli::OutputFormat;
use crate::core::config::Config;
use crate::core::storage::{Snapshot, SqliteStore};
use crate::core::types::IndexStats;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Arguments for the import command
#[derive(Args, Debug)]
pub struct ImportArgs {
    /// Snapshot file (JSON with keywords, webpages and occurrences)
    pub snapshot: PathBuf,

    /// Target database (defaults to storage.database_path)
    #[arg(long, short = 'd')]
    pub database: Option<PathBuf>,

    /// Delete existing rows before importing
    #[arg(long)]
    pub replace: bool,
}

/// Import result
#[derive(Debug, Serialize)]
pub struct ImportOutput {
    pub database: String,
    pub snapshot: String,
    pub replaced: bool,
    pub duration_ms: u64,
    pub stats: IndexStats,
}

/// Execute the import command
pub fn execute(
    args: ImportArgs,
    config: &Config,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let start = Instant::now();
    let database = args
        .database
        .unwrap_or_else(|| config.storage.database_path.clone());

    if let Some(parent) = database.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let snapshot = Snapshot::from_file(&args.snapshot)?;
    let store = SqliteStore::new(
        &database,
        Duration::from_millis(config.storage.busy_timeout_ms),
    );
    let stats = store.import_snapshot(&snapshot, args.replace)?;

    let output = ImportOutput {
        database: database.display().to_string(),
        snapshot: args.snapshot.display().to_string(),
        replaced: args.replace,
        duration_ms: start.elapsed().as_millis() as u64,
        stats,
    };

    match format {
        OutputFormat::Human => {
            print_success(&format!("Imported {}", output.snapshot));
            println!("  database:    {}", colors::url(&output.database));
            println!(
                "  webpages:    {}",
                colors::number(&output.stats.webpages.to_string())
            );
            println!(
                "  keywords:    {}",
                colors::number(&output.stats.keywords.to_string())
            );
            println!(
                "  occurrences: {}",
                colors::number(&output.stats.occurrences.to_string())
            );
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}
