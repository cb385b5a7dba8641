//! CLI adapter for kwsearch
//!
//! Runs the search pipeline and index maintenance from the command
//! line. This module is parallel to `http/` - both depend on `core/`
//! but not on each other.
//!
//! # Architecture
//!
//! ```text
//!              +------------------+
//!              |     core/        |
//!              |  (domain logic)  |
//!              +--------+---------+
//!                       |
//!          +------------+------------+
//!          |                         |
//!          v                         v
//! +------------------+      +------------------+
//! |      http/       |      |      cli/        |
//! | (axum adapter)   |      | (clap adapter)   |
//! +------------------+      +------------------+
//! ```

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};

/// kwsearch - keyword search over a pagerank-weighted index
///
/// Finds pages containing every query term and ranks them by the mean
/// pagerank of their matching keywords.
#[derive(Parser, Debug)]
#[command(name = "kwsearch")]
#[command(version)]
#[command(about = "Keyword search over a pagerank-weighted index", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, global = true, default_value = "human")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for scripting
    Json,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search the index
    Search(commands::SearchArgs),

    /// Load a JSON snapshot into the SQLite database
    Import(commands::ImportArgs),

    /// Show index row counts
    Stats(commands::StatsArgs),

    /// Show current configuration
    #[command(name = "show-config")]
    ShowConfig(commands::ConfigArgs),

    /// Generate shell completion scripts
    ///
    /// Output completion script to stdout. To install:
    ///
    ///   bash:  kwsearch completions bash > ~/.local/share/bash-completion/completions/kwsearch
    ///   zsh:   kwsearch completions zsh > ~/.zfunc/_kwsearch
    ///   fish:  kwsearch completions fish > ~/.config/fish/completions/kwsearch.fish
    Completions(commands::CompletionsArgs),
}

/// Run the CLI with the provided arguments
pub async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    use crate::core::config::Config;
    use crate::core::services::Services;
    use crate::core::xdg::XdgDirs;
    use std::sync::Arc;

    // Handle completions command early (doesn't need configuration)
    if let Commands::Completions(args) = cli.command {
        return commands::completions::execute(args);
    }

    let xdg = XdgDirs::new();
    xdg.ensure_dirs_exist()?;

    let config = Config::load_with_xdg(&xdg)?;

    match cli.command {
        // Import writes the database, so it bypasses the read-only store
        Commands::Import(args) => commands::import::execute(args, &config, cli.format),
        Commands::ShowConfig(args) => commands::config::execute(args, &config, &xdg, cli.format),
        Commands::Search(args) => {
            let services = Arc::new(Services::new(config)?);
            commands::search::execute(args, &services, cli.format).await
        }
        Commands::Stats(args) => {
            let services = Arc::new(Services::new(config)?);
            commands::stats::execute(args, &services, cli.format).await
        }
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
