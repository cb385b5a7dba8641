//! kwsearch CLI - command-line interface for keyword search
//!
//! Runs queries and index maintenance without starting the server.
//!
//! # Examples
//!
//! ```bash
//! # Load an index snapshot into the default database
//! kwsearch import snapshot.json
//!
//! # Search
//! kwsearch search "rust async runtime" --limit 10
//!
//! # Index row counts as JSON
//! kwsearch stats --format json
//! ```

use clap::Parser;
use kwsearch::cli::output::print_error;
use kwsearch::cli::{run, Cli};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Diagnostics go to stderr so stdout stays parseable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kwsearch=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        print_error(&e.to_string());
        std::process::exit(1);
    }
}
