//! Stats command - show index row counts

use crate::cli::output::{colors, print_header};
use crate::cli::OutputFormat;
use crate::core::services::Services;
use crate::core::types::IndexStats;
use clap::Args;
use serde::Serialize;
use std::sync::Arc;

/// Arguments for the stats command
#[derive(Args, Debug)]
pub struct StatsArgs {}

/// Stats output
#[derive(Debug, Serialize)]
pub struct StatsOutput {
    pub backend: &'static str,
    #[serde(flatten)]
    pub stats: IndexStats,
}

/// Execute the stats command
pub async fn execute(
    _args: StatsArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let output = StatsOutput {
        backend: services.store.backend_name(),
        stats: services.search.stats_async().await?,
    };

    match format {
        OutputFormat::Human => {
            print_header(&format!("Index ({})", output.backend));
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
