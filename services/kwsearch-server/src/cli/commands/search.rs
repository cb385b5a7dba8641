//! Search command - query the keyword index

use crate::cli::output::{colors, format_duration_ms, wrap_text};
use crate::cli::OutputFormat;
use crate::core::services::Services;
use crate::core::types::{SearchOutcome, SearchResponse};
use clap::Args;
use serde::Serialize;
use std::sync::Arc;

/// Excerpt lines shown per hit in human output
const EXCERPT_LINES: usize = 3;
const EXCERPT_WIDTH: usize = 96;

/// Arguments for the search command
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Search query; terms are separated by whitespace and punctuation
    pub query: String,

    /// Maximum number of results (capped by search.max_results)
    #[arg(long, short = 'k')]
    pub limit: Option<usize>,

    /// Only show titles and URLs (no excerpt)
    #[arg(long)]
    pub no_excerpt: bool,
}

/// Search result item
#[derive(Debug, Serialize)]
pub struct SearchResultItem {
    pub rank: usize,
    pub document_id: i64,
    pub title: String,
    pub url: String,
    pub score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
}

/// Which kind of outcome a search produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStatus {
    EmptyQuery,
    NoMatch,
    Hits,
}

impl From<&SearchOutcome> for SearchStatus {
    fn from(outcome: &SearchOutcome) -> Self {
        match outcome {
            SearchOutcome::EmptyQuery => SearchStatus::EmptyQuery,
            SearchOutcome::NoMatch => SearchStatus::NoMatch,
            SearchOutcome::Hits(_) => SearchStatus::Hits,
        }
    }
}

/// Search output
#[derive(Debug, Serialize)]
pub struct SearchOutput {
    pub query: String,
    pub terms: Vec<String>,
    pub status: SearchStatus,
    pub total_results: usize,
    pub duration_ms: u64,
    pub results: Vec<SearchResultItem>,
}

impl SearchOutput {
    pub fn new(response: SearchResponse, with_excerpt: bool) -> Self {
        let status = SearchStatus::from(&response.outcome);

        let results = response
            .outcome
            .hits()
            .iter()
            .enumerate()
            .map(|(i, hit)| SearchResultItem {
                rank: i + 1,
                document_id: hit.document_id,
                title: hit.title.clone(),
                url: hit.url.clone(),
                score: hit.score,
                excerpt: with_excerpt.then(|| hit.excerpt.clone()),
            })
            .collect();

        Self {
            query: response.query,
            terms: response.terms,
            status,
            total_results: response.count,
            duration_ms: response.duration_ms,
            results,
        }
    }
}

/// Execute the search command
pub async fn execute(
    args: SearchArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let response = services
        .search
        .search_async(args.query.clone(), args.limit)
        .await?;
    let output = SearchOutput::new(response, !args.no_excerpt);

    match format {
        OutputFormat::Human => print_human(&output),
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}

fn print_human(output: &SearchOutput) {
    match output.status {
        SearchStatus::EmptyQuery => {
            println!("Query '{}' contains no search terms", output.query);
            return;
        }
        SearchStatus::NoMatch => {
            println!(
                "0 results for '{}' {}",
                colors::label(&output.query),
                colors::dim(&format!("({})", format_duration_ms(output.duration_ms)))
            );
            return;
        }
        SearchStatus::Hits => {}
    }

    println!(
        "Found {} result(s) for '{}' {}\n",
        colors::number(&output.total_results.to_string()),
        colors::label(&output.query),
        colors::dim(&format!("({})", format_duration_ms(output.duration_ms)))
    );

    for result in &output.results {
        println!(
            "[{}] {} {}",
            colors::rank(&result.rank.to_string()),
            colors::title(&result.title),
            colors::score(&format!("(score: {:.4})", result.score))
        );
        println!("    {}", colors::url(&result.url));
        if let Some(excerpt) = &result.excerpt {
            for line in wrap_text(excerpt, EXCERPT_WIDTH, EXCERPT_LINES) {
                println!("    {}", colors::dim(&line));
            }
        }
        println!();
    }
}
