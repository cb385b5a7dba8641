//! Search service: query text in, formatted results out.
//!
//! Pipeline: tokenize -> plan -> retrieve -> format. Everything between
//! the first and last step is request-scoped and dropped on return.

use super::formatter::format_hit;
use super::query::plan_query;
use super::retriever::{retrieve, Retrieval};
use super::tokenizer::tokenize;
use crate::core::config::SearchConfig;
use crate::core::error::{KwSearchError, Result};
use crate::core::storage::KeywordStore;
use crate::core::types::{IndexStats, SearchOutcome, SearchResponse};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Keyword search service
#[derive(Clone)]
pub struct SearchService {
    store: Arc<dyn KeywordStore>,
    max_results: usize,
    excerpt_chars: usize,
    max_query_length: usize,
    timeout: Duration,
}

impl SearchService {
    /// Create a new search service
    pub fn new(store: Arc<dyn KeywordStore>, config: &SearchConfig, timeout: Duration) -> Self {
        Self {
            store,
            max_results: config.max_results,
            excerpt_chars: config.excerpt_chars,
            max_query_length: config.max_query_length,
            timeout,
        }
    }

    pub fn store(&self) -> &Arc<dyn KeywordStore> {
        &self.store
    }

    pub fn max_results(&self) -> usize {
        self.max_results
    }

    /// Execute a search query
    pub fn search(&self, query: &str) -> Result<SearchResponse> {
        self.search_with_limit(query, None)
    }

    /// Execute a search query with an optional lower result cap.
    ///
    /// `limit` can only narrow the configured maximum, never raise it.
    pub fn search_with_limit(&self, query: &str, limit: Option<usize>) -> Result<SearchResponse> {
        let start = Instant::now();

        let length = query.chars().count();
        if length > self.max_query_length {
            return Err(KwSearchError::InvalidQuery(format!(
                "Query is {length} characters long (maximum {})",
                self.max_query_length
            )));
        }

        let limit = limit.unwrap_or(self.max_results).min(self.max_results);
        let terms = tokenize(query);

        let outcome = match plan_query(&terms) {
            None => SearchOutcome::EmptyQuery,
            Some(plan) => match retrieve(self.store.as_ref(), &plan, limit)? {
                Retrieval::Ranked(rows) if !rows.is_empty() => SearchOutcome::Hits(
                    rows.into_iter()
                        .map(|row| format_hit(row, self.excerpt_chars))
                        .collect(),
                ),
                Retrieval::Ranked(_) | Retrieval::NoMatch => SearchOutcome::NoMatch,
            },
        };

        let duration_ms = start.elapsed().as_millis() as u64;
        let count = outcome.len();

        tracing::info!(
            outcome = outcome.label(),
            terms = terms.len(),
            results = count,
            duration_ms,
            "Search completed"
        );

        Ok(SearchResponse {
            query: query.to_string(),
            terms,
            outcome,
            count,
            duration_ms,
        })
    }

    /// Run [`search_with_limit`](Self::search_with_limit) on the blocking
    /// pool, bounded by the request timeout.
    pub async fn search_async(
        &self,
        query: String,
        limit: Option<usize>,
    ) -> Result<SearchResponse> {
        let service = self.clone();
        self.run_blocking(move || service.search_with_limit(&query, limit))
            .await
    }

    /// Row counts of the index
    pub fn stats(&self) -> Result<IndexStats> {
        self.store.stats()
    }

    pub async fn stats_async(&self) -> Result<IndexStats> {
        let store = Arc::clone(&self.store);
        self.run_blocking(move || store.stats()).await
    }

    async fn run_blocking<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce() -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        match tokio::time::timeout(self.timeout, tokio::task::spawn_blocking(f)).await {
            Ok(Ok(result)) => result,
            Ok(Err(e)) => Err(KwSearchError::StorageUnavailable(format!(
                "Storage task failed: {e}"
            ))),
            Err(_) => {
                tracing::warn!(timeout_ms = self.timeout.as_millis() as u64, "Storage timed out");
                Err(KwSearchError::StorageUnavailable(format!(
                    "No response from storage within {}ms",
                    self.timeout.as_millis()
                )))
            }
        }
    }
}
