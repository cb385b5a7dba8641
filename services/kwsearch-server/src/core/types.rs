//! Core data types for the kwsearch service.
//!
//! The index entities (`Keyword`, `Webpage`, `Occurrence`) are owned by
//! the external indexing pipeline and are read-only here. Everything
//! else is produced per request and discarded once the response is
//! written.

use serde::{Deserialize, Serialize};

/// Identifier of an indexed webpage
pub type DocumentId = i64;

/// Identifier of a keyword
pub type KeywordId = i64;

/// A normalized term known to the index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keyword {
    pub keyword_id: KeywordId,

    /// Normalized (lower-case) term text, unique across the index
    pub name: String,
}

/// An indexed document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Webpage {
    pub webpage_id: DocumentId,
    pub url: String,
    pub title: String,
    pub content: String,
}

/// Weighted association between a keyword and a webpage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Occurrence {
    pub webpage_id: DocumentId,
    pub keyword_id: KeywordId,

    /// Raw number of times the keyword appears in the page
    #[serde(default)]
    pub counter: i64,

    /// Relevance weight assigned by the indexing pipeline
    pub pagerank: f64,
}

/// One aggregated row produced by the ranking retriever
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedRow {
    pub document_id: DocumentId,
    pub title: String,
    pub url: String,
    pub content: String,

    /// Mean pagerank over the occurrences matching any query term
    pub score: f64,
}

/// Display record for a single search result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub document_id: DocumentId,
    pub title: String,
    pub url: String,

    /// Leading slice of the page content (character-bounded)
    pub excerpt: String,
    pub score: f64,
}

/// Result of running one query through the pipeline
///
/// `EmptyQuery` and `NoMatch` are ordinary outcomes: both mean "zero
/// results", but callers can tell them apart to render a suitable
/// message. Storage failures are reported through
/// [`KwSearchError`](crate::core::error::KwSearchError) instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "results", rename_all = "snake_case")]
pub enum SearchOutcome {
    /// The query contained no term characters; storage was not touched
    EmptyQuery,

    /// No document contains every query term
    NoMatch,

    /// Ranked hits, best first
    Hits(Vec<SearchHit>),
}

impl SearchOutcome {
    /// Hits in rank order (empty for the zero-result outcomes)
    pub fn hits(&self) -> &[SearchHit] {
        match self {
            SearchOutcome::Hits(hits) => hits,
            SearchOutcome::EmptyQuery | SearchOutcome::NoMatch => &[],
        }
    }

    /// Same tag the outcome serializes with
    pub fn label(&self) -> &'static str {
        match self {
            SearchOutcome::EmptyQuery => "empty_query",
            SearchOutcome::NoMatch => "no_match",
            SearchOutcome::Hits(_) => "hits",
        }
    }

    pub fn len(&self) -> usize {
        self.hits().len()
    }

    pub fn is_empty(&self) -> bool {
        self.hits().is_empty()
    }
}

/// Search response returned by the service and its adapters
#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    /// Query string as received
    pub query: String,

    /// Terms extracted from the query
    pub terms: Vec<String>,

    #[serde(flatten)]
    pub outcome: SearchOutcome,

    /// Number of hits returned
    pub count: usize,

    /// Wall-clock time spent in the pipeline
    pub duration_ms: u64,
}

/// Row counts of the keyword index
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStats {
    pub keywords: u64,
    pub webpages: u64,
    pub occurrences: u64,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
