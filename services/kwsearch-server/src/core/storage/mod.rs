//! Storage layer for the keyword index.
//!
//! The search pipeline talks to storage only through [`KeywordStore`].
//! Two implementations exist:
//!
//! - **SqliteStore**: the relational layout the indexing pipeline
//!   writes (`webpage`, `keyword`, `occurrence`). Each call opens its
//!   own read-only connection and drops it before returning.
//! - **MemoryStore**: the same data held in hash maps, loaded from a
//!   JSON [`Snapshot`].
//!
//! # Schema
//!
//! ```text
//! webpage(webpage_id PK, url, title, content)
//! keyword(keyword_id PK, name UNIQUE)
//! occurrence(webpage_id FK, keyword_id FK, counter, pagerank)
//!            PK(webpage_id, keyword_id)
//! ```

mod memory;
mod snapshot;
mod sqlite;

pub use memory::MemoryStore;
pub use snapshot::Snapshot;
pub use sqlite::SqliteStore;

use crate::core::config::{StorageBackend, StorageConfig};
use crate::core::error::{KwSearchError, Result};
use crate::core::search::{FilterPredicate, ScorePredicate};
use crate::core::types::{DocumentId, IndexStats, RankedRow};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::sync::Arc;

/// Read-only query interface over the keyword index
pub trait KeywordStore: Send + Sync {
    /// Short backend name for logs and diagnostics
    fn backend_name(&self) -> &'static str;

    /// Documents whose keyword associations contain `term`
    fn term_documents(&self, term: &str) -> Result<BTreeSet<DocumentId>>;

    /// Documents satisfying every term of `filter`
    ///
    /// The default folds [`term_documents`](Self::term_documents)
    /// through the filter chain. Backends that can answer in a single
    /// round trip override it.
    fn candidate_documents(&self, filter: &FilterPredicate) -> Result<BTreeSet<DocumentId>> {
        filter.evaluate(&mut |term| self.term_documents(term))
    }

    /// Group the matching occurrences of `candidates` by document,
    /// score each by mean pagerank over associations that satisfy
    /// `score`, and return the best `limit` rows.
    ///
    /// Rows are ordered by score descending, then document id
    /// ascending.
    fn aggregate_and_rank(
        &self,
        candidates: &BTreeSet<DocumentId>,
        score: &ScorePredicate,
        limit: usize,
    ) -> Result<Vec<RankedRow>>;

    /// Row counts of the index tables
    fn stats(&self) -> Result<IndexStats>;
}

/// Open the store selected by configuration
pub fn open_store(config: &StorageConfig) -> Result<Arc<dyn KeywordStore>> {
    match config.backend {
        StorageBackend::Sqlite => Ok(Arc::new(SqliteStore::from_config(config))),
        StorageBackend::Memory => {
            let path = config.snapshot_path.as_ref().ok_or_else(|| {
                KwSearchError::ConfigError(
                    "Memory backend requires storage.snapshot_path".to_string(),
                )
            })?;
            let snapshot = Snapshot::from_file(path)?;
            tracing::info!(
                keywords = snapshot.keywords.len(),
                webpages = snapshot.webpages.len(),
                occurrences = snapshot.occurrences.len(),
                "Loaded index snapshot"
            );
            Ok(Arc::new(MemoryStore::new(snapshot)))
        }
    }
}

/// Ranking order: score descending, then document id ascending
pub fn rank_order(a: &RankedRow, b: &RankedRow) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.document_id.cmp(&b.document_id))
}

/// Sort rows into ranking order and keep the first `limit`
pub fn order_and_truncate(rows: &mut Vec<RankedRow>, limit: usize) {
    rows.sort_by(rank_order);
    rows.truncate(limit);
}
