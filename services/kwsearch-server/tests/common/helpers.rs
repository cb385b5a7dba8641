// Test helper functions

use kwsearch::core::config::Config;
use kwsearch::core::error::{KwSearchError, Result};
use kwsearch::core::search::{FilterPredicate, ScorePredicate};
use kwsearch::core::services::Services;
use kwsearch::core::storage::{KeywordStore, MemoryStore, Snapshot, SqliteStore};
use kwsearch::core::types::{DocumentId, IndexStats, RankedRow, SearchResponse};
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

/// Timeout used by services built directly in tests
#[allow(dead_code)]
pub const TEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Services over an in-memory store
#[allow(dead_code)]
pub fn memory_services(snapshot: Snapshot) -> Arc<Services> {
    Arc::new(Services::with_store(
        Config::default(),
        Arc::new(MemoryStore::new(snapshot)),
    ))
}

/// Services over a temporary SQLite database holding `snapshot`
///
/// Keep the returned TempDir alive for the duration of the test.
#[allow(dead_code)]
pub fn sqlite_services(snapshot: &Snapshot) -> (Arc<Services>, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let mut config = Config::default();
    config.storage.database_path = temp_dir.path().join("index.db");

    SqliteStore::from_config(&config.storage)
        .import_snapshot(snapshot, false)
        .expect("Failed to import snapshot");

    let services = Services::new(config).expect("Failed to create services");
    (Arc::new(services), temp_dir)
}

/// Services whose database file does not exist
#[allow(dead_code)]
pub fn unavailable_services() -> (Arc<Services>, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let mut config = Config::default();
    config.storage.database_path = temp_dir.path().join("missing.db");
    let services = Services::new(config).expect("Failed to create services");
    (Arc::new(services), temp_dir)
}

/// Document ids of a response, in rank order
#[allow(dead_code)]
pub fn result_ids(response: &SearchResponse) -> Vec<DocumentId> {
    response
        .outcome
        .hits()
        .iter()
        .map(|hit| hit.document_id)
        .collect()
}

/// Store wrapper that counts every storage call
#[allow(dead_code)]
pub struct CountingStore {
    inner: Arc<dyn KeywordStore>,
    calls: AtomicUsize,
    fail: bool,
}

#[allow(dead_code)]
impl CountingStore {
    pub fn wrapping(inner: Arc<dyn KeywordStore>) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
            fail: false,
        }
    }

    /// A store that fails every call with StorageUnavailable
    pub fn failing() -> Self {
        Self {
            inner: Arc::new(MemoryStore::new(Snapshot::default())),
            calls: AtomicUsize::new(0),
            fail: true,
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn record(&self) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(KwSearchError::StorageUnavailable(
                "simulated outage".to_string(),
            ));
        }
        Ok(())
    }
}

impl KeywordStore for CountingStore {
    fn backend_name(&self) -> &'static str {
        "counting"
    }

    fn term_documents(&self, term: &str) -> Result<BTreeSet<DocumentId>> {
        self.record()?;
        self.inner.term_documents(term)
    }

    fn candidate_documents(&self, filter: &FilterPredicate) -> Result<BTreeSet<DocumentId>> {
        self.record()?;
        self.inner.candidate_documents(filter)
    }

    fn aggregate_and_rank(
        &self,
        candidates: &BTreeSet<DocumentId>,
        score: &ScorePredicate,
        limit: usize,
    ) -> Result<Vec<RankedRow>> {
        self.record()?;
        self.inner.aggregate_and_rank(candidates, score, limit)
    }

    fn stats(&self) -> Result<IndexStats> {
        self.record()?;
        self.inner.stats()
    }
}
