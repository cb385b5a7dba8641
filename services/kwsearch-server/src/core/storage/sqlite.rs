//! SQLite-backed keyword store.
//!
//! Every query binds term text and document ids as parameters. The
//! filter chain compiles to a flat `INTERSECT` of per-term selects, and
//! id/term sets are passed to the aggregate query through `rarray()`.

use super::{KeywordStore, Snapshot};
use crate::core::config::StorageConfig;
use crate::core::error::{KwSearchError, Result};
use crate::core::search::{FilterPredicate, ScorePredicate};
use crate::core::types::{DocumentId, IndexStats, RankedRow};
use rusqlite::types::Value;
use rusqlite::vtab::array;
use rusqlite::{params, params_from_iter, Connection, ErrorCode, OpenFlags};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Duration;

const SCHEMA_SQL: &str = "
CREATE TABLE IF NOT EXISTS webpage (
    webpage_id INTEGER PRIMARY KEY,
    url        TEXT NOT NULL,
    title      TEXT NOT NULL,
    content    TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS keyword (
    keyword_id INTEGER PRIMARY KEY,
    name       TEXT NOT NULL
);
CREATE UNIQUE INDEX IF NOT EXISTS keyword_name ON keyword(name);
CREATE TABLE IF NOT EXISTS occurrence (
    webpage_id INTEGER NOT NULL REFERENCES webpage(webpage_id),
    keyword_id INTEGER NOT NULL REFERENCES keyword(keyword_id),
    counter    INTEGER NOT NULL DEFAULT 0,
    pagerank   REAL NOT NULL,
    PRIMARY KEY (webpage_id, keyword_id)
);
CREATE INDEX IF NOT EXISTS occurrence_keyword ON occurrence(keyword_id);
";

const TERM_DOCUMENTS_SQL: &str = "SELECT o.webpage_id FROM occurrence o \
     INNER JOIN keyword k ON k.keyword_id = o.keyword_id \
     WHERE k.name = ?";

const AGGREGATE_SQL: &str = "SELECT w.webpage_id, w.title, w.url, w.content, AVG(o.pagerank) AS score \
     FROM occurrence o \
     INNER JOIN webpage w ON w.webpage_id = o.webpage_id \
     INNER JOIN keyword k ON k.keyword_id = o.keyword_id \
     WHERE o.webpage_id IN (SELECT value FROM rarray(?1)) \
       AND k.name IN (SELECT value FROM rarray(?2)) \
     GROUP BY w.webpage_id \
     ORDER BY score DESC, w.webpage_id ASC \
     LIMIT ?3";

// SQLITE_MAX_COMPOUND_SELECT defaults to 500; longer chains are folded in Rust.
const MAX_COMPOUND_TERMS: usize = 400;

/// Keyword store over an SQLite database file
#[derive(Debug, Clone)]
pub struct SqliteStore {
    path: PathBuf,
    busy_timeout: Duration,
}

impl SqliteStore {
    pub fn new(path: impl Into<PathBuf>, busy_timeout: Duration) -> Self {
        Self {
            path: path.into(),
            busy_timeout,
        }
    }

    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(
            config.database_path.clone(),
            Duration::from_millis(config.busy_timeout_ms),
        )
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open a read-only connection scoped to one call
    fn connect(&self) -> Result<Connection> {
        let conn = Connection::open_with_flags(
            &self.path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|e| self.unavailable(e))?;
        conn.busy_timeout(self.busy_timeout)?;
        Ok(conn)
    }

    /// Open a writable connection, creating the file if needed
    fn connect_rw(&self) -> Result<Connection> {
        let conn = Connection::open(&self.path).map_err(|e| self.unavailable(e))?;
        conn.busy_timeout(self.busy_timeout)?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(conn)
    }

    fn unavailable(&self, err: rusqlite::Error) -> KwSearchError {
        KwSearchError::StorageUnavailable(format!(
            "Cannot open database {}: {err}",
            self.path.display()
        ))
    }

    /// Create the index tables if they don't exist
    pub fn create_schema(&self) -> Result<()> {
        let conn = self.connect_rw()?;
        conn.execute_batch(SCHEMA_SQL)?;
        Ok(())
    }

    /// Load a snapshot in a single transaction.
    ///
    /// With `replace`, existing rows are deleted first; otherwise rows
    /// are appended and any key collision aborts the whole import.
    pub fn import_snapshot(&self, snapshot: &Snapshot, replace: bool) -> Result<IndexStats> {
        snapshot.validate()?;

        let mut conn = self.connect_rw()?;
        let tx = conn.transaction()?;
        tx.execute_batch(SCHEMA_SQL)?;

        if replace {
            tx.execute_batch(
                "DELETE FROM occurrence; DELETE FROM keyword; DELETE FROM webpage;",
            )?;
        }

        {
            let mut insert = tx.prepare(
                "INSERT INTO webpage (webpage_id, url, title, content) VALUES (?1, ?2, ?3, ?4)",
            )?;
            for page in &snapshot.webpages {
                insert
                    .execute(params![page.webpage_id, page.url, page.title, page.content])
                    .map_err(import_error)?;
            }

            let mut insert =
                tx.prepare("INSERT INTO keyword (keyword_id, name) VALUES (?1, ?2)")?;
            for keyword in &snapshot.keywords {
                insert
                    .execute(params![keyword.keyword_id, keyword.name])
                    .map_err(import_error)?;
            }

            let mut insert = tx.prepare(
                "INSERT INTO occurrence (webpage_id, keyword_id, counter, pagerank) \
                 VALUES (?1, ?2, ?3, ?4)",
            )?;
            for occ in &snapshot.occurrences {
                insert
                    .execute(params![occ.webpage_id, occ.keyword_id, occ.counter, occ.pagerank])
                    .map_err(import_error)?;
            }
        }

        tx.commit()?;

        tracing::info!(
            database = %self.path.display(),
            webpages = snapshot.webpages.len(),
            keywords = snapshot.keywords.len(),
            occurrences = snapshot.occurrences.len(),
            replace,
            "Imported snapshot"
        );

        self.stats()
    }
}

fn import_error(err: rusqlite::Error) -> KwSearchError {
    if err.sqlite_error_code() == Some(ErrorCode::ConstraintViolation) {
        KwSearchError::InvalidSnapshot(format!("Import conflicts with existing rows: {err}"))
    } else {
        KwSearchError::from(err)
    }
}

fn count(conn: &Connection, table: &str) -> Result<u64> {
    let n: i64 = conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
        row.get(0)
    })?;
    Ok(n as u64)
}

impl KeywordStore for SqliteStore {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    fn term_documents(&self, term: &str) -> Result<BTreeSet<DocumentId>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare_cached(TERM_DOCUMENTS_SQL)?;
        let docs = stmt
            .query_map([term], |row| row.get::<_, DocumentId>(0))?
            .collect::<rusqlite::Result<BTreeSet<_>>>()?;
        Ok(docs)
    }

    fn candidate_documents(&self, filter: &FilterPredicate) -> Result<BTreeSet<DocumentId>> {
        let terms = filter.terms();
        if terms.len() > MAX_COMPOUND_TERMS {
            return filter.evaluate(&mut |term| self.term_documents(term));
        }

        let sql = vec![TERM_DOCUMENTS_SQL; terms.len()].join(" INTERSECT ");
        tracing::debug!(terms = terms.len(), "Resolving filter with compound select");

        let conn = self.connect()?;
        let mut stmt = conn.prepare(&sql)?;
        let docs = stmt
            .query_map(params_from_iter(terms.iter()), |row| {
                row.get::<_, DocumentId>(0)
            })?
            .collect::<rusqlite::Result<BTreeSet<_>>>()?;
        Ok(docs)
    }

    fn aggregate_and_rank(
        &self,
        candidates: &BTreeSet<DocumentId>,
        score: &ScorePredicate,
        limit: usize,
    ) -> Result<Vec<RankedRow>> {
        let ids: array::Array = Rc::new(candidates.iter().copied().map(Value::from).collect());
        let names: array::Array = Rc::new(
            score
                .terms()
                .iter()
                .cloned()
                .map(Value::from)
                .collect(),
        );

        let conn = self.connect()?;
        array::load_module(&conn)?;
        let mut stmt = conn.prepare(AGGREGATE_SQL)?;
        let rows = stmt
            .query_map(params![ids, names, limit as i64], |row| {
                Ok(RankedRow {
                    document_id: row.get(0)?,
                    title: row.get(1)?,
                    url: row.get(2)?,
                    content: row.get(3)?,
                    score: row.get(4)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    fn stats(&self) -> Result<IndexStats> {
        let conn = self.connect()?;
        Ok(IndexStats {
            keywords: count(&conn, "keyword")?,
            webpages: count(&conn, "webpage")?,
            occurrences: count(&conn, "occurrence")?,
        })
    }
}
