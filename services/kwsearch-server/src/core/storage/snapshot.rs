//! JSON snapshot of a keyword index.
//!
//! A snapshot is the interchange format between the external indexing
//! pipeline and kwsearch: the memory backend serves it directly and
//! `SqliteStore::import_snapshot` loads it into a database.

use crate::core::error::{KwSearchError, Result};
use crate::core::types::{IndexStats, Keyword, Occurrence, Webpage};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Complete contents of the three index tables
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub keywords: Vec<Keyword>,
    #[serde(default)]
    pub webpages: Vec<Webpage>,
    #[serde(default)]
    pub occurrences: Vec<Occurrence>,
}

impl Snapshot {
    /// Read and validate a snapshot file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            KwSearchError::InvalidSnapshot(format!("Failed to read {}: {e}", path.display()))
        })?;
        Self::from_json(&contents)
    }

    /// Parse and validate a snapshot from JSON text
    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: Snapshot = serde_json::from_str(json)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Check the referential invariants of the index
    pub fn validate(&self) -> Result<()> {
        let mut keyword_ids = HashSet::new();
        let mut names = HashSet::new();
        for keyword in &self.keywords {
            if !keyword_ids.insert(keyword.keyword_id) {
                return Err(KwSearchError::InvalidSnapshot(format!(
                    "Duplicate keyword_id {}",
                    keyword.keyword_id
                )));
            }
            if !names.insert(keyword.name.as_str()) {
                return Err(KwSearchError::InvalidSnapshot(format!(
                    "Duplicate keyword name '{}'",
                    keyword.name
                )));
            }
        }

        let mut webpage_ids = HashSet::new();
        for webpage in &self.webpages {
            if !webpage_ids.insert(webpage.webpage_id) {
                return Err(KwSearchError::InvalidSnapshot(format!(
                    "Duplicate webpage_id {}",
                    webpage.webpage_id
                )));
            }
        }

        let mut pairs = HashSet::new();
        for occ in &self.occurrences {
            if !webpage_ids.contains(&occ.webpage_id) {
                return Err(KwSearchError::InvalidSnapshot(format!(
                    "Occurrence references unknown webpage_id {}",
                    occ.webpage_id
                )));
            }
            if !keyword_ids.contains(&occ.keyword_id) {
                return Err(KwSearchError::InvalidSnapshot(format!(
                    "Occurrence references unknown keyword_id {}",
                    occ.keyword_id
                )));
            }
            if !occ.pagerank.is_finite() || occ.pagerank < 0.0 {
                return Err(KwSearchError::InvalidSnapshot(format!(
                    "Occurrence ({}, {}) has invalid pagerank {}",
                    occ.webpage_id, occ.keyword_id, occ.pagerank
                )));
            }
            if !pairs.insert((occ.webpage_id, occ.keyword_id)) {
                return Err(KwSearchError::InvalidSnapshot(format!(
                    "Duplicate occurrence ({}, {})",
                    occ.webpage_id, occ.keyword_id
                )));
            }
        }

        Ok(())
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            keywords: self.keywords.len() as u64,
            webpages: self.webpages.len() as u64,
            occurrences: self.occurrences.len() as u64,
        }
    }
}
