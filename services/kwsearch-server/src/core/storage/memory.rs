//! In-memory keyword store built from a snapshot.

use super::{order_and_truncate, KeywordStore, Snapshot};
use crate::core::error::Result;
use crate::core::search::ScorePredicate;
use crate::core::types::{DocumentId, IndexStats, KeywordId, RankedRow, Webpage};
use std::collections::{BTreeSet, HashMap, HashSet};

/// Keyword index held in hash maps
///
/// Immutable after construction, so it can be shared across request
/// tasks behind an `Arc` without locking.
#[derive(Debug, Default)]
pub struct MemoryStore {
    keyword_ids: HashMap<String, KeywordId>,
    webpages: HashMap<DocumentId, Webpage>,
    /// keyword -> documents containing it
    postings: HashMap<KeywordId, BTreeSet<DocumentId>>,
    /// document -> (keyword, pagerank) associations
    associations: HashMap<DocumentId, Vec<(KeywordId, f64)>>,
    stats: IndexStats,
}

impl MemoryStore {
    /// Build the store from a validated snapshot
    pub fn new(snapshot: Snapshot) -> Self {
        let stats = snapshot.stats();

        let keyword_ids = snapshot
            .keywords
            .into_iter()
            .map(|k| (k.name, k.keyword_id))
            .collect();

        let webpages = snapshot
            .webpages
            .into_iter()
            .map(|w| (w.webpage_id, w))
            .collect();

        let mut postings: HashMap<KeywordId, BTreeSet<DocumentId>> = HashMap::new();
        let mut associations: HashMap<DocumentId, Vec<(KeywordId, f64)>> = HashMap::new();
        for occ in snapshot.occurrences {
            postings
                .entry(occ.keyword_id)
                .or_default()
                .insert(occ.webpage_id);
            associations
                .entry(occ.webpage_id)
                .or_default()
                .push((occ.keyword_id, occ.pagerank));
        }

        Self {
            keyword_ids,
            webpages,
            postings,
            associations,
            stats,
        }
    }

    /// Mean pagerank of `document`'s associations with `keywords`
    fn mean_score(&self, document: DocumentId, keywords: &HashSet<KeywordId>) -> Option<f64> {
        let (sum, count) = self
            .associations
            .get(&document)?
            .iter()
            .filter(|(keyword, _)| keywords.contains(keyword))
            .fold((0.0_f64, 0usize), |(sum, count), (_, pagerank)| {
                (sum + *pagerank, count + 1)
            });

        (count > 0).then(|| sum / count as f64)
    }
}

impl KeywordStore for MemoryStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    fn term_documents(&self, term: &str) -> Result<BTreeSet<DocumentId>> {
        Ok(self
            .keyword_ids
            .get(term)
            .and_then(|id| self.postings.get(id))
            .cloned()
            .unwrap_or_default())
    }

    fn aggregate_and_rank(
        &self,
        candidates: &BTreeSet<DocumentId>,
        score: &ScorePredicate,
        limit: usize,
    ) -> Result<Vec<RankedRow>> {
        let keywords: HashSet<KeywordId> = score
            .terms()
            .iter()
            .filter_map(|term| self.keyword_ids.get(term).copied())
            .collect();

        let mut rows: Vec<RankedRow> = candidates
            .iter()
            .filter_map(|&document| {
                let page = self.webpages.get(&document)?;
                let score = self.mean_score(document, &keywords)?;
                Some(RankedRow {
                    document_id: document,
                    title: page.title.clone(),
                    url: page.url.clone(),
                    content: page.content.clone(),
                    score,
                })
            })
            .collect();

        order_and_truncate(&mut rows, limit);
        Ok(rows)
    }

    fn stats(&self) -> Result<IndexStats> {
        Ok(self.stats)
    }
}
