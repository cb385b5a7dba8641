//! Ranking retrieval over a keyword store.

use super::query::QueryPlan;
use crate::core::error::Result;
use crate::core::storage::{order_and_truncate, KeywordStore};
use crate::core::types::RankedRow;

/// What the store produced for one plan
#[derive(Debug, Clone, PartialEq)]
pub enum Retrieval {
    /// The filter matched no document; nothing was aggregated
    NoMatch,

    /// Ranked rows, best first, at most `limit` of them
    Ranked(Vec<RankedRow>),
}

/// Run `plan` against `store` and return at most `limit` ranked rows.
///
/// Candidate documents come from the filter predicate alone. Only
/// candidates are aggregated, and only their associations matching the
/// score predicate contribute to the mean.
pub fn retrieve(store: &dyn KeywordStore, plan: &QueryPlan, limit: usize) -> Result<Retrieval> {
    let candidates = store.candidate_documents(&plan.filter)?;
    tracing::debug!(
        backend = store.backend_name(),
        terms = plan.filter.terms().len(),
        candidates = candidates.len(),
        "Resolved filter predicate"
    );

    if candidates.is_empty() {
        return Ok(Retrieval::NoMatch);
    }

    let mut rows = store.aggregate_and_rank(&candidates, &plan.score, limit)?;
    order_and_truncate(&mut rows, limit);
    Ok(Retrieval::Ranked(rows))
}
