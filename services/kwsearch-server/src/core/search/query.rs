//! Query construction.
//!
//! A query is turned into two independent predicates:
//!
//! - [`FilterPredicate`]: documents that contain *every* term (AND),
//!   built as a left-to-right chain of intersections.
//! - [`ScorePredicate`]: keyword associations that match *any* term
//!   (OR), used only to decide which pagerank values feed the mean.
//!
//! Both are plain values. Storage backends either evaluate them
//! directly or compile them into parameterized SQL; term text is never
//! spliced into a query string.

use crate::core::error::Result;
use crate::core::types::DocumentId;
use std::collections::BTreeSet;

/// Conjunctive document filter.
///
/// Holds the terms in the order they were added. Evaluation narrows
/// left to right: the first term's documents, intersected with the
/// second's, and so on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterPredicate {
    terms: Vec<String>,
}

impl FilterPredicate {
    /// Filter on a single term
    pub fn term(term: impl Into<String>) -> Self {
        Self {
            terms: vec![term.into()],
        }
    }

    /// Narrow this filter by one more term
    pub fn and(mut self, term: impl Into<String>) -> Self {
        self.terms.push(term.into());
        self
    }

    /// Terms in the order they were added; never empty
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Resolve the filter to a document set.
    ///
    /// `lookup` maps a single term to the documents associated with it.
    /// Evaluation stops asking for further terms once the running
    /// intersection is empty.
    pub fn evaluate<F>(&self, lookup: &mut F) -> Result<BTreeSet<DocumentId>>
    where
        F: FnMut(&str) -> Result<BTreeSet<DocumentId>>,
    {
        let (first, rest) = match self.terms.split_first() {
            Some(split) => split,
            None => return Ok(BTreeSet::new()),
        };

        let mut accumulated = lookup(first)?;
        for term in rest {
            if accumulated.is_empty() {
                break;
            }
            let docs = lookup(term)?;
            accumulated.retain(|id| docs.contains(id));
        }
        Ok(accumulated)
    }
}

/// Disjunctive keyword match used for scoring.
///
/// Holds each distinct term once, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScorePredicate {
    terms: Vec<String>,
}

impl ScorePredicate {
    /// Widen the predicate by one more term
    pub fn or(mut self, term: impl Into<String>) -> Self {
        let term = term.into();
        if !self.matches(&term) {
            self.terms.push(term);
        }
        self
    }

    /// Whether a keyword name satisfies the predicate
    pub fn matches(&self, keyword: &str) -> bool {
        self.terms.iter().any(|t| t == keyword)
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// Final pair of predicates handed to the retriever
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryPlan {
    pub filter: FilterPredicate,
    pub score: ScorePredicate,
}

/// Incrementally folds terms into a [`QueryPlan`].
///
/// ```
/// use kwsearch::core::search::QueryBuilder;
///
/// let mut builder = QueryBuilder::new();
/// builder.push_term("cat");
/// builder.push_term("dog");
/// let plan = builder.finish().unwrap();
///
/// assert_eq!(plan.filter.terms(), ["cat", "dog"]);
/// assert_eq!(plan.score.terms(), ["cat", "dog"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    filter: Option<FilterPredicate>,
    score: ScorePredicate,
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one term to both accumulators.
    ///
    /// A repeated term changes neither predicate.
    pub fn push_term(&mut self, term: &str) {
        if self.score.matches(term) {
            return;
        }

        self.filter = Some(match self.filter.take() {
            None => FilterPredicate::term(term),
            Some(filter) => filter.and(term),
        });
        self.score = std::mem::take(&mut self.score).or(term);
    }

    /// Current filter, if any term has been pushed
    pub fn filter(&self) -> Option<&FilterPredicate> {
        self.filter.as_ref()
    }

    /// Current score predicate
    pub fn score(&self) -> &ScorePredicate {
        &self.score
    }

    /// Finish building; `None` means the query had no terms
    pub fn finish(self) -> Option<QueryPlan> {
        let filter = self.filter?;
        Some(QueryPlan {
            filter,
            score: self.score,
        })
    }
}

/// Build a plan from a term sequence; `None` for an empty sequence
pub fn plan_query<S: AsRef<str>>(terms: &[S]) -> Option<QueryPlan> {
    let mut builder = QueryBuilder::new();
    for term in terms {
        builder.push_term(term.as_ref());
    }
    builder.finish()
}
