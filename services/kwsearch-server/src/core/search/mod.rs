//! Keyword search pipeline.
//!
//! A query string is tokenized into terms, the terms are folded into a
//! conjunctive filter and a disjunctive score predicate, the retriever
//! resolves both against a [`KeywordStore`](crate::core::storage::KeywordStore),
//! and the ranked rows are formatted for display.

pub mod formatter;
mod query;
mod retriever;
mod service;
mod tokenizer;

pub use formatter::{escape_html, excerpt, format_hit, render_html};
pub use query::{plan_query, FilterPredicate, QueryBuilder, QueryPlan, ScorePredicate};
pub use retriever::{retrieve, Retrieval};
pub use service::SearchService;
pub use tokenizer::{is_delimiter, tokenize, DELIMITERS};
