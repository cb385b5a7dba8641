//! kwsearch - keyword search over a pagerank-weighted index
//!
//! Answers free-text queries against an index produced by an external
//! crawling pipeline. A query is split into terms, only documents
//! containing every term are kept, and those are ranked by the mean
//! pagerank of their matching keyword associations.
//!
//! # Architecture
//!
//! - **core**: Domain logic (protocol-agnostic)
//!   - config, error, types, xdg
//!   - storage (SQLite and in-memory keyword stores)
//!   - search (tokenizer, query builder, retriever, formatter)
//!   - services (unified service container)
//!
//! - **http**: REST and HTML adapter (depends on core)
//!   - handlers, middleware, router
//!
//! - **cli**: Command-line adapter (depends on core)
//!   - commands, output

// Core domain logic (protocol-agnostic)
pub mod core;

// HTTP adapter
pub mod http;

// Command-line adapter
pub mod cli;

// Re-export commonly used types for convenience
pub use core::config::Config;
pub use core::error::{KwSearchError, Result};
pub use core::services::Services;
pub use core::storage::{KeywordStore, MemoryStore, Snapshot, SqliteStore};
pub use core::types::*;
