//! Unified service container for kwsearch
//!
//! Provides shared access to all core services.

use crate::core::config::Config;
use crate::core::error::Result;
use crate::core::search::SearchService;
use crate::core::storage::{open_store, KeywordStore};
use std::sync::Arc;
use std::time::Duration;

/// Unified services container
///
/// The HTTP server and the CLI both go through this struct.
#[derive(Clone)]
pub struct Services {
    /// Keyword index backend
    pub store: Arc<dyn KeywordStore>,

    /// Search pipeline over `store`
    pub search: Arc<SearchService>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl Services {
    /// Create services from configuration
    pub fn new(config: Config) -> Result<Self> {
        let store = open_store(&config.storage)?;
        Ok(Self::with_store(config, store))
    }

    /// Create services around an already opened store
    pub fn with_store(config: Config, store: Arc<dyn KeywordStore>) -> Self {
        let search = Arc::new(SearchService::new(
            Arc::clone(&store),
            &config.search,
            Duration::from_secs(config.limits.request_timeout_sec),
        ));

        Self {
            store,
            search,
            config: Arc::new(config),
        }
    }
}
