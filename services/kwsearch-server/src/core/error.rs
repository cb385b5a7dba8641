//! Error types and error handling for the kwsearch service.
//!
//! Only genuine failures live here. An empty query or a query that
//! matches nothing is a normal search outcome (see
//! [`SearchOutcome`](crate::core::types::SearchOutcome)), not an error.
//! Protocol-specific handling (HTTP status codes) is done in the
//! adapter modules.

use thiserror::Error;

/// Result type alias for kwsearch operations
pub type Result<T> = std::result::Result<T, KwSearchError>;

/// Main error type for the kwsearch service
#[derive(Error, Debug)]
pub enum KwSearchError {
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),
}

impl From<rusqlite::Error> for KwSearchError {
    fn from(err: rusqlite::Error) -> Self {
        KwSearchError::StorageUnavailable(err.to_string())
    }
}

impl KwSearchError {
    /// Get user-friendly error message
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Check if the storage layer could not serve the request
    pub fn is_unavailable(&self) -> bool {
        matches!(self, KwSearchError::StorageUnavailable(_))
    }

    /// Check if this is a bad request error (invalid input)
    pub fn is_bad_request(&self) -> bool {
        matches!(
            self,
            KwSearchError::InvalidQuery(_)
                | KwSearchError::InvalidSnapshot(_)
                | KwSearchError::ConfigError(_)
        )
    }
}
