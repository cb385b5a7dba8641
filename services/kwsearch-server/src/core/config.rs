//! Configuration management for the kwsearch service.
//!
//! This module handles loading configuration from TOML files and
//! environment variables, with sensible defaults for all settings.
//! Database locations are injected here and handed to the storage
//! layer at construction time; nothing below `core::storage` reads
//! the environment.

use crate::core::error::{KwSearchError, Result};
use crate::core::xdg::XdgDirs;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Hard upper bound on returned results (top-K)
pub const MAX_RESULTS_LIMIT: usize = 100;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub limits: LimitsConfig,
}

/// Which keyword store implementation to open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// SQLite database holding the keyword/webpage/occurrence tables
    #[default]
    Sqlite,
    /// In-process index loaded from a JSON snapshot
    Memory,
}

impl std::str::FromStr for StorageBackend {
    type Err = KwSearchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "sqlite" => Ok(Self::Sqlite),
            "memory" => Ok(Self::Memory),
            other => Err(KwSearchError::ConfigError(format!(
                "Unknown storage backend '{other}' (expected 'sqlite' or 'memory')"
            ))),
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,

    /// SQLite database file
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,

    /// JSON snapshot used by the memory backend
    #[serde(default)]
    pub snapshot_path: Option<PathBuf>,

    /// How long SQLite waits on a locked database
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
}

/// Search configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    /// Maximum results per query
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    /// Excerpt length in characters
    #[serde(default = "default_excerpt_chars")]
    pub excerpt_chars: usize,

    /// Maximum query string length in characters
    #[serde(default = "default_max_query_length")]
    pub max_query_length: usize,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

/// Limits configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LimitsConfig {
    /// Timeout around the retrieval call, in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_sec: u64,
}

// Default value functions
fn default_database_path() -> PathBuf {
    PathBuf::from("./kwsearch.db")
}

fn default_busy_timeout_ms() -> u64 {
    5000
}

fn default_max_results() -> usize {
    MAX_RESULTS_LIMIT
}

fn default_excerpt_chars() -> usize {
    1024
}

fn default_max_query_length() -> usize {
    500
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            database_path: default_database_path(),
            snapshot_path: None,
            busy_timeout_ms: default_busy_timeout_ms(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_results: default_max_results(),
            excerpt_chars: default_excerpt_chars(),
            max_query_length: default_max_query_length(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            request_timeout_sec: default_request_timeout(),
        }
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| KwSearchError::ConfigError(format!("Failed to read config file: {e}")))?;

        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load config with priority: env vars > TOML > defaults
    pub fn load() -> Result<Self> {
        let xdg = XdgDirs::new();
        Self::load_with_xdg(&xdg)
    }

    /// Load config with explicit XDG directories
    ///
    /// Priority order:
    /// 1. KWSEARCH_CONFIG env var
    /// 2. XDG config file (~/.config/kwsearch/config.toml)
    /// 3. ./kwsearch.toml
    /// 4. Defaults
    pub fn load_with_xdg(xdg: &XdgDirs) -> Result<Self> {
        let mut config = if let Ok(config_path) = env::var("KWSEARCH_CONFIG") {
            Self::from_file(config_path)?
        } else {
            let xdg_config = xdg.config_file();
            if xdg_config.exists() {
                Self::from_file(xdg_config)?
            } else if Path::new("kwsearch.toml").exists() {
                Self::from_file("kwsearch.toml")?
            } else {
                Self::default()
            }
        };

        // Keep the database under the XDG data dir unless placed explicitly
        if env::var("KWSEARCH_DATABASE").is_err()
            && config.storage.database_path == default_database_path()
        {
            config.storage.database_path = xdg.database_file();
        }

        config.merge_env()?;
        config.validate()?;

        Ok(config)
    }

    /// Merge configuration with environment variables
    pub fn merge_env(&mut self) -> Result<()> {
        // Storage configuration
        if let Ok(backend) = env::var("KWSEARCH_BACKEND") {
            self.storage.backend = backend.parse()?;
        }
        if let Ok(path) = env::var("KWSEARCH_DATABASE") {
            self.storage.database_path = PathBuf::from(path);
        }
        if let Ok(path) = env::var("KWSEARCH_SNAPSHOT") {
            self.storage.snapshot_path = Some(PathBuf::from(path));
        }

        // Search configuration
        if let Ok(max_results) = env::var("KWSEARCH_MAX_RESULTS") {
            if let Ok(k) = max_results.parse() {
                self.search.max_results = k;
            }
        }
        if let Ok(excerpt) = env::var("KWSEARCH_EXCERPT_CHARS") {
            if let Ok(n) = excerpt.parse() {
                self.search.excerpt_chars = n;
            }
        }
        if let Ok(max_query_len) = env::var("KWSEARCH_MAX_QUERY_LENGTH") {
            if let Ok(len) = max_query_len.parse() {
                self.search.max_query_length = len;
            }
        }

        // Server configuration
        if let Ok(host) = env::var("KWSEARCH_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = env::var("KWSEARCH_PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }

        // Limits configuration
        if let Ok(timeout) = env::var("KWSEARCH_REQUEST_TIMEOUT_SEC") {
            if let Ok(t) = timeout.parse() {
                self.limits.request_timeout_sec = t;
            }
        }

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.storage.backend == StorageBackend::Memory && self.storage.snapshot_path.is_none() {
            return Err(KwSearchError::ConfigError(
                "Memory backend requires storage.snapshot_path".to_string(),
            ));
        }

        if self.search.max_results == 0 {
            return Err(KwSearchError::ConfigError(
                "Max results must be non-zero".to_string(),
            ));
        }

        if self.search.max_results > MAX_RESULTS_LIMIT {
            return Err(KwSearchError::ConfigError(format!(
                "Max results cannot exceed {MAX_RESULTS_LIMIT}"
            )));
        }

        if self.search.excerpt_chars == 0 {
            return Err(KwSearchError::ConfigError(
                "Excerpt length must be non-zero".to_string(),
            ));
        }

        if self.search.max_query_length == 0 {
            return Err(KwSearchError::ConfigError(
                "Max query length must be non-zero".to_string(),
            ));
        }

        if self.limits.request_timeout_sec == 0 {
            return Err(KwSearchError::ConfigError(
                "Request timeout must be non-zero".to_string(),
            ));
        }

        Ok(())
    }

    /// Log configuration
    pub fn log_config(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Backend: {:?}", self.storage.backend);
        match self.storage.backend {
            StorageBackend::Sqlite => {
                tracing::info!("  Database: {:?}", self.storage.database_path)
            }
            StorageBackend::Memory => {
                tracing::info!("  Snapshot: {:?}", self.storage.snapshot_path)
            }
        }
        tracing::info!("  Max results: {}", self.search.max_results);
        tracing::info!("  Excerpt length: {} chars", self.search.excerpt_chars);
        tracing::info!("  Max query length: {}", self.search.max_query_length);
        tracing::info!("  Listen: {}:{}", self.server.host, self.server.port);
        tracing::info!("  Request timeout: {}s", self.limits.request_timeout_sec);
    }
}
