//! XDG Base Directory Support
//!
//! Resolves where kwsearch looks for its config file and keeps its
//! default SQLite database.

use std::env;
use std::fs;
use std::path::PathBuf;

const APP_DIR: &str = "kwsearch";

/// XDG directory structure for kwsearch
#[derive(Debug, Clone)]
pub struct XdgDirs {
    pub config_dir: PathBuf,
    pub data_dir: PathBuf,
}

impl XdgDirs {
    /// Create new XDG directory structure
    ///
    /// Priority order (highest to lowest):
    /// 1. Explicit KWSEARCH_* env vars
    /// 2. XDG_* environment variables
    /// 3. XDG defaults (~/.config, ~/.local/share)
    pub fn new() -> Self {
        Self {
            config_dir: resolve_dir("KWSEARCH_CONFIG_DIR", "XDG_CONFIG_HOME", &[".config"]),
            data_dir: resolve_dir(
                "KWSEARCH_DATA_DIR",
                "XDG_DATA_HOME",
                &[".local", "share"],
            ),
        }
    }

    /// Get config file path
    pub fn config_file(&self) -> PathBuf {
        if let Ok(file) = env::var("KWSEARCH_CONFIG_FILE") {
            return PathBuf::from(file);
        }

        self.config_dir.join("config.toml")
    }

    /// Default location of the SQLite keyword index
    pub fn database_file(&self) -> PathBuf {
        self.data_dir.join("kwsearch.db")
    }

    /// Create config and data directories if they don't exist
    pub fn ensure_dirs_exist(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.config_dir)?;
        fs::create_dir_all(&self.data_dir)?;
        Ok(())
    }

    /// Log the resolved XDG paths
    pub fn log_paths(&self) {
        tracing::info!("XDG directories resolved:");
        tracing::info!("  Config: {:?}", self.config_dir);
        tracing::info!("  Data: {:?}", self.data_dir);
        tracing::info!("  Config file: {:?}", self.config_file());
        tracing::info!("  Database: {:?}", self.database_file());
    }
}

impl Default for XdgDirs {
    fn default() -> Self {
        Self::new()
    }
}

fn resolve_dir(app_var: &str, xdg_var: &str, home_default: &[&str]) -> PathBuf {
    if let Ok(dir) = env::var(app_var) {
        return PathBuf::from(dir);
    }

    if let Ok(xdg) = env::var(xdg_var) {
        return PathBuf::from(xdg).join(APP_DIR);
    }

    let mut dir = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    for part in home_default {
        dir.push(part);
    }
    dir.join(APP_DIR)
}
