//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::path::PathBuf;

/// Name of the SQLite file inside the cache directory.
const CACHE_DB_FILE: &str = "cache.sqlite";

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the SQLite cache file
    pub cache_dir: PathBuf,
    /// HTTP server port
    pub server_port: u16,
    /// SQLite busy timeout in seconds
    pub busy_timeout_secs: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_DIR` - Directory for the cache database (default: ./cache)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `BUSY_TIMEOUT_SECS` - SQLite busy timeout in seconds (default: 60)
    pub fn from_env() -> Self {
        Self {
            cache_dir: env::var("CACHE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("cache")),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            busy_timeout_secs: env::var("BUSY_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60),
        }
    }

    /// Full path of the SQLite cache file.
    pub fn db_path(&self) -> PathBuf {
        self.cache_dir.join(CACHE_DB_FILE)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_dir: PathBuf::from("cache"),
            server_port: 3000,
            busy_timeout_secs: 60,
        }
    }
}
