//! Catalog configuration passed explicitly to the persistence bootstrap.
//!
//! # Responsibility
//! - Describe where the catalog database lives and how logging is set up.
//! - Load those values from the process environment (and `.env`) on request.
//!
//! # Invariants
//! - No global settings object: callers build a `CatalogConfig` and hand it
//!   to [`crate::db::open_configured`].
//! - A missing database path means an in-memory database.

use std::env;
use std::path::PathBuf;

/// Environment key for the SQLite database file path.
pub const ENV_DB_PATH: &str = "ORGCATALOG_DB_PATH";
/// Environment key for the log level (`trace|debug|info|warn|error`).
pub const ENV_LOG_LEVEL: &str = "ORGCATALOG_LOG_LEVEL";
/// Environment key for the absolute log directory.
pub const ENV_LOG_DIR: &str = "ORGCATALOG_LOG_DIR";

/// Log level used when none is configured: `debug` in debug builds,
/// `info` in release builds.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

/// Maps a level name (any case, `warning` accepted) to its canonical form.
fn parse_log_level(level: &str) -> Option<&'static str> {
    match level.to_ascii_lowercase().as_str() {
        "trace" => Some("trace"),
        "debug" => Some("debug"),
        "info" => Some("info"),
        "warn" | "warning" => Some("warn"),
        "error" => Some("error"),
        _ => None,
    }
}

/// Storage target for the catalog database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseLocation {
    /// SQLite database file on disk.
    File(PathBuf),
    /// Private in-memory database, dropped with the connection.
    Memory,
}

/// Explicit configuration for one catalog process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    pub database: DatabaseLocation,
    /// Canonical level name, see [`default_log_level`].
    pub log_level: &'static str,
    /// File logging is enabled only when a directory is configured.
    pub log_dir: Option<PathBuf>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            database: DatabaseLocation::Memory,
            log_level: default_log_level(),
            log_dir: None,
        }
    }
}

impl CatalogConfig {
    /// Config for a database file with default logging.
    pub fn with_database_file(path: impl Into<PathBuf>) -> Self {
        Self {
            database: DatabaseLocation::File(path.into()),
            ..Self::default()
        }
    }

    /// Loads configuration from environment variables.
    ///
    /// A `.env` file in the working directory is read first when present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup.
    ///
    /// Blank values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let database = match read(ENV_DB_PATH) {
            Some(path) => DatabaseLocation::File(PathBuf::from(path)),
            None => DatabaseLocation::Memory,
        };

        let log_level = match read(ENV_LOG_LEVEL) {
            Some(level) => {
                parse_log_level(&level).ok_or_else(|| ConfigError::InvalidValue {
                    key: ENV_LOG_LEVEL,
                    message: format!("expected trace|debug|info|warn|error, got `{level}`"),
                })?
            }
            None => default_log_level(),
        };

        let log_dir = match read(ENV_LOG_DIR) {
            Some(dir) => {
                let path = PathBuf::from(&dir);
                if !path.is_absolute() {
                    return Err(ConfigError::InvalidValue {
                        key: ENV_LOG_DIR,
                        message: format!("log_dir must be an absolute path, got `{dir}`"),
                    });
                }
                Some(path)
            }
            None => None,
        };

        Ok(Self {
            database,
            log_level,
            log_dir,
        })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: &'static str, message: String },
}
