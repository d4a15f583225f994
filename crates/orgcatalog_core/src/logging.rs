//! Rolling file logs for catalog processes.
//!
//! Logging is opt-in: nothing is written unless [`CatalogConfig::log_dir`]
//! is set. Catalog code logs `event=... module=... status=...` lines that
//! carry ids and counts only, never names, addresses or search patterns.
//!
//! One logger exists per process. Starting it again with the same level and
//! directory is a no-op; any other combination is refused.

use crate::config::CatalogConfig;
use flexi_logger::{
    Cleanup, Criterion, FileSpec, FlexiLoggerError, Logger, LoggerHandle, Naming, WriteMode,
};
use log::info;
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};

const LOG_FILE_BASENAME: &str = "orgcatalog";
const ROTATE_AT_BYTES: u64 = 10 * 1024 * 1024;
const KEEP_ROTATED_FILES: usize = 5;

static ACTIVE_LOGGER: OnceCell<ActiveLogger> = OnceCell::new();

struct ActiveLogger {
    level: &'static str,
    log_dir: PathBuf,
    _handle: LoggerHandle,
}

/// What [`init_logging`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoggingOutcome {
    /// No log directory configured; the logger was left untouched.
    Disabled,
    /// File logging started by this call.
    Started,
    /// An identical logger was already running.
    Reused,
}

/// Logger startup errors.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("cannot create log directory `{}`: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("logger backend failed: {0}")]
    Backend(#[from] FlexiLoggerError),
    #[error("logging already active with level `{active_level}` in `{}`", active_dir.display())]
    Conflict {
        active_level: &'static str,
        active_dir: PathBuf,
    },
}

/// Starts file logging as described by `config`.
pub fn init_logging(config: &CatalogConfig) -> Result<LoggingOutcome, LoggingError> {
    let Some(log_dir) = config.log_dir.as_deref() else {
        return Ok(LoggingOutcome::Disabled);
    };

    let mut started = false;
    let active = ACTIVE_LOGGER.get_or_try_init(|| {
        started = true;
        start_file_logger(config.log_level, log_dir)
    })?;

    if active.level != config.log_level || active.log_dir != log_dir {
        return Err(LoggingError::Conflict {
            active_level: active.level,
            active_dir: active.log_dir.clone(),
        });
    }

    Ok(if started {
        LoggingOutcome::Started
    } else {
        LoggingOutcome::Reused
    })
}

fn start_file_logger(level: &'static str, log_dir: &Path) -> Result<ActiveLogger, LoggingError> {
    std::fs::create_dir_all(log_dir).map_err(|source| LoggingError::CreateDir {
        path: log_dir.to_path_buf(),
        source,
    })?;

    let handle = Logger::try_with_str(level)?
        .log_to_file(
            FileSpec::default()
                .directory(log_dir)
                .basename(LOG_FILE_BASENAME),
        )
        .rotate(
            Criterion::Size(ROTATE_AT_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(KEEP_ROTATED_FILES),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()?;

    info!(
        "event=logging_start module=logging status=ok level={} version={}",
        level,
        env!("CARGO_PKG_VERSION")
    );

    Ok(ActiveLogger {
        level,
        log_dir: log_dir.to_path_buf(),
        _handle: handle,
    })
}
