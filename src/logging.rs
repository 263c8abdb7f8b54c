//! File logging. Logs never go to stdout since ratatui owns the terminal.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};

#[derive(Debug, Error)]
pub enum LogError {
    #[error("log path {0} has no file name")]
    NoFileName(PathBuf),

    #[error("cannot open log file {path}: {source}")]
    Open { path: PathBuf, source: InitError },
}

/// Opens `log_path` for appending, creating its directory if needed.
pub fn file_appender(log_path: &Path) -> Result<RollingFileAppender, LogError> {
    let file_name = log_path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| LogError::NoFileName(log_path.to_path_buf()))?;
    let log_dir = match log_path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name)
        .build(log_dir)
        .map_err(|source| LogError::Open {
            path: log_path.to_path_buf(),
            source,
        })
}

/// Installs the global subscriber. Hold the guard until shutdown so
/// buffered entries are flushed.
pub fn init(level: &str, log_path: &Path) -> Result<WorkerGuard, LogError> {
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender(log_path)?);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(env_filter)
        .with_ansi(false)
        .init();

    Ok(guard)
}
