//! File-backed `tracing` setup.
//!
//! A full-screen TUI owns stdout and stderr, so diagnostics go to a log file
//! instead. The filter is read from `RUST_LOG` and defaults to `info`.

use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Errors raised while installing the log subscriber.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    /// The log file could not be opened.
    #[error("failed to open log file: {0}")]
    Open(#[from] std::io::Error),
    /// A global subscriber is already installed.
    #[error("a tracing subscriber is already installed")]
    AlreadyInstalled,
}

/// Open `path` in append mode, creating it if needed.
pub fn log_to_file(path: impl AsRef<Path>) -> Result<std::fs::File, std::io::Error> {
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
}

/// Install a global `tracing` subscriber that writes to `path`.
pub fn init_file_logging(path: impl AsRef<Path>) -> Result<(), LoggingError> {
    let file = log_to_file(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|_| LoggingError::AlreadyInstalled)
}
