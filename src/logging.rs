//! `tracing` subscriber setup.
//!
//! Verbosity follows `RUST_LOG` (default `warn`). The TUI owns the terminal,
//! so it logs to a file instead of stderr.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::AppError;

const DEFAULT_FILTER: &str = "warn";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Log to stderr.
pub fn init_stderr() {
    // A second init (e.g. from tests) is harmless.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .try_init();
}

/// Append logs to `path`.
pub fn init_file(path: &Path) -> Result<(), AppError> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open log file '{}': {e}", path.display())))?;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
    Ok(())
}
