//! Logging initialization.
//!
//! The TUI owns stdout/stderr, so logs go to a daily-rotated file under
//! ${TECHSTORE_HOME}/logs. Filtering follows the usual `RUST_LOG` convention
//! (default `info`).

use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Initializes the global tracing subscriber with a file appender.
///
/// Returns the appender's worker guard; dropping it flushes buffered log
/// lines, so the caller must hold it for the life of the process.
pub fn init(logs_dir: &Path) -> Result<WorkerGuard> {
    std::fs::create_dir_all(logs_dir)
        .with_context(|| format!("Failed to create log directory {}", logs_dir.display()))?;

    let appender = tracing_appender::rolling::daily(logs_dir, "techstore.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();

    Ok(guard)
}
