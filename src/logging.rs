use anyhow::{Context, Result};
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const LOG_FILE: &str = "lyricfetch.log";
const DEFAULT_FILTER: &str = "lyricfetch=debug,reqwest=warn";

/// Route tracing output to the log file in the data directory.
///
/// stdout carries the envelope and stderr the status line, so diagnostics
/// never go to either. Keep the returned guard alive until exit so buffered
/// lines are flushed.
pub fn init_file_logging() -> Result<WorkerGuard> {
    let log_dir = crate::paths::get_log_dir()?;
    init_file_logging_in(&log_dir)
}

pub fn init_file_logging_in(log_dir: &Path) -> Result<WorkerGuard> {
    let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_FILTER.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false),
        )
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(guard)
}
