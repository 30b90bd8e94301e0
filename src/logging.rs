//! Tracing setup for hosts embedding the refresh pipeline
//!
//! Dual output: human-readable stdout plus a plain-text log file, both
//! filtered through `RUST_LOG`. The host decides where the file lives and
//! holds the returned guard for as long as it wants logs flushed.

use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install a stdout + file subscriber for the whole process
///
/// `log_dir` is created by the appender if missing; `log_file` is the file
/// name within it. Returns the worker guard that flushes the file writer:
/// drop it when the host shuts down, not before, or buffered records are
/// lost.
///
/// Fails if a global subscriber is already installed.
pub fn init_logging(log_dir: impl AsRef<Path>, log_file: &str) -> Result<WorkerGuard> {
    let file_appender = tracing_appender::rolling::never(log_dir, log_file);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stdout)
                .with_filter(env_filter()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file_writer)
                .with_ansi(false)
                .with_filter(env_filter()),
        )
        .try_init()
        .context("failed to install global tracing subscriber")?;

    Ok(guard)
}
