//! Tracing subscriber setup.
//!
//! The interactive view owns the terminal, so it logs to a daily rolling file
//! under `$STUDYHUB_HOME/logs`. One-shot commands log to stderr.
//!
//! The filter comes from `STUDYHUB_LOG` (same syntax as `RUST_LOG`).

use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directive.
pub const LOG_ENV: &str = "STUDYHUB_LOG";

/// Where log lines go.
#[derive(Debug, Clone, Copy)]
pub enum LogTarget<'a> {
    /// Daily rolling file in the given directory.
    File(&'a Path),
    Stderr,
}

/// Keeps the non-blocking writer alive; drop it on exit to flush.
pub struct LogGuard {
    _guard: Option<WorkerGuard>,
}

/// Installs the global subscriber.
///
/// `default_directive` applies when `STUDYHUB_LOG` is unset or invalid.
/// Calling this twice is harmless: the second install is ignored.
pub fn init(target: LogTarget<'_>, default_directive: &str) -> Result<LogGuard> {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(default_directive))
        .context("Failed to build log filter")?;

    match target {
        LogTarget::File(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
            let appender = tracing_appender::rolling::daily(dir, "studyhub.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .try_init();
            Ok(LogGuard {
                _guard: Some(guard),
            })
        }
        LogTarget::Stderr => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .try_init();
            Ok(LogGuard { _guard: None })
        }
    }
}
