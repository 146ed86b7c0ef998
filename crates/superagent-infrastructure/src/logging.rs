//! `tracing` subscriber setup for the `superagent` binary.

use std::path::Path;

use superagent_core::config::LoggingSettings;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::paths::SuperAgentPaths;

const LOG_FILE_PREFIX: &str = "superagent.log";

/// Installs the global subscriber.
///
/// With `settings.file` the output goes to a daily rolling file under
/// [`SuperAgentPaths::logs_dir`] so it does not interleave with the REPL;
/// otherwise to stderr. `RUST_LOG` wins over `settings.level` when set.
///
/// Keep the returned guard alive for the lifetime of the process, dropping it
/// flushes the file writer.
pub fn init_logging(settings: &LoggingSettings) -> Option<WorkerGuard> {
    let filter = build_filter(&settings.level);

    if settings.file {
        match SuperAgentPaths::logs_dir() {
            Ok(dir) => return Some(init_file_logging(&dir, filter)),
            Err(e) => eprintln!("superagent: {}; logging to stderr", e),
        }
    }

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .try_init();
    None
}

fn init_file_logging(dir: &Path, filter: EnvFilter) -> WorkerGuard {
    let file_appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_ansi(false)
                .with_writer(writer),
        )
        .try_init();
    guard
}

fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}
