//! Logging Infrastructure
//!
//! Structured logging via `tracing-subscriber`. `RUST_LOG` wins over the
//! configured level; with a log directory, output goes to a daily-rolling file.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "ledger_server=info,tower_http=info";

fn env_filter(log_level: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| match log_level {
        Some(level) => EnvFilter::new(format!("ledger_server={level},tower_http={level}")),
        None => EnvFilter::new(DEFAULT_FILTER),
    })
}

/// Initialize the logger (stdout)
pub fn init_logger() {
    let _ = init_logger_with_file(None, None);
}

/// Initialize the logger with optional file output
///
/// The returned guard must be held for the process lifetime when logging to a file.
pub fn init_logger_with_file(log_level: Option<&str>, log_dir: Option<&str>) -> Option<WorkerGuard> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(log_level))
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    if let Some(dir) = log_dir {
        let log_path = Path::new(dir);
        if log_path.exists() {
            let file_appender = tracing_appender::rolling::daily(log_path, "ledger-server");
            let (writer, guard) = tracing_appender::non_blocking(file_appender);
            let _ = builder.with_ansi(false).with_writer(writer).try_init();
            return Some(guard);
        }
        eprintln!("LOG_DIR {dir} does not exist, logging to stdout");
    }

    let _ = builder.try_init();
    None
}
