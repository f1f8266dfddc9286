//! File logging for the terminal game.
//!
//! The TUI owns stdout and stderr, so logs only go to a file under the
//! platform data directory.

use directories::ProjectDirs;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const LOG_FILE_NAME: &str = "fencing.log";

/// Directory for log files, created if missing.
pub fn log_directory() -> io::Result<PathBuf> {
    let project_dirs = ProjectDirs::from("", "", "fencing").ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "Could not determine data directory",
        )
    })?;

    let log_dir = project_dirs.data_local_dir().join("logs");
    fs::create_dir_all(&log_dir)?;
    Ok(log_dir)
}

/// Keeps the background log writer running. Dropping it flushes any lines
/// still queued, so hold it until the game has shut down.
pub struct LogGuard {
    _worker: WorkerGuard,
}

/// Non-blocking writer appending to the log file in `dir`.
fn file_writer(dir: &Path) -> (NonBlocking, WorkerGuard) {
    tracing_appender::non_blocking(tracing_appender::rolling::never(dir, LOG_FILE_NAME))
}

/// Install the global subscriber. `RUST_LOG` overrides the INFO default.
pub fn init() -> io::Result<LogGuard> {
    let log_dir = log_directory()?;
    let (non_blocking_file, worker) = file_writer(&log_dir);

    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    tracing::info!("Log file: {}", log_dir.join(LOG_FILE_NAME).display());
    Ok(LogGuard { _worker: worker })
}
