//! Logging configuration using tracing
//!
//! Stdout belongs to the TUI, so logs go to a daily rolling file. The level
//! is controlled by the `SKYCAST_LOG` environment variable:
//!
//! ```bash
//! SKYCAST_LOG=debug skycast --city London
//! ```

use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::error::{Error, Result};

pub const LOG_ENV: &str = "SKYCAST_LOG";
pub const LOG_FILE: &str = "skycast.log";
const DEFAULT_FILTER: &str = "skycast=info,warn";

/// Install the global subscriber.
///
/// Keep the returned guard alive until exit; dropping it flushes the writer.
pub fn init(log_dir: Option<&Path>) -> Result<WorkerGuard> {
    let log_dir = log_dir.map_or_else(default_log_directory, Path::to_path_buf);
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_timer(fmt::time::ChronoLocal::new(
                    "%Y-%m-%d %H:%M:%S%.3f".to_string(),
                )),
        )
        .try_init()
        .map_err(|e| Error::Logging(e.to_string()))?;

    tracing::info!(log_dir = %log_dir.display(), "skycast starting");
    Ok(guard)
}

/// `<data-local-dir>/skycast/logs`, or `./skycast/logs` when there is none.
pub fn default_log_directory() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("skycast")
        .join("logs")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directory_layout() {
        let dir = default_log_directory();
        assert!(dir.ends_with("skycast/logs"));
    }
}
