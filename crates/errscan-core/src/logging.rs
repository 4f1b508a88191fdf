//! File logging for the errscan binaries.
//!
//! stdout belongs to the report, so diagnostics go to a daily rolling file under
//! `<data_local_dir>/errscan/logs/`. Filter directives come from `ERRSCAN_LOG`
//! (e.g. `ERRSCAN_LOG=errscan_core=trace`); the default is `warn`.

use std::path::{Path, PathBuf};

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::{Error, Result};

/// Environment variable holding the filter directives
pub const LOG_ENV: &str = "ERRSCAN_LOG";

/// Prefix of the daily files (`errscan.log.YYYY-MM-DD`)
pub const LOG_FILE_PREFIX: &str = "errscan.log";

const DEFAULT_FILTER: &str = "warn";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Install the global subscriber writing to the default log directory
///
/// Returns the directory in use. Every failure (unwritable directory, a
/// non-file in the way, a subscriber already set) is returned as
/// [`Error::Config`]; callers may carry on without logging.
pub fn init() -> Result<PathBuf> {
    let dir = log_directory();
    init_in(&dir)?;
    Ok(dir)
}

/// Install the global subscriber writing into `dir`
pub fn init_in(dir: &Path) -> Result<()> {
    let appender = daily_appender(dir)?;
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let layer = fmt::layer()
        .with_writer(appender)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .with_timer(fmt::time::ChronoLocal::new(TIMESTAMP_FORMAT.to_string()));

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
        .map_err(|e| Error::config(format!("tracing subscriber: {}", e)))?;

    tracing::debug!("Logging to {}", dir.display());
    Ok(())
}

/// Open the rolling appender, reporting failures instead of panicking
fn daily_appender(dir: &Path) -> Result<RollingFileAppender> {
    std::fs::create_dir_all(dir)
        .map_err(|e| Error::config(format!("log directory {}: {}", dir.display(), e)))?;

    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .build(dir)
        .map_err(|e| Error::config(format!("log file in {}: {}", dir.display(), e)))
}

/// `<data_local_dir>/errscan/logs`, or `./errscan/logs` without a data dir
pub fn log_directory() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("errscan")
        .join("logs")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_log_directory_is_namespaced() {
        assert!(log_directory().ends_with("errscan/logs"));
    }

    #[test]
    fn test_appender_creates_directory() {
        let temp = tempdir().unwrap();
        let dir = temp.path().join("nested").join("logs");

        assert!(daily_appender(&dir).is_ok());
        assert!(dir.is_dir());
    }

    #[test]
    fn test_appender_blocked_by_file_is_an_error() {
        let temp = tempdir().unwrap();
        let blocker = temp.path().join("logs");
        std::fs::write(&blocker, "not a directory").unwrap();

        let err = daily_appender(&blocker).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_appender_blocked_log_file_is_an_error() {
        let temp = tempdir().unwrap();
        let today = chrono::Utc::now().date_naive();

        // Occupy the current (and next, around midnight) file names with directories
        for day in [today, today.succ_opt().unwrap()] {
            let name = format!("{}.{}", LOG_FILE_PREFIX, day.format("%Y-%m-%d"));
            std::fs::create_dir_all(temp.path().join(name)).unwrap();
        }

        let err = daily_appender(temp.path()).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }
}
