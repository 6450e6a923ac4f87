//! Tracing setup
//!
//! The interactive browser owns the terminal, so it logs to a daily rolling
//! file. One-shot commands log to stderr. Verbosity comes from
//! `DROPSEARCH_LOG` using `EnvFilter` syntax.

use std::io;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Environment variable holding the filter directives
pub const LOG_ENV: &str = "DROPSEARCH_LOG";

/// Filter used when `DROPSEARCH_LOG` is unset or invalid
pub const DEFAULT_FILTER: &str = "warn,dropsearch=info";

/// Where log lines go
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    /// Daily rolling files in this directory
    File(PathBuf),
    Stderr,
}

impl LogTarget {
    /// `<data_local_dir>/dropsearch/logs`, falling back to stderr when the
    /// platform has no data directory
    #[must_use]
    pub fn default_file() -> Self {
        dirs::data_local_dir().map_or(Self::Stderr, |dir| {
            Self::File(dir.join("dropsearch").join("logs"))
        })
    }
}

fn filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

fn file_writer(
    dir: &Path,
) -> io::Result<(tracing_appender::non_blocking::NonBlocking, WorkerGuard)> {
    std::fs::create_dir_all(dir)?;
    Ok(tracing_appender::non_blocking(
        tracing_appender::rolling::daily(dir, "dropsearch.log"),
    ))
}

/// Install the global subscriber
///
/// The returned guard flushes buffered file output on drop and must be held
/// until the program exits. A subscriber that is already installed is left
/// in place.
///
/// # Errors
///
/// Returns an error if the log directory cannot be created.
pub fn init(target: &LogTarget) -> io::Result<Option<WorkerGuard>> {
    let (file_layer, guard) = match target {
        LogTarget::File(dir) => {
            let (writer, guard) = file_writer(dir)?;
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true);
            (Some(layer), Some(guard))
        }
        LogTarget::Stderr => (None, None),
    };

    let stderr_layer = matches!(target, LogTarget::Stderr).then(|| {
        fmt::layer()
            .with_writer(io::stderr)
            .with_target(false)
    });

    let installed = tracing_subscriber::registry()
        .with(filter())
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .is_ok();

    if installed {
        if let LogTarget::File(dir) = target {
            tracing::debug!(dir = %dir.display(), "file logging initialized");
        }
    }

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_parses() {
        assert!(EnvFilter::try_new(DEFAULT_FILTER).is_ok());
    }

    #[test]
    fn test_file_target_creates_directory() {
        let temp = tempfile::tempdir().unwrap();
        let dir = temp.path().join("nested").join("logs");

        let guard = init(&LogTarget::File(dir.clone())).unwrap();

        assert!(dir.is_dir());
        assert!(guard.is_some());
    }

    #[test]
    fn test_stderr_target_has_no_guard() {
        assert!(init(&LogTarget::Stderr).unwrap().is_none());
    }
}
