//! Logging setup.

use std::io;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const DEFAULT_LOG_FILE: &str = "metrics-dash.log";

/// Where log output goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stdout,
    File(PathBuf),
    Discard,
}

impl LogTarget {
    /// Pick a target. A terminal dashboard owns stdout, so without a file its
    /// logs are discarded.
    pub fn resolve(file: Option<&Path>, owns_terminal: bool) -> Self {
        match file {
            Some(path) => LogTarget::File(path.to_path_buf()),
            None if owns_terminal => LogTarget::Discard,
            None => LogTarget::Stdout,
        }
    }
}

/// Setup logging with the given level.
///
/// The returned guard flushes buffered output on drop and must be held for
/// the life of the program. Fails only when the log file cannot be opened.
pub fn setup_logging(
    level: &str,
    json: bool,
    target: LogTarget,
) -> Result<WorkerGuard, InitError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let ansi = target == LogTarget::Stdout;

    let (writer, guard) = match target {
        LogTarget::Stdout => tracing_appender::non_blocking(io::stdout()),
        LogTarget::File(path) => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string());
            let appender = RollingFileAppender::builder()
                .rotation(Rotation::NEVER)
                .filename_prefix(name)
                .build(dir)?;
            tracing_appender::non_blocking(appender)
        }
        LogTarget::Discard => tracing_appender::non_blocking(io::sink()),
    };

    // A second initialisation (tests, repeated setup) keeps the first subscriber.
    let _ = if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(writer))
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().pretty().with_ansi(ansi).with_writer(writer))
            .try_init()
    };

    Ok(guard)
}
