use std::path::PathBuf;
use thiserror::Error;

/// Lifecycle violations on a [`Progress`](crate::Progress).
///
/// These are programmer errors. They are never returned; the offending call
/// panics with the rendered message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UsageError {
    #[error("start() called on a progress reporter that is already running")]
    AlreadyRunning,

    #[error("start() called on a progress reporter that is already done")]
    Restarted,

    #[error("{operation}() called on a progress reporter that is not running")]
    NotRunning { operation: &'static str },
}

impl UsageError {
    pub(crate) fn not_running(operation: &'static str) -> Self {
        UsageError::NotRunning { operation }
    }

    /// Aborts the calling context.
    #[track_caller]
    pub(crate) fn fatal(self) -> ! {
        panic!("{}", self)
    }
}

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid root: {0}")]
    InvalidRoot(String),

    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl ScanError {
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ScanError::Io {
            path: path.into(),
            source,
        }
    }
}
