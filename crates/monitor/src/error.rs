//! Monitor error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while sampling or writing metrics.
#[derive(Debug, Error)]
pub enum MonitorError {
    /// A source or destination file could not be read or written.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A kernel interface file had unexpected contents.
    #[error("unexpected contents in {}: {reason}", path.display())]
    Parse { path: PathBuf, reason: String },

    /// The snapshot could not be serialized.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl MonitorError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| MonitorError::Io { path, source }
    }

    pub(crate) fn parse(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        MonitorError::Parse {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for monitor operations.
pub type Result<T> = std::result::Result<T, MonitorError>;
