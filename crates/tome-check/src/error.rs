//! Checker errors.

use std::path::PathBuf;

/// Error that stops a check from running at all.
///
/// Problems found in the course are [`Violation`](crate::Violation)s, not
/// errors.
#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    /// Reading a file failed.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        /// File being read.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },
    /// Walking the source directory failed.
    #[error("Directory walk error: {0}")]
    Walk(#[from] ignore::Error),
}

impl CheckError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
