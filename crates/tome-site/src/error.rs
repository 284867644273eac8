//! Build errors.

use std::path::PathBuf;

use tome_config::ConfigError;

/// Error returned by the course builder.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// Configuration could not be loaded or is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Reading a lesson or writing the output failed.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        /// File being read or written.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },
    /// The TOC dump could not be serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// No manifest entry could be read.
    #[error("No lessons to build: the manifest is empty or every entry is missing")]
    EmptyCourse,
}

impl BuildError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
