//! Error types for markerkit-core

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type alias for markerkit-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in markerkit-core
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// No directory from the start path up to the filesystem root (or the
    /// configured ceiling) contains one of the project markers.
    #[error(
        "Could not detect the project root from {start} (looked for {}). \
         Run from inside the repository, or make sure README.md exists at its root.",
        .markers.join(", ")
    )]
    ProjectRootNotFound {
        /// Resolved directory the search started from
        start: PathBuf,
        /// Markers that were looked for
        markers: Vec<String>,
    },

    /// I/O error tied to a specific path
    #[error("I/O error at {path}: {source}")]
    IoPath {
        /// Path being accessed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// I/O error without path context
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// What configuration is problematic
        message: String,
    },
}

impl Error {
    /// Creates a configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }

    /// Wraps an I/O error together with the path it happened on.
    pub fn io_with_path(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        Error::IoPath {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Returns `true` for [`Error::ProjectRootNotFound`].
    pub fn is_root_not_found(&self) -> bool {
        matches!(self, Error::ProjectRootNotFound { .. })
    }
}
