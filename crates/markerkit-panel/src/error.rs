//! Error types for markerkit-panel

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type alias for markerkit-panel operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building feature tables.
///
/// Symbol mapping itself never fails: unmatched symbols are left out of the
/// result instead.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// CSV parsing error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// I/O error tied to a specific path
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path being read
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// A required column is absent from the table header
    #[error("Column '{column}' not found")]
    MissingColumn {
        /// Requested column name
        column: String,
    },

    /// The symbol column is not aligned with the row index
    #[error("Symbol column has {symbols} entries but the index has {rows} rows")]
    LengthMismatch {
        /// Number of row identifiers
        rows: usize,
        /// Number of symbol entries
        symbols: usize,
    },

    /// Row identifiers must be unique
    #[error("Duplicate row identifier '{id}'")]
    DuplicateRowId {
        /// The repeated identifier
        id: String,
    },
}

impl Error {
    /// Wraps an I/O error together with the path it happened on.
    pub fn io_with_path(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        Error::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Creates a missing-column error.
    pub fn missing_column<S: Into<String>>(column: S) -> Self {
        Error::MissingColumn {
            column: column.into(),
        }
    }
}
