//! Store error types.

use std::path::PathBuf;

use thiserror::Error;

/// Product database errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The database file or its directory could not be read or written.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File or directory involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The database file is not a valid catalog.
    #[error("Corrupt product database {path}: {source}")]
    Corrupt {
        /// Database file.
        path: PathBuf,
        /// Parser error.
        #[source]
        source: serde_json::Error,
    },

    /// The catalog could not be encoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StoreError {
    /// Create an I/O error for `path`.
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns a stable code for logs and CLI output.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Io { .. } => "STORE_IO",
            Self::Corrupt { .. } => "STORE_CORRUPT",
            Self::Serialization(_) => "STORE_SERIALIZATION",
        }
    }
}
