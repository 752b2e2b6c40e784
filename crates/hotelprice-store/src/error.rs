//! Error types for hotelprice-store.

use std::path::PathBuf;

/// Result type for hotelprice-store operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in hotelprice-store.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Database error from SQLite.
    #[error(transparent)]
    Database(#[from] rusqlite::Error),

    /// The store file does not exist.
    #[error("Database file not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// Failed to create database directory.
    #[error("Failed to create database directory {}", path.display())]
    CreateDirectory {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Table name that cannot be used as an identifier.
    #[error("Invalid table name: {0:?}")]
    InvalidTableName(String),

    /// IO error.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether this error means the store file is missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }
}
