//! Error types for whisker-db.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for whisker-db operations.
pub type DbResult<T> = Result<T, DbError>;

/// Errors that can occur in whisker-db operations.
#[derive(Debug, Error)]
pub enum DbError {
    // ========================================================================
    // Index errors
    // ========================================================================
    /// Index storage I/O error.
    #[error("Index I/O error at {path}: {message}")]
    IndexIo { path: PathBuf, message: String },

    /// Index storage parse error.
    #[error("Index parse error at {path}: {message}")]
    IndexParse { path: PathBuf, message: String },

    /// Index directory not found.
    #[error("Index not found at {path}")]
    IndexNotFound { path: PathBuf },

    /// The caller sent a query the index cannot run.
    #[error("Invalid query: {message}")]
    InvalidQuery { message: String },

    /// The requested backend is not known.
    #[error("Unknown index backend '{backend}'. Available backends: {available}")]
    UnknownBackend { backend: String, available: String },

    // ========================================================================
    // General errors
    // ========================================================================
    /// Configuration error.
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// IO error wrapper.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error wrapper.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic internal error.
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DbError {
    /// Create an index I/O error.
    pub fn index_io(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::IndexIo {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an index parse error.
    pub fn index_parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::IndexParse {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an invalid query error.
    pub fn invalid_query(message: impl Into<String>) -> Self {
        Self::InvalidQuery {
            message: message.into(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}
