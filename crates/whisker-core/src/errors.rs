//! Error types for whisker-core.

use std::path::PathBuf;

use thiserror::Error;

/// Domain-specific errors for Whisker operations.
#[derive(Error, Debug)]
pub enum WhiskerError {
    /// Global configuration file is invalid.
    #[error("Global config invalid: {0}")]
    InvalidGlobalConfig(String),

    /// A configuration value is invalid.
    #[error("Invalid configuration: {message}. {hint}")]
    InvalidConfiguration {
        /// Description of the invalid configuration.
        message: String,
        /// Actionable hint on how to fix it.
        hint: String,
    },

    /// Invalid argument provided to a command.
    #[error("{0}")]
    InvalidArgument(String),

    // =========================================================================
    // Index Errors
    // =========================================================================
    /// Fact index I/O error.
    #[error("Fact index I/O error at `{path}`: {message}")]
    IndexIo {
        /// Path to the index file or directory.
        path: PathBuf,
        /// Description of the I/O error.
        message: String,
    },

    /// Fact index parse error.
    #[error("Fact index parse error at `{path}`: {message}")]
    IndexParse {
        /// Path to the index file.
        path: PathBuf,
        /// Description of the parse error.
        message: String,
    },

    /// Fact index directory does not exist.
    #[error("Fact index not found at `{0}`")]
    IndexNotFound(PathBuf),

    /// Index backend is unknown or failed internally.
    #[error("Index backend `{backend}` is unavailable: {reason}")]
    IndexBackendUnavailable {
        /// The requested backend.
        backend: String,
        /// Reason why the backend is unavailable.
        reason: String,
    },

    // =========================================================================
    // Generation Errors
    // =========================================================================
    /// No text generator is configured.
    #[error("Fact generation is unavailable: {reason}")]
    GeneratorUnavailable {
        /// Why no generator could be created.
        reason: String,
    },

    /// The generator was reached but failed.
    #[error("Fact generation failed with model `{model}`: {reason}")]
    GenerationFailed {
        /// The model that failed.
        model: String,
        /// Description of the failure.
        reason: String,
    },

    /// An I/O error occurred.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization/deserialization error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A wrapped generic error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
