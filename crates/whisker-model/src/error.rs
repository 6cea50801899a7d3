//! Error types for whisker-model.
//!
//! Errors state what went wrong and, where it helps, how to fix it.

use thiserror::Error;

/// Result type alias for whisker-model operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors that can occur in whisker-model operations.
#[derive(Debug, Error)]
pub enum ModelError {
    // ========================================================================
    // Configuration errors
    // ========================================================================
    /// The API key environment variable is unset or empty.
    #[error("API key not found in ${env}.\n\nExport your key, e.g. `export {env}=sk-...`, or set generation.apiKeyEnv in ~/.whisker/config.yaml.")]
    MissingApiKey { env: String },

    /// Generation configuration invalid.
    #[error("Invalid generation configuration: {message}")]
    InvalidConfig { message: String },

    /// Provider not available.
    #[error("Provider '{provider}' not available: {reason}")]
    ProviderNotAvailable { provider: String, reason: String },

    // ========================================================================
    // Request errors
    // ========================================================================
    /// The request could not be sent or the response could not be read.
    #[error("Request to '{model}' failed: {message}")]
    Request { model: String, message: String },

    /// The API answered with a non-success status.
    #[error("API error {status} from '{model}': {message}")]
    Api {
        model: String,
        status: u16,
        message: String,
    },

    /// The API answered without any text.
    #[error("Model '{model}' returned no text")]
    EmptyResponse { model: String },

    // ========================================================================
    // Serialization errors
    // ========================================================================
    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
