//! Index backend factory.
//!
//! ## Available Backends
//!
//! - `tfidf` (default): TF-IDF index persisted to `items.json` and `model.bin`
//! - `memory`: the same index without persistence, for tests and demos

use std::sync::Arc;

use tracing::debug;

use super::config::{IndexConfig, DEFAULT_BACKEND, MEMORY_BACKEND};
use super::tfidf_index::TfidfIndex;
use super::traits::SimilarityBackend;
use crate::error::{DbError, DbResult};

/// Open a similarity index with the given configuration.
///
/// # Errors
///
/// Returns an error if:
/// - The configuration is invalid
/// - The backend is not supported
/// - The index directory is missing and cannot be created
pub fn open_index(config: &IndexConfig) -> DbResult<Arc<dyn SimilarityBackend>> {
    debug!(
        "Opening '{}' index at {:?}",
        config.backend, config.path
    );
    config.validate()?;

    match config.backend.as_str() {
        DEFAULT_BACKEND => Ok(Arc::new(TfidfIndex::open(config)?)),
        MEMORY_BACKEND => Ok(Arc::new(TfidfIndex::in_memory(config))),
        backend => Err(DbError::UnknownBackend {
            backend: backend.to_string(),
            available: available_backends().join(", "),
        }),
    }
}

/// Get a list of available backend names.
pub fn available_backends() -> Vec<&'static str> {
    vec![DEFAULT_BACKEND, MEMORY_BACKEND]
}

// ============================================================================
// Tests
// ============================================================================
