//! Index configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{DbError, DbResult};
use crate::tfidf::{VectorizerConfig, DEFAULT_MIN_SIMILARITY};

// ============================================================================
// Constants
// ============================================================================

/// Default backend name.
pub const DEFAULT_BACKEND: &str = "tfidf";

/// In-memory backend name.
pub const MEMORY_BACKEND: &str = "memory";

/// Filename for the item collection.
pub const ITEMS_FILENAME: &str = "items.json";

/// Filename for the fitted model and document vectors.
pub const MODEL_FILENAME: &str = "model.bin";

// ============================================================================
// IndexConfig
// ============================================================================

/// Configuration for creating or opening a similarity index.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexConfig {
    /// Directory holding the persisted artifacts.
    pub path: PathBuf,

    /// Backend to use ("tfidf" or "memory").
    #[serde(default = "default_backend")]
    pub backend: String,

    /// Vectorizer settings.
    #[serde(default)]
    pub vectorizer: VectorizerConfig,

    /// Minimum cosine similarity for search results.
    #[serde(default = "default_min_similarity")]
    pub min_similarity: f32,

    /// Whether to create the directory if it doesn't exist.
    #[serde(default = "default_create_if_missing")]
    pub create_if_missing: bool,
}

fn default_backend() -> String {
    DEFAULT_BACKEND.to_string()
}

fn default_min_similarity() -> f32 {
    DEFAULT_MIN_SIMILARITY
}

fn default_create_if_missing() -> bool {
    true
}

impl IndexConfig {
    /// Create a new config for the default backend.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            backend: default_backend(),
            vectorizer: VectorizerConfig::default(),
            min_similarity: DEFAULT_MIN_SIMILARITY,
            create_if_missing: true,
        }
    }

    /// Set the backend.
    pub fn with_backend(mut self, backend: impl Into<String>) -> Self {
        self.backend = backend.into();
        self
    }

    /// Set the vectorizer settings.
    pub fn with_vectorizer(mut self, vectorizer: VectorizerConfig) -> Self {
        self.vectorizer = vectorizer;
        self
    }

    /// Set the similarity threshold.
    pub fn with_min_similarity(mut self, min_similarity: f32) -> Self {
        self.min_similarity = min_similarity;
        self
    }

    /// Set whether to create the directory if missing.
    pub fn with_create_if_missing(mut self, create: bool) -> Self {
        self.create_if_missing = create;
        self
    }

    /// Path of the item collection artifact.
    pub fn items_path(&self) -> PathBuf {
        self.path.join(ITEMS_FILENAME)
    }

    /// Path of the model artifact.
    pub fn model_path(&self) -> PathBuf {
        self.path.join(MODEL_FILENAME)
    }

    /// Validate settings that cannot be expressed in the type.
    pub fn validate(&self) -> DbResult<()> {
        if self.vectorizer.max_features == 0 {
            return Err(DbError::config("maxFeatures must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.min_similarity) {
            return Err(DbError::config(format!(
                "minSimilarity must be between 0 and 1, got {}",
                self.min_similarity
            )));
        }
        if self.vectorizer.min_token_length == 0 {
            return Err(DbError::config("minTokenLength must be at least 1"));
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = IndexConfig::new("/tmp/whisker")
            .with_backend(MEMORY_BACKEND)
            .with_min_similarity(0.25)
            .with_create_if_missing(false);

        assert_eq!(config.backend, "memory");
        assert_eq!(config.min_similarity, 0.25);
        assert!(!config.create_if_missing);
        assert_eq!(config.items_path(), PathBuf::from("/tmp/whisker/items.json"));
        assert_eq!(config.model_path(), PathBuf::from("/tmp/whisker/model.bin"));
    }

    #[test]
    fn test_config_defaults_from_json() {
        let config: IndexConfig = serde_json::from_str(r#"{"path": "/data"}"#).unwrap();

        assert_eq!(config.backend, DEFAULT_BACKEND);
        assert_eq!(config.min_similarity, DEFAULT_MIN_SIMILARITY);
        assert_eq!(config.vectorizer, VectorizerConfig::default());
        assert!(config.create_if_missing);
    }

    #[test]
    fn test_validate() {
        assert!(IndexConfig::new("/data").validate().is_ok());

        let bad_threshold = IndexConfig::new("/data").with_min_similarity(1.5);
        assert!(matches!(bad_threshold.validate(), Err(DbError::Config { .. })));

        let mut no_features = IndexConfig::new("/data");
        no_features.vectorizer.max_features = 0;
        assert!(no_features.validate().is_err());
    }
}
