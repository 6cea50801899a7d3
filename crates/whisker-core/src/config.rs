//! Configuration types for Whisker.
//!
//! [`GlobalConfig`] is the user-level configuration stored in
//! `~/.whisker/config.yaml`. Every section and key is optional.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use whisker_db::index::{available_backends, IndexConfig, DEFAULT_BACKEND};
use whisker_db::tfidf::{VectorizerConfig, DEFAULT_MAX_FEATURES, DEFAULT_MIN_SIMILARITY};
use whisker_model::GenerationConfig;

use crate::constants::{
    CONFIG_FILENAME, DATA_DIR_NAME, DEFAULT_DEMO_DELAY_MS, DEFAULT_DEMO_TOPICS,
    DEFAULT_LIST_LIMIT, DEFAULT_SEARCH_LIMIT, MAX_RESULT_LIMIT, WHISKER_HOME_DIR,
};
use crate::errors::WhiskerError;

// ============================================================================
// GlobalConfig
// ============================================================================

/// Global Whisker configuration.
///
/// ```yaml
/// index:
///   backend: tfidf
///   dataDir: ~/.whisker/data
///   maxFeatures: 1000
///   minSimilarity: 0.1
/// search:
///   defaultLimit: 5
/// generation:
///   model: claude-3-haiku-20240307
///   maxTokens: 150
///   demoTopics: [behavior, hunting]
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Fact index settings.
    #[serde(default)]
    pub index: IndexSection,

    /// Search and listing defaults.
    #[serde(default)]
    pub search: SearchSection,

    /// Fact generation settings.
    #[serde(default)]
    pub generation: GenerationSection,
}

impl GlobalConfig {
    /// Load the global configuration from the default location (`~/.whisker/config.yaml`).
    ///
    /// If the file does not exist, returns a default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`WhiskerError::InvalidGlobalConfig`] if the file exists but cannot be parsed.
    pub fn load_default() -> Result<Self, WhiskerError> {
        match Self::default_path() {
            Some(path) => Self::from_path(&path),
            None => {
                tracing::debug!("Could not determine home directory, using default config");
                Ok(Self::default())
            }
        }
    }

    /// Load the global configuration from a specific path.
    ///
    /// If the file does not exist, returns a default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`WhiskerError::InvalidGlobalConfig`] if the file exists but cannot be parsed.
    /// Returns [`WhiskerError::InvalidConfiguration`] if validation fails.
    pub fn from_path(path: &Path) -> Result<Self, WhiskerError> {
        if !path.exists() {
            tracing::debug!(
                "Global config not found at {}, using defaults",
                path.display()
            );
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| {
            WhiskerError::InvalidGlobalConfig(format!("Failed to read {}: {}", path.display(), e))
        })?;

        // An empty file parses as null
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Self = serde_yaml::from_str(&content).map_err(|e| {
            WhiskerError::InvalidGlobalConfig(format!("Failed to parse {}: {}", path.display(), e))
        })?;

        let warnings = config.validate()?;
        for warning in warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok(config)
    }

    /// Get the default global directory (`~/.whisker`).
    pub fn default_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(WHISKER_HOME_DIR))
    }

    /// Get the default global config file path (`~/.whisker/config.yaml`).
    pub fn default_path() -> Option<PathBuf> {
        Self::default_dir().map(|d| d.join(CONFIG_FILENAME))
    }

    /// Resolve the data directory: configured `dataDir`, else `~/.whisker/data`.
    ///
    /// A leading `~/` in `dataDir` expands to the home directory.
    pub fn data_dir(&self) -> PathBuf {
        if let Some(dir) = &self.index.data_dir {
            return expand_home(dir);
        }
        Self::default_dir()
            .unwrap_or_else(|| PathBuf::from(WHISKER_HOME_DIR))
            .join(DATA_DIR_NAME)
    }

    /// Build the index configuration for `data_dir`.
    pub fn index_config(&self, data_dir: &Path) -> IndexConfig {
        IndexConfig::new(data_dir)
            .with_backend(self.index.backend.clone())
            .with_vectorizer(self.index.vectorizer_config())
            .with_min_similarity(self.index.min_similarity)
    }

    /// Validate the configuration.
    ///
    /// Returns the first critical error as `WhiskerError::InvalidConfiguration`.
    /// Non-fatal issues are returned as warning strings.
    pub fn validate(&self) -> Result<Vec<String>, WhiskerError> {
        let mut warnings = Vec::new();
        warnings.extend(self.index.validate()?);
        warnings.extend(self.search.validate()?);
        warnings.extend(self.generation.validate()?);
        Ok(warnings)
    }
}

fn expand_home(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}

// ============================================================================
// IndexSection
// ============================================================================

/// Fact index settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexSection {
    /// Backend name ("tfidf" or "memory").
    #[serde(default = "default_backend")]
    pub backend: String,

    /// Directory for persisted artifacts.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Vocabulary cap.
    #[serde(default = "default_max_features")]
    pub max_features: usize,

    /// Minimum similarity for search hits.
    #[serde(default = "default_min_similarity")]
    pub min_similarity: f32,

    /// Apply English stemming.
    #[serde(default)]
    pub stemming: bool,

    /// Remove stop words.
    #[serde(default = "default_true")]
    pub remove_stopwords: bool,

    /// Minimum token length.
    #[serde(default = "default_min_token_length")]
    pub min_token_length: usize,
}

fn default_backend() -> String {
    DEFAULT_BACKEND.to_string()
}

fn default_max_features() -> usize {
    DEFAULT_MAX_FEATURES
}

fn default_min_similarity() -> f32 {
    DEFAULT_MIN_SIMILARITY
}

fn default_true() -> bool {
    true
}

fn default_min_token_length() -> usize {
    2
}

impl Default for IndexSection {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            data_dir: None,
            max_features: default_max_features(),
            min_similarity: default_min_similarity(),
            stemming: false,
            remove_stopwords: true,
            min_token_length: default_min_token_length(),
        }
    }
}

impl IndexSection {
    /// Vectorizer settings for this section.
    pub fn vectorizer_config(&self) -> VectorizerConfig {
        VectorizerConfig {
            max_features: self.max_features,
            stemming: self.stemming,
            remove_stopwords: self.remove_stopwords,
            min_token_length: self.min_token_length,
        }
    }

    pub fn validate(&self) -> Result<Vec<String>, WhiskerError> {
        let mut warnings = Vec::new();

        if !available_backends().contains(&self.backend.as_str()) {
            return Err(WhiskerError::InvalidConfiguration {
                message: format!("index.backend `{}` is not supported", self.backend),
                hint: format!("Use one of: {}", available_backends().join(", ")),
            });
        }

        if self.max_features == 0 {
            return Err(WhiskerError::InvalidConfiguration {
                message: "index.maxFeatures must be at least 1".to_string(),
                hint: format!("The default is {}", DEFAULT_MAX_FEATURES),
            });
        }

        if !(0.0..=1.0).contains(&self.min_similarity) {
            return Err(WhiskerError::InvalidConfiguration {
                message: format!(
                    "index.minSimilarity must be between 0 and 1, got {}",
                    self.min_similarity
                ),
                hint: format!("The default is {}", DEFAULT_MIN_SIMILARITY),
            });
        }

        if self.min_token_length == 0 {
            return Err(WhiskerError::InvalidConfiguration {
                message: "index.minTokenLength must be at least 1".to_string(),
                hint: "The default is 2".to_string(),
            });
        }

        if self.min_similarity == 0.0 {
            warnings.push(
                "index.minSimilarity is 0; every fact will match every query".to_string(),
            );
        }

        if self.max_features < 50 {
            warnings.push(format!(
                "index.maxFeatures is {}; small vocabularies make search imprecise",
                self.max_features
            ));
        }

        Ok(warnings)
    }
}

// ============================================================================
// SearchSection
// ============================================================================

/// Search and listing defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchSection {
    /// Results returned by `search` when no limit is given.
    #[serde(default = "default_search_limit")]
    pub default_limit: usize,

    /// Facts returned by `list` when no limit is given.
    #[serde(default = "default_list_limit")]
    pub list_limit: usize,
}

fn default_search_limit() -> usize {
    DEFAULT_SEARCH_LIMIT
}

fn default_list_limit() -> usize {
    DEFAULT_LIST_LIMIT
}

impl Default for SearchSection {
    fn default() -> Self {
        Self {
            default_limit: default_search_limit(),
            list_limit: default_list_limit(),
        }
    }
}

impl SearchSection {
    pub fn validate(&self) -> Result<Vec<String>, WhiskerError> {
        let mut warnings = Vec::new();

        if self.default_limit > MAX_RESULT_LIMIT || self.list_limit > MAX_RESULT_LIMIT {
            return Err(WhiskerError::InvalidConfiguration {
                message: format!("search limits must not exceed {}", MAX_RESULT_LIMIT),
                hint: "Lower search.defaultLimit or search.listLimit".to_string(),
            });
        }

        if self.default_limit == 0 {
            warnings.push("search.defaultLimit is 0; searches return nothing".to_string());
        }

        Ok(warnings)
    }
}

// ============================================================================
// GenerationSection
// ============================================================================

/// Fact generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationSection {
    /// Provider settings.
    #[serde(flatten)]
    pub model: GenerationConfig,

    /// Topics used by `demo`.
    #[serde(default = "default_demo_topics")]
    pub demo_topics: Vec<String>,

    /// Pause between demo generations.
    #[serde(default = "default_demo_delay_ms")]
    pub demo_delay_ms: u64,
}

fn default_demo_topics() -> Vec<String> {
    DEFAULT_DEMO_TOPICS.iter().map(|t| t.to_string()).collect()
}

fn default_demo_delay_ms() -> u64 {
    DEFAULT_DEMO_DELAY_MS
}

impl Default for GenerationSection {
    fn default() -> Self {
        Self {
            model: GenerationConfig::default(),
            demo_topics: default_demo_topics(),
            demo_delay_ms: default_demo_delay_ms(),
        }
    }
}

impl GenerationSection {
    pub fn validate(&self) -> Result<Vec<String>, WhiskerError> {
        let mut warnings = Vec::new();

        self.model
            .validate()
            .map_err(|e| WhiskerError::InvalidConfiguration {
                message: e.to_string(),
                hint: "Check the generation section of ~/.whisker/config.yaml".to_string(),
            })?;

        if self.demo_topics.is_empty() {
            warnings.push("generation.demoTopics is empty; demo generates nothing".to_string());
        }

        Ok(warnings)
    }
}

// ============================================================================
// Tests
// ============================================================================
