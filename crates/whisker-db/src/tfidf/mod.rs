//! TF-IDF retrieval primitives.
//!
//! ## Key Components
//!
//! - [`tokenizer`]: Unicode-aware tokenization with stop words and optional stemming
//! - [`vectorizer`]: vocabulary fitting and tf × idf weighting
//! - [`similarity`]: cosine similarity and top-k ranking
//!
//! ## Usage
//!
//! ```ignore
//! use whisker_db::tfidf::{rank, TfidfVectorizer, VectorizerConfig};
//!
//! let (model, vectors) = TfidfVectorizer::fit_transform(VectorizerConfig::default(), &docs);
//! let query = model.transform("sleeping cats");
//! let hits = rank(&query, &vectors, 5, 0.1);
//! ```

mod similarity;
mod tokenizer;
mod vectorizer;

pub use similarity::{cosine_similarity, rank, DEFAULT_MIN_SIMILARITY};
pub use tokenizer::{Tokenizer, TokenizerConfig};
pub use vectorizer::{smoothed_idf, TfidfVectorizer};

use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};

/// Default cap on vocabulary size.
pub const DEFAULT_MAX_FEATURES: usize = 1000;

// ============================================================================
// Configuration
// ============================================================================

/// Vectorizer configuration.
///
/// Controls vocabulary size and tokenization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Encode, Decode)]
#[serde(rename_all = "camelCase")]
pub struct VectorizerConfig {
    /// Maximum number of vocabulary terms.
    /// Default: 1000
    #[serde(default = "default_max_features")]
    pub max_features: usize,

    /// Whether to apply English stemming to tokens.
    /// Default: false
    #[serde(default)]
    pub stemming: bool,

    /// Whether to remove stop words during tokenization.
    /// Default: true
    #[serde(default = "default_remove_stopwords")]
    pub remove_stopwords: bool,

    /// Minimum token length to include.
    /// Default: 2
    #[serde(default = "default_min_token_length")]
    pub min_token_length: usize,
}

fn default_max_features() -> usize {
    DEFAULT_MAX_FEATURES
}

fn default_remove_stopwords() -> bool {
    true
}

fn default_min_token_length() -> usize {
    2
}

impl Default for VectorizerConfig {
    fn default() -> Self {
        Self {
            max_features: default_max_features(),
            stemming: false,
            remove_stopwords: default_remove_stopwords(),
            min_token_length: default_min_token_length(),
        }
    }
}

impl VectorizerConfig {
    /// Tokenizer settings derived from this configuration.
    pub fn tokenizer_config(&self) -> TokenizerConfig {
        TokenizerConfig {
            stemming: self.stemming,
            remove_stopwords: self.remove_stopwords,
            min_token_length: self.min_token_length,
        }
    }
}
