//! Unicode-aware tokenizer for TF-IDF vectorization.
//!
//! Text preprocessing pipeline:
//! - Unicode word segmentation (splits on whitespace, drops punctuation)
//! - Case folding (lowercasing)
//! - Removal of inner punctuation (`don't` -> `dont`)
//! - Minimum token length filtering
//! - Stop word removal
//! - Optional English stemming

use std::collections::{HashMap, HashSet};

use bincode::{Decode, Encode};
use rust_stemmers::{Algorithm, Stemmer};
use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// Tokenizer configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Encode, Decode)]
pub struct TokenizerConfig {
    /// Apply English stemming to tokens.
    pub stemming: bool,
    /// Remove common stop words.
    pub remove_stopwords: bool,
    /// Minimum token length to include.
    pub min_token_length: usize,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            stemming: false,
            remove_stopwords: true,
            min_token_length: 2,
        }
    }
}

/// Unicode-aware tokenizer with optional stemming.
pub struct Tokenizer {
    config: TokenizerConfig,
    stemmer: Option<Stemmer>,
    stopwords: HashSet<&'static str>,
}

impl Tokenizer {
    /// Create a new tokenizer with the given configuration.
    pub fn new(config: TokenizerConfig) -> Self {
        let stemmer = if config.stemming {
            Some(Stemmer::create(Algorithm::English))
        } else {
            None
        };

        Self {
            config,
            stemmer,
            stopwords: Self::default_stopwords(),
        }
    }

    /// Tokenize text into a vector of processed tokens, in text order.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        text.unicode_words()
            .filter_map(|word| self.process_token(word))
            .collect()
    }

    /// Tokenize and count term frequencies.
    pub fn term_frequencies(&self, text: &str) -> HashMap<String, usize> {
        let mut tf: HashMap<String, usize> = HashMap::new();
        for token in self.tokenize(text) {
            *tf.entry(token).or_insert(0) += 1;
        }
        tf
    }

    fn process_token(&self, word: &str) -> Option<String> {
        let lower: String = word
            .to_lowercase()
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect();

        // Pure numbers carry no meaning across facts
        if !lower.chars().any(|c| c.is_alphabetic()) {
            return None;
        }

        if lower.chars().count() < self.config.min_token_length {
            return None;
        }

        if self.config.remove_stopwords && self.stopwords.contains(lower.as_str()) {
            return None;
        }

        let token = match self.stemmer {
            Some(ref stemmer) => stemmer.stem(&lower).to_string(),
            None => lower,
        };

        // Some stems become too short
        if token.chars().count() < self.config.min_token_length {
            return None;
        }

        Some(token)
    }

    /// Default English stop words.
    fn default_stopwords() -> HashSet<&'static str> {
        [
            // Articles
            "a", "an", "the", // Prepositions
            "in", "on", "at", "to", "of", "with", "by", "from", "as", "into", "through", "during",
            "before", "after", "above", "below", "between", "under", "over", "out", "up", "down",
            "off", "for", "per", "via", "about", "against", "among", "around", "without",
            // Conjunctions
            "and", "or", "but", "nor", "so", "yet", "if", "because", "while", "although",
            // Pronouns
            "i", "you", "he", "she", "it", "we", "they", "me", "him", "her", "us", "them", "my",
            "your", "his", "its", "our", "their", "this", "that", "these", "those", "which", "who",
            "whom", "whose", "what", "where", "when", "how", "why", "itself", "themselves",
            // Common verbs
            "is", "are", "was", "were", "be", "been", "being", "have", "has", "had", "having",
            "do", "does", "did", "doing", "will", "would", "could", "should", "may", "might",
            "must", "shall", "can", "need", "dare", "ought", // Other common words
            "not", "no", "yes", "all", "any", "both", "each", "few", "more", "most", "other",
            "some", "such", "than", "too", "very", "just", "also", "only", "own", "same", "then",
            "there", "here", "now", "always", "never", "ever", "whether", "even", "much", "many",
            "like", "again", "once",
        ]
        .into_iter()
        .collect()
    }

    #[cfg(test)]
    pub fn stopword_count(&self) -> usize {
        self.stopwords.len()
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new(TokenizerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_tokenization() {
        let tokenizer = Tokenizer::default();
        let tokens = tokenizer.tokenize("Hello, World!");

        assert_eq!(tokens, vec!["hello".to_string(), "world".to_string()]);
    }

    #[test]
    fn test_stopword_removal() {
        let tokenizer = Tokenizer::default();
        let tokens = tokenizer.tokenize("cats sleep most of the day");

        assert_eq!(tokens, vec!["cats", "sleep", "day"]);
        assert!(tokenizer.stopword_count() > 100);
    }

    #[test]
    fn test_keep_stopwords_when_disabled() {
        let tokenizer = Tokenizer::new(TokenizerConfig {
            remove_stopwords: false,
            ..Default::default()
        });
        let tokens = tokenizer.tokenize("the day");

        assert_eq!(tokens, vec!["the", "day"]);
    }

    #[test]
    fn test_inner_punctuation_stripped() {
        let tokenizer = Tokenizer::default();
        let tokens = tokenizer.tokenize("Cats' whiskers don't lie.");

        assert!(tokens.contains(&"whiskers".to_string()));
        assert!(tokens.contains(&"dont".to_string()));
        assert!(!tokens.iter().any(|t| t.contains('\'')));
    }

    #[test]
    fn test_numbers_and_short_tokens_filtered() {
        let tokenizer = Tokenizer::default();
        let tokens = tokenizer.tokenize("Cats sleep 13-16 hours x 70% z");

        assert_eq!(tokens, vec!["cats", "sleep", "hours"]);
    }

    #[test]
    fn test_stemming() {
        let tokenizer = Tokenizer::new(TokenizerConfig {
            stemming: true,
            ..Default::default()
        });
        let tokens = tokenizer.tokenize("sleeping sleeps");

        for token in &tokens {
            assert_eq!(token, "sleep");
        }
    }

    #[test]
    fn test_no_stemming_by_default() {
        let tokenizer = Tokenizer::default();
        let tokens = tokenizer.tokenize("sleeping cats");

        assert_eq!(tokens, vec!["sleeping", "cats"]);
    }

    #[test]
    fn test_term_frequencies() {
        let tokenizer = Tokenizer::default();
        let tf = tokenizer.term_frequencies("purr purr meow purr");

        assert_eq!(tf.get("purr"), Some(&3));
        assert_eq!(tf.get("meow"), Some(&1));
    }

    #[test]
    fn test_unicode_text() {
        let tokenizer = Tokenizer::default();
        let tokens = tokenizer.tokenize("Félicette flew to space");

        assert!(tokens.contains(&"félicette".to_string()));
        assert!(tokens.contains(&"space".to_string()));
    }

    #[test]
    fn test_empty_text() {
        let tokenizer = Tokenizer::default();
        assert!(tokenizer.tokenize("").is_empty());
        assert!(tokenizer.tokenize("   ...  !!").is_empty());
    }
}
