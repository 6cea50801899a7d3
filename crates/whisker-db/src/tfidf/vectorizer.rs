//! TF-IDF vectorizer.
//!
//! Fits a bounded vocabulary over a whole corpus and maps text to dense
//! term-weight vectors:
//!
//! ```text
//! idf(t)       = ln((1 + D) / (1 + df(t))) + 1
//! weight(t, d) = tf(t, d) * idf(t)
//! ```
//!
//! Where:
//! - D = number of documents in the corpus
//! - df(t) = number of documents containing t
//! - tf(t, d) = occurrences of t in d
//!
//! The vocabulary keeps at most `max_features` terms, chosen by document
//! frequency, and is stored in lexicographic order so vector dimensions are
//! stable for a given corpus.

use std::collections::HashMap;

use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use super::tokenizer::Tokenizer;
use super::VectorizerConfig;

/// Smoothed inverse document frequency.
#[inline]
pub fn smoothed_idf(num_docs: usize, doc_freq: usize) -> f32 {
    let n = num_docs as f32;
    let df = doc_freq as f32;
    ((1.0 + n) / (1.0 + df)).ln() + 1.0
}

/// A fitted TF-IDF model.
///
/// `terms` is sorted, so term lookup is a binary search and `idf[i]` belongs
/// to `terms[i]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct TfidfVectorizer {
    config: VectorizerConfig,
    terms: Vec<String>,
    idf: Vec<f32>,
}

struct TermCounts {
    term: String,
    doc_freq: usize,
    total_freq: usize,
}

impl TfidfVectorizer {
    /// Fit a vocabulary and idf weights over `corpus`.
    ///
    /// An empty corpus yields an empty vocabulary.
    pub fn fit<S: AsRef<str>>(config: VectorizerConfig, corpus: &[S]) -> Self {
        let tokenizer = Tokenizer::new(config.tokenizer_config());

        let mut counts: HashMap<String, (usize, usize)> = HashMap::new();
        for doc in corpus {
            for (term, tf) in tokenizer.term_frequencies(doc.as_ref()) {
                let entry = counts.entry(term).or_insert((0, 0));
                entry.0 += 1;
                entry.1 += tf;
            }
        }

        let mut ranked: Vec<TermCounts> = counts
            .into_iter()
            .map(|(term, (doc_freq, total_freq))| TermCounts {
                term,
                doc_freq,
                total_freq,
            })
            .collect();

        ranked.sort_by(|a, b| {
            b.doc_freq
                .cmp(&a.doc_freq)
                .then_with(|| b.total_freq.cmp(&a.total_freq))
                .then_with(|| a.term.cmp(&b.term))
        });
        ranked.truncate(config.max_features);
        ranked.sort_by(|a, b| a.term.cmp(&b.term));

        let num_documents = corpus.len();
        let (terms, idf) = ranked
            .into_iter()
            .map(|c| {
                let weight = smoothed_idf(num_documents, c.doc_freq);
                (c.term, weight)
            })
            .unzip();

        tracing::trace!(
            "Fitted TF-IDF vocabulary over {} documents",
            num_documents
        );

        Self { config, terms, idf }
    }

    /// Fit over `corpus` and return the vectors of every document, in order.
    pub fn fit_transform<S: AsRef<str>>(
        config: VectorizerConfig,
        corpus: &[S],
    ) -> (Self, Vec<Vec<f32>>) {
        let vectorizer = Self::fit(config, corpus);
        let tokenizer = vectorizer.tokenizer();
        let vectors = corpus
            .iter()
            .map(|doc| vectorizer.transform_with(&tokenizer, doc.as_ref()))
            .collect();
        (vectorizer, vectors)
    }

    /// Map text to a vector with one weight per vocabulary term.
    ///
    /// Terms outside the vocabulary are dropped.
    pub fn transform(&self, text: &str) -> Vec<f32> {
        self.transform_with(&self.tokenizer(), text)
    }

    /// Like [`transform`](Self::transform), reusing a tokenizer built by
    /// [`tokenizer`](Self::tokenizer).
    pub fn transform_with(&self, tokenizer: &Tokenizer, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0; self.terms.len()];
        if self.terms.is_empty() {
            return vector;
        }

        for (term, tf) in tokenizer.term_frequencies(text) {
            if let Some(idx) = self.term_index(&term) {
                vector[idx] = tf as f32 * self.idf[idx];
            }
        }

        vector
    }

    /// Tokenizer matching the fitted configuration.
    pub fn tokenizer(&self) -> Tokenizer {
        Tokenizer::new(self.config.tokenizer_config())
    }

    /// Position of `term` in the vocabulary.
    pub fn term_index(&self, term: &str) -> Option<usize> {
        self.terms
            .binary_search_by(|t| t.as_str().cmp(term))
            .ok()
    }

    /// Fitted idf weight of `term`, if it is in the vocabulary.
    pub fn idf(&self, term: &str) -> Option<f32> {
        self.term_index(term).map(|idx| self.idf[idx])
    }

    /// Vocabulary terms in dimension order.
    pub fn vocabulary(&self) -> &[String] {
        &self.terms
    }

    pub fn vocabulary_size(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn config(&self) -> &VectorizerConfig {
        &self.config
    }
}
