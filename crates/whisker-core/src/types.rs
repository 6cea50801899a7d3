//! Result types returned by the engine.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use whisker_db::index::IndexStats;

/// Index and generator statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsReport {
    /// Index backend name.
    pub backend: String,
    /// Number of stored facts.
    pub total_facts: usize,
    /// Terms in the fitted vocabulary.
    pub vocabulary_size: usize,
    /// Whether search is available.
    pub model_fitted: bool,
    pub min_similarity: f32,
    pub max_features: usize,
    /// Data directory, for persistent backends.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    /// Configured generation model.
    pub generation_model: String,
    /// Whether a generator is ready.
    pub generator_available: bool,
}

impl StatsReport {
    pub fn new(index: IndexStats, generation_model: String, generator_available: bool) -> Self {
        Self {
            backend: index.backend,
            total_facts: index.total_items,
            vocabulary_size: index.vocabulary_size,
            model_fitted: index.model_fitted,
            min_similarity: index.min_similarity,
            max_features: index.max_features,
            data_dir: index.data_dir,
            generation_model,
            generator_available,
        }
    }
}

/// Outcome of a seeding run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedResult {
    /// Category filter, if one was given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Ids of newly stored facts.
    pub added: Vec<String>,
    /// Facts skipped because their text was already stored.
    pub skipped: usize,
}

/// A fact produced by the generator and stored in the index.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedFact {
    pub id: String,
    pub text: String,
    /// Topic requested, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    pub model: String,
    pub timestamp: DateTime<Utc>,
    pub input_tokens: u32,
    pub output_tokens: u32,
}
