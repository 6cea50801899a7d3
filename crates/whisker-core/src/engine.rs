//! Whisker Engine – the core orchestrator for all Whisker operations.
//!
//! The [`WhiskerEngine`] owns the global configuration, the fact index and
//! the optional text generator. Every CLI command maps to one engine method.

use std::collections::{BTreeMap, HashSet};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::Utc;
use tracing::{debug, info, warn};

use whisker_db::index::{open_index, Item, ItemInsert, SearchHit, SimilarityBackend};
use whisker_model::{create_generator, TextGenerator};

use crate::config::GlobalConfig;
use crate::constants::{
    MAX_RESULT_LIMIT, META_CATEGORY, META_MODEL, META_QUERY, META_SOURCE, META_TIMESTAMP,
    SEED_MODEL, SEED_SOURCE,
};
use crate::db_adapter::IntoWhiskerResult;
use crate::errors::WhiskerError;
use crate::generate::{build_prompt, generated_metadata, normalize_topic};
use crate::model_adapter::from_model_error;
use crate::seed::{facts_by_category, seed_categories, seed_facts, SeedFact};
use crate::types::{GeneratedFact, SeedResult, StatsReport};

// ============================================================================
// WhiskerEngine
// ============================================================================

/// The main engine for Whisker operations.
///
/// The index is opened on first use and kept for the engine's lifetime, so a
/// `memory` backend lives exactly as long as the engine.
///
/// # Example
///
/// ```ignore
/// use whisker_core::WhiskerEngine;
///
/// let engine = WhiskerEngine::with_defaults()?;
/// engine.seed(None)?;
/// for hit in engine.search("why do cats purr", None)? {
///     println!("{:.3} {}", hit.score, hit.item.text);
/// }
/// ```
pub struct WhiskerEngine {
    /// Global configuration loaded from `~/.whisker/config.yaml`.
    global_config: GlobalConfig,
    /// Data directory set at runtime, overriding the configured one.
    data_dir_override: Option<PathBuf>,
    /// Lazily opened fact index.
    index: Mutex<Option<Arc<dyn SimilarityBackend>>>,
    generator: Option<Box<dyn TextGenerator>>,
    /// Why `generator` is `None`.
    generator_error: Option<String>,
}

impl std::fmt::Debug for WhiskerEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WhiskerEngine")
            .field("global_config", &self.global_config)
            .field("data_dir", &self.data_dir())
            .field("generator", &self.generator)
            .finish_non_exhaustive()
    }
}

impl WhiskerEngine {
    // -------------------------------------------------------------------------
    // Construction
    // -------------------------------------------------------------------------

    /// Create a new `WhiskerEngine` from a global configuration.
    ///
    /// A generator is created from the `generation` section when possible.
    /// Without one (e.g. no API key), every operation except generation works.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn from_global_config(global_config: GlobalConfig) -> anyhow::Result<Self> {
        global_config.validate()?;

        let (generator, generator_error) = match create_generator(&global_config.generation.model)
        {
            Ok(generator) => (Some(generator), None),
            Err(e) => {
                debug!("Text generator unavailable: {}", e);
                (None, Some(e.to_string()))
            }
        };

        Ok(Self {
            global_config,
            data_dir_override: None,
            index: Mutex::new(None),
            generator,
            generator_error,
        })
    }

    /// Create a new `WhiskerEngine` with default configuration.
    ///
    /// Loads `~/.whisker/config.yaml`, or uses defaults if it does not exist.
    pub fn with_defaults() -> anyhow::Result<Self> {
        let config = GlobalConfig::load_default()?;
        Self::from_global_config(config)
    }

    /// Create a new `WhiskerEngine` with configuration from a specific path.
    pub fn with_config(path: &std::path::Path) -> anyhow::Result<Self> {
        let config = GlobalConfig::from_path(path)?;
        Self::from_global_config(config)
    }

    /// Replace the text generator.
    pub fn with_generator(mut self, generator: Box<dyn TextGenerator>) -> Self {
        self.generator = Some(generator);
        self.generator_error = None;
        self
    }

    /// Override the data directory for this engine instance.
    ///
    /// Any index already opened is dropped and reopened at the new location.
    pub fn set_data_dir(&mut self, dir: impl Into<PathBuf>) {
        self.data_dir_override = Some(dir.into());
        self.index = Mutex::new(None);
    }

    /// Get a reference to the global configuration.
    pub fn global_config(&self) -> &GlobalConfig {
        &self.global_config
    }

    /// Directory holding the persisted fact index.
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir_override
            .clone()
            .unwrap_or_else(|| self.global_config.data_dir())
    }

    fn index(&self) -> Result<Arc<dyn SimilarityBackend>, WhiskerError> {
        let mut slot = self.index.lock().map_err(|e| {
            WhiskerError::Other(anyhow::anyhow!("Failed to acquire index lock: {}", e))
        })?;

        if let Some(index) = slot.as_ref() {
            return Ok(Arc::clone(index));
        }

        let config = self.global_config.index_config(&self.data_dir());
        let index = open_index(&config).into_whisker_result()?;
        *slot = Some(Arc::clone(&index));
        Ok(index)
    }

    fn generator(&self) -> Result<&dyn TextGenerator, WhiskerError> {
        self.generator
            .as_deref()
            .ok_or_else(|| WhiskerError::GeneratorUnavailable {
                reason: self
                    .generator_error
                    .clone()
                    .unwrap_or_else(|| "no generator configured".to_string()),
            })
    }

    fn check_limit(limit: usize) -> Result<usize, WhiskerError> {
        if limit > MAX_RESULT_LIMIT {
            return Err(WhiskerError::InvalidArgument(format!(
                "limit must be at most {}, got {}",
                MAX_RESULT_LIMIT, limit
            )));
        }
        Ok(limit)
    }

    // -------------------------------------------------------------------------
    // Fact operations
    // -------------------------------------------------------------------------

    /// Store a fact and return its id.
    ///
    /// # Errors
    ///
    /// Returns [`WhiskerError::InvalidArgument`] if `text` is blank.
    pub fn add_fact(
        &self,
        text: &str,
        metadata: BTreeMap<String, String>,
    ) -> Result<String, WhiskerError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(WhiskerError::InvalidArgument(
                "fact text must not be empty".to_string(),
            ));
        }

        let insert = ItemInsert::new(text).with_metadata_map(metadata);
        let id = self.index()?.add(insert).into_whisker_result()?;
        info!("Stored fact {}", id);
        Ok(id)
    }

    /// Search for facts similar to `query`.
    ///
    /// `limit` defaults to `search.defaultLimit`.
    pub fn search(&self, query: &str, limit: Option<usize>) -> Result<Vec<SearchHit>, WhiskerError> {
        if query.trim().is_empty() {
            return Err(WhiskerError::InvalidArgument(
                "search query must not be empty".to_string(),
            ));
        }

        let limit = Self::check_limit(limit.unwrap_or(self.global_config.search.default_limit))?;
        let hits = self.index()?.search(query, limit).into_whisker_result()?;
        debug!("Search for {:?} returned {} hits", query, hits.len());
        Ok(hits)
    }

    /// List stored facts in insertion order.
    ///
    /// `limit` defaults to `search.listLimit`.
    pub fn list(&self, limit: Option<usize>) -> Result<Vec<Item>, WhiskerError> {
        let limit = Self::check_limit(limit.unwrap_or(self.global_config.search.list_limit))?;
        self.index()?.get_all(limit).into_whisker_result()
    }

    /// Number of stored facts.
    pub fn count(&self) -> Result<usize, WhiskerError> {
        self.index()?.count().into_whisker_result()
    }

    /// Index and generator statistics.
    pub fn stats(&self) -> Result<StatsReport, WhiskerError> {
        let index_stats = self.index()?.stats().into_whisker_result()?;
        let generation_model = match &self.generator {
            Some(generator) => generator.model_id().to_string(),
            None => self.global_config.generation.model.model.clone(),
        };
        Ok(StatsReport::new(
            index_stats,
            generation_model,
            self.generator.is_some(),
        ))
    }

    /// Remove every stored fact.
    pub fn reset(&self) -> Result<(), WhiskerError> {
        self.index()?.reset().into_whisker_result()
    }

    /// Re-fit the search model over all stored facts.
    pub fn reindex(&self) -> Result<(), WhiskerError> {
        self.index()?.rebuild().into_whisker_result()
    }

    // -------------------------------------------------------------------------
    // Seeding
    // -------------------------------------------------------------------------

    /// Store the built-in seed facts, optionally restricted to one category.
    ///
    /// Facts whose text is already stored are skipped, so seeding twice adds
    /// nothing the second time. New facts are added in a single batch.
    ///
    /// # Errors
    ///
    /// Returns [`WhiskerError::InvalidArgument`] for an unknown category.
    pub fn seed(&self, category: Option<&str>) -> Result<SeedResult, WhiskerError> {
        let candidates: Vec<SeedFact> = match category {
            Some(category) => {
                if !seed_categories().iter().any(|c| *c == category) {
                    return Err(WhiskerError::InvalidArgument(format!(
                        "unknown seed category `{}`. Available: {}",
                        category,
                        seed_categories().join(", ")
                    )));
                }
                facts_by_category(category)
            }
            None => seed_facts().to_vec(),
        };

        let index = self.index()?;
        let existing: HashSet<String> = index
            .get_all(usize::MAX)
            .into_whisker_result()?
            .into_iter()
            .map(|item| item.text)
            .collect();

        let timestamp = Utc::now().to_rfc3339();
        let (fresh, known): (Vec<SeedFact>, Vec<SeedFact>) = candidates
            .into_iter()
            .partition(|fact| !existing.contains(fact.text));

        let inserts: Vec<ItemInsert> = fresh
            .iter()
            .map(|fact| {
                ItemInsert::new(fact.text)
                    .with_metadata(META_QUERY, fact.query)
                    .with_metadata(META_CATEGORY, fact.category)
                    .with_metadata(META_MODEL, SEED_MODEL)
                    .with_metadata(META_SOURCE, SEED_SOURCE)
                    .with_metadata(META_TIMESTAMP, timestamp.as_str())
            })
            .collect();

        let added = index.add_batch(inserts).into_whisker_result()?;
        info!(
            "Seeded {} facts ({} already present)",
            added.len(),
            known.len()
        );

        Ok(SeedResult {
            category: category.map(str::to_string),
            added,
            skipped: known.len(),
        })
    }

    // -------------------------------------------------------------------------
    // Generation
    // -------------------------------------------------------------------------

    /// Generate a fact with the text generator and store it.
    ///
    /// # Errors
    ///
    /// Returns [`WhiskerError::GeneratorUnavailable`] if no generator is
    /// configured, or [`WhiskerError::GenerationFailed`] if the call fails.
    pub fn generate_fact(&self, topic: Option<&str>) -> Result<GeneratedFact, WhiskerError> {
        let generator = self.generator()?;
        let topic = normalize_topic(topic);

        let request = self.global_config.generation.model.request(build_prompt(topic));
        let generation = generator.generate(&request).map_err(from_model_error)?;

        let timestamp = Utc::now();
        let metadata = generated_metadata(topic, &generation.model, &timestamp);
        let insert = ItemInsert::new(generation.text.clone()).with_metadata_map(metadata);
        let id = self.index()?.add(insert).into_whisker_result()?;
        info!("Generated fact {} with {}", id, generation.model);

        Ok(GeneratedFact {
            id,
            text: generation.text,
            topic: topic.map(str::to_string),
            model: generation.model,
            timestamp,
            input_tokens: generation.input_tokens,
            output_tokens: generation.output_tokens,
        })
    }

    /// Generate one fact per configured demo topic.
    ///
    /// Pauses `generation.demoDelayMs` between calls. A topic whose generation
    /// fails is logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns [`WhiskerError::GeneratorUnavailable`] if no generator is configured.
    pub fn demo(&self) -> Result<Vec<GeneratedFact>, WhiskerError> {
        self.generator()?;

        let delay = Duration::from_millis(self.global_config.generation.demo_delay_ms);
        let topics = &self.global_config.generation.demo_topics;
        let mut facts = Vec::with_capacity(topics.len());

        for (i, topic) in topics.iter().enumerate() {
            if i > 0 && !delay.is_zero() {
                std::thread::sleep(delay);
            }
            match self.generate_fact(Some(topic)) {
                Ok(fact) => facts.push(fact),
                Err(e) => warn!("Demo generation for `{}` failed: {}", topic, e),
            }
        }

        Ok(facts)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;
    use whisker_model::{Generation, GenerationRequest, ModelError, ModelResult};

    /// Generator that echoes a numbered fact about the prompt.
    #[derive(Debug, Default)]
    struct FakeGenerator {
        calls: AtomicUsize,
        fail_on_call: Option<usize>,
    }

    impl TextGenerator for FakeGenerator {
        fn generate(&self, request: &GenerationRequest) -> ModelResult<Generation> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_on_call == Some(call) {
                return Err(ModelError::Api {
                    model: "fake-model".to_string(),
                    status: 529,
                    message: "Overloaded".to_string(),
                });
            }
            Ok(Generation {
                text: format!("Fact {}: {}", call, request.prompt),
                model: "fake-model".to_string(),
                stop_reason: Some("end_turn".to_string()),
                input_tokens: 10,
                output_tokens: 20,
            })
        }

        fn model_id(&self) -> &str {
            "fake-model"
        }
    }

    fn test_config() -> GlobalConfig {
        let mut config = GlobalConfig::default();
        config.generation.model.api_key_env = "WHISKER_TEST_NO_SUCH_KEY".to_string();
        config.generation.demo_delay_ms = 0;
        config
    }

    fn create_engine(temp: &TempDir) -> WhiskerEngine {
        let mut engine = WhiskerEngine::from_global_config(test_config()).unwrap();
        engine.set_data_dir(temp.path());
        engine
    }

    fn create_engine_with_generator(temp: &TempDir) -> WhiskerEngine {
        create_engine(temp).with_generator(Box::new(FakeGenerator::default()))
    }

    #[test]
    fn test_add_and_count() {
        let temp = TempDir::new().unwrap();
        let engine = create_engine(&temp);

        let id = engine
            .add_fact("  Cats have five toes on their front paws  ", BTreeMap::new())
            .unwrap();

        assert_eq!(engine.count().unwrap(), 1);
        let items = engine.list(None).unwrap();
        assert_eq!(items[0].id, id);
        assert_eq!(items[0].text, "Cats have five toes on their front paws");
    }

    #[test]
    fn test_add_empty_fact_rejected() {
        let temp = TempDir::new().unwrap();
        let engine = create_engine(&temp);

        assert!(matches!(
            engine.add_fact("   ", BTreeMap::new()),
            Err(WhiskerError::InvalidArgument(_))
        ));
        assert_eq!(engine.count().unwrap(), 0);
    }

    #[test]
    fn test_search_validation() {
        let temp = TempDir::new().unwrap();
        let engine = create_engine(&temp);

        assert!(matches!(
            engine.search("", None),
            Err(WhiskerError::InvalidArgument(_))
        ));
        assert!(matches!(
            engine.search("cats", Some(MAX_RESULT_LIMIT + 1)),
            Err(WhiskerError::InvalidArgument(_))
        ));
        assert!(engine.search("cats", None).unwrap().is_empty());
    }

    #[test]
    fn test_search_uses_default_limit() {
        let temp = TempDir::new().unwrap();
        let engine = create_engine(&temp);
        engine.seed(None).unwrap();

        let hits = engine.search("whiskers", None).unwrap();
        assert!(!hits.is_empty());
        assert!(hits.len() <= engine.global_config().search.default_limit);
    }

    #[test]
    fn test_seed_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let engine = create_engine(&temp);

        let first = engine.seed(None).unwrap();
        let second = engine.seed(None).unwrap();

        assert_eq!(first.added.len(), seed_facts().len());
        assert_eq!(first.skipped, 0);
        assert!(second.added.is_empty());
        assert_eq!(second.skipped, seed_facts().len());
        assert_eq!(engine.count().unwrap(), seed_facts().len());
    }

    #[test]
    fn test_seed_metadata() {
        let temp = TempDir::new().unwrap();
        let engine = create_engine(&temp);
        engine.seed(Some("breeds")).unwrap();

        let items = engine.list(None).unwrap();
        assert_eq!(items.len(), facts_by_category("breeds").len());
        for item in &items {
            assert_eq!(item.metadata.get("category").map(String::as_str), Some("breeds"));
            assert_eq!(item.metadata.get("model").map(String::as_str), Some("pre-seeded"));
            assert_eq!(
                item.metadata.get("source").map(String::as_str),
                Some("educational_database")
            );
            assert_eq!(item.metadata.get("query").map(String::as_str), Some("breeds"));
        }
    }

    #[test]
    fn test_seed_category_then_all() {
        let temp = TempDir::new().unwrap();
        let engine = create_engine(&temp);

        let history = engine.seed(Some("history")).unwrap();
        let all = engine.seed(None).unwrap();

        assert_eq!(history.category.as_deref(), Some("history"));
        assert_eq!(all.skipped, history.added.len());
        assert_eq!(engine.count().unwrap(), seed_facts().len());
    }

    #[test]
    fn test_seed_unknown_category() {
        let temp = TempDir::new().unwrap();
        let engine = create_engine(&temp);

        assert!(matches!(
            engine.seed(Some("astronomy")),
            Err(WhiskerError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_seeded_search_finds_relevant_fact() {
        let temp = TempDir::new().unwrap();
        let engine = create_engine(&temp);
        engine.seed(None).unwrap();

        let hits = engine.search("clowder kittens", Some(3)).unwrap();
        assert!(hits[0].item.text.contains("clowder"));
    }

    #[test]
    fn test_generate_without_generator() {
        let temp = TempDir::new().unwrap();
        let engine = create_engine(&temp);

        let err = engine.generate_fact(Some("hunting")).unwrap_err();
        match err {
            WhiskerError::GeneratorUnavailable { reason } => {
                assert!(reason.contains("WHISKER_TEST_NO_SUCH_KEY"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(matches!(
            engine.demo(),
            Err(WhiskerError::GeneratorUnavailable { .. })
        ));
    }

    #[test]
    fn test_generate_fact_stores_metadata() {
        let temp = TempDir::new().unwrap();
        let engine = create_engine_with_generator(&temp);

        let fact = engine.generate_fact(Some("hunting")).unwrap();

        assert_eq!(fact.topic.as_deref(), Some("hunting"));
        assert_eq!(fact.model, "fake-model");
        assert!(fact.text.contains("related to: hunting"));

        let items = engine.list(None).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, fact.id);
        assert_eq!(items[0].metadata.get("query").map(String::as_str), Some("hunting"));
        assert_eq!(items[0].metadata.get("model").map(String::as_str), Some("fake-model"));
        assert!(items[0].metadata.contains_key("timestamp"));
    }

    #[test]
    fn test_generate_general_fact() {
        let temp = TempDir::new().unwrap();
        let engine = create_engine_with_generator(&temp);

        let fact = engine.generate_fact(None).unwrap();
        let items = engine.list(None).unwrap();

        assert!(fact.topic.is_none());
        assert_eq!(items[0].metadata.get("query").map(String::as_str), Some("general"));
    }

    #[test]
    fn test_demo_generates_one_fact_per_topic() {
        let temp = TempDir::new().unwrap();
        let engine = create_engine_with_generator(&temp);

        let facts = engine.demo().unwrap();
        let topics: Vec<_> = facts.iter().filter_map(|f| f.topic.clone()).collect();

        assert_eq!(
            topics,
            vec!["behavior", "hunting", "sleeping", "communication", "history"]
        );
        assert_eq!(engine.count().unwrap(), 5);
    }

    #[test]
    fn test_demo_skips_failed_topics() {
        let temp = TempDir::new().unwrap();
        let engine = create_engine(&temp).with_generator(Box::new(FakeGenerator {
            calls: AtomicUsize::new(0),
            fail_on_call: Some(1),
        }));

        let facts = engine.demo().unwrap();

        assert_eq!(facts.len(), 4);
        assert!(facts.iter().all(|f| f.topic.as_deref() != Some("hunting")));
    }

    #[test]
    fn test_stats_report() {
        let temp = TempDir::new().unwrap();
        let engine = create_engine_with_generator(&temp);
        engine.seed(Some("health")).unwrap();

        let stats = engine.stats().unwrap();

        assert_eq!(stats.backend, "tfidf");
        assert_eq!(stats.total_facts, facts_by_category("health").len());
        assert!(stats.model_fitted);
        assert!(stats.generator_available);
        assert_eq!(stats.generation_model, "fake-model");
        assert_eq!(stats.data_dir.as_deref(), Some(temp.path()));
    }

    #[test]
    fn test_reset_and_reindex() {
        let temp = TempDir::new().unwrap();
        let engine = create_engine(&temp);
        engine.seed(None).unwrap();

        engine.reindex().unwrap();
        assert!(!engine.search("whiskers", None).unwrap().is_empty());

        engine.reset().unwrap();
        assert_eq!(engine.count().unwrap(), 0);
        assert!(engine.search("whiskers", None).unwrap().is_empty());
    }

    #[test]
    fn test_facts_persist_across_engines() {
        let temp = TempDir::new().unwrap();
        let id = create_engine(&temp)
            .add_fact("Cats can rotate their ears 180 degrees", BTreeMap::new())
            .unwrap();

        let engine = create_engine(&temp);
        let hits = engine.search("rotate ears", None).unwrap();

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].item.id, id);
    }

    #[test]
    fn test_memory_backend_keeps_facts_for_engine_lifetime() {
        let temp = TempDir::new().unwrap();
        let mut config = test_config();
        config.index.backend = "memory".to_string();
        let mut engine = WhiskerEngine::from_global_config(config).unwrap();
        engine.set_data_dir(temp.path());

        engine.add_fact("Cats purr at 25 Hz", BTreeMap::new()).unwrap();

        assert_eq!(engine.count().unwrap(), 1);
        assert!(!temp.path().join("items.json").exists());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = test_config();
        config.index.max_features = 0;

        assert!(WhiskerEngine::from_global_config(config).is_err());
    }
}
