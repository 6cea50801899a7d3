//! TF-IDF similarity index.
//!
//! Keeps every item in memory together with a fitted [`TfidfVectorizer`] and
//! one vector per item. Each write re-fits the model over the whole corpus,
//! then persists both artifacts (unless the index is memory-only).
//!
//! Loading never fails on bad artifacts: an unreadable item collection is
//! moved aside to `items.json.corrupt` and the index starts empty, and a
//! missing or stale model leaves search empty until the next write or
//! [`rebuild`](SimilarityBackend::rebuild).

use std::fs;
use std::path::Path;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, info, warn};

use super::config::{IndexConfig, DEFAULT_BACKEND, MEMORY_BACKEND};
use super::storage::{
    load_items, load_model, remove_artifact, save_items, save_model, sibling_path, ModelFile,
};
use super::traits::{IndexStats, Item, ItemInsert, SearchHit, SimilarityBackend};
use crate::error::{DbError, DbResult};
use crate::tfidf::{rank, TfidfVectorizer, Tokenizer};

/// A fitted model aligned with the corpus.
struct FittedModel {
    vectorizer: TfidfVectorizer,
    tokenizer: Tokenizer,
    vectors: Vec<Vec<f32>>,
}

impl FittedModel {
    fn new(vectorizer: TfidfVectorizer, vectors: Vec<Vec<f32>>) -> Self {
        Self {
            tokenizer: vectorizer.tokenizer(),
            vectorizer,
            vectors,
        }
    }
}

/// Items and the model fitted over them.
///
/// When `model` is present, `model.vectors[i]` belongs to `items[i]`.
#[derive(Default)]
struct Corpus {
    items: Vec<Item>,
    model: Option<FittedModel>,
}

/// TF-IDF similarity index.
pub struct TfidfIndex {
    config: IndexConfig,
    persistent: bool,
    corpus: RwLock<Corpus>,
}

impl TfidfIndex {
    /// Open a persistent index, loading any artifacts in `config.path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory is missing and `create_if_missing`
    /// is false, or if it cannot be created.
    pub fn open(config: &IndexConfig) -> DbResult<Self> {
        debug!("Opening TfidfIndex at {:?}", config.path);

        if !config.path.exists() {
            if !config.create_if_missing {
                return Err(DbError::IndexNotFound {
                    path: config.path.clone(),
                });
            }
            info!("Index not found, creating new index at {:?}", config.path);
            fs::create_dir_all(&config.path).map_err(|e| {
                DbError::index_io(&config.path, format!("Failed to create index directory: {}", e))
            })?;
        }

        let items = match load_items(&config.items_path()) {
            Ok(Some(items)) => items,
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Ignoring unreadable item collection: {}", e);
                Self::quarantine(&config.items_path());
                Vec::new()
            }
        };

        let model = match load_model(&config.model_path()) {
            Ok(Some(model)) => Self::accept_model(config, model, items.len()),
            Ok(None) => None,
            Err(e) => {
                warn!("Ignoring unreadable model: {}", e);
                None
            }
        };

        debug!(
            "Loaded {} items, model fitted: {}",
            items.len(),
            model.is_some()
        );

        Ok(Self {
            config: config.clone(),
            persistent: true,
            corpus: RwLock::new(Corpus { items, model }),
        })
    }

    /// Create an index that never touches disk.
    pub fn in_memory(config: &IndexConfig) -> Self {
        Self {
            config: config.clone(),
            persistent: false,
            corpus: RwLock::new(Corpus::default()),
        }
    }

    /// Move an unreadable artifact to `<name>.corrupt` so later writes
    /// cannot overwrite it.
    fn quarantine(path: &Path) {
        let target = sibling_path(path, "corrupt");
        match fs::rename(path, &target) {
            Ok(()) => warn!("Moved unreadable artifact to {}", target.display()),
            Err(e) => warn!("Failed to move aside {}: {}", path.display(), e),
        }
    }

    /// Accept a loaded model only if it matches the corpus and settings.
    fn accept_model(config: &IndexConfig, model: ModelFile, item_count: usize) -> Option<FittedModel> {
        if model.vectors.len() != item_count {
            warn!(
                "Model has {} vectors but corpus has {} items; search disabled until rebuild",
                model.vectors.len(),
                item_count
            );
            return None;
        }
        if model.vectorizer.config() != &config.vectorizer {
            warn!("Model was fitted with different vectorizer settings; search disabled until rebuild");
            return None;
        }
        Some(FittedModel::new(model.vectorizer, model.vectors))
    }

    fn read(&self) -> DbResult<RwLockReadGuard<'_, Corpus>> {
        self.corpus
            .read()
            .map_err(|e| DbError::internal(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> DbResult<RwLockWriteGuard<'_, Corpus>> {
        self.corpus
            .write()
            .map_err(|e| DbError::internal(format!("Failed to acquire write lock: {}", e)))
    }

    /// Re-fit the model over every item.
    fn refit(&self, corpus: &mut Corpus) {
        if corpus.items.is_empty() {
            corpus.model = None;
            return;
        }

        let texts: Vec<&str> = corpus.items.iter().map(|item| item.text.as_str()).collect();
        let (vectorizer, vectors) =
            TfidfVectorizer::fit_transform(self.config.vectorizer.clone(), &texts);
        debug!(
            "Re-fitted model: {} items, {} terms",
            vectors.len(),
            vectorizer.vocabulary_size()
        );
        corpus.model = Some(FittedModel::new(vectorizer, vectors));
    }

    /// Write both artifacts. Failures are logged and the in-memory state kept.
    fn persist(&self, corpus: &Corpus) {
        if !self.persistent {
            return;
        }

        if let Err(e) = save_items(&self.config.items_path(), &corpus.items) {
            warn!("Failed to persist items: {}", e);
        }

        match &corpus.model {
            Some(model) => {
                let file = ModelFile::new(model.vectorizer.clone(), model.vectors.clone());
                if let Err(e) = save_model(&self.config.model_path(), &file) {
                    warn!("Failed to persist model: {}", e);
                }
            }
            None => {
                if let Err(e) = remove_artifact(&self.config.model_path()) {
                    warn!("Failed to remove stale model: {}", e);
                }
            }
        }
    }

    fn append(&self, inserts: Vec<ItemInsert>) -> DbResult<Vec<String>> {
        let mut corpus = self.write()?;

        let mut ids = Vec::with_capacity(inserts.len());
        for insert in inserts {
            let item = Item::from_insert(insert, corpus.items.len());
            ids.push(item.id.clone());
            corpus.items.push(item);
        }

        self.refit(&mut corpus);
        self.persist(&corpus);
        Ok(ids)
    }
}

impl SimilarityBackend for TfidfIndex {
    fn add(&self, insert: ItemInsert) -> DbResult<String> {
        let mut ids = self.append(vec![insert])?;
        ids.pop()
            .ok_or_else(|| DbError::internal("Insert produced no item id"))
    }

    fn add_batch(&self, inserts: Vec<ItemInsert>) -> DbResult<Vec<String>> {
        if inserts.is_empty() {
            return Ok(Vec::new());
        }
        self.append(inserts)
    }

    fn search(&self, query: &str, limit: usize) -> DbResult<Vec<SearchHit>> {
        if query.trim().is_empty() {
            return Err(DbError::invalid_query("query text is empty"));
        }

        let corpus = self.read()?;
        let Some(model) = &corpus.model else {
            debug!("Search skipped: no fitted model");
            return Ok(Vec::new());
        };

        let query_vector = model.vectorizer.transform_with(&model.tokenizer, query);
        let ranked = rank(
            &query_vector,
            &model.vectors,
            limit,
            self.config.min_similarity,
        );

        let hits = ranked
            .into_iter()
            .filter_map(|(row, score)| {
                corpus.items.get(row).map(|item| SearchHit {
                    item: item.clone(),
                    score,
                })
            })
            .collect::<Vec<_>>();

        debug!("Search returned {} hits", hits.len());
        Ok(hits)
    }

    fn get_all(&self, limit: usize) -> DbResult<Vec<Item>> {
        let corpus = self.read()?;
        Ok(corpus.items.iter().take(limit).cloned().collect())
    }

    fn count(&self) -> DbResult<usize> {
        Ok(self.read()?.items.len())
    }

    fn reset(&self) -> DbResult<()> {
        let mut corpus = self.write()?;

        if self.persistent {
            remove_artifact(&self.config.model_path())?;
            remove_artifact(&self.config.items_path())?;
        }
        *corpus = Corpus::default();

        info!("Index reset");
        Ok(())
    }

    fn rebuild(&self) -> DbResult<()> {
        let mut corpus = self.write()?;
        self.refit(&mut corpus);
        self.persist(&corpus);
        info!("Index rebuilt over {} items", corpus.items.len());
        Ok(())
    }

    fn stats(&self) -> DbResult<IndexStats> {
        let corpus = self.read()?;
        Ok(IndexStats {
            backend: self.backend_name().to_string(),
            total_items: corpus.items.len(),
            vocabulary_size: corpus
                .model
                .as_ref()
                .map(|m| m.vectorizer.vocabulary_size())
                .unwrap_or(0),
            model_fitted: corpus.model.is_some(),
            min_similarity: self.config.min_similarity,
            max_features: self.config.vectorizer.max_features,
            data_dir: self.persistent.then(|| self.config.path.clone()),
        })
    }

    fn backend_name(&self) -> &'static str {
        if self.persistent {
            DEFAULT_BACKEND
        } else {
            MEMORY_BACKEND
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn open(dir: &TempDir) -> TfidfIndex {
        TfidfIndex::open(&IndexConfig::new(dir.path())).unwrap()
    }

    fn seed(index: &TfidfIndex) {
        index
            .add(ItemInsert::new("Cats sleep most of the day"))
            .unwrap();
        index.add(ItemInsert::new("Cats hunt small rodents")).unwrap();
    }

    #[test]
    fn test_add_and_count() {
        let dir = TempDir::new().unwrap();
        let index = open(&dir);

        assert!(index.is_empty().unwrap());
        let id = index.add(ItemInsert::new("Cats purr")).unwrap();

        assert_eq!(id.len(), 32);
        assert_eq!(index.count().unwrap(), 1);
        assert_eq!(index.get_all(10).unwrap()[0].id, id);
    }

    #[test]
    fn test_search_ranks_relevant_item_first() {
        let dir = TempDir::new().unwrap();
        let index = open(&dir);
        seed(&index);

        let hits = index.search("sleeping cats", 5).unwrap();

        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].item.text, "Cats sleep most of the day");
        assert!(hits[0].score > hits[1].score);
        assert!(hits.iter().all(|h| h.score >= 0.1 && h.score <= 1.0 + 1e-6));
    }

    #[test]
    fn test_search_item_text_ranks_itself_first() {
        let dir = TempDir::new().unwrap();
        let index = open(&dir);
        seed(&index);
        index
            .add(ItemInsert::new("A group of cats is called a clowder"))
            .unwrap();

        let hits = index.search("Cats hunt small rodents", 1).unwrap();

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].item.text, "Cats hunt small rodents");
        assert!((hits[0].score - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_search_respects_limit() {
        let dir = TempDir::new().unwrap();
        let index = open(&dir);
        for text in ["cats nap", "cats nap often", "cats nap daily", "cats nap lots"] {
            index.add(ItemInsert::new(text)).unwrap();
        }

        assert_eq!(index.search("cats nap", 2).unwrap().len(), 2);
        assert!(index.search("cats nap", 0).unwrap().is_empty());
    }

    #[test]
    fn test_search_unrelated_query_is_empty() {
        let dir = TempDir::new().unwrap();
        let index = open(&dir);
        seed(&index);

        assert!(index.search("quantum entanglement", 5).unwrap().is_empty());
    }

    #[test]
    fn test_search_empty_query_is_invalid() {
        let dir = TempDir::new().unwrap();
        let index = open(&dir);
        seed(&index);

        assert!(matches!(
            index.search("   ", 5),
            Err(DbError::InvalidQuery { .. })
        ));
    }

    #[test]
    fn test_search_empty_corpus() {
        let dir = TempDir::new().unwrap();
        let index = open(&dir);

        assert!(index.search("cats", 5).unwrap().is_empty());
    }

    #[test]
    fn test_new_vocabulary_searchable_after_add() {
        let dir = TempDir::new().unwrap();
        let index = open(&dir);
        seed(&index);
        assert!(index.search("clowder", 5).unwrap().is_empty());

        index
            .add(ItemInsert::new("A group of cats is called a clowder"))
            .unwrap();
        let hits = index.search("clowder", 5).unwrap();

        assert_eq!(hits.len(), 1);
        assert!(hits[0].item.text.contains("clowder"));
    }

    #[test]
    fn test_add_batch_preserves_order() {
        let dir = TempDir::new().unwrap();
        let index = open(&dir);

        let ids = index
            .add_batch(vec![
                ItemInsert::new("first fact"),
                ItemInsert::new("second fact"),
                ItemInsert::new("third fact"),
            ])
            .unwrap();
        let items = index.get_all(10).unwrap();

        assert_eq!(ids.len(), 3);
        let stored: Vec<String> = items.iter().map(|i| i.id.clone()).collect();
        assert_eq!(stored, ids);
        assert!(index.add_batch(Vec::new()).unwrap().is_empty());
    }

    #[test]
    fn test_get_all_limit() {
        let dir = TempDir::new().unwrap();
        let index = open(&dir);
        seed(&index);

        assert_eq!(index.get_all(1).unwrap().len(), 1);
        assert_eq!(index.get_all(100).unwrap().len(), 2);
        assert!(index.get_all(0).unwrap().is_empty());
    }

    #[test]
    fn test_reload_restores_items_and_search() {
        let dir = TempDir::new().unwrap();
        let (ids, before) = {
            let index = open(&dir);
            seed(&index);
            let ids: Vec<String> = index.get_all(10).unwrap().into_iter().map(|i| i.id).collect();
            let before = index.search("sleeping cats", 5).unwrap();
            (ids, before)
        };

        let reopened = open(&dir);
        let reloaded: Vec<String> = reopened
            .get_all(10)
            .unwrap()
            .into_iter()
            .map(|i| i.id)
            .collect();
        let after = reopened.search("sleeping cats", 5).unwrap();

        assert_eq!(reloaded, ids);
        assert_eq!(after.len(), before.len());
        for (a, b) in after.iter().zip(before.iter()) {
            assert_eq!(a.item.id, b.item.id);
            assert!((a.score - b.score).abs() < 1e-6);
        }
    }

    #[test]
    fn test_missing_model_disables_search_until_add() {
        let dir = TempDir::new().unwrap();
        {
            let index = open(&dir);
            seed(&index);
        }
        fs::remove_file(dir.path().join("model.bin")).unwrap();

        let index = open(&dir);
        assert_eq!(index.count().unwrap(), 2);
        assert!(!index.stats().unwrap().model_fitted);
        assert!(index.search("sleeping cats", 5).unwrap().is_empty());

        index.add(ItemInsert::new("Cats groom themselves")).unwrap();
        assert!(!index.search("sleeping cats", 5).unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_model_disables_search_until_rebuild() {
        let dir = TempDir::new().unwrap();
        {
            let index = open(&dir);
            seed(&index);
        }
        fs::write(dir.path().join("model.bin"), b"\xff corrupted").unwrap();

        let index = open(&dir);
        assert!(index.search("sleeping cats", 5).unwrap().is_empty());

        index.rebuild().unwrap();
        assert_eq!(index.search("sleeping cats", 5).unwrap().len(), 2);
    }

    #[test]
    fn test_model_length_mismatch_is_discarded() {
        let dir = TempDir::new().unwrap();
        let model_copy = {
            let index = open(&dir);
            index.add(ItemInsert::new("Cats sleep a lot")).unwrap();
            let copy = fs::read(dir.path().join("model.bin")).unwrap();
            index.add(ItemInsert::new("Cats hunt at dusk")).unwrap();
            copy
        };
        // One-vector model next to a two-item collection
        fs::write(dir.path().join("model.bin"), model_copy).unwrap();

        let index = open(&dir);
        assert_eq!(index.count().unwrap(), 2);
        assert!(!index.stats().unwrap().model_fitted);
        assert!(index.search("cats sleep", 5).unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_items_loads_empty() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("items.json"), "not json").unwrap();

        let index = open(&dir);
        assert_eq!(index.count().unwrap(), 0);
    }

    #[test]
    fn test_truncated_items_are_moved_aside() {
        let dir = TempDir::new().unwrap();
        let items_path = dir.path().join("items.json");
        let corrupt_path = dir.path().join("items.json.corrupt");
        {
            let index = open(&dir);
            seed(&index);
            index.add(ItemInsert::new("Cats have five toes on front paws")).unwrap();
        }
        let full = fs::read(&items_path).unwrap();
        let torn = full[..full.len() / 2].to_vec();
        fs::write(&items_path, &torn).unwrap();

        let index = open(&dir);
        assert_eq!(index.count().unwrap(), 0);
        assert_eq!(fs::read(&corrupt_path).unwrap(), torn);

        index.add(ItemInsert::new("Cats purr")).unwrap();
        drop(index);

        assert_eq!(open(&dir).count().unwrap(), 1);
        assert_eq!(fs::read(&corrupt_path).unwrap(), torn);
    }

    #[test]
    fn test_oversized_model_claim_loads_unfitted() {
        let dir = TempDir::new().unwrap();
        {
            let index = open(&dir);
            seed(&index);
        }
        // Valid header, then a vocabulary length of 2^40
        let mut bytes = vec![1u8, 251, 0xe8, 0x03, 0, 1, 2, 253];
        bytes.extend_from_slice(&(1u64 << 40).to_le_bytes());
        fs::write(dir.path().join("model.bin"), &bytes).unwrap();

        let index = TfidfIndex::open(&IndexConfig::new(dir.path())).unwrap();
        let stats = index.stats().unwrap();

        assert_eq!(stats.total_items, 2);
        assert!(!stats.model_fitted);
        assert!(index.search("sleeping cats", 5).unwrap().is_empty());
    }

    #[test]
    fn test_failed_reset_keeps_items() {
        let dir = TempDir::new().unwrap();
        let index = open(&dir);
        seed(&index);

        let items_path = dir.path().join("items.json");
        fs::remove_file(&items_path).unwrap();
        fs::create_dir(&items_path).unwrap();
        fs::write(items_path.join("keep"), b"x").unwrap();

        assert!(index.reset().is_err());
        assert_eq!(index.count().unwrap(), 2);
        assert_eq!(index.get_all(10).unwrap().len(), 2);
    }

    #[test]
    fn test_reset_clears_everything() {
        let dir = TempDir::new().unwrap();
        let index = open(&dir);
        seed(&index);

        index.reset().unwrap();

        assert_eq!(index.count().unwrap(), 0);
        assert!(index.search("cats", 5).unwrap().is_empty());
        assert!(!dir.path().join("items.json").exists());
        assert!(!dir.path().join("model.bin").exists());
        assert_eq!(open(&dir).count().unwrap(), 0);
    }

    #[test]
    fn test_open_missing_without_create() {
        let dir = TempDir::new().unwrap();
        let config = IndexConfig::new(dir.path().join("absent")).with_create_if_missing(false);

        assert!(matches!(
            TfidfIndex::open(&config),
            Err(DbError::IndexNotFound { .. })
        ));
    }

    #[test]
    fn test_in_memory_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let index = TfidfIndex::in_memory(&IndexConfig::new(dir.path()));
        seed(&index);

        assert_eq!(index.backend_name(), "memory");
        assert_eq!(index.search("sleeping cats", 5).unwrap().len(), 2);
        assert!(!dir.path().join("items.json").exists());
        assert!(index.stats().unwrap().data_dir.is_none());
    }

    #[test]
    fn test_stats() {
        let dir = TempDir::new().unwrap();
        let index = open(&dir);
        seed(&index);

        let stats = index.stats().unwrap();
        assert_eq!(stats.backend, "tfidf");
        assert_eq!(stats.total_items, 2);
        assert_eq!(stats.vocabulary_size, 6);
        assert!(stats.model_fitted);
        assert_eq!(stats.max_features, 1000);
    }

    #[test]
    fn test_concurrent_adds_are_all_kept() {
        let dir = TempDir::new().unwrap();
        let index = Arc::new(open(&dir));

        let handles: Vec<_> = (0..4)
            .map(|t| {
                let index = Arc::clone(&index);
                std::thread::spawn(move || {
                    for i in 0..5 {
                        index
                            .add(ItemInsert::new(format!("cat fact {} from thread {}", i, t)))
                            .unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(index.count().unwrap(), 20);
        assert_eq!(open(&dir).count().unwrap(), 20);
    }
}
