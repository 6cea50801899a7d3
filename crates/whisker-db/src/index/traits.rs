//! Index traits and core types.
//!
//! This module defines the contract every similarity backend satisfies and
//! the item types that flow through it.

use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::DbResult;

/// Length of a hex item id.
const ITEM_ID_LEN: usize = 32;

// ============================================================================
// Item
// ============================================================================

/// A stored text item.
///
/// Items are immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Content and time derived identifier.
    pub id: String,

    /// The stored text.
    pub text: String,

    /// Free-form string metadata.
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,

    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl Item {
    /// Create an item from an insert, stamping id and creation time.
    ///
    /// `sequence` is the item's position in the corpus.
    pub fn from_insert(insert: ItemInsert, sequence: usize) -> Self {
        let created_at = Utc::now();
        let id = item_id(&insert.text, &created_at, sequence);
        Self {
            id,
            text: insert.text,
            metadata: insert.metadata,
            created_at,
        }
    }
}

/// Derive an item id from text, creation time and corpus position.
pub fn item_id(text: &str, created_at: &DateTime<Utc>, sequence: usize) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    hasher.update(b"_");
    hasher.update(created_at.to_rfc3339().as_bytes());
    hasher.update(b"_");
    hasher.update(sequence.to_le_bytes());
    let digest = format!("{:x}", hasher.finalize());
    digest[..ITEM_ID_LEN].to_string()
}

// ============================================================================
// ItemInsert
// ============================================================================

/// A text item to add to the index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemInsert {
    /// The text to store.
    pub text: String,

    /// Metadata attached to the item.
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

impl ItemInsert {
    /// Create a new insert with no metadata.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            metadata: BTreeMap::new(),
        }
    }

    /// Add one metadata entry.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Merge a metadata map.
    pub fn with_metadata_map(mut self, metadata: BTreeMap<String, String>) -> Self {
        self.metadata.extend(metadata);
        self
    }
}

// ============================================================================
// SearchHit
// ============================================================================

/// A single result from a similarity search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    /// The matched item.
    pub item: Item,

    /// Cosine similarity to the query, in `[0, 1]`.
    pub score: f32,
}

// ============================================================================
// IndexStats
// ============================================================================

/// Statistics about an index.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexStats {
    /// Backend name.
    pub backend: String,
    /// Number of stored items.
    pub total_items: usize,
    /// Number of terms in the fitted vocabulary.
    pub vocabulary_size: usize,
    /// Whether a model matching the corpus is loaded.
    pub model_fitted: bool,
    /// Minimum similarity for search results.
    pub min_similarity: f32,
    /// Vocabulary cap.
    pub max_features: usize,
    /// Directory holding the persisted artifacts, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

// ============================================================================
// SimilarityBackend Trait
// ============================================================================

/// Core trait for similarity index backends.
///
/// ## Implementation Notes
///
/// - Backends must be thread-safe and allow at most one writer at a time.
/// - Every write re-fits the whole model. The total cost of `n` adds is
///   O(n²) in corpus size, which limits backends to small corpora.
/// - `search` returns results sorted by score (best first), equal scores in
///   insertion order.
pub trait SimilarityBackend: Send + Sync {
    /// Add one item and return its id.
    fn add(&self, insert: ItemInsert) -> DbResult<String>;

    /// Add several items with a single re-fit. Returns ids in input order.
    fn add_batch(&self, inserts: Vec<ItemInsert>) -> DbResult<Vec<String>>;

    /// Search for items similar to `query`.
    ///
    /// # Errors
    /// Returns [`DbError::InvalidQuery`](crate::DbError::InvalidQuery) for an empty query.
    fn search(&self, query: &str, limit: usize) -> DbResult<Vec<SearchHit>>;

    /// Get the first `limit` items in insertion order.
    fn get_all(&self, limit: usize) -> DbResult<Vec<Item>>;

    /// Number of stored items.
    fn count(&self) -> DbResult<usize>;

    /// Check if the index is empty.
    fn is_empty(&self) -> DbResult<bool> {
        Ok(self.count()? == 0)
    }

    /// Remove every item, the model and any persisted artifacts.
    fn reset(&self) -> DbResult<()>;

    /// Re-fit the model over the current corpus and persist it.
    fn rebuild(&self) -> DbResult<()>;

    /// Index statistics.
    fn stats(&self) -> DbResult<IndexStats>;

    /// Name of this backend.
    fn backend_name(&self) -> &'static str;
}

// ============================================================================
// Tests
// ============================================================================
