//! Index artifact storage.
//!
//! An index directory holds two artifacts:
//!
//! ```text
//! <data_dir>/
//! ├── items.json   # Item collection (pretty JSON)
//! └── model.bin    # Fitted vectorizer and document vectors (bincode v2)
//! ```
//!
//! Both carry a version number. An artifact with a different version is
//! treated as absent. Writes go to a sibling temp file that is renamed over
//! the artifact, so a reader sees either the old or the new content.

use std::ffi::OsString;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use bincode::config;
use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use super::traits::Item;
use crate::error::{DbError, DbResult};
use crate::tfidf::TfidfVectorizer;

/// Current version of the item collection artifact.
pub const ITEMS_VERSION: u32 = 1;

/// Current version of the model artifact.
pub const MODEL_VERSION: u32 = 1;

/// Largest model artifact that will be decoded.
///
/// Also bounds the lengths a blob may claim, so a corrupt length prefix
/// fails to decode instead of allocating.
pub const MAX_MODEL_BYTES: usize = 256 * 1024 * 1024;

/// On-disk form of the item collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemsFile {
    pub version: u32,
    pub items: Vec<Item>,
}

/// On-disk form of the fitted model.
///
/// `vectors[i]` is the vector of the i-th stored item.
#[derive(Debug, Clone, Encode, Decode)]
pub struct ModelFile {
    pub version: u32,
    pub vectorizer: TfidfVectorizer,
    pub vectors: Vec<Vec<f32>>,
}

impl ModelFile {
    pub fn new(vectorizer: TfidfVectorizer, vectors: Vec<Vec<f32>>) -> Self {
        Self {
            version: MODEL_VERSION,
            vectorizer,
            vectors,
        }
    }
}

fn ensure_parent(path: &Path) -> DbResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            DbError::index_io(parent, format!("Failed to create index directory: {}", e))
        })?;
    }
    Ok(())
}

/// `<path>.<suffix>`, next to `path`.
pub fn sibling_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".");
    name.push(suffix);
    path.with_file_name(name)
}

/// Write `bytes` to a temp file, then rename it over `path`.
fn write_atomic(path: &Path, bytes: &[u8]) -> DbResult<()> {
    ensure_parent(path)?;

    let temp_file = sibling_path(path, "tmp");
    {
        let mut file = fs::File::create(&temp_file).map_err(|e| {
            DbError::index_io(&temp_file, format!("Failed to create temp file: {}", e))
        })?;
        file.write_all(bytes)
            .map_err(|e| DbError::index_io(&temp_file, format!("Failed to write temp file: {}", e)))?;
        file.sync_all()
            .map_err(|e| DbError::index_io(&temp_file, format!("Failed to flush temp file: {}", e)))?;
    }

    fs::rename(&temp_file, path).map_err(|e| {
        let _ = fs::remove_file(&temp_file);
        DbError::index_io(path, format!("Failed to rename temp file: {}", e))
    })
}

// ============================================================================
// Items
// ============================================================================

/// Save the item collection.
pub fn save_items(path: &Path, items: &[Item]) -> DbResult<()> {
    let file = ItemsFile {
        version: ITEMS_VERSION,
        items: items.to_vec(),
    };
    let json = serde_json::to_string_pretty(&file)
        .map_err(|e| DbError::index_parse(path, format!("Failed to serialize items: {}", e)))?;
    write_atomic(path, json.as_bytes())?;

    tracing::debug!("Saved {} items to {}", items.len(), path.display());
    Ok(())
}

/// Load the item collection.
///
/// Returns `None` if the file does not exist or has a different version.
pub fn load_items(path: &Path) -> DbResult<Option<Vec<Item>>> {
    if !path.exists() {
        tracing::debug!("No item collection at {}", path.display());
        return Ok(None);
    }

    let content = fs::read_to_string(path)
        .map_err(|e| DbError::index_io(path, format!("Failed to read items: {}", e)))?;
    let file: ItemsFile = serde_json::from_str(&content)
        .map_err(|e| DbError::index_parse(path, format!("Failed to parse items: {}", e)))?;

    if file.version != ITEMS_VERSION {
        tracing::warn!(
            "Item collection version mismatch: found {}, expected {}",
            file.version,
            ITEMS_VERSION
        );
        return Ok(None);
    }

    tracing::debug!("Loaded {} items from {}", file.items.len(), path.display());
    Ok(Some(file.items))
}

// ============================================================================
// Model
// ============================================================================

/// Save the fitted model and its document vectors.
pub fn save_model(path: &Path, model: &ModelFile) -> DbResult<()> {
    let bytes = bincode::encode_to_vec(model, config::standard())
        .map_err(|e| DbError::index_parse(path, format!("Failed to serialize model: {}", e)))?;
    write_atomic(path, &bytes)?;

    tracing::debug!(
        "Saved model to {}: {} vectors, {} terms",
        path.display(),
        model.vectors.len(),
        model.vectorizer.vocabulary_size()
    );
    Ok(())
}

/// Load the fitted model.
///
/// Returns `None` if the file does not exist or has a different version.
/// Files larger than [`MAX_MODEL_BYTES`] are rejected as unparseable.
pub fn load_model(path: &Path) -> DbResult<Option<ModelFile>> {
    if !path.exists() {
        tracing::debug!("No model at {}", path.display());
        return Ok(None);
    }

    let bytes = fs::read(path)
        .map_err(|e| DbError::index_io(path, format!("Failed to read model: {}", e)))?;
    if bytes.len() > MAX_MODEL_BYTES {
        return Err(DbError::index_parse(
            path,
            format!("Model is {} bytes, limit is {}", bytes.len(), MAX_MODEL_BYTES),
        ));
    }

    let (model, _): (ModelFile, usize) = bincode::decode_from_slice(
        &bytes,
        config::standard().with_limit::<MAX_MODEL_BYTES>(),
    )
    .map_err(|e| DbError::index_parse(path, format!("Failed to deserialize model: {}", e)))?;

    if model.version != MODEL_VERSION {
        tracing::warn!(
            "Model version mismatch: found {}, expected {}. Model will be rebuilt.",
            model.version,
            MODEL_VERSION
        );
        return Ok(None);
    }

    tracing::debug!(
        "Loaded model from {}: {} vectors, {} terms",
        path.display(),
        model.vectors.len(),
        model.vectorizer.vocabulary_size()
    );
    Ok(Some(model))
}

/// Remove an artifact if present.
pub fn remove_artifact(path: &Path) -> DbResult<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(DbError::index_io(
            path,
            format!("Failed to remove artifact: {}", e),
        )),
    }
}

// ============================================================================
// Tests
// ============================================================================
