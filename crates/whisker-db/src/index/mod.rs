//! Similarity index module for whisker-db.
//!
//! ## Usage
//!
//! ```ignore
//! use whisker_db::index::{open_index, IndexConfig, ItemInsert};
//!
//! let index = open_index(&IndexConfig::new("/path/to/data"))?;
//! index.add(ItemInsert::new("Cats sleep 12 to 16 hours a day"))?;
//!
//! let hits = index.search("sleeping cats", 5)?;
//! ```

mod backend;
mod config;
mod storage;
mod tfidf_index;
mod traits;

pub use backend::{available_backends, open_index};
pub use config::{IndexConfig, DEFAULT_BACKEND, ITEMS_FILENAME, MEMORY_BACKEND, MODEL_FILENAME};
pub use storage::{ITEMS_VERSION, MAX_MODEL_BYTES, MODEL_VERSION};
pub use tfidf_index::TfidfIndex;
pub use traits::{item_id, IndexStats, Item, ItemInsert, SearchHit, SimilarityBackend};
