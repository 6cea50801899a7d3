//! # whisker-db
//!
//! Storage and retrieval layer for Whisker: a TF-IDF similarity index over
//! short text items.
//!
//! ## Architecture
//!
//! ```text
//! whisker-cli → whisker-core → (traits)
//!                   ↑
//!              whisker-db (implements SimilarityBackend)
//!              whisker-model (implements TextGenerator)
//! ```
//!
//! ## Modules
//!
//! - `tfidf`: tokenizer, vectorizer and cosine ranking
//! - `index`: the item store, its persistence and the backend factory
//!
//! ## Usage
//!
//! ```ignore
//! use whisker_db::index::{open_index, IndexConfig, ItemInsert};
//!
//! let index = open_index(&IndexConfig::new("/path/to/data"))?;
//! index.add(ItemInsert::new("A group of cats is called a clowder"))?;
//!
//! for hit in index.search("what is a group of cats called", 5)? {
//!     println!("{:.3} {}", hit.score, hit.item.text);
//! }
//! ```

pub mod error;
pub mod index;
pub mod tfidf;

pub use error::{DbError, DbResult};
