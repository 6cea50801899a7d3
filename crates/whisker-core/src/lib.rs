//! # whisker-core
//!
//! **Whisker** – core engine library for a searchable store of cat facts.
//!
//! This crate wires the TF-IDF fact index from `whisker-db` and the text
//! generator from `whisker-model` into a single engine consumed by the
//! `whisker` CLI.
//!
//! ## Main Types
//!
//! - [`WhiskerEngine`] – the main entry point for all Whisker operations
//! - [`GlobalConfig`] – user configuration from `~/.whisker/config.yaml`
//! - [`WhiskerError`] – domain-specific error type
//!
//! ## Modules
//!
//! - [`config`] – configuration types
//! - [`engine`] – the WhiskerEngine implementation
//! - [`errors`] – error types
//! - [`seed`] – the built-in educational fact collection
//! - [`generate`] – prompt construction and metadata for generated facts
//! - [`types`] – result types returned by the engine
//!
//! ## Example
//!
//! ```ignore
//! use whisker_core::WhiskerEngine;
//! use std::collections::BTreeMap;
//!
//! let engine = WhiskerEngine::with_defaults()?;
//! engine.add_fact("Cats sleep 12 to 16 hours a day", BTreeMap::new())?;
//!
//! for hit in engine.search("how long do cats sleep", Some(3))? {
//!     println!("{:.3} {}", hit.score, hit.item.text);
//! }
//! ```

// Modules
pub mod config;
pub mod constants;
pub mod db_adapter;
pub mod engine;
pub mod errors;
pub mod generate;
pub mod model_adapter;
pub mod seed;
pub mod types;

// Re-exports for convenience
pub use config::{GenerationSection, GlobalConfig, IndexSection, SearchSection};
pub use constants::{
    CONFIG_FILENAME, DATA_DIR_NAME, DEFAULT_LIST_LIMIT, DEFAULT_SEARCH_LIMIT, MAX_RESULT_LIMIT,
    WHISKER_HOME_DIR,
};
pub use engine::WhiskerEngine;
pub use errors::WhiskerError;
pub use seed::{category_description, facts_by_category, seed_categories, seed_facts, SeedFact};
pub use types::{GeneratedFact, SeedResult, StatsReport};

// whisker-db adapter - for bridging the storage layer
pub use db_adapter::{from_db_error, IntoWhiskerResult};
pub use whisker_db::index::{Item, SearchHit};

// whisker-model adapter - for bridging the generation layer
pub use model_adapter::from_model_error;
pub use whisker_model::{Generation, GenerationConfig, GenerationRequest, TextGenerator};
