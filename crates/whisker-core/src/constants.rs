//! Common constants used throughout whisker-core.

// ============================================================================
// Directory Names
// ============================================================================

/// The name of the global Whisker directory.
///
/// Located at `~/.whisker/` on Unix-like systems.
pub const WHISKER_HOME_DIR: &str = ".whisker";

/// Global configuration filename inside [`WHISKER_HOME_DIR`].
pub const CONFIG_FILENAME: &str = "config.yaml";

/// Default data subdirectory inside [`WHISKER_HOME_DIR`].
pub const DATA_DIR_NAME: &str = "data";

// ============================================================================
// Limits
// ============================================================================

/// Default number of search results.
pub const DEFAULT_SEARCH_LIMIT: usize = 5;

/// Default number of facts returned by `list`.
pub const DEFAULT_LIST_LIMIT: usize = 20;

/// Largest accepted result limit.
pub const MAX_RESULT_LIMIT: usize = 1000;

// ============================================================================
// Generation
// ============================================================================

/// Topics used by the demo run, in order.
pub const DEFAULT_DEMO_TOPICS: &[&str] = &[
    "behavior",
    "hunting",
    "sleeping",
    "communication",
    "history",
];

/// Pause between demo generations, in milliseconds.
pub const DEFAULT_DEMO_DELAY_MS: u64 = 1000;

/// Topic recorded for facts generated without a topic.
pub const GENERAL_TOPIC: &str = "general";

// ============================================================================
// Metadata
// ============================================================================

/// Metadata key for the topic or query a fact answers.
pub const META_QUERY: &str = "query";

/// Metadata key for the seed category.
pub const META_CATEGORY: &str = "category";

/// Metadata key for the producing model.
pub const META_MODEL: &str = "model";

/// Metadata key for the creation timestamp (RFC 3339).
pub const META_TIMESTAMP: &str = "timestamp";

/// Metadata key for the fact source.
pub const META_SOURCE: &str = "source";

/// Model value recorded on seed facts.
pub const SEED_MODEL: &str = "pre-seeded";

/// Source value recorded on seed facts.
pub const SEED_SOURCE: &str = "educational_database";
