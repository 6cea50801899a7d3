//! # whisker-model
//!
//! Text generation layer for Whisker.
//!
//! Generators sit behind the [`TextGenerator`] trait so the core crate never
//! depends on a provider's wire format.
//!
//! ## Features
//!
//! - `anthropic` (default): Anthropic Messages API client
//!
//! ## Usage
//!
//! ```ignore
//! use whisker_model::{create_generator, GenerationConfig};
//!
//! let config = GenerationConfig::default();
//! let generator = create_generator(&config)?;
//!
//! let generation = generator.generate(&config.request("Tell me a cat fact"))?;
//! println!("{}", generation.text);
//! ```

pub mod config;
pub mod error;

#[cfg(feature = "anthropic")]
mod anthropic;

pub use config::{
    Generation, GenerationConfig, GenerationProviderKind, GenerationRequest, DEFAULT_API_KEY_ENV,
    DEFAULT_BASE_URL, DEFAULT_MAX_TOKENS, DEFAULT_MODEL_ID, DEFAULT_TEMPERATURE,
};
pub use error::{ModelError, ModelResult};

#[cfg(feature = "anthropic")]
pub use anthropic::{AnthropicGenerator, ANTHROPIC_VERSION};

// ============================================================================
// TextGenerator Trait
// ============================================================================

/// Trait for text generation models.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` to allow use across threads.
pub trait TextGenerator: Send + Sync + std::fmt::Debug {
    /// Generate text for a single prompt.
    fn generate(&self, request: &GenerationRequest) -> ModelResult<Generation>;

    /// Get the model ID.
    fn model_id(&self) -> &str;
}

// ============================================================================
// Factory Functions
// ============================================================================

/// Create a text generator from configuration.
///
/// # Errors
///
/// Returns `ModelError` if the API key is missing or the config is invalid.
#[cfg(feature = "anthropic")]
pub fn create_generator(config: &GenerationConfig) -> ModelResult<Box<dyn TextGenerator>> {
    match config.provider {
        GenerationProviderKind::Anthropic => Ok(Box::new(AnthropicGenerator::new(config)?)),
    }
}

#[cfg(not(feature = "anthropic"))]
pub fn create_generator(config: &GenerationConfig) -> ModelResult<Box<dyn TextGenerator>> {
    Err(ModelError::ProviderNotAvailable {
        provider: config.provider.to_string(),
        reason: "No generation providers available. Enable the 'anthropic' feature.".to_string(),
    })
}
