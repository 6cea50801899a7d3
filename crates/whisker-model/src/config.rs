//! Configuration types for whisker-model.

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, ModelResult};

/// Default model id.
pub const DEFAULT_MODEL_ID: &str = "claude-3-haiku-20240307";

/// Default API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";

/// Default environment variable holding the API key.
pub const DEFAULT_API_KEY_ENV: &str = "ANTHROPIC_API_KEY";

/// Default token budget for a generated fact.
pub const DEFAULT_MAX_TOKENS: u32 = 150;

/// Default sampling temperature.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

// ============================================================================
// GenerationProviderKind
// ============================================================================

/// Text generation provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationProviderKind {
    /// Anthropic Messages API.
    #[default]
    Anthropic,
}

impl std::fmt::Display for GenerationProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Anthropic => write!(f, "anthropic"),
        }
    }
}

impl std::str::FromStr for GenerationProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "anthropic" | "claude" => Ok(Self::Anthropic),
            _ => Err(format!("Unknown provider: '{}'. Use 'anthropic'.", s)),
        }
    }
}

// ============================================================================
// GenerationConfig
// ============================================================================

/// Configuration for a text generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// Provider to use.
    #[serde(default)]
    pub provider: GenerationProviderKind,

    /// Model id sent to the provider.
    #[serde(default = "default_model")]
    pub model: String,

    /// Maximum tokens to generate.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Sampling temperature.
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// API base URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Environment variable that holds the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

fn default_model() -> String {
    DEFAULT_MODEL_ID.to_string()
}

fn default_max_tokens() -> u32 {
    DEFAULT_MAX_TOKENS
}

fn default_temperature() -> f32 {
    DEFAULT_TEMPERATURE
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_api_key_env() -> String {
    DEFAULT_API_KEY_ENV.to_string()
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            provider: GenerationProviderKind::default(),
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            base_url: default_base_url(),
            api_key_env: default_api_key_env(),
        }
    }
}

impl GenerationConfig {
    /// Build a request for `prompt` with this config's sampling settings.
    pub fn request(&self, prompt: impl Into<String>) -> GenerationRequest {
        GenerationRequest {
            prompt: prompt.into(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        }
    }

    /// Check values the provider would reject.
    pub fn validate(&self) -> ModelResult<()> {
        if self.model.trim().is_empty() {
            return Err(ModelError::InvalidConfig {
                message: "model must not be empty".to_string(),
            });
        }
        if self.max_tokens == 0 {
            return Err(ModelError::InvalidConfig {
                message: "maxTokens must be at least 1".to_string(),
            });
        }
        if !(0.0..=1.0).contains(&self.temperature) {
            return Err(ModelError::InvalidConfig {
                message: format!("temperature must be between 0 and 1, got {}", self.temperature),
            });
        }
        Ok(())
    }
}

// ============================================================================
// Request / response
// ============================================================================

/// A single-prompt generation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// Generated text and usage reported by the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Generation {
    /// Generated text, trimmed.
    pub text: String,
    /// Model that produced the text.
    pub model: String,
    /// Why generation stopped, if reported.
    pub stop_reason: Option<String>,
    pub input_tokens: u32,
    pub output_tokens: u32,
}
