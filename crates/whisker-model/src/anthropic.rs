//! Anthropic Messages API generator.
//!
//! Sends one user message per request to `{base_url}/v1/messages` and
//! returns the first text block of the reply.

use std::time::Duration;

use reqwest::blocking::Client;
use serde_json::{json, Value};
use tracing::{debug, trace};

use crate::config::{Generation, GenerationConfig, GenerationRequest};
use crate::error::{ModelError, ModelResult};
use crate::TextGenerator;

/// API version header value.
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Text generator backed by the Anthropic Messages API.
pub struct AnthropicGenerator {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl std::fmt::Debug for AnthropicGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnthropicGenerator")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl AnthropicGenerator {
    /// Create a generator, reading the API key from `config.api_key_env`.
    pub fn new(config: &GenerationConfig) -> ModelResult<Self> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| ModelError::MissingApiKey {
                env: config.api_key_env.clone(),
            })?;
        Self::with_api_key(config, api_key)
    }

    /// Create a generator with an explicit API key.
    pub fn with_api_key(config: &GenerationConfig, api_key: impl Into<String>) -> ModelResult<Self> {
        config.validate()?;

        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ModelError::Request {
                model: config.model.clone(),
                message: format!("Failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/messages", self.base_url)
    }
}

/// Build the JSON body of a Messages API request.
pub fn build_request_body(model: &str, request: &GenerationRequest) -> Value {
    json!({
        "model": model,
        "max_tokens": request.max_tokens,
        "temperature": request.temperature,
        "messages": [
            { "role": "user", "content": request.prompt }
        ]
    })
}

/// Extract the generated text and usage from a Messages API response.
pub fn parse_response(model: &str, data: &Value) -> ModelResult<Generation> {
    let text = data["content"][0]["text"]
        .as_str()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .ok_or_else(|| ModelError::EmptyResponse {
            model: model.to_string(),
        })?;

    let usage = &data["usage"];
    Ok(Generation {
        text: text.to_string(),
        model: data["model"].as_str().unwrap_or(model).to_string(),
        stop_reason: data["stop_reason"].as_str().map(str::to_string),
        input_tokens: usage["input_tokens"].as_u64().unwrap_or(0) as u32,
        output_tokens: usage["output_tokens"].as_u64().unwrap_or(0) as u32,
    })
}

/// Pull a readable message out of an error response body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}

impl TextGenerator for AnthropicGenerator {
    fn generate(&self, request: &GenerationRequest) -> ModelResult<Generation> {
        let body = build_request_body(&self.model, request);
        trace!("Anthropic request: {}", body);

        let response = self
            .client
            .post(self.endpoint())
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .map_err(|e| ModelError::Request {
                model: self.model.clone(),
                message: e.to_string(),
            })?;

        let status = response.status();
        let text = response.text().map_err(|e| ModelError::Request {
            model: self.model.clone(),
            message: format!("Failed to read response: {}", e),
        })?;

        if !status.is_success() {
            return Err(ModelError::Api {
                model: self.model.clone(),
                status: status.as_u16(),
                message: error_message(&text),
            });
        }

        let data: Value = serde_json::from_str(&text)?;
        let generation = parse_response(&self.model, &data)?;
        debug!(
            "Generated {} chars with {} ({} output tokens)",
            generation.text.len(),
            generation.model,
            generation.output_tokens
        );
        Ok(generation)
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> GenerationRequest {
        GenerationConfig::default().request("Generate a fact about cats")
    }

    #[test]
    fn test_request_body_shape() {
        let body = build_request_body("claude-3-haiku-20240307", &request());

        assert_eq!(body["model"], "claude-3-haiku-20240307");
        assert_eq!(body["max_tokens"], 150);
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][0]["content"], "Generate a fact about cats");
        assert!((body["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_parse_response() {
        let data = json!({
            "id": "msg_01",
            "type": "message",
            "model": "claude-3-haiku-20240307",
            "content": [{ "type": "text", "text": "  Cats spend 70% of their lives asleep.\n" }],
            "stop_reason": "end_turn",
            "usage": { "input_tokens": 24, "output_tokens": 12 }
        });

        let generation = parse_response("fallback", &data).unwrap();

        assert_eq!(generation.text, "Cats spend 70% of their lives asleep.");
        assert_eq!(generation.model, "claude-3-haiku-20240307");
        assert_eq!(generation.stop_reason.as_deref(), Some("end_turn"));
        assert_eq!(generation.input_tokens, 24);
        assert_eq!(generation.output_tokens, 12);
    }

    #[test]
    fn test_parse_response_without_text() {
        let data = json!({ "content": [] });
        assert!(matches!(
            parse_response("m", &data),
            Err(ModelError::EmptyResponse { .. })
        ));

        let blank = json!({ "content": [{ "type": "text", "text": "   " }] });
        assert!(parse_response("m", &blank).is_err());
    }

    #[test]
    fn test_error_message_extraction() {
        let body = r#"{"type":"error","error":{"type":"authentication_error","message":"invalid x-api-key"}}"#;
        assert_eq!(error_message(body), "invalid x-api-key");
        assert_eq!(error_message("Bad Gateway "), "Bad Gateway");
    }

    #[test]
    fn test_missing_api_key() {
        let config = GenerationConfig {
            api_key_env: "WHISKER_TEST_UNSET_API_KEY".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            AnthropicGenerator::new(&config),
            Err(ModelError::MissingApiKey { .. })
        ));
    }

    #[test]
    fn test_debug_hides_key() {
        let generator =
            AnthropicGenerator::with_api_key(&GenerationConfig::default(), "sk-secret").unwrap();
        let debug = format!("{:?}", generator);

        assert!(!debug.contains("sk-secret"));
        assert_eq!(generator.endpoint(), "https://api.anthropic.com/v1/messages");
        assert_eq!(generator.model_id(), "claude-3-haiku-20240307");
    }
}
