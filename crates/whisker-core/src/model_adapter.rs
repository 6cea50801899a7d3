//! Adapter layer for whisker-model generators.

use crate::errors::WhiskerError;

/// Convert a whisker-model error to a whisker-core error.
pub fn from_model_error(err: whisker_model::ModelError) -> WhiskerError {
    use whisker_model::ModelError;

    match err {
        ModelError::MissingApiKey { .. } | ModelError::ProviderNotAvailable { .. } => {
            WhiskerError::GeneratorUnavailable {
                reason: err.to_string(),
            }
        }

        ModelError::InvalidConfig { message } => WhiskerError::InvalidConfiguration {
            message,
            hint: "Check the generation section of ~/.whisker/config.yaml".to_string(),
        },

        ModelError::Request { model, message } => WhiskerError::GenerationFailed {
            model,
            reason: message,
        },

        ModelError::Api {
            model,
            status,
            message,
        } => WhiskerError::GenerationFailed {
            model,
            reason: format!("HTTP {}: {}", status, message),
        },

        ModelError::EmptyResponse { model } => WhiskerError::GenerationFailed {
            model,
            reason: "response contained no text".to_string(),
        },

        ModelError::Json(json_err) => WhiskerError::Json(json_err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use whisker_model::ModelError;

    #[test]
    fn test_missing_key_is_unavailable() {
        let err = from_model_error(ModelError::MissingApiKey {
            env: "ANTHROPIC_API_KEY".to_string(),
        });
        match err {
            WhiskerError::GeneratorUnavailable { reason } => {
                assert!(reason.contains("ANTHROPIC_API_KEY"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_api_error_is_generation_failure() {
        let err = from_model_error(ModelError::Api {
            model: "claude-3-haiku-20240307".to_string(),
            status: 529,
            message: "Overloaded".to_string(),
        });
        assert!(err.to_string().contains("HTTP 529: Overloaded"));
    }
}
