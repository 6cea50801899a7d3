//! Prompt building and metadata for generated facts.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::constants::{GENERAL_TOPIC, META_MODEL, META_QUERY, META_TIMESTAMP};

/// Build the generation prompt for an optional topic.
///
/// A blank topic is treated as no topic.
pub fn build_prompt(topic: Option<&str>) -> String {
    match normalize_topic(topic) {
        Some(topic) => format!(
            "Generate an interesting and educational fact about cats related to: {}. Make it engaging and informative.",
            topic
        ),
        None => "Generate a fascinating, educational, and fun fact about cats. Make it interesting and informative."
            .to_string(),
    }
}

/// Trim a topic, dropping it if nothing is left.
pub fn normalize_topic(topic: Option<&str>) -> Option<&str> {
    topic.map(str::trim).filter(|t| !t.is_empty())
}

/// Metadata stored with a generated fact.
pub fn generated_metadata(
    topic: Option<&str>,
    model: &str,
    timestamp: &DateTime<Utc>,
) -> BTreeMap<String, String> {
    let mut metadata = BTreeMap::new();
    metadata.insert(
        META_QUERY.to_string(),
        normalize_topic(topic).unwrap_or(GENERAL_TOPIC).to_string(),
    );
    metadata.insert(META_MODEL.to_string(), model.to_string());
    metadata.insert(META_TIMESTAMP.to_string(), timestamp.to_rfc3339());
    metadata
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topic_prompt() {
        let prompt = build_prompt(Some("hunting"));
        assert_eq!(
            prompt,
            "Generate an interesting and educational fact about cats related to: hunting. Make it engaging and informative."
        );
    }

    #[test]
    fn test_general_prompt() {
        assert_eq!(build_prompt(None), build_prompt(Some("   ")));
        assert!(build_prompt(None).starts_with("Generate a fascinating"));
    }

    #[test]
    fn test_generated_metadata() {
        let now = Utc::now();
        let metadata = generated_metadata(None, "claude-3-haiku-20240307", &now);

        assert_eq!(metadata.get("query").map(String::as_str), Some("general"));
        assert_eq!(
            metadata.get("model").map(String::as_str),
            Some("claude-3-haiku-20240307")
        );
        assert_eq!(metadata.get("timestamp"), Some(&now.to_rfc3339()));

        let topical = generated_metadata(Some(" sleeping "), "m", &now);
        assert_eq!(topical.get("query").map(String::as_str), Some("sleeping"));
    }
}
