use std::env;

use serde::{Deserialize, Serialize};

use crate::parse_var;

fn default_api_base() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_model() -> String {
    "gemini-2.0-flash-preview-image-generation".to_string()
}

fn default_timeout_seconds() -> u64 {
    120
}

fn default_temperature() -> f32 {
    0.9
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiConfig {
    /// Only ever read from the environment
    #[serde(skip)]
    pub api_key: String,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

impl GeminiConfig {
    pub fn new() -> Self {
        let mut config = GeminiConfig::default();
        config.apply_env_with(&|name: &str| env::var(name).ok());
        config
    }

    /// Override from `GEMINI_*` variables. The API key is always replaced,
    /// since profiles never carry one.
    pub fn apply_env_with(&mut self, lookup: &impl Fn(&str) -> Option<String>) {
        self.api_key = api_key_with(lookup).unwrap_or_default();

        if let Some(v) = lookup("GEMINI_API_BASE").filter(|v| !v.trim().is_empty()) {
            self.api_base = v.trim().to_string();
        }
        if let Some(v) = lookup("GEMINI_MODEL").filter(|v| !v.trim().is_empty()) {
            self.model = v.trim().to_string();
        }
        if let Some(v) = parse_var(lookup, "GEMINI_TIMEOUT_SECONDS") {
            self.timeout_seconds = v;
        }
        if let Some(v) = parse_var(lookup, "GEMINI_TEMPERATURE") {
            self.temperature = v;
        }
    }

    /// Endpoint for a single-shot generation call
    pub fn generate_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.api_base.trim_end_matches('/'),
            self.model
        )
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_base: default_api_base(),
            model: default_model(),
            timeout_seconds: default_timeout_seconds(),
            temperature: default_temperature(),
        }
    }
}

/// `GEMINI_API_KEY`, falling back to `API_KEY`. Blank values count as unset.
fn api_key_with(lookup: &impl Fn(&str) -> Option<String>) -> Option<String> {
    ["GEMINI_API_KEY", "API_KEY"]
        .into_iter()
        .filter_map(lookup)
        .map(|key| key.trim().to_string())
        .find(|key| !key.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_gemini_key_falls_back_to_api_key() {
        let mut config = GeminiConfig::default();
        config.apply_env_with(&|name: &str| match name {
            "GEMINI_API_KEY" => Some("  ".to_string()),
            "API_KEY" => Some("fallback".to_string()),
            _ => None,
        });
        assert_eq!(config.api_key, "fallback");
    }

    #[test]
    fn generate_url_joins_base_and_model() {
        let config = GeminiConfig {
            api_base: "http://127.0.0.1:9000/v1beta/".to_string(),
            model: "story-model".to_string(),
            ..GeminiConfig::default()
        };
        assert_eq!(
            config.generate_url(),
            "http://127.0.0.1:9000/v1beta/models/story-model:generateContent"
        );
    }
}
