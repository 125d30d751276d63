use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use storytime_config::gemini::GeminiConfig;
use storytime_core::{Category, story_prompt};
use storytime_types::IllustratedStory;

use crate::response::{ErrorEnvelope, GenerateRequest, GenerateResponse};
use crate::{
    AUTHENTICATION_MESSAGE, ProviderMetadata, RATE_LIMIT_MESSAGE, StoryError, StoryGenerator,
};

#[derive(Clone)]
pub struct GeminiStoryClient {
    client: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiStoryClient {
    pub fn new(config: GeminiConfig) -> Result<Self, StoryError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }
}

#[async_trait]
impl StoryGenerator for GeminiStoryClient {
    async fn generate_story(&self, category: &Category) -> Result<IllustratedStory, StoryError> {
        if self.config.api_key.is_empty() {
            return Err(StoryError::MissingApiKey);
        }

        let prompt = story_prompt(category);
        let body = GenerateRequest::new(&prompt, self.config.temperature);

        tracing::info!(
            "Requesting story for '{}' from {}",
            category,
            self.config.model
        );

        let response = self
            .client
            .post(self.config.generate_url())
            .header("x-goog-api-key", &self.config.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Story service answered {}", status);

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(status_error(status, &text));
        }

        let parsed: GenerateResponse = response.json().await.map_err(|e| StoryError::Api {
            status: status.as_u16(),
            message: format!("Failed to parse response: {}", e),
        })?;

        let story = parsed.into_story()?;
        tracing::info!(
            "Received '{}' with {} illustration(s)",
            story.title,
            story.image_count()
        );
        Ok(story)
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "gemini".to_string(),
            model: self.config.model.clone(),
            requires_api_key: true,
        }
    }
}

/// Map a non-2xx reply, preferring the service's own explanation.
fn status_error(status: StatusCode, body: &str) -> StoryError {
    let message = vendor_message(body);
    match status {
        StatusCode::TOO_MANY_REQUESTS => StoryError::RateLimitExceeded(
            message.unwrap_or_else(|| RATE_LIMIT_MESSAGE.to_string()),
        ),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => StoryError::Authentication(
            message.unwrap_or_else(|| AUTHENTICATION_MESSAGE.to_string()),
        ),
        _ => StoryError::Api {
            status: status.as_u16(),
            message: message.unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Unexpected response")
                    .to_string()
            }),
        },
    }
}

fn vendor_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .map(|envelope| envelope.error.message.trim().to_string())
        .filter(|message| !message.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_prefers_service_text() {
        let body = r#"{"error":{"code":400,"message":"API key not valid.","status":"INVALID_ARGUMENT"}}"#;
        assert!(matches!(
            status_error(StatusCode::BAD_REQUEST, body),
            StoryError::Api { status: 400, ref message } if message == "API key not valid."
        ));
        assert!(matches!(
            status_error(StatusCode::BAD_GATEWAY, "<html>oops</html>"),
            StoryError::Api { status: 502, ref message } if message == "Bad Gateway"
        ));
    }

    #[test]
    fn status_error_falls_back_to_fixed_sentences() {
        assert_eq!(
            status_error(StatusCode::FORBIDDEN, "").to_string(),
            AUTHENTICATION_MESSAGE
        );
        assert_eq!(
            status_error(StatusCode::TOO_MANY_REQUESTS, r#"{"error":{"message":"  "}}"#)
                .to_string(),
            RATE_LIMIT_MESSAGE
        );
    }
}
