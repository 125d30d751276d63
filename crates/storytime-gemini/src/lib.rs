mod client;
mod response;

pub use client::GeminiStoryClient;

use storytime_core::Category;
use storytime_types::IllustratedStory;

/// Story provider interface
#[async_trait::async_trait]
pub trait StoryGenerator: Send + Sync {
    /// Generate an illustrated story for `category`
    async fn generate_story(&self, category: &Category) -> Result<IllustratedStory, StoryError>;

    /// Provider metadata
    fn metadata(&self) -> ProviderMetadata;
}

#[derive(Debug, Clone)]
pub struct ProviderMetadata {
    pub name: String,
    pub model: String,
    pub requires_api_key: bool,
}

pub const AUTHENTICATION_MESSAGE: &str = "The API key was rejected by the story service.";
pub const RATE_LIMIT_MESSAGE: &str = "Too many requests. Please wait a moment and try again.";

#[derive(Debug, thiserror::Error)]
pub enum StoryError {
    #[error("No API key configured. Set GEMINI_API_KEY and try again.")]
    MissingApiKey,

    /// Carries the service's explanation when it gave one
    #[error("{0}")]
    Authentication(String),

    #[error("{0}")]
    RateLimitExceeded(String),

    #[error("Story service error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("The story request was blocked: {0}")]
    Blocked(String),

    #[error("The story service returned an empty story.")]
    EmptyResponse,

    #[error("Could not read an illustration: {0}")]
    InvalidImage(String),
}
