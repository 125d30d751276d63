mod headless_tests;

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use storytime_core::{Category, story_prompt};
use storytime_gemini::{ProviderMetadata, RATE_LIMIT_MESSAGE, StoryError, StoryGenerator};
use storytime_types::{IllustratedStory, StoryImage, StoryPart};
use tokio::sync::Notify;

pub enum MockOutcome {
    Story(IllustratedStory),
    RateLimited,
    Panic,
}

/// Records every prompt it is asked for and answers with a fixed outcome.
pub struct MockGenerator {
    outcome: MockOutcome,
    pub calls: AtomicUsize,
    pub prompts: Mutex<Vec<String>>,
    /// When set, each call waits for a notification before answering
    pub gate: Option<Notify>,
}

impl MockGenerator {
    pub fn new(outcome: MockOutcome) -> Self {
        Self {
            outcome,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
            gate: None,
        }
    }

    pub fn gated(outcome: MockOutcome) -> Self {
        Self {
            gate: Some(Notify::new()),
            ..Self::new(outcome)
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.notify_one();
        }
    }
}

#[async_trait::async_trait]
impl StoryGenerator for MockGenerator {
    async fn generate_story(&self, category: &Category) -> Result<IllustratedStory, StoryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts
            .lock()
            .expect("prompts lock")
            .push(story_prompt(category));

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        match &self.outcome {
            MockOutcome::Story(story) => Ok(story.clone()),
            MockOutcome::RateLimited => {
                Err(StoryError::RateLimitExceeded(RATE_LIMIT_MESSAGE.to_string()))
            }
            MockOutcome::Panic => panic!("generator blew up"),
        }
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "mock".to_string(),
            model: "fixture".to_string(),
            requires_api_key: false,
        }
    }
}

pub fn dragon_story() -> IllustratedStory {
    IllustratedStory::new(
        "The Dragon Who Sneezed Stars",
        vec![
            StoryPart::Text("In a mossy cave lived a dragon named Ember.".to_string()),
            StoryPart::Image(StoryImage::Inline {
                mime_type: "image/png".to_string(),
                data: vec![137, 80, 78, 71],
            }),
            StoryPart::Text("Every sneeze lit up the night sky.".to_string()),
        ],
    )
}
