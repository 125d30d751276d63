use serde::{Deserialize, Serialize};

fn default_title() -> String {
    "Story Time AI".to_string()
}

fn default_tagline() -> String {
    "Tell me a category, and I'll write a magical story just for you!".to_string()
}

fn default_placeholder() -> String {
    "Your wonderful story will appear here!".to_string()
}

fn default_image_height() -> u32 {
    320
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_tagline")]
    pub tagline: String,
    /// Shown in the story region before anything was requested
    #[serde(default = "default_placeholder")]
    pub placeholder: String,
    /// Height of each illustration in logical pixels
    #[serde(default = "default_image_height")]
    pub image_height: u32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            tagline: default_tagline(),
            placeholder: default_placeholder(),
            image_height: default_image_height(),
        }
    }
}
