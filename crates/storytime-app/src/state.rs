use std::sync::Arc;

use storytime_config::Config;
use storytime_gemini::StoryGenerator;
use tokio::sync::RwLock;

pub struct AppState {
    pub config: RwLock<Config>,
    pub generator: Arc<dyn StoryGenerator>,
}

impl AppState {
    pub fn new(config: Config, generator: Arc<dyn StoryGenerator>) -> Self {
        Self {
            config: RwLock::new(config),
            generator,
        }
    }
}
