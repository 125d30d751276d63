use std::env;

use serde::{Deserialize, Serialize};

use self::gemini::GeminiConfig;
use self::ui::UiConfig;

pub mod gemini;
pub mod ui;

fn default_event_capacity() -> usize {
    64
}

fn default_render_capacity() -> usize {
    32
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub gemini: GeminiConfig,
    pub ui: UiConfig,

    /// Capacity of the UI -> app channel
    #[serde(default = "default_event_capacity")]
    pub event_capacity: usize,
    /// Capacity of the app -> UI channel
    #[serde(default = "default_render_capacity")]
    pub render_capacity: usize,
}

impl Config {
    /// Defaults overridden by whatever the process environment sets
    pub fn new() -> Self {
        let mut config = Config::default();
        config.apply_env();
        config
    }

    pub fn apply_env(&mut self) {
        self.apply_env_with(|name| env::var(name).ok());
    }

    /// Override every field whose variable `lookup` knows about. Unset or
    /// unparsable variables leave the current value alone.
    pub fn apply_env_with(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        self.gemini.apply_env_with(&lookup);

        if let Some(v) = parse_var(&lookup, "EVENT_CAPACITY") {
            self.event_capacity = v;
        }
        if let Some(v) = parse_var(&lookup, "RENDER_CAPACITY") {
            self.render_capacity = v;
        }
    }
}

pub(crate) fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
) -> Option<T> {
    lookup(name).and_then(|v| v.trim().parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gemini: GeminiConfig::default(),
            ui: UiConfig::default(),
            event_capacity: default_event_capacity(),
            render_capacity: default_render_capacity(),
        }
    }
}
