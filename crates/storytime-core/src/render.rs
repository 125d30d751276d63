use std::fmt::Write;

use storytime_types::{StoryPart, ViewSnapshot, ViewState};

/// Plain-text rendering of a page, used by the headless mode.
pub fn render_plain(snapshot: &ViewSnapshot, placeholder: &str) -> String {
    let mut out = String::new();

    match &snapshot.view {
        ViewState::Idle => out.push_str(placeholder),
        ViewState::Loading => out.push_str("Loading story..."),
        ViewState::Error(message) => {
            let _ = write!(out, "Error: {message}");
        }
        ViewState::Success(story) => {
            let _ = writeln!(out, "{}", story.title);
            let _ = writeln!(out, "{}", "=".repeat(story.title.chars().count()));
            for part in &story.parts {
                match part {
                    StoryPart::Text(text) if text.trim().is_empty() => {}
                    StoryPart::Text(text) => {
                        let _ = writeln!(out);
                        let _ = writeln!(out, "{}", text.trim());
                    }
                    StoryPart::Image(image) => {
                        let _ = writeln!(out);
                        let _ = writeln!(out, "{image}");
                    }
                }
            }
        }
    }

    out
}
