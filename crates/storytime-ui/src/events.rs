use std::rc::Rc;

use slint::{ComponentHandle, ModelRc, SharedString, VecModel, Weak};
use storytime_types::{AppEvent, IllustratedStory, StoryPart, UiEvent, ViewSnapshot, ViewState};

use crate::images::decode_image;
use crate::{StoryBlock, StoryWindow};

/// Apply one app event to the window. Returns `false` once the window
/// should stop listening.
pub fn handle_events(event: AppEvent, window_weak: &Weak<StoryWindow>) -> bool {
    let Some(window) = window_weak.upgrade() else {
        return false;
    };

    match event {
        AppEvent::Render(snapshot) => {
            tracing::debug!("[SLINT] Rendering {} view", snapshot.view.name());
            render(&window, snapshot);
        }
        AppEvent::UiEvent(UiEvent::FocusInput) => {
            window.invoke_focus_input();
        }
        AppEvent::UiEvent(UiEvent::Close) => {
            window.hide().ok();
            slint::quit_event_loop().ok();
            return false;
        }
        // Requests travel the other way
        AppEvent::CategoryChanged(_)
        | AppEvent::Submit
        | AppEvent::Reset
        | AppEvent::StoryFinished(_) => {}
    }

    true
}

fn render(window: &StoryWindow, snapshot: ViewSnapshot) {
    let frame = Frame::from_snapshot(snapshot);
    window.set_category(frame.category);
    window.set_loading(frame.loading);
    window.set_error_message(frame.error_message);
    window.set_has_story(frame.has_story);
    window.set_story_title(frame.story_title);
    window.set_story_blocks(frame.story_blocks);
}

/// Window property values for one snapshot
struct Frame {
    category: SharedString,
    loading: bool,
    error_message: SharedString,
    has_story: bool,
    story_title: SharedString,
    story_blocks: ModelRc<StoryBlock>,
}

impl Frame {
    fn from_snapshot(snapshot: ViewSnapshot) -> Self {
        let mut frame = Frame {
            category: snapshot.category.as_str().into(),
            loading: snapshot.view.is_loading(),
            error_message: SharedString::new(),
            has_story: false,
            story_title: SharedString::new(),
            story_blocks: ModelRc::default(),
        };

        match snapshot.view {
            ViewState::Idle | ViewState::Loading => {}
            ViewState::Error(message) => frame.error_message = message.into(),
            ViewState::Success(story) => {
                frame.has_story = true;
                frame.story_title = story.title.as_str().into();
                frame.story_blocks = story_blocks(&story);
            }
        }

        frame
    }
}

fn story_blocks(story: &IllustratedStory) -> ModelRc<StoryBlock> {
    let blocks: Vec<StoryBlock> = story
        .parts
        .iter()
        .filter_map(|part| match part {
            StoryPart::Text(text) if text.trim().is_empty() => None,
            StoryPart::Text(text) => Some(text_block(text.trim())),
            StoryPart::Image(image) => Some(match decode_image(image) {
                Some(picture) => StoryBlock {
                    is_image: true,
                    text: SharedString::new(),
                    picture,
                },
                // Caption stands in for pictures we cannot draw
                None => text_block(&image.to_string()),
            }),
        })
        .collect();

    ModelRc::from(Rc::new(VecModel::from(blocks)))
}

fn text_block(text: &str) -> StoryBlock {
    StoryBlock {
        is_image: false,
        text: text.into(),
        picture: slint::Image::default(),
    }
}

#[cfg(test)]
mod tests {
    use slint::Model;
    use storytime_types::StoryImage;

    use super::*;
    use crate::images::tests::png;

    fn mixed_story() -> IllustratedStory {
        IllustratedStory::new(
            "Ember",
            vec![
                StoryPart::Text("  Once upon a time.  ".to_string()),
                StoryPart::Image(StoryImage::Inline {
                    mime_type: "image/png".to_string(),
                    data: png(2, 2),
                }),
                StoryPart::Text(" \n ".to_string()),
                StoryPart::Image(StoryImage::Inline {
                    mime_type: "image/png".to_string(),
                    data: vec![9, 9, 9],
                }),
                StoryPart::Image(StoryImage::Remote {
                    mime_type: "image/jpeg".to_string(),
                    url: "https://example.com/a.jpg".to_string(),
                }),
                StoryPart::Text("The end.".to_string()),
            ],
        )
    }

    fn blocks_of(model: &ModelRc<StoryBlock>) -> Vec<(bool, String)> {
        (0..model.row_count())
            .filter_map(|row| model.row_data(row))
            .map(|block| (block.is_image, block.text.to_string()))
            .collect()
    }

    #[test]
    fn story_blocks_follow_story_order() {
        let blocks = blocks_of(&story_blocks(&mixed_story()));
        assert_eq!(
            blocks,
            vec![
                (false, "Once upon a time.".to_string()),
                (true, String::new()),
                (false, "[image/png image, 3 bytes]".to_string()),
                (false, "[image/jpeg image at https://example.com/a.jpg]".to_string()),
                (false, "The end.".to_string()),
            ]
        );
    }

    #[test]
    fn success_frame_shows_story() {
        let frame = Frame::from_snapshot(ViewSnapshot {
            category: "dragons".to_string(),
            view: ViewState::Success(mixed_story()),
        });
        assert!(frame.has_story);
        assert!(!frame.loading);
        assert_eq!(frame.story_title, "Ember");
        assert_eq!(frame.error_message, "");
        assert_eq!(frame.story_blocks.row_count(), 5);
    }

    #[test]
    fn other_frames_clear_the_story() {
        for (view, loading, error) in [
            (ViewState::Idle, false, ""),
            (ViewState::Loading, true, ""),
            (ViewState::Error("quota exhausted".to_string()), false, "quota exhausted"),
        ] {
            let frame = Frame::from_snapshot(ViewSnapshot {
                category: "dragons".to_string(),
                view,
            });
            assert_eq!(frame.category, "dragons");
            assert_eq!(frame.loading, loading);
            assert_eq!(frame.error_message, error);
            assert!(!frame.has_story);
            assert_eq!(frame.story_title, "");
            assert_eq!(frame.story_blocks.row_count(), 0);
        }
    }
}
