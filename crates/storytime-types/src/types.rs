use std::fmt;

use crate::story::IllustratedStory;

#[derive(Debug, Clone)]
pub enum AppEvent {
    /// The controlled input changed
    CategoryChanged(String),
    Submit,
    Reset,
    /// Outcome of the single outstanding generation request
    StoryFinished(Result<IllustratedStory, ErrorDescription>),
    Render(ViewSnapshot),
    UiEvent(UiEvent),
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    /// Move keyboard focus to the category input and scroll back to the top
    FocusInput,
    /// Back end is going away, close the window
    Close,
}

/// What the story region of the page currently shows.
///
/// Exactly one variant is live at a time, so a page can never be loading
/// while also holding a story or an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ViewState {
    #[default]
    Idle,
    Loading,
    Success(IllustratedStory),
    Error(String),
}

impl ViewState {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    pub fn story(&self) -> Option<&IllustratedStory> {
        match self {
            ViewState::Success(story) => Some(story),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ViewState::Error(message) => Some(message),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ViewState::Idle => "idle",
            ViewState::Loading => "loading",
            ViewState::Success(_) => "success",
            ViewState::Error(_) => "error",
        }
    }
}

/// Everything the window needs to draw one frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewSnapshot {
    pub category: String,
    pub view: ViewState,
}

impl ViewSnapshot {
    pub fn input_enabled(&self) -> bool {
        !self.view.is_loading()
    }

    /// The reset action is offered only once a story is on screen
    pub fn can_reset(&self) -> bool {
        self.view.story().is_some()
    }
}

pub const UNKNOWN_ERROR: &str = "An unknown error occurred.";

/// A failure reduced to the one sentence shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorDescription(String);

impl ErrorDescription {
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.trim().is_empty() {
            Self(UNKNOWN_ERROR.to_string())
        } else {
            Self(message)
        }
    }

    /// Describe an error of any shape by its `Display` output
    pub fn from_error<E>(error: &E) -> Self
    where
        E: std::error::Error + ?Sized,
    {
        Self::new(error.to_string())
    }

    pub fn unknown() -> Self {
        Self(UNKNOWN_ERROR.to_string())
    }

    pub fn message(&self) -> &str {
        &self.0
    }

    pub fn into_message(self) -> String {
        self.0
    }
}

impl fmt::Display for ErrorDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Silent;

    impl fmt::Display for Silent {
        fn fmt(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
            Ok(())
        }
    }

    impl std::error::Error for Silent {}

    #[test]
    fn empty_messages_fall_back() {
        assert_eq!(ErrorDescription::new("  ").message(), UNKNOWN_ERROR);
        assert_eq!(ErrorDescription::from_error(&Silent).message(), UNKNOWN_ERROR);
    }

    #[test]
    fn error_display_is_kept() {
        let io = std::io::Error::other("connection reset");
        assert_eq!(ErrorDescription::from_error(&io).message(), "connection reset");
    }

    #[test]
    fn snapshot_disables_input_while_loading() {
        let snapshot = ViewSnapshot {
            category: "dragons".to_string(),
            view: ViewState::Loading,
        };
        assert!(!snapshot.input_enabled());
        assert!(!snapshot.can_reset());
    }
}
