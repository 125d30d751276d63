use storytime_types::{ErrorDescription, IllustratedStory, ViewSnapshot, ViewState};

use crate::category::Category;

/// The page model: the controlled input value plus the story region.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StoryPage {
    category: String,
    view: ViewState,
}

impl StoryPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn is_loading(&self) -> bool {
        self.view.is_loading()
    }

    /// Mirror of the text field. The field is disabled while loading, so
    /// edits arriving then are dropped.
    pub fn set_category(&mut self, text: impl Into<String>) -> bool {
        if self.is_loading() {
            tracing::debug!("Ignoring category edit while loading");
            return false;
        }
        self.category = text.into();
        true
    }

    /// Start a request for the current category.
    ///
    /// Returns the category to generate for, or `None` when the input is
    /// blank or a request is already outstanding. A rejected submit leaves
    /// the page untouched.
    pub fn submit(&mut self) -> Option<Category> {
        if self.is_loading() {
            tracing::debug!("Submit ignored: request already in flight");
            return None;
        }
        let category = match Category::parse(&self.category) {
            Some(category) => category,
            None => {
                tracing::debug!("Submit ignored: blank category");
                return None;
            }
        };

        self.view = ViewState::Loading;
        Some(category)
    }

    /// Land the outcome of the outstanding request.
    ///
    /// Returns `false` (and changes nothing) when no request is outstanding.
    pub fn complete(&mut self, result: Result<IllustratedStory, ErrorDescription>) -> bool {
        if !self.is_loading() {
            tracing::warn!(
                "Dropping story result that arrived in state {}",
                self.view.name()
            );
            return false;
        }

        self.view = match result {
            Ok(story) => ViewState::Success(story),
            Err(error) => ViewState::Error(error.into_message()),
        };
        true
    }

    /// Clear story, error and category. Ignored while loading because the
    /// outstanding request cannot be cancelled.
    pub fn reset(&mut self) -> bool {
        if self.is_loading() {
            tracing::debug!("Reset ignored while loading");
            return false;
        }
        self.category.clear();
        self.view = ViewState::Idle;
        true
    }

    pub fn snapshot(&self) -> ViewSnapshot {
        ViewSnapshot {
            category: self.category.clone(),
            view: self.view.clone(),
        }
    }
}
