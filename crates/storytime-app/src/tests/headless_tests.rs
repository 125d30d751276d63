use std::sync::Arc;

use storytime_core::render_plain;
use storytime_types::ViewState;

use super::{MockGenerator, MockOutcome, dragon_story};
use crate::headless::{generate_once, print_story};

#[tokio::test]
async fn test_generate_once_renders_mock_story() {
    let generator = Arc::new(MockGenerator::new(MockOutcome::Story(dragon_story())));

    let snapshot = generate_once(generator.clone(), "dragons").await;
    assert_eq!(snapshot.view, ViewState::Success(dragon_story()));

    let text = render_plain(&snapshot, "");
    assert!(text.starts_with("The Dragon Who Sneezed Stars\n"));
    assert!(text.contains("In a mossy cave lived a dragon named Ember."));
    assert!(text.contains("[image/png image, 4 bytes]"));
    assert_eq!(generator.call_count(), 1);
}

#[tokio::test]
async fn test_blank_category_skips_the_call() {
    let generator = Arc::new(MockGenerator::new(MockOutcome::Story(dragon_story())));

    let snapshot = generate_once(generator.clone(), "  ").await;
    assert_eq!(snapshot.view, ViewState::Idle);
    assert_eq!(generator.call_count(), 0);
}

#[tokio::test]
async fn test_print_story_reports_failure() {
    let generator = Arc::new(MockGenerator::new(MockOutcome::RateLimited));

    let err = print_story(generator, "dragons", "").await.unwrap_err();
    assert!(err.to_string().contains("Too many requests"));
}
