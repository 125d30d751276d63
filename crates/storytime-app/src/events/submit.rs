use std::sync::Arc;

use kanal::AsyncSender;
use storytime_core::{Category, ErrorDescription, StoryPage};
use storytime_gemini::StoryGenerator;
use storytime_types::{AppEvent, IllustratedStory};

use crate::state::AppState;

pub async fn handle_submit(
    state: &Arc<AppState>,
    page: &mut StoryPage,
    completion_tx: &AsyncSender<AppEvent>,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let Some(category) = page.submit() else {
        return Ok(());
    };

    tracing::info!("Generating story for '{}'", category);
    app_to_ui_tx.send(AppEvent::Render(page.snapshot())).await?;

    let generator = state.generator.clone();
    let tx = completion_tx.clone();
    tokio::spawn(async move {
        let result = generate(generator, category).await;
        if let Err(e) = tx.send(AppEvent::StoryFinished(result)).await {
            tracing::error!("Failed to deliver story result: {}", e);
        }
    });

    Ok(())
}

pub async fn handle_story_finished(
    page: &mut StoryPage,
    result: Result<IllustratedStory, ErrorDescription>,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    if page.complete(result) {
        tracing::debug!("Story request finished in state {}", page.view().name());
        app_to_ui_tx.send(AppEvent::Render(page.snapshot())).await?;
    }
    Ok(())
}

/// Run one generation. Whatever happens, including a panic inside the
/// generator, ends in a result the page can show.
pub async fn generate(
    generator: Arc<dyn StoryGenerator>,
    category: Category,
) -> Result<IllustratedStory, ErrorDescription> {
    let handle = tokio::spawn(async move { generator.generate_story(&category).await });

    match handle.await {
        Ok(Ok(story)) => Ok(story),
        Ok(Err(e)) => {
            tracing::error!("Story generation failed: {}", e);
            Err(ErrorDescription::from_error(&e))
        }
        Err(e) => {
            tracing::error!("Story generation task aborted: {}", e);
            Err(ErrorDescription::unknown())
        }
    }
}
