use kanal::AsyncSender;
use storytime_core::StoryPage;
use storytime_types::{AppEvent, UiEvent};

pub async fn handle_reset(
    page: &mut StoryPage,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    if !page.reset() {
        return Ok(());
    }

    tracing::debug!("Page reset");
    app_to_ui_tx.send(AppEvent::Render(page.snapshot())).await?;
    app_to_ui_tx
        .send(AppEvent::UiEvent(UiEvent::FocusInput))
        .await?;
    Ok(())
}
