use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use storytime_core::StoryPage;
use storytime_types::AppEvent;
use tokio_util::sync::CancellationToken;

use crate::state::AppState;

pub mod reset;
pub mod submit;

use reset::handle_reset;
use submit::{handle_story_finished, handle_submit};

/// App's main loop. Owns the page; every state change happens here.
///
/// `completion_tx` feeds generation results back into `ui_to_app_rx`.
pub async fn event_loop(
    state: Arc<AppState>,
    ui_to_app_rx: AsyncReceiver<AppEvent>,
    completion_tx: AsyncSender<AppEvent>,
    app_to_ui_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    {
        let config = state.config.read().await;
        let metadata = state.generator.metadata();
        tracing::info!(
            "[EVENT_LOOP] Using {} ({}), timeout {}s",
            metadata.name,
            metadata.model,
            config.gemini.timeout_seconds
        );
        if metadata.requires_api_key && config.gemini.api_key.is_empty() {
            tracing::warn!("No API key configured, story requests will fail");
        }
    }

    let mut page = StoryPage::new();
    app_to_ui_tx.send(AppEvent::Render(page.snapshot())).await?;

    tracing::info!("[EVENT_LOOP] Starting main loop, waiting for events");
    loop {
        let event = tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("[EVENT_LOOP] Cancelled");
                break;
            }
            event = ui_to_app_rx.recv() => event?,
        };

        tracing::debug!(
            "[EVENT_LOOP] EVENT RECEIVED: {:?}",
            std::mem::discriminant(&event)
        );
        handle_events(&state, &mut page, &completion_tx, &app_to_ui_tx, event).await?;
    }

    Ok(())
}

async fn handle_events(
    state: &Arc<AppState>,
    page: &mut StoryPage,
    completion_tx: &AsyncSender<AppEvent>,
    app_to_ui_tx: &AsyncSender<AppEvent>,
    event: AppEvent,
) -> anyhow::Result<()> {
    match event {
        AppEvent::CategoryChanged(text) => {
            // The field already shows the text, nothing to render
            page.set_category(text);
        }
        AppEvent::Submit => {
            handle_submit(state, page, completion_tx, app_to_ui_tx).await?;
        }
        AppEvent::StoryFinished(result) => {
            handle_story_finished(page, result, app_to_ui_tx).await?;
        }
        AppEvent::Reset => {
            handle_reset(page, app_to_ui_tx).await?;
        }
        AppEvent::Render(_) | AppEvent::UiEvent(_) => {
            // UI-only event, ignore in backend
        }
    }

    Ok(())
}
