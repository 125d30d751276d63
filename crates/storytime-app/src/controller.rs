use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use storytime_types::{AppEvent, UiEvent};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::events::event_loop;
use crate::state::AppState;

/// Centralized channel management
pub struct ChannelSet {
    pub app_to_ui: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
    pub ui_to_app: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
}

impl ChannelSet {
    pub fn new(render_capacity: usize, event_capacity: usize) -> Self {
        Self {
            app_to_ui: kanal::bounded_async(render_capacity),
            ui_to_app: kanal::bounded_async(event_capacity),
        }
    }
}

/// Application controller for task spawning and lifecycle
pub struct AppController {
    channels: ChannelSet,
    state: Arc<AppState>,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(state: Arc<AppState>, channels: ChannelSet) -> Self {
        Self {
            channels,
            state,
            cancel_token: CancellationToken::new(),
        }
    }

    /// Channel ends handed to the window
    pub fn ui_channels(&self) -> (AsyncReceiver<AppEvent>, AsyncSender<AppEvent>) {
        (
            self.channels.app_to_ui.1.clone(),
            self.channels.ui_to_app.0.clone(),
        )
    }

    /// Must be called from within a tokio runtime
    pub fn spawn_tasks(&self) -> JoinSet<anyhow::Result<()>> {
        let mut tasks = JoinSet::new();

        // Event loop
        tasks.spawn(event_loop(
            self.state.clone(),
            self.channels.ui_to_app.1.clone(),
            self.channels.ui_to_app.0.clone(),
            self.channels.app_to_ui.0.clone(),
            self.cancel_token.child_token(),
        ));

        // Ctrl+C closes the window like the title bar button does
        tasks.spawn(watch_ctrl_c(
            self.cancel_token.clone(),
            self.channels.app_to_ui.0.clone(),
        ));

        tasks
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}

async fn watch_ctrl_c(
    cancel: CancellationToken,
    app_to_ui_tx: AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            result?;
            tracing::info!("Shutdown requested");
            cancel.cancel();
            let _ = app_to_ui_tx.send(AppEvent::UiEvent(UiEvent::Close)).await;
        }
        _ = cancel.cancelled() => {}
    }
    Ok(())
}
