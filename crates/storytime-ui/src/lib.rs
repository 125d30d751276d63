use kanal::{AsyncReceiver, AsyncSender};
use slint::ComponentHandle;
use storytime_config::ui::UiConfig;
use storytime_types::AppEvent;

mod events;
mod images;

pub use images::decode_image;

slint::include_modules!();

/// Build the window, wire its callbacks to the back end and run the slint
/// event loop. Blocks the calling thread until the window closes.
pub fn ui_loop(
    config: &UiConfig,
    app_to_ui_rx: AsyncReceiver<AppEvent>,
    ui_to_app_tx: AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let window = StoryWindow::new()?;
    window.set_heading(config.title.clone().into());
    window.set_tagline(config.tagline.clone().into());
    window.set_placeholder(config.placeholder.clone().into());
    window.set_image_height(config.image_height as f32);

    {
        let tx = ui_to_app_tx.clone();
        window.on_category_edited(move |text| {
            send_to_app(&tx, AppEvent::CategoryChanged(text.to_string()));
        });
    }

    {
        let tx = ui_to_app_tx.clone();
        window.on_submit(move || {
            send_to_app(&tx, AppEvent::Submit);
        });
    }

    {
        let tx = ui_to_app_tx.clone();
        window.on_reset(move || {
            send_to_app(&tx, AppEvent::Reset);
        });
    }

    // Receive events from the app
    {
        let window_weak = window.as_weak();
        slint::spawn_local(async move {
            while let Ok(event) = app_to_ui_rx.recv().await {
                if !events::handle_events(event, &window_weak) {
                    break;
                }
            }
            tracing::debug!("[SLINT] App channel closed");
            slint::quit_event_loop().ok();
        })?;
    }

    window.show()?;
    window.invoke_focus_input();
    slint::run_event_loop()?;

    tracing::info!("[SLINT] Window closed");
    Ok(())
}

fn send_to_app(tx: &AsyncSender<AppEvent>, event: AppEvent) {
    let tx = tx.clone();
    let spawned = slint::spawn_local(async move {
        if let Err(e) = tx.send(event).await {
            tracing::error!("[SLINT] Failed to send event to app: {}", e);
        }
    });
    if let Err(e) = spawned {
        tracing::error!("[SLINT] Failed to schedule send: {}", e);
    }
}
