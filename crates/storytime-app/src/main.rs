use std::sync::Arc;

use clap::Parser;
use storytime_gemini::{GeminiStoryClient, StoryGenerator};
use tracing_subscriber::EnvFilter;

pub mod controller;
pub mod events;
pub mod headless;
pub mod profile;
pub mod state;

#[cfg(test)]
mod tests;

use self::controller::{AppController, ChannelSet};
use self::profile::ProfileStore;
use self::state::AppState;

#[derive(Parser, Debug)]
#[command(author, version, about = "Illustrated stories for any category", long_about = None)]
struct Args {
    /// Config profile to load
    #[arg(long, default_value = profile::MAIN_PROFILE)]
    profile: String,

    /// Generate one story for CATEGORY, print it and exit
    #[arg(long, value_name = "CATEGORY")]
    print: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(atty::is(atty::Stream::Stderr));

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn main() -> anyhow::Result<()> {
    if let Err(e) = dotenvy::dotenv() {
        // A missing .env is the normal case
        if !e.not_found() {
            eprintln!("Ignoring unreadable .env: {e}");
        }
    }

    let args = Args::parse();
    init_tracing(args.json_logs);

    let store = ProfileStore::default_location();
    if let Err(e) = store.init() {
        tracing::warn!("Could not prepare profiles in {}: {}", store.dir().display(), e);
    }
    let config = store.load(&args.profile)?;
    tracing::info!("Loaded profile '{}'", args.profile);

    let generator: Arc<dyn StoryGenerator> =
        Arc::new(GeminiStoryClient::new(config.gemini.clone())?);

    let runtime = tokio::runtime::Runtime::new()?;

    if let Some(category) = args.print {
        return runtime.block_on(headless::print_story(
            generator,
            &category,
            &config.ui.placeholder,
        ));
    }

    let ui_config = config.ui.clone();
    let channels = ChannelSet::new(config.render_capacity, config.event_capacity);
    let state = Arc::new(AppState::new(config, generator));
    let controller = AppController::new(state, channels);

    let mut tasks = {
        let _guard = runtime.enter();
        controller.spawn_tasks()
    };

    // slint wants the main thread
    let (app_to_ui_rx, ui_to_app_tx) = controller.ui_channels();
    let ui_result = storytime_ui::ui_loop(&ui_config, app_to_ui_rx, ui_to_app_tx);

    controller.shutdown();
    runtime.block_on(async {
        while let Some(result) = tasks.join_next().await {
            match result {
                Ok(Ok(())) => {}
                Ok(Err(e)) => tracing::error!("task exited with error: {e}"),
                Err(e) => tracing::error!("task panicked: {e}"),
            }
        }
    });

    ui_result
}
