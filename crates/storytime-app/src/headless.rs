use std::sync::Arc;

use storytime_core::{StoryPage, render_plain};
use storytime_gemini::StoryGenerator;
use storytime_types::ViewSnapshot;

use crate::events::submit::generate;

/// Run a single submit/complete cycle without a window.
pub async fn generate_once(generator: Arc<dyn StoryGenerator>, category: &str) -> ViewSnapshot {
    let mut page = StoryPage::new();
    page.set_category(category);

    if let Some(category) = page.submit() {
        let result = generate(generator, category).await;
        page.complete(result);
    } else {
        tracing::warn!("Nothing to generate for a blank category");
    }

    page.snapshot()
}

/// `--print` mode: write the rendered page to stdout
pub async fn print_story(
    generator: Arc<dyn StoryGenerator>,
    category: &str,
    placeholder: &str,
) -> anyhow::Result<()> {
    let snapshot = generate_once(generator, category).await;
    println!("{}", render_plain(&snapshot, placeholder));

    if let Some(message) = snapshot.view.error() {
        anyhow::bail!("story request failed: {message}");
    }
    Ok(())
}
