pub mod category;
pub mod prompt;
pub mod render;
pub mod state;

pub use category::Category;
pub use prompt::story_prompt;
pub use render::render_plain;
pub use state::StoryPage;
pub use storytime_types::{ErrorDescription, UNKNOWN_ERROR};
