pub mod story;
pub mod types;

pub use story::{IllustratedStory, StoryImage, StoryPart};
pub use types::*;
