use crate::category::Category;

const PARAGRAPHS: usize = 3;

/// Prompt sent to the generative service for `category`.
///
/// The text depends on nothing but the category, so the same topic always
/// produces the same request.
pub fn story_prompt(category: &Category) -> String {
    format!(
        "Write a short, magical children's story about \"{category}\". \
         Put the story's title alone on the first line. \
         Tell the story in {PARAGRAPHS} short paragraphs of simple, warm language \
         suitable for young readers. \
         After each paragraph, create one colorful, friendly storybook \
         illustration of that part of the story. \
         Do not include any text inside the illustrations."
    )
}
