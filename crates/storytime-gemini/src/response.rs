use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use storytime_types::{IllustratedStory, StoryImage, StoryPart};

use crate::StoryError;

const UNTITLED: &str = "A Story Just For You";
const MAX_TITLE_CHARS: usize = 80;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateRequest<'a> {
    pub contents: Vec<RequestContent<'a>>,
    pub generation_config: GenerationConfig,
}

#[derive(Serialize)]
pub(crate) struct RequestContent<'a> {
    pub role: &'static str,
    pub parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
pub(crate) struct RequestPart<'a> {
    pub text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerationConfig {
    pub response_modalities: [&'static str; 2],
    pub temperature: f32,
}

impl<'a> GenerateRequest<'a> {
    pub fn new(prompt: &'a str, temperature: f32) -> Self {
        Self {
            contents: vec![RequestContent {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config: GenerationConfig {
                response_modalities: ["TEXT", "IMAGE"],
                temperature,
            },
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Candidate {
    pub content: Option<Content>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Part {
    pub text: Option<String>,
    pub inline_data: Option<InlineData>,
    pub file_data: Option<FileData>,
    #[serde(default)]
    pub thought: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct InlineData {
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FileData {
    pub mime_type: Option<String>,
    pub file_uri: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PromptFeedback {
    pub block_reason: Option<String>,
}

/// Body of a non-2xx reply
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: String,
}

impl GenerateResponse {
    pub fn into_story(self) -> Result<IllustratedStory, StoryError> {
        if let Some(reason) = self.prompt_feedback.and_then(|f| f.block_reason) {
            return Err(StoryError::Blocked(reason));
        }

        let candidate = self
            .candidates
            .into_iter()
            .next()
            .ok_or(StoryError::EmptyResponse)?;

        let parts = candidate.content.map(|c| c.parts).unwrap_or_default();
        if parts.is_empty() {
            return Err(match candidate.finish_reason.as_deref() {
                Some("STOP") | Some("MAX_TOKENS") | None => StoryError::EmptyResponse,
                Some(reason) => StoryError::Blocked(reason.to_string()),
            });
        }

        let mut story_parts = Vec::with_capacity(parts.len());
        for part in parts.into_iter().filter(|p| !p.thought) {
            if let Some(text) = part.text {
                story_parts.push(StoryPart::Text(text));
            } else if let Some(inline) = part.inline_data {
                let data = STANDARD
                    .decode(inline.data.trim())
                    .map_err(|e| StoryError::InvalidImage(e.to_string()))?;
                story_parts.push(StoryPart::Image(StoryImage::Inline {
                    mime_type: inline.mime_type,
                    data,
                }));
            } else if let Some(file) = part.file_data {
                story_parts.push(StoryPart::Image(StoryImage::Remote {
                    mime_type: file
                        .mime_type
                        .unwrap_or_else(|| "application/octet-stream".to_string()),
                    url: file.file_uri,
                }));
            }
        }

        let title = take_title(&mut story_parts);
        let title = title.unwrap_or_else(|| UNTITLED.to_string());
        let story = IllustratedStory::new(title, story_parts);

        if story.narrative().is_empty() {
            return Err(StoryError::EmptyResponse);
        }
        Ok(story)
    }
}

/// Pop the first non-empty line of the first text part and clean it up as a
/// title. Leaves the rest of that part in place.
fn take_title(parts: &mut Vec<StoryPart>) -> Option<String> {
    let index = parts
        .iter()
        .position(|part| matches!(part, StoryPart::Text(text) if !text.trim().is_empty()))?;
    let StoryPart::Text(text) = &parts[index] else {
        return None;
    };

    let trimmed = text.trim_start();
    let (line, rest) = trimmed.split_once('\n').unwrap_or((trimmed, ""));
    let title = clean_title(line);
    let rest = rest.trim_start().to_string();

    // A single-line reply is the story itself, not a title.
    if title.is_empty() || (rest.is_empty() && parts_text_count(parts) == 1) {
        return None;
    }
    if !looks_like_title(&title) {
        return None;
    }

    if rest.is_empty() {
        parts.remove(index);
    } else {
        parts[index] = StoryPart::Text(rest);
    }
    Some(title)
}

/// Headings are short and do not end a sentence.
fn looks_like_title(title: &str) -> bool {
    title.chars().count() <= MAX_TITLE_CHARS && !title.ends_with(['.', '!', '?'])
}

fn parts_text_count(parts: &[StoryPart]) -> usize {
    parts
        .iter()
        .filter(|p| matches!(p, StoryPart::Text(t) if !t.trim().is_empty()))
        .count()
}

fn clean_title(line: &str) -> String {
    let line = line.trim().trim_start_matches('#').trim();
    let line = line.trim_matches(|c| c == '*' || c == '_').trim();
    let line = match line.get(..6) {
        Some(prefix) if prefix.eq_ignore_ascii_case("title:") => line[6..].trim(),
        _ => line,
    };
    line.trim_matches(|c| c == '*' || c == '"').trim().to_string()
}
