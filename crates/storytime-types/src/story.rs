use std::fmt;

/// A generated story: a title followed by text and illustrations in the
/// order the service returned them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IllustratedStory {
    pub title: String,
    pub parts: Vec<StoryPart>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoryPart {
    Text(String),
    Image(StoryImage),
}

#[derive(Clone, PartialEq, Eq)]
pub enum StoryImage {
    /// Image bytes delivered inside the response body
    Inline { mime_type: String, data: Vec<u8> },
    /// Image hosted by the service
    Remote { mime_type: String, url: String },
}

impl IllustratedStory {
    pub fn new(title: impl Into<String>, parts: Vec<StoryPart>) -> Self {
        Self {
            title: title.into(),
            parts,
        }
    }

    /// All narrative text, paragraphs separated by a blank line
    pub fn narrative(&self) -> String {
        self.parts
            .iter()
            .filter_map(|part| match part {
                StoryPart::Text(text) => Some(text.trim()),
                StoryPart::Image(_) => None,
            })
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    pub fn images(&self) -> impl Iterator<Item = &StoryImage> {
        self.parts.iter().filter_map(|part| match part {
            StoryPart::Image(image) => Some(image),
            StoryPart::Text(_) => None,
        })
    }

    pub fn image_count(&self) -> usize {
        self.images().count()
    }
}

impl StoryImage {
    pub fn mime_type(&self) -> &str {
        match self {
            StoryImage::Inline { mime_type, .. } | StoryImage::Remote { mime_type, .. } => {
                mime_type
            }
        }
    }
}

// Inline payloads are often megabytes of pixels, keep them out of logs.
impl fmt::Debug for StoryImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoryImage::Inline { mime_type, data } => f
                .debug_struct("Inline")
                .field("mime_type", mime_type)
                .field("bytes", &data.len())
                .finish(),
            StoryImage::Remote { mime_type, url } => f
                .debug_struct("Remote")
                .field("mime_type", mime_type)
                .field("url", url)
                .finish(),
        }
    }
}

impl fmt::Display for StoryImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoryImage::Inline { mime_type, data } => {
                write!(f, "[{mime_type} image, {} bytes]", data.len())
            }
            StoryImage::Remote { mime_type, url } => write!(f, "[{mime_type} image at {url}]"),
        }
    }
}
