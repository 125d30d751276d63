use slint::{Rgba8Pixel, SharedPixelBuffer};
use storytime_types::StoryImage;

/// Decode an illustration into something the window can draw.
///
/// Remote images are not fetched; they and undecodable payloads yield `None`.
pub fn decode_image(image: &StoryImage) -> Option<slint::Image> {
    let StoryImage::Inline { mime_type, data } = image else {
        return None;
    };

    match image::load_from_memory(data) {
        Ok(decoded) => {
            let rgba = decoded.to_rgba8();
            let buffer = SharedPixelBuffer::<Rgba8Pixel>::clone_from_slice(
                rgba.as_raw(),
                rgba.width(),
                rgba.height(),
            );
            Some(slint::Image::from_rgba8(buffer))
        }
        Err(e) => {
            tracing::warn!("Could not decode {} illustration: {}", mime_type, e);
            None
        }
    }
}
