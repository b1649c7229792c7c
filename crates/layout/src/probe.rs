//! Per-question checks run before placement.
//!
//! The payload is sniffed by its magic bytes and then decoded once, so that
//! corrupt or mislabelled captures are skipped (and left unnumbered) instead
//! of reaching the renderer.

use crate::model::{CapturedQuestion, ImageFormat};
use crate::output::SkipReason;
use quire_types::Size;

/// Returns the selection size to scale from, or the reason the question
/// cannot be placed.
pub fn check_question(question: &CapturedQuestion) -> Result<Size, SkipReason> {
    let selection = question.selection.size();
    if selection.is_degenerate() {
        return Err(SkipReason::InvalidGeometry {
            width: selection.width,
            height: selection.height,
        });
    }

    let image = &question.image;
    if image.width == 0 || image.height == 0 {
        return Err(SkipReason::EmptyImage {
            width: image.width,
            height: image.height,
        });
    }
    if image.data.is_empty() {
        return Err(SkipReason::EmptyPayload);
    }

    let detected = sniff_format(&image.data)?;
    if detected != image.format {
        return Err(SkipReason::FormatMismatch {
            declared: image.format.to_string(),
            detected: detected.to_string(),
        });
    }
    ensure_decodes(&image.data, detected)?;
    Ok(selection)
}

/// Decodes the payload and discards the pixels. A valid signature followed by
/// truncated or corrupt data fails here.
pub fn ensure_decodes(data: &[u8], format: ImageFormat) -> Result<(), SkipReason> {
    let format = match format {
        ImageFormat::Png => image::ImageFormat::Png,
        ImageFormat::Jpeg => image::ImageFormat::Jpeg,
    };
    image::load_from_memory_with_format(data, format)
        .map(|_| ())
        .map_err(|e| SkipReason::Undecodable(e.to_string()))
}

/// Identifies a payload as one of the supported raster formats.
pub fn sniff_format(data: &[u8]) -> Result<ImageFormat, SkipReason> {
    match image::guess_format(data) {
        Ok(image::ImageFormat::Png) => Ok(ImageFormat::Png),
        Ok(image::ImageFormat::Jpeg) => Ok(ImageFormat::Jpeg),
        Ok(other) => Err(SkipReason::Undecodable(format!(
            "unsupported image format {other:?}"
        ))),
        Err(e) => Err(SkipReason::Undecodable(e.to_string())),
    }
}
