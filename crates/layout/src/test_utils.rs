use crate::model::{CapturedQuestion, ImageFormat, RasterImage};
use crate::output::{Document, PlacedImage};
use image::{ImageBuffer, Rgb};
use quire_types::Rect;
use std::io::Cursor;

/// A solid `width` x `height` clip encoded as `format`.
pub fn encoded_clip(width: u32, height: u32, format: image::ImageFormat) -> Vec<u8> {
    let img = ImageBuffer::from_pixel(width, height, Rgb([30u8, 120, 200]));
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), format)
        .expect("encode test clip");
    bytes
}

/// A small PNG that decodes. Layout only reads proportions from the
/// selection, so the pixel size of the payload does not matter.
pub fn png_clip() -> Vec<u8> {
    encoded_clip(4, 3, image::ImageFormat::Png)
}

/// A question whose selection measures `width` x `height` source pixels.
pub fn question(id: &str, order: u32, width: f32, height: f32) -> CapturedQuestion {
    CapturedQuestion::new(
        id,
        RasterImage::new(ImageFormat::Png, width.max(0.0) as u32, height.max(0.0) as u32, png_clip()),
        "source.pdf",
        1,
        Rect::new(10.0, 20.0, width, height),
    )
    .with_order(order)
}

/// One question per aspect ratio (height / width), ordered 1..=n.
pub fn questions_with_ratios(ratios: &[f32]) -> Vec<CapturedQuestion> {
    ratios
        .iter()
        .enumerate()
        .map(|(i, r)| question(&format!("q{}", i + 1), i as u32 + 1, 200.0, 200.0 * r))
        .collect()
}

pub fn labels(document: &Document) -> Vec<String> {
    document.placements().map(|p| p.label.text.clone()).collect()
}

pub fn placed_ids(document: &Document) -> Vec<String> {
    document
        .placements()
        .map(|p| p.question_id.to_string())
        .collect()
}

/// (page index, placed image) pairs in placement order.
pub fn placements_by_page(document: &Document) -> Vec<(usize, &PlacedImage)> {
    document
        .pages
        .iter()
        .flat_map(|page| page.placements().into_iter().map(move |p| (page.index, p)))
        .collect()
}
