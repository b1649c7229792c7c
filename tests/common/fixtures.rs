use image::{ImageBuffer, Rgb};
use quire::{CapturedQuestion, ImageFormat, RasterImage, Rect};
use std::io::Cursor;
use std::path::Path;

/// A solid-colour PNG clip of the given pixel size
pub fn png_clip(width: u32, height: u32) -> Vec<u8> {
    let shade = ((width * 7 + height * 13) % 200) as u8;
    let img = ImageBuffer::from_pixel(width, height, Rgb([shade, 90, 160]));
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .expect("encode png");
    bytes
}

/// A question whose clip and selection are `width` x `height` pixels
pub fn question(id: &str, order: u32, width: u32, height: u32) -> CapturedQuestion {
    CapturedQuestion::new(
        id,
        RasterImage::new(ImageFormat::Png, width, height, png_clip(width, height)),
        "worksheet.pdf",
        1,
        Rect::new(0.0, 0.0, width as f32, height as f32),
    )
    .with_order(order)
}

/// One question per aspect ratio (height / width), ordered 1..=n
pub fn questions_with_ratios(ratios: &[f32]) -> Vec<CapturedQuestion> {
    ratios
        .iter()
        .enumerate()
        .map(|(i, r)| {
            let height = (40.0 * r).round().max(1.0) as u32;
            question(&format!("q{}", i + 1), i as u32 + 1, 40, height)
        })
        .collect()
}

/// Writes `count` PNG clips into `dir/clips` and returns their relative paths
pub fn write_clips(dir: &Path, sizes: &[(u32, u32)]) -> Vec<String> {
    let clips = dir.join("clips");
    std::fs::create_dir_all(&clips).expect("create clips dir");
    sizes
        .iter()
        .enumerate()
        .map(|(i, (w, h))| {
            let name = format!("clips/q{}.png", i + 1);
            std::fs::write(dir.join(&name), png_clip(*w, *h)).expect("write clip");
            name
        })
        .collect()
}
