//! Turning question payloads into image XObjects.

use lopdf::{Object, Stream, dictionary};
use quire_layout::{ImageFormat, RasterImage};
use quire_render_core::RenderError;

fn decoder_format(format: ImageFormat) -> image::ImageFormat {
    match format {
        ImageFormat::Png => image::ImageFormat::Png,
        ImageFormat::Jpeg => image::ImageFormat::Jpeg,
    }
}

/// Decodes a payload into an 8-bit DeviceRGB image XObject. Transparency is
/// flattened onto white, since the booklet is printed on white paper.
pub fn decode_to_xobject(raster: &RasterImage) -> Result<Object, RenderError> {
    let decoded = image::load_from_memory_with_format(&raster.data, decoder_format(raster.format))
        .map_err(|e| RenderError::Image(e.to_string()))?;

    let rgba = decoded.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(RenderError::Image("decoded image has no pixels".into()));
    }

    let mut rgb = Vec::with_capacity(width as usize * height as usize * 3);
    for pixel in rgba.pixels() {
        let [r, g, b, a] = pixel.0;
        let alpha = u16::from(a);
        for channel in [r, g, b] {
            let blended = (u16::from(channel) * alpha + 255 * (255 - alpha)) / 255;
            rgb.push(blended as u8);
        }
    }

    let dict = dictionary! {
        "Type" => "XObject",
        "Subtype" => "Image",
        "Width" => i64::from(width),
        "Height" => i64::from(height),
        "ColorSpace" => "DeviceRGB",
        "BitsPerComponent" => 8,
    };
    Ok(Object::Stream(Stream::new(dict, rgb)))
}
