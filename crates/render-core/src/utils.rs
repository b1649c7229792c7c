use quire_layout::{FontWeight, TextAlign};

/// Points per millimetre.
pub const PT_PER_MM: f32 = 72.0 / 25.4;

/// Base font for all booklet text. One of the 14 standard PDF fonts, so
/// nothing needs to be embedded.
pub const BASE_FONT: &str = "Helvetica";

pub fn mm_to_pt(mm: f32) -> f32 {
    mm * PT_PER_MM
}

pub fn pt_to_mm(pt: f32) -> f32 {
    pt / PT_PER_MM
}

/// Get PDF font name with weight suffix
pub fn get_styled_font_name(base_name: &str, weight: FontWeight) -> String {
    match weight {
        FontWeight::Bold => format!("{base_name}-Bold"),
        FontWeight::Normal => base_name.to_string(),
    }
}

/// Convert layout Y coordinate to PDF Y coordinate (flip origin)
pub fn flip_y(y: f32, page_height: f32) -> f32 {
    page_height - y
}

// Helvetica advance widths for ASCII 32..=126, in 1/1000 em.
#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

// Helvetica-Bold advance widths for ASCII 32..=126, in 1/1000 em.
#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

/// Width of `text` set in Helvetica at `font_size` points, in points.
///
/// Characters outside printable ASCII are measured as an average lowercase
/// glyph, which is close enough for centring short header lines.
pub fn text_width(text: &str, font_size: f32, weight: FontWeight) -> f32 {
    let table = match weight {
        FontWeight::Normal => &HELVETICA_WIDTHS,
        FontWeight::Bold => &HELVETICA_BOLD_WIDTHS,
    };
    let units: u32 = text
        .chars()
        .map(|c| {
            let code = c as u32;
            if (32..=126).contains(&code) {
                u32::from(table[(code - 32) as usize])
            } else {
                556
            }
        })
        .sum();
    units as f32 * font_size / 1000.0
}

/// Left edge of a text run anchored at `x` with the given alignment.
pub fn aligned_x(x: f32, width: f32, align: TextAlign) -> f32 {
    match align {
        TextAlign::Left => x,
        TextAlign::Center => x - width / 2.0,
        TextAlign::Right => x - width,
    }
}
