//! Page content generation. Everything a laid-out page carries (header
//! marks, labels, images and the footer) becomes operations on one content
//! stream.

use lopdf::content::{Content, Operation};
use lopdf::{Object, StringFormat};
use quire_layout::{FontWeight, Page, PageMark, PlacedImage, Rect, Rule, TextMark};
use quire_render_core::utils::{self, BASE_FONT};
use std::collections::BTreeMap;

/// How one placed image is drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSlot {
    /// An embedded XObject resource name, e.g. `Im3`.
    XObject(String),
    /// The payload could not be embedded; a frame marks the spot.
    Placeholder,
}

/// Builds the content stream for `page`. `page_height` is in layout units;
/// `slots` holds one entry per placed image, in `Page::placements` order.
pub fn render_page_to_content(
    page: &Page,
    page_height: f32,
    font_map: &BTreeMap<String, String>,
    slots: &[ImageSlot],
) -> Content {
    let mut ctx = PageContext::new(utils::mm_to_pt(page_height), font_map);

    for mark in &page.header.marks {
        ctx.draw_mark(mark);
    }
    for (placed, slot) in page.placements().into_iter().zip(slots) {
        ctx.draw_text(&placed.label);
        ctx.draw_image(placed, slot);
    }
    if let Some(footer) = &page.footer {
        ctx.draw_text(&footer.mark);
    }
    ctx.finish()
}

#[derive(Default, Clone, PartialEq)]
struct PageRenderState {
    font_name: String,
    font_size: f32,
    line_width: f32,
}

struct PageContext<'a> {
    page_height: f32,
    content: Content,
    state: PageRenderState,
    font_map: &'a BTreeMap<String, String>,
}

impl<'a> PageContext<'a> {
    fn new(page_height: f32, font_map: &'a BTreeMap<String, String>) -> Self {
        let mut content = Content { operations: vec![] };
        // Black for both fill and stroke; nothing else on the page is coloured.
        content.operations.push(Operation::new("rg", vec![0.into(), 0.into(), 0.into()]));
        content.operations.push(Operation::new("RG", vec![0.into(), 0.into(), 0.into()]));
        Self {
            page_height,
            content,
            state: Default::default(),
            font_map,
        }
    }

    fn finish(self) -> Content {
        self.content
    }

    fn push(&mut self, operator: &str, operands: Vec<Object>) {
        self.content.operations.push(Operation::new(operator, operands));
    }

    fn draw_mark(&mut self, mark: &PageMark) {
        match mark {
            PageMark::Text(text) => self.draw_text(text),
            PageMark::Rule(rule) => self.draw_rule(rule),
        }
    }

    fn set_font(&mut self, weight: FontWeight, size: f32) {
        let styled = utils::get_styled_font_name(BASE_FONT, weight);
        let internal = self
            .font_map
            .get(&styled)
            .or_else(|| self.font_map.get(BASE_FONT))
            .cloned()
            .unwrap_or_else(|| "F1".to_string());

        if self.state.font_name != internal || self.state.font_size != size {
            self.push("Tf", vec![Object::Name(internal.as_bytes().to_vec()), size.into()]);
            self.state.font_name = internal;
            self.state.font_size = size;
        }
    }

    fn set_line_width(&mut self, width: f32) {
        if self.state.line_width != width {
            self.push("w", vec![width.into()]);
            self.state.line_width = width;
        }
    }

    fn draw_text(&mut self, mark: &TextMark) {
        if mark.text.trim().is_empty() {
            return;
        }
        let width = utils::text_width(&mark.text, mark.font_size, mark.weight);
        let x = utils::aligned_x(utils::mm_to_pt(mark.position.x), width, mark.align);
        let y = utils::flip_y(utils::mm_to_pt(mark.position.y), self.page_height);

        self.push("BT", vec![]);
        self.set_font(mark.weight, mark.font_size);
        self.push("Td", vec![x.into(), y.into()]);
        self.push("Tj", vec![Object::String(to_win_ansi(&mark.text), StringFormat::Literal)]);
        self.push("ET", vec![]);
    }

    fn draw_rule(&mut self, rule: &Rule) {
        self.set_line_width(utils::mm_to_pt(rule.thickness));
        let (x1, y1) = self.to_pdf(rule.from.x, rule.from.y);
        let (x2, y2) = self.to_pdf(rule.to.x, rule.to.y);
        self.push("m", vec![x1.into(), y1.into()]);
        self.push("l", vec![x2.into(), y2.into()]);
        self.push("S", vec![]);
    }

    fn draw_image(&mut self, placed: &PlacedImage, slot: &ImageSlot) {
        let (x, bottom, width, height) = self.to_pdf_rect(placed.bounds);
        match slot {
            ImageSlot::XObject(name) => {
                self.push("q", vec![]);
                self.push(
                    "cm",
                    vec![width.into(), 0.into(), 0.into(), height.into(), x.into(), bottom.into()],
                );
                self.push("Do", vec![Object::Name(name.as_bytes().to_vec())]);
                self.push("Q", vec![]);
            }
            ImageSlot::Placeholder => {
                self.push("q", vec![]);
                self.push("RG", vec![0.6f32.into(), 0.6f32.into(), 0.6f32.into()]);
                self.push("w", vec![0.5f32.into()]);
                self.push("re", vec![x.into(), bottom.into(), width.into(), height.into()]);
                self.push("S", vec![]);
                self.push("Q", vec![]);
            }
        }
    }

    fn to_pdf(&self, x: f32, y: f32) -> (f32, f32) {
        (
            utils::mm_to_pt(x),
            utils::flip_y(utils::mm_to_pt(y), self.page_height),
        )
    }

    /// Returns `(x, bottom, width, height)` in PDF space.
    fn to_pdf_rect(&self, rect: Rect) -> (f32, f32, f32, f32) {
        let (x, bottom) = self.to_pdf(rect.x, rect.bottom());
        (x, bottom, utils::mm_to_pt(rect.width), utils::mm_to_pt(rect.height))
    }
}

/// Encodes text for a WinAnsi font. Characters outside Latin-1 become `?`.
pub fn to_win_ansi(s: &str) -> Vec<u8> {
    s.chars()
        .map(|c| if (c as u32) <= 255 { c as u8 } else { b'?' })
        .collect()
}
