//! Output types from the layout engine.
//!
//! A `Document` is a list of pages, each holding its header furniture, its
//! columns of placed question images, and (after the final numbering pass)
//! a footer. Coordinates are millimetres from the top-left page corner.

use crate::model::RasterImage;
use quire_types::{Point, QuestionId, Rect, Size};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnSide {
    Left,
    Right,
}

impl ColumnSide {
    pub fn toggled(self) -> Self {
        match self {
            ColumnSide::Left => ColumnSide::Right,
            ColumnSide::Right => ColumnSide::Left,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// A run of text anchored at a baseline point. `align` says which part of
/// the run sits on `position.x`; renderers measure the text to resolve it.
#[derive(Debug, Clone, PartialEq)]
pub struct TextMark {
    pub text: String,
    pub position: Point,
    /// Font size in points.
    pub font_size: f32,
    pub weight: FontWeight,
    pub align: TextAlign,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rule {
    pub from: Point,
    pub to: Point,
    pub thickness: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PageMark {
    Text(TextMark),
    Rule(Rule),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderKind {
    /// Title block, student fields and rules. First page only.
    Full,
    /// Just the column rule.
    Minimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageHeader {
    pub kind: HeaderKind,
    pub marks: Vec<PageMark>,
    /// Where question placement starts on this page.
    pub content_top: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageFooter {
    /// 1-based.
    pub page_index: usize,
    pub page_count: usize,
    pub mark: TextMark,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedImage {
    pub question_id: QuestionId,
    /// The question's `order` field.
    pub order: u32,
    /// 1-based position among placed images across the whole document.
    pub sequence: usize,
    pub image: RasterImage,
    /// Where the image is drawn.
    pub bounds: Rect,
    pub label: TextMark,
}

impl PlacedImage {
    pub fn x(&self) -> f32 {
        self.bounds.x
    }

    pub fn y(&self) -> f32 {
        self.bounds.y
    }

    pub fn width(&self) -> f32 {
        self.bounds.width
    }

    pub fn height(&self) -> f32 {
        self.bounds.height
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub side: ColumnSide,
    pub x: f32,
    pub width: f32,
    pub items: Vec<PlacedImage>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// 1-based.
    pub index: usize,
    pub header: PageHeader,
    pub columns: Vec<Column>,
    pub footer: Option<PageFooter>,
}

impl Page {
    pub fn column(&self, side: ColumnSide) -> Option<&Column> {
        self.columns.iter().find(|c| c.side == side)
    }

    pub(crate) fn column_mut(&mut self, side: ColumnSide) -> Option<&mut Column> {
        self.columns.iter_mut().find(|c| c.side == side)
    }

    /// Placed images on this page in placement order.
    pub fn placements(&self) -> Vec<&PlacedImage> {
        let mut items: Vec<&PlacedImage> =
            self.columns.iter().flat_map(|c| c.items.iter()).collect();
        items.sort_by_key(|item| item.sequence);
        items
    }

    pub fn is_empty(&self) -> bool {
        self.columns.iter().all(|c| c.items.is_empty())
    }
}

/// Why a question was left out of the booklet.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SkipReason {
    #[error("invalid selection geometry {width}x{height}")]
    InvalidGeometry { width: f32, height: f32 },
    #[error("image has zero pixel dimensions ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },
    #[error("image payload is empty")]
    EmptyPayload,
    #[error("image payload could not be decoded: {0}")]
    Undecodable(String),
    #[error("image payload is {detected}, expected {declared}")]
    FormatMismatch { declared: String, detected: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkippedQuestion {
    pub id: QuestionId,
    pub order: u32,
    pub reason: SkipReason,
}

/// The finished, paginated booklet.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub page_size: Size,
    pub pages: Vec<Page>,
    pub skipped: Vec<SkippedQuestion>,
}

impl Document {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Every placed image in placement order.
    pub fn placements(&self) -> impl Iterator<Item = &PlacedImage> {
        self.pages.iter().flat_map(|page| page.placements())
    }

    pub fn placed_count(&self) -> usize {
        self.pages
            .iter()
            .flat_map(|p| p.columns.iter())
            .map(|c| c.items.len())
            .sum()
    }
}
