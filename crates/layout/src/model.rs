//! Input records handed to the layout engine.

use chrono::NaiveDate;
use quire_types::{DocumentRef, QuestionId, Rect};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Shared, immutable image bytes. Cloning is a reference-count bump.
pub type SharedData = Arc<[u8]>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Png,
    Jpeg,
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageFormat::Png => f.write_str("png"),
            ImageFormat::Jpeg => f.write_str("jpeg"),
        }
    }
}

/// A rasterized clip as produced by region capture.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterImage {
    pub format: ImageFormat,
    /// Width in source pixels.
    pub width: u32,
    /// Height in source pixels.
    pub height: u32,
    pub data: SharedData,
}

impl RasterImage {
    pub fn new(format: ImageFormat, width: u32, height: u32, data: impl Into<SharedData>) -> Self {
        Self {
            format,
            width,
            height,
            data: data.into(),
        }
    }
}

/// One clipped question.
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedQuestion {
    pub id: QuestionId,
    pub image: RasterImage,
    /// Page of the source document the clip came from. Informational only.
    pub source_page: u32,
    /// Source document reference. Informational only.
    pub source_document: DocumentRef,
    /// Display name of the source document, if the capture layer knows one.
    pub source_name: Option<String>,
    /// The captured rectangle in source pixel space. Its proportions drive scaling.
    pub selection: Rect,
    /// 1-based position in the booklet.
    pub order: u32,
}

impl CapturedQuestion {
    pub fn new(
        id: impl Into<QuestionId>,
        image: RasterImage,
        source_document: impl Into<DocumentRef>,
        source_page: u32,
        selection: Rect,
    ) -> Self {
        Self {
            id: id.into(),
            image,
            source_page,
            source_document: source_document.into(),
            source_name: None,
            selection,
            order: 0,
        }
    }

    pub fn with_order(mut self, order: u32) -> Self {
        self.order = order;
        self
    }

    pub fn with_source_name(mut self, name: impl Into<String>) -> Self {
        self.source_name = Some(name.into());
        self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumberingStyle {
    /// `1.`, `2.`, `3.`
    #[default]
    Numeric,
    /// `a)`, `b)`, ... `z)`, `aa)`
    Alphabetic,
}

/// What the booklet is used for. Carried through to document metadata.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookletKind {
    #[default]
    Written,
    Practice,
    Screening,
}

impl fmt::Display for BookletKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookletKind::Written => f.write_str("Written exam"),
            BookletKind::Practice => f.write_str("Practice test"),
            BookletKind::Screening => f.write_str("Screening test"),
        }
    }
}

/// Booklet metadata and numbering configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Template {
    pub title: String,
    pub institution_name: String,
    pub group_label: String,
    pub instructor_name: String,
    pub date: Option<NaiveDate>,
    pub duration_minutes: Option<u32>,
    pub numbering_style: NumberingStyle,
    pub kind: BookletKind,
}

impl Template {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_numbering(mut self, style: NumberingStyle) -> Self {
        self.numbering_style = style;
        self
    }

    pub fn with_institution(mut self, name: impl Into<String>) -> Self {
        self.institution_name = name.into();
        self
    }

    pub fn with_group(mut self, label: impl Into<String>) -> Self {
        self.group_label = label.into();
        self
    }

    pub fn with_instructor(mut self, name: impl Into<String>) -> Self {
        self.instructor_name = name.into();
        self
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_duration(mut self, minutes: u32) -> Self {
        self.duration_minutes = Some(minutes);
        self
    }

    pub fn with_kind(mut self, kind: BookletKind) -> Self {
        self.kind = kind;
        self
    }
}
