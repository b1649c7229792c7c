use thiserror::Error;

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("No questions to lay out.")]
    EmptyInput,
    #[error("Question '{id}' has order {found}, expected {expected}. Orders must be 1..=n in input order.")]
    InvalidOrder { id: String, expected: u32, found: u32 },
    #[error("Question id '{0}' appears more than once.")]
    DuplicateId(String),
    #[error("Invalid template: {0}")]
    InvalidTemplate(String),
    #[error("Invalid layout configuration: {0}")]
    InvalidConfig(String),
    #[error("Layout invariant violated: {0}")]
    InvariantViolation(String),
}

pub(crate) mod engine;
pub use self::engine::{LayoutEngine, layout};

pub mod algorithms;
pub mod config;
pub mod header;
pub mod model;
pub mod numbering;
pub mod output;
pub mod policy;
pub mod probe;
pub mod question_set;
pub mod validate;

pub use self::config::{ColumnFrame, HeaderMetrics, LayoutConfig, SizeRules, Typography};
pub use self::model::{
    BookletKind, CapturedQuestion, ImageFormat, NumberingStyle, RasterImage, SharedData, Template,
};
pub use self::output::{
    Column, ColumnSide, Document, FontWeight, HeaderKind, Page, PageFooter, PageHeader, PageMark,
    PlacedImage, Rule, SkipReason, SkippedQuestion, TextAlign, TextMark,
};
pub use self::policy::{ColumnCount, LayoutPolicy, SingleColumnPolicy, TwoColumnPolicy};
pub use self::question_set::QuestionSet;

// Re-export foundation types so callers need only this crate
pub use quire_types::{DocumentRef, Point, QuestionId, Rect, Size};

#[cfg(test)]
mod test_utils;
