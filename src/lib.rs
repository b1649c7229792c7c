//! Question booklet generation.
//!
//! Captured question images are laid out into a paginated, numbered booklet
//! by `quire-layout` and written as a PDF by `quire-render-lopdf`. This crate
//! ties the two together and adds the manifest format, the output file name
//! policy and the command line tool.

pub mod error;
pub mod filename;
pub mod manifest;
pub mod pipeline;

pub use error::PipelineError;
pub use pipeline::{Booklet, Pipeline, PipelineBuilder, PolicyKind};

pub use quire_layout::{
    BookletKind, CapturedQuestion, Document, ImageFormat, LayoutConfig, LayoutEngine, LayoutError,
    LayoutPolicy, NumberingStyle, QuestionSet, RasterImage, SkipReason, SkippedQuestion, Template,
    layout,
};
pub use quire_render_core::{DocumentInfo, RenderError};
pub use quire_types::{DocumentRef, QuestionId, Rect, Size};
