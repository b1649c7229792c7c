use crate::error::RenderError;
use crate::types::DocumentInfo;
use lopdf::ObjectId;
use quire_layout::Page;
use quire_types::Size;
use std::io::{Seek, Write};

/// A trait for document renderers, abstracting the PDF-writing primitives.
///
/// Sizes and positions handed to a renderer are in layout units
/// (millimetres, origin top-left); the renderer owns the conversion to its
/// output coordinate space.
pub trait DocumentRenderer<W: Write + Seek + Send> {
    fn begin_document(&mut self, writer: W, info: &DocumentInfo) -> Result<(), RenderError>;

    /// Draws everything on one laid-out page (header, labels, images,
    /// footer) into a content stream and returns its object id.
    fn render_page_content(&mut self, page: &Page, page_size: Size)
    -> Result<ObjectId, RenderError>;

    fn write_page_object(
        &mut self,
        content_stream_ids: Vec<ObjectId>,
        page_size: Size,
    ) -> Result<ObjectId, RenderError>;

    fn finish(self: Box<Self>, page_ids: Vec<ObjectId>) -> Result<W, RenderError>;
}
