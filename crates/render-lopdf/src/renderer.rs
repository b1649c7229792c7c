use crate::helpers::{self, ImageSlot};
use crate::images;
use crate::writer::StreamingPdfWriter;
use lopdf::{Dictionary, Object, ObjectId, StringFormat, dictionary};
use log::{debug, warn};
use quire_layout::{Document, FontWeight, Page, PlacedImage};
use quire_render_core::utils::{self, BASE_FONT};
use quire_render_core::{DocumentInfo, DocumentRenderer, RenderError};
use quire_types::Size;
use std::collections::{BTreeMap, HashMap};
use std::io::{Cursor, Seek, Write};
use std::sync::Arc;

/// A streaming PDF renderer using the `lopdf` library.
///
/// Booklet text uses the standard Helvetica faces, so no font program is
/// embedded. Question images are embedded once and shared between pages
/// through the document-wide XObject resources.
pub struct LopdfRenderer<W: Write + Seek + Send> {
    pub(crate) writer: Option<StreamingPdfWriter<W>>,
    font_map: BTreeMap<String, String>,
    /// XObject name per payload, keyed by the address of the shared bytes.
    embedded: HashMap<usize, String>,
    placeholders: usize,
}

impl<W: Write + Seek + Send> Default for LopdfRenderer<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write + Seek + Send> LopdfRenderer<W> {
    pub fn new() -> Self {
        let font_map = [FontWeight::Normal, FontWeight::Bold]
            .into_iter()
            .enumerate()
            .map(|(i, weight)| (utils::get_styled_font_name(BASE_FONT, weight), format!("F{}", i + 1)))
            .collect();

        Self {
            writer: None,
            font_map,
            embedded: HashMap::new(),
            placeholders: 0,
        }
    }

    /// Number of images drawn as an empty frame because their payload could
    /// not be decoded.
    pub fn placeholder_count(&self) -> usize {
        self.placeholders
    }

    fn embed_image(&mut self, placed: &PlacedImage) -> Result<ImageSlot, RenderError> {
        let key = Arc::as_ptr(&placed.image.data) as *const u8 as usize;
        if let Some(name) = self.embedded.get(&key) {
            return Ok(ImageSlot::XObject(name.clone()));
        }

        let xobject = match images::decode_to_xobject(&placed.image) {
            Ok(xobject) => xobject,
            Err(e) => {
                warn!(
                    "Question {} could not be embedded, drawing a placeholder: {}",
                    placed.question_id, e
                );
                self.placeholders += 1;
                return Ok(ImageSlot::Placeholder);
            }
        };

        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| RenderError::Other("Document not started".into()))?;
        let id = writer.write_object(xobject)?;
        let name = format!("Im{}", self.embedded.len() + 1);
        writer.register_xobject(&name, id);
        debug!("Embedded image for question {} as /{}", placed.question_id, name);
        self.embedded.insert(key, name.clone());
        Ok(ImageSlot::XObject(name))
    }
}

fn literal(text: &str) -> Object {
    Object::String(helpers::to_win_ansi(text), StringFormat::Literal)
}

fn media_box(page_size: Size) -> Vec<Object> {
    vec![
        0.0f32.into(),
        0.0f32.into(),
        utils::mm_to_pt(page_size.width).into(),
        utils::mm_to_pt(page_size.height).into(),
    ]
}

impl<W: Write + Seek + Send + 'static> DocumentRenderer<W> for LopdfRenderer<W> {
    fn begin_document(&mut self, writer: W, info: &DocumentInfo) -> Result<(), RenderError> {
        let mut font_dict = Dictionary::new();
        for (postscript_name, internal_name) in &self.font_map {
            let single_font_dict = dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => Object::Name(postscript_name.as_bytes().to_vec()),
                "Encoding" => "WinAnsiEncoding",
            };
            font_dict.set(internal_name.as_bytes(), Object::Dictionary(single_font_dict));
        }

        let mut pdf = StreamingPdfWriter::new(writer, "1.7", font_dict)?;
        pdf.set_info(dictionary! {
            "Title" => literal(&info.title),
            "Subject" => literal(&info.subject),
            "Producer" => literal(&info.producer),
        });
        self.writer = Some(pdf);
        Ok(())
    }

    fn render_page_content(&mut self, page: &Page, page_size: Size) -> Result<ObjectId, RenderError> {
        let placements = page.placements();
        let mut slots = Vec::with_capacity(placements.len());
        for placed in placements {
            slots.push(self.embed_image(placed)?);
        }

        let content = helpers::render_page_to_content(page, page_size.height, &self.font_map, &slots);
        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| RenderError::Other("Document not started".into()))?;
        let content_id = writer.write_content_stream(content)?;
        Ok(content_id)
    }

    fn write_page_object(
        &mut self,
        content_stream_ids: Vec<ObjectId>,
        page_size: Size,
    ) -> Result<ObjectId, RenderError> {
        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| RenderError::Other("Document not started".into()))?;

        let page_dict = dictionary! {
            "Type" => "Page",
            "Parent" => writer.pages_id,
            "MediaBox" => media_box(page_size),
            "Contents" => Object::Array(content_stream_ids.into_iter().map(Object::Reference).collect()),
            "Resources" => writer.resources_id,
        };

        let page_id = writer.write_object(page_dict.into())?;
        Ok(page_id)
    }

    fn finish(self: Box<Self>, page_ids: Vec<ObjectId>) -> Result<W, RenderError> {
        let mut renderer = *self;
        if let Some(mut internal_writer) = renderer.writer.take() {
            internal_writer.set_page_ids(page_ids);
            let writer = internal_writer.finish()?;
            Ok(writer)
        } else {
            Err(RenderError::Other(
                "Document was never started with begin_document".into(),
            ))
        }
    }
}

/// Renders a finished layout into `writer`, one PDF page per layout page.
pub fn render_document<W: Write + Seek + Send + 'static>(
    document: &Document,
    info: &DocumentInfo,
    writer: W,
) -> Result<W, RenderError> {
    let mut renderer: Box<dyn DocumentRenderer<W>> = Box::new(LopdfRenderer::new());
    renderer.begin_document(writer, info)?;

    let mut page_ids = Vec::with_capacity(document.page_count());
    for page in &document.pages {
        let content_id = renderer.render_page_content(page, document.page_size)?;
        page_ids.push(renderer.write_page_object(vec![content_id], document.page_size)?);
    }
    debug!("Rendered {} pages", page_ids.len());
    renderer.finish(page_ids)
}

/// Renders a finished layout into an in-memory PDF.
pub fn render_to_bytes(document: &Document, info: &DocumentInfo) -> Result<Vec<u8>, RenderError> {
    let cursor = render_document(document, info, Cursor::new(Vec::new()))?;
    Ok(cursor.into_inner())
}
