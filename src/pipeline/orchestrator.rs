// src/pipeline/orchestrator.rs
use crate::error::PipelineError;
use crate::filename;
use chrono::{NaiveDate, Utc};
use log::{info, warn};
use quire_layout::{CapturedQuestion, Document, LayoutEngine, Template};
use quire_render_core::DocumentInfo;
use quire_render_lopdf::render_document;
use std::fs;
use std::io::{self, Cursor, Seek, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tokio::task;

/// A finished booklet: the layout, the PDF bytes and the suggested file name.
#[derive(Debug, Clone)]
pub struct Booklet {
    pub document: Document,
    pub pdf: Vec<u8>,
    pub file_name: String,
}

/// The booklet generation pipeline: validation and layout, then PDF rendering.
///
/// A `Pipeline` holds only configuration and is cheap to clone, so the same
/// instance can serve concurrent requests.
#[derive(Debug, Clone)]
pub struct Pipeline {
    engine: LayoutEngine,
    export_date: Option<NaiveDate>,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(LayoutEngine::default(), None)
    }
}

impl Pipeline {
    pub fn new(engine: LayoutEngine, export_date: Option<NaiveDate>) -> Self {
        Self { engine, export_date }
    }

    pub fn engine(&self) -> &LayoutEngine {
        &self.engine
    }

    /// The date stamped into output file names.
    pub fn export_date(&self) -> NaiveDate {
        self.export_date
            .unwrap_or_else(|| Utc::now().date_naive())
    }

    pub fn file_name(&self, template: &Template) -> String {
        filename::booklet_file_name(&template.title, self.export_date())
    }

    /// Runs layout only.
    pub fn layout(
        &self,
        questions: &[CapturedQuestion],
        template: &Template,
    ) -> Result<Document, PipelineError> {
        let document = self.engine.layout(questions, template)?;
        for skipped in &document.skipped {
            warn!(
                "Question {} (order {}) left out of the booklet: {}",
                skipped.id, skipped.order, skipped.reason
            );
        }
        Ok(document)
    }

    /// Lays out and renders into `writer`, returning the layout and the writer.
    pub fn generate_to_writer<W: Write + Seek + Send + 'static>(
        &self,
        questions: &[CapturedQuestion],
        template: &Template,
        writer: W,
    ) -> Result<(Document, W), PipelineError> {
        let start = Instant::now();
        let document = self.layout(questions, template)?;
        let writer = render_document(&document, &DocumentInfo::from_template(template), writer)?;
        info!(
            "Generated {} pages ({} questions placed, {} skipped) in {:.2?}.",
            document.page_count(),
            document.placed_count(),
            document.skipped.len(),
            start.elapsed()
        );
        Ok((document, writer))
    }

    /// Lays out and renders into memory.
    pub fn generate(
        &self,
        questions: &[CapturedQuestion],
        template: &Template,
    ) -> Result<Booklet, PipelineError> {
        let (document, cursor) = self.generate_to_writer(questions, template, Cursor::new(Vec::new()))?;
        Ok(Booklet {
            document,
            pdf: cursor.into_inner(),
            file_name: self.file_name(template),
        })
    }

    /// Renders to `path`, creating parent directories as needed.
    pub fn generate_to_file<P: AsRef<Path>>(
        &self,
        questions: &[CapturedQuestion],
        template: &Template,
        path: P,
    ) -> Result<Document, PipelineError> {
        let output_path = path.as_ref();
        if let Some(parent_dir) = output_path.parent() {
            fs::create_dir_all(parent_dir)?;
        }
        let file = fs::File::create(output_path)?;
        let (document, mut writer) =
            self.generate_to_writer(questions, template, io::BufWriter::new(file))?;
        writer.flush()?;
        info!("Wrote {}", output_path.display());
        Ok(document)
    }

    /// Renders into `dir` under the name from the file name policy and
    /// returns the full path.
    pub fn generate_into_dir<P: AsRef<Path>>(
        &self,
        questions: &[CapturedQuestion],
        template: &Template,
        dir: P,
    ) -> Result<(Document, PathBuf), PipelineError> {
        let path = dir.as_ref().join(self.file_name(template));
        let document = self.generate_to_file(questions, template, &path)?;
        Ok((document, path))
    }

    /// Runs `generate` on tokio's blocking pool. Dropping the future before
    /// it resolves discards the result.
    pub async fn generate_async(
        &self,
        questions: Vec<CapturedQuestion>,
        template: Template,
    ) -> Result<Booklet, PipelineError> {
        let pipeline = self.clone();
        task::spawn_blocking(move || pipeline.generate(&questions, &template)).await?
    }
}
