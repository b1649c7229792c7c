pub mod fixtures;
pub mod pdf_assertions;

use lopdf::Document as LopdfDocument;
use quire::{Booklet, CapturedQuestion, Pipeline, PipelineError, Template};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Wrapper around a generated PDF with helper methods
pub struct GeneratedPdf {
    pub bytes: Vec<u8>,
    pub doc: LopdfDocument,
}

impl GeneratedPdf {
    /// Create a GeneratedPdf from raw bytes
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, Box<dyn std::error::Error>> {
        let doc = LopdfDocument::load_mem(&bytes)?;
        Ok(Self { bytes, doc })
    }

    /// Get the number of pages in the PDF
    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// Text of one page (1-based)
    pub fn page_text(&self, page: u32) -> String {
        self.doc.extract_text(&[page]).unwrap_or_default()
    }

    /// Save PDF to a file for manual debugging
    #[allow(dead_code)]
    pub fn save_for_debug(&self, name: &str) -> std::io::Result<()> {
        std::fs::write(format!("test_output_{}.pdf", name), &self.bytes)
    }
}

/// Generate a booklet with the default pipeline and load the PDF back
pub fn generate_booklet(
    questions: &[CapturedQuestion],
    template: &Template,
) -> Result<(Booklet, GeneratedPdf), Box<dyn std::error::Error>> {
    generate_booklet_with(&Pipeline::default(), questions, template)
}

pub fn generate_booklet_with(
    pipeline: &Pipeline,
    questions: &[CapturedQuestion],
    template: &Template,
) -> Result<(Booklet, GeneratedPdf), Box<dyn std::error::Error>> {
    let booklet = pipeline.generate(questions, template)?;
    let pdf = GeneratedPdf::from_bytes(booklet.pdf.clone())?;
    Ok((booklet, pdf))
}

/// Runs the pipeline and returns only the error, for negative tests
#[allow(dead_code)]
pub fn generate_err(questions: &[CapturedQuestion], template: &Template) -> Option<PipelineError> {
    Pipeline::default().generate(questions, template).err()
}
