//! The JSON manifest read by the command line tool.
//!
//! A manifest names a template and the captured questions in booklet order.
//! Question images are separate files, resolved relative to the manifest.

use crate::error::PipelineError;
use log::{debug, warn};
use quire_layout::probe;
use quire_layout::{CapturedQuestion, ImageFormat, QuestionSet, RasterImage, Rect, Template};
use serde::Deserialize;
use std::io::Cursor;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    #[serde(default)]
    pub template: Template,
    pub questions: Vec<ManifestQuestion>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestQuestion {
    pub id: String,
    /// Path to the clip, relative to the manifest file.
    pub image: PathBuf,
    #[serde(default = "first_page")]
    pub source_page: u32,
    #[serde(default)]
    pub source_document: String,
    #[serde(default)]
    pub source_name: Option<String>,
    /// Defaults to the full image when omitted.
    #[serde(default)]
    pub selection: Option<Rect>,
}

fn first_page() -> u32 {
    1
}

/// A manifest with every image read into memory.
#[derive(Debug, Clone)]
pub struct LoadedManifest {
    pub template: Template,
    pub questions: QuestionSet,
}

impl Manifest {
    pub fn from_json(source: &str) -> Result<Self, PipelineError> {
        let manifest: Manifest = serde_json::from_str(source)?;
        if manifest.questions.is_empty() {
            return Err(PipelineError::Manifest("the manifest lists no questions".into()));
        }
        Ok(manifest)
    }

    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, PipelineError> {
        let path = path.as_ref();
        let source = tokio::fs::read_to_string(path).await.map_err(|e| {
            PipelineError::Manifest(format!("failed to read '{}': {}", path.display(), e))
        })?;
        Self::from_json(&source)
    }

    /// Reads every question image, resolving paths against `base_dir`.
    ///
    /// A missing file fails the whole load. A file that exists but is not a
    /// usable image is still turned into a question; the layout engine
    /// records it as skipped.
    pub async fn resolve(self, base_dir: &Path) -> Result<LoadedManifest, PipelineError> {
        let mut questions = QuestionSet::new();
        for entry in self.questions {
            let path = base_dir.join(&entry.image);
            let bytes = tokio::fs::read(&path).await.map_err(|e| {
                PipelineError::Manifest(format!(
                    "question '{}': failed to read image '{}': {}",
                    entry.id,
                    path.display(),
                    e
                ))
            })?;
            debug!("Read {} bytes for question {} from {}", bytes.len(), entry.id, path.display());
            questions.push(entry.into_question(&path, bytes));
        }
        Ok(LoadedManifest {
            template: self.template,
            questions,
        })
    }
}

impl ManifestQuestion {
    fn into_question(self, path: &Path, bytes: Vec<u8>) -> CapturedQuestion {
        let format = probe::sniff_format(&bytes).unwrap_or_else(|_| format_from_extension(path));
        let (width, height) = pixel_dimensions(&bytes).unwrap_or_else(|| {
            warn!("Could not read the dimensions of '{}'", path.display());
            (0, 0)
        });
        let selection = self
            .selection
            .unwrap_or_else(|| Rect::new(0.0, 0.0, width as f32, height as f32));

        let question = CapturedQuestion::new(
            self.id,
            RasterImage::new(format, width, height, bytes),
            self.source_document,
            self.source_page,
            selection,
        );
        match self.source_name {
            Some(name) => question.with_source_name(name),
            None => question,
        }
    }
}

fn format_from_extension(path: &Path) -> ImageFormat {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("jpg") | Some("jpeg") => ImageFormat::Jpeg,
        _ => ImageFormat::Png,
    }
}

/// Reads the pixel size from the image header without decoding pixels.
fn pixel_dimensions(bytes: &[u8]) -> Option<(u32, u32)> {
    image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .ok()?
        .into_dimensions()
        .ok()
}

/// Loads a manifest file and every image it references.
pub async fn load(path: impl AsRef<Path>) -> Result<LoadedManifest, PipelineError> {
    let path = path.as_ref();
    let manifest = Manifest::from_file(path).await?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
    manifest.resolve(base_dir).await
}
