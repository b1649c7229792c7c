use crate::algorithms::pagination::{self, PlacementContext};
use crate::config::LayoutConfig;
use crate::header;
use crate::model::{CapturedQuestion, Template};
use crate::output::Document;
use crate::policy::{LayoutPolicy, TwoColumnPolicy};
use crate::validate;
use crate::LayoutError;
use log::{debug, info};
use quire_types::Size;
use std::sync::Arc;

/// Lays question images out into a paginated booklet.
///
/// The engine holds no state between runs; one instance can serve any
/// number of concurrent `layout` calls.
#[derive(Debug, Clone)]
pub struct LayoutEngine {
    config: LayoutConfig,
    policy: Arc<dyn LayoutPolicy>,
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self {
            config: LayoutConfig::default(),
            policy: Arc::new(TwoColumnPolicy),
        }
    }
}

impl LayoutEngine {
    pub fn new(config: LayoutConfig, policy: Arc<dyn LayoutPolicy>) -> Result<Self, LayoutError> {
        config.validate()?;
        Ok(Self { config, policy })
    }

    pub fn with_config(config: LayoutConfig) -> Result<Self, LayoutError> {
        Self::new(config, Arc::new(TwoColumnPolicy))
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn policy(&self) -> &dyn LayoutPolicy {
        self.policy.as_ref()
    }

    /// Runs one complete layout. Either every question is placed or skipped and
    /// a finished document is returned, or the whole call fails.
    pub fn layout(
        &self,
        questions: &[CapturedQuestion],
        template: &Template,
    ) -> Result<Document, LayoutError> {
        validate::validate_questions(questions)?;
        validate::validate_template(template)?;

        let columns = self.policy.column_count();
        let frames = self.config.column_frames(columns);
        let ctx = PlacementContext {
            config: &self.config,
            policy: self.policy.as_ref(),
            frames: &frames,
            numbering: template.numbering_style,
        };
        debug!(
            "Laying out {} questions with the {} policy",
            questions.len(),
            self.policy.name()
        );

        let first_header = header::first_page_header(template, &self.config, columns);
        let placement = pagination::paginate(questions, &ctx, first_header)?;

        let mut pages = placement.pages;
        header::stamp_footers(&mut pages, &self.config);

        let document = Document {
            page_size: Size::new(self.config.page_width, self.config.page_height),
            pages,
            skipped: placement.skipped,
        };
        info!(
            "Layout finished: {} placed, {} skipped, {} pages",
            document.placed_count(),
            document.skipped.len(),
            document.page_count()
        );
        Ok(document)
    }
}

/// Lays out `questions` with the default configuration and two-column policy.
pub fn layout(questions: &[CapturedQuestion], template: &Template) -> Result<Document, LayoutError> {
    LayoutEngine::default().layout(questions, template)
}
