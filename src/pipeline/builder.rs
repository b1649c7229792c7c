// src/pipeline/builder.rs
use super::config::{self, PolicyKind};
use super::orchestrator::Pipeline;
use crate::error::PipelineError;
use chrono::NaiveDate;
use quire_layout::{LayoutConfig, LayoutEngine, LayoutPolicy};
use std::path::Path;
use std::sync::Arc;

/// A builder for creating a `Pipeline`.
#[derive(Debug, Default)]
pub struct PipelineBuilder {
    config: LayoutConfig,
    policy: PolicyKind,
    custom_policy: Option<Arc<dyn LayoutPolicy>>,
    export_date: Option<NaiveDate>,
}

impl PipelineBuilder {
    /// Creates a new `PipelineBuilder` with the default A4 two-column layout.
    pub fn new() -> Self {
        Default::default()
    }

    /// Replaces the page geometry and sizing constants.
    pub fn with_config(mut self, config: LayoutConfig) -> Self {
        self.config = config;
        self
    }

    /// Loads the page geometry and sizing constants from a JSON file.
    pub fn with_config_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self, PipelineError> {
        self.config = config::load_layout_config(path.as_ref())?;
        Ok(self)
    }

    /// Selects one of the built-in layout policies.
    pub fn with_policy(mut self, policy: PolicyKind) -> Self {
        self.policy = policy;
        self
    }

    /// Uses a caller-supplied policy instead of a built-in one.
    pub fn with_custom_policy(mut self, policy: Arc<dyn LayoutPolicy>) -> Self {
        self.custom_policy = Some(policy);
        self
    }

    /// Fixes the date used in output file names. Defaults to today (UTC).
    pub fn with_export_date(mut self, date: NaiveDate) -> Self {
        self.export_date = Some(date);
        self
    }

    /// Consumes the builder and creates the `Pipeline`.
    pub fn build(self) -> Result<Pipeline, PipelineError> {
        let policy = self
            .custom_policy
            .unwrap_or_else(|| self.policy.into_policy());
        log::info!("Building pipeline with the {} policy.", policy.name());
        let engine = LayoutEngine::new(self.config, policy)?;
        Ok(Pipeline::new(engine, self.export_date))
    }
}
