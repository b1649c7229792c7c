// src/pipeline/config.rs
use crate::error::PipelineError;
use quire_layout::{LayoutConfig, LayoutPolicy, SingleColumnPolicy, TwoColumnPolicy};
use std::path::Path;
use std::sync::Arc;

/// Selects one of the built-in layout policies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PolicyKind {
    /// Two columns with balanced image sizes. (Default)
    #[default]
    TwoColumn,
    /// One full-width column with larger images.
    SingleColumn,
}

impl PolicyKind {
    pub fn into_policy(self) -> Arc<dyn LayoutPolicy> {
        match self {
            PolicyKind::TwoColumn => Arc::new(TwoColumnPolicy),
            PolicyKind::SingleColumn => Arc::new(SingleColumnPolicy::default()),
        }
    }
}

/// Reads a JSON layout configuration. Missing fields keep their defaults.
pub fn load_layout_config(path: &Path) -> Result<LayoutConfig, PipelineError> {
    let source = std::fs::read_to_string(path).map_err(|e| {
        PipelineError::Config(format!("failed to read '{}': {}", path.display(), e))
    })?;
    let config: LayoutConfig = serde_json::from_str(&source)?;
    config.validate()?;
    Ok(config)
}
