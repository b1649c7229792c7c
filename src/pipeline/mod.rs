// src/pipeline/mod.rs
pub mod builder;
pub mod config;
pub mod orchestrator;

pub use builder::PipelineBuilder;
pub use config::PolicyKind;
pub use orchestrator::{Booklet, Pipeline};
