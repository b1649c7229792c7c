//! Core rendering abstractions for booklet PDF generation.
//!
//! This crate provides the pieces shared by rendering backends:
//! - `DocumentRenderer` trait for abstracting PDF writing operations
//! - Error types for rendering operations
//! - Unit conversion, coordinate flipping and standard font metrics

mod error;
mod traits;
mod types;
pub mod utils;

pub use error::RenderError;
pub use traits::DocumentRenderer;
pub use types::DocumentInfo;
