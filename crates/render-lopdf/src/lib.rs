//! Streaming booklet PDF renderer using lopdf.
//!
//! Objects are written to the output as soon as they are complete; only the
//! shared resources, page tree, catalog and info dictionary are held back
//! until the end.

mod helpers;
mod images;
mod renderer;
mod writer;

pub use helpers::{ImageSlot, render_page_to_content, to_win_ansi};
pub use renderer::{LopdfRenderer, render_document, render_to_bytes};
pub use writer::StreamingPdfWriter;
