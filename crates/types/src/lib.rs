pub mod geometry;
pub mod ids;

pub use geometry::{Point, Rect, Size};
pub use ids::{DocumentRef, QuestionId};
