//! The page/column placement state machine.
//!
//! Placement is a pure reducer: `paginate` folds every question into a
//! `Placement` accumulator, one step per question, in input order. Columns
//! are filled in strict alternation (left, right, left, ...) so the booklet
//! reads left-to-right, top-to-bottom, at the cost of some density.

use crate::config::{ColumnFrame, LayoutConfig};
use crate::header;
use crate::model::{CapturedQuestion, NumberingStyle};
use crate::numbering;
use crate::output::{
    Column, ColumnSide, FontWeight, Page, PageHeader, PlacedImage, SkipReason, SkippedQuestion,
    TextAlign, TextMark,
};
use crate::policy::{ColumnCount, LayoutPolicy};
use crate::probe;
use crate::LayoutError;
use log::{debug, warn};
use quire_types::{Point, Rect, Size};

/// Tolerance for floating point noise when comparing against the page bottom.
const EPSILON: f32 = 1e-3;

/// Read-only inputs shared by every step.
pub struct PlacementContext<'a> {
    pub config: &'a LayoutConfig,
    pub policy: &'a dyn LayoutPolicy,
    pub frames: &'a [ColumnFrame],
    pub numbering: NumberingStyle,
}

impl PlacementContext<'_> {
    fn columns(&self) -> ColumnCount {
        self.policy.column_count()
    }

    fn frame(&self, side: ColumnSide) -> Result<&ColumnFrame, LayoutError> {
        self.frames
            .iter()
            .find(|f| f.side == side)
            .ok_or_else(|| LayoutError::InvariantViolation(format!("no {side:?} column frame")))
    }

    fn new_page(&self, index: usize, header: PageHeader) -> Page {
        Page {
            index,
            header,
            columns: self
                .frames
                .iter()
                .map(|f| Column {
                    side: f.side,
                    x: f.x,
                    width: f.width,
                    items: Vec::new(),
                })
                .collect(),
            footer: None,
        }
    }
}

/// Where the next question goes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cursor {
    /// 1-based page number.
    pub page: usize,
    pub column: ColumnSide,
    pub left_y: f32,
    pub right_y: f32,
}

impl Cursor {
    pub fn at_page(page: usize, top: f32) -> Self {
        Self {
            page,
            column: ColumnSide::Left,
            left_y: top,
            right_y: top,
        }
    }

    pub fn y(&self, side: ColumnSide) -> f32 {
        match side {
            ColumnSide::Left => self.left_y,
            ColumnSide::Right => self.right_y,
        }
    }

    /// Moves one column's cursor down by `by`.
    pub fn advanced(mut self, side: ColumnSide, by: f32) -> Self {
        match side {
            ColumnSide::Left => self.left_y += by,
            ColumnSide::Right => self.right_y += by,
        }
        self
    }

    /// Hands the next question to the other column (a no-op with one column).
    pub fn toggled(mut self, columns: ColumnCount) -> Self {
        if columns == ColumnCount::Two {
            self.column = self.column.toggled();
        }
        self
    }
}

/// Outcome of the fit test for one question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitDecision {
    /// Place in the current column.
    Stay,
    /// The left column is full but the right one has room on this page.
    SwitchRight,
    /// Start a new page.
    NewPage,
}

/// Decides where a question needing `required` vertical space goes.
///
/// `fresh_page_room` is the room a brand-new continuation page offers.
/// `column_is_empty` says whether the current column holds no placed image
/// yet; skipped questions move the cursor but do not count.
///
/// This departs from a plain "does not fit, open a page" rule in one case: a
/// question that would not fit on a fresh page either stays in the current
/// column when that column is empty, so an oversized clip never leaves a
/// blank page behind.
pub fn check_fit(
    cursor: &Cursor,
    required: f32,
    usable_bottom: f32,
    fresh_page_room: f32,
    columns: ColumnCount,
    column_is_empty: bool,
) -> FitDecision {
    let fits = |y: f32| y + required <= usable_bottom + EPSILON;

    if fits(cursor.y(cursor.column)) {
        return FitDecision::Stay;
    }
    if columns == ColumnCount::Two && cursor.column == ColumnSide::Left && fits(cursor.right_y) {
        return FitDecision::SwitchRight;
    }
    if column_is_empty && required > fresh_page_room + EPSILON {
        return FitDecision::Stay;
    }
    FitDecision::NewPage
}

/// The reducer accumulator.
#[derive(Debug)]
pub struct Placement {
    pub cursor: Cursor,
    pub pages: Vec<Page>,
    pub skipped: Vec<SkippedQuestion>,
    /// Number given to the next successfully placed question.
    pub next_number: usize,
}

impl Placement {
    pub fn new(first_page: Page) -> Self {
        let top = first_page.header.content_top;
        Self {
            cursor: Cursor::at_page(1, top),
            pages: vec![first_page],
            skipped: Vec::new(),
            next_number: 1,
        }
    }

    fn current_page_mut(&mut self) -> Result<&mut Page, LayoutError> {
        self.pages
            .last_mut()
            .ok_or_else(|| LayoutError::InvariantViolation("placement has no open page".into()))
    }

    fn open_page(&mut self, ctx: &PlacementContext<'_>) {
        let index = self.pages.len() + 1;
        let page = ctx.new_page(index, header::continuation_header(ctx.config, ctx.columns()));
        self.cursor = Cursor::at_page(index, page.header.content_top);
        self.pages.push(page);
        debug!("Opened page {index}");
    }

    /// Records a question that could not be placed and reserves fallback space for it.
    fn skip(mut self, question: &CapturedQuestion, reason: SkipReason, ctx: &PlacementContext<'_>) -> Self {
        warn!(
            "Skipping question {} (order {}): {}",
            question.id, question.order, reason
        );
        self.skipped.push(SkippedQuestion {
            id: question.id.clone(),
            order: question.order,
            reason,
        });
        let column = self.cursor.column;
        self.cursor = self
            .cursor
            .advanced(column, ctx.config.fallback_height)
            .toggled(ctx.columns());
        self
    }
}

/// Folds all questions into pages. Footers are not stamped here.
pub fn paginate(
    questions: &[CapturedQuestion],
    ctx: &PlacementContext<'_>,
    first_header: PageHeader,
) -> Result<Placement, LayoutError> {
    let initial = Placement::new(ctx.new_page(1, first_header));
    questions
        .iter()
        .try_fold(initial, |acc, question| step(acc, question, ctx))
}

/// One transition of the state machine.
pub fn step(
    mut acc: Placement,
    question: &CapturedQuestion,
    ctx: &PlacementContext<'_>,
) -> Result<Placement, LayoutError> {
    let selection = match probe::check_question(question) {
        Ok(selection) => selection,
        Err(reason) => return Ok(acc.skip(question, reason, ctx)),
    };

    let frame_width = ctx.frame(acc.cursor.column)?.width;
    let size = ctx.policy.resolve_size(selection, frame_width, ctx.config);
    ensure_drawable(size, question)?;

    let config = ctx.config;
    let required = size.height + config.item_spacing;
    let fresh_room = config.usable_bottom() - config.continuation_content_top();
    let column_is_empty = acc
        .pages
        .last()
        .and_then(|page| page.column(acc.cursor.column))
        .is_none_or(|column| column.items.is_empty());
    match check_fit(
        &acc.cursor,
        required,
        config.usable_bottom(),
        fresh_room,
        ctx.columns(),
        column_is_empty,
    ) {
        FitDecision::Stay => {}
        FitDecision::SwitchRight => acc.cursor.column = ColumnSide::Right,
        FitDecision::NewPage => acc.open_page(ctx),
    }

    let side = acc.cursor.column;
    let frame = *ctx.frame(side)?;
    let top = acc.cursor.y(side);
    let number = acc.next_number;

    let placed = PlacedImage {
        question_id: question.id.clone(),
        order: question.order,
        sequence: number,
        image: question.image.clone(),
        bounds: Rect::new(
            frame.x + config.label_gutter,
            top + config.image_offset,
            size.width,
            size.height,
        ),
        label: TextMark {
            text: numbering::label(ctx.numbering, number),
            position: Point::new(frame.x, top + config.label_baseline),
            font_size: config.typography.label,
            weight: FontWeight::Bold,
            align: TextAlign::Left,
        },
    };
    debug!(
        "Placed question {} as #{} on page {} ({:?}) at y={:.2}, {:.2}x{:.2}",
        question.id, number, acc.cursor.page, side, top, size.width, size.height
    );

    let page_number = acc.cursor.page;
    acc.current_page_mut()?
        .column_mut(side)
        .ok_or_else(|| {
            LayoutError::InvariantViolation(format!("page {page_number} has no {side:?} column"))
        })?
        .items
        .push(placed);

    acc.cursor = acc.cursor.advanced(side, required).toggled(ctx.columns());
    acc.next_number += 1;
    Ok(acc)
}

/// A resolved size that cannot be drawn means the policy or configuration is
/// broken. Emitting such a page would corrupt the booklet, so the run fails.
fn ensure_drawable(size: Size, question: &CapturedQuestion) -> Result<(), LayoutError> {
    if size.is_degenerate() {
        return Err(LayoutError::InvariantViolation(format!(
            "question {} resolved to an undrawable size {:.3}x{:.3}",
            question.id, size.width, size.height
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_stays_when_room() {
        let cursor = Cursor::at_page(1, 64.0);
        assert_eq!(check_fit(&cursor, 82.0, 279.0, 249.0, ColumnCount::Two, true), FitDecision::Stay);
    }

    #[test]
    fn test_fit_switches_to_right_column() {
        let cursor = Cursor {
            left_y: 228.0,
            right_y: 146.0,
            ..Cursor::at_page(1, 64.0)
        };
        assert_eq!(
            check_fit(&cursor, 82.0, 279.0, 249.0, ColumnCount::Two, false),
            FitDecision::SwitchRight
        );
    }

    #[test]
    fn test_fit_never_switches_from_right_or_in_single_column() {
        let mut cursor = Cursor {
            left_y: 146.0,
            right_y: 228.0,
            ..Cursor::at_page(1, 64.0)
        };
        cursor.column = ColumnSide::Right;
        assert_eq!(check_fit(&cursor, 82.0, 279.0, 249.0, ColumnCount::Two, false), FitDecision::NewPage);

        let single = Cursor {
            left_y: 228.0,
            ..Cursor::at_page(1, 64.0)
        };
        assert_eq!(check_fit(&single, 82.0, 279.0, 249.0, ColumnCount::One, false), FitDecision::NewPage);
    }

    #[test]
    fn test_oversized_item_stays_in_empty_column() {
        let cursor = Cursor::at_page(2, 30.0);
        assert_eq!(check_fit(&cursor, 400.0, 279.0, 249.0, ColumnCount::Two, true), FitDecision::Stay);

        // The same item in a used column goes to a new page.
        let used = cursor.advanced(ColumnSide::Left, 10.0);
        let used = Cursor { right_y: 279.0, ..used };
        assert_eq!(check_fit(&used, 400.0, 279.0, 249.0, ColumnCount::Two, false), FitDecision::NewPage);

        // A column pushed down only by skips still counts as empty.
        let skipped_only = Cursor { right_y: 279.0, ..cursor.advanced(ColumnSide::Left, 40.0) };
        assert_eq!(
            check_fit(&skipped_only, 400.0, 279.0, 249.0, ColumnCount::Two, true),
            FitDecision::Stay
        );
    }

    #[test]
    fn test_oversized_on_first_page_moves_to_roomier_page() {
        // Needs 230: does not fit under the full header (215 of room) but does fit on a
        // continuation page (249 of room).
        let cursor = Cursor::at_page(1, 64.0);
        let cursor = Cursor { right_y: 279.0, ..cursor };
        assert_eq!(check_fit(&cursor, 230.0, 279.0, 249.0, ColumnCount::Two, true), FitDecision::NewPage);
    }

    #[test]
    fn test_cursor_toggle_and_advance() {
        let cursor = Cursor::at_page(1, 64.0).advanced(ColumnSide::Left, 82.0);
        assert_eq!(cursor.left_y, 146.0);
        assert_eq!(cursor.right_y, 64.0);
        assert_eq!(cursor.toggled(ColumnCount::Two).column, ColumnSide::Right);
        assert_eq!(cursor.toggled(ColumnCount::One).column, ColumnSide::Left);
    }
}
