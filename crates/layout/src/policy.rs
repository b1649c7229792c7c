//! Injectable layout policies.
//!
//! A policy decides how many columns a page has and how large a question
//! image is drawn. The placement state machine is shared by all policies.

use crate::config::{LayoutConfig, SizeRules};
use quire_types::Size;
use std::fmt::Debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnCount {
    One,
    Two,
}

pub trait LayoutPolicy: Debug + Send + Sync {
    fn name(&self) -> &'static str;

    fn column_count(&self) -> ColumnCount;

    /// Resolves the drawn size of a clip whose selection measures `selection`
    /// (any unit, only the proportions matter) inside a column `column_width` wide.
    ///
    /// Callers guarantee `selection` is not degenerate.
    fn resolve_size(&self, selection: Size, column_width: f32, config: &LayoutConfig) -> Size;
}

/// The default booklet: two columns, balanced image sizes.
#[derive(Debug, Clone, Copy, Default)]
pub struct TwoColumnPolicy;

impl LayoutPolicy for TwoColumnPolicy {
    fn name(&self) -> &'static str {
        "two-column"
    }

    fn column_count(&self) -> ColumnCount {
        ColumnCount::Two
    }

    fn resolve_size(&self, selection: Size, column_width: f32, config: &LayoutConfig) -> Size {
        resolve_with_rules(selection, column_width, &config.sizing)
    }
}

/// One full-width column with larger images, for short booklets.
#[derive(Debug, Clone, Copy)]
pub struct SingleColumnPolicy {
    pub rules: SizeRules,
}

impl Default for SingleColumnPolicy {
    fn default() -> Self {
        Self {
            rules: SizeRules {
                inner_padding: 12.0,
                preferred_width: 150.0,
                max_height: 110.0,
                tall_max_height: 160.0,
                tall_aspect_threshold: 2.0,
                min_width: 60.0,
            },
        }
    }
}

impl LayoutPolicy for SingleColumnPolicy {
    fn name(&self) -> &'static str {
        "single-column"
    }

    fn column_count(&self) -> ColumnCount {
        ColumnCount::One
    }

    fn resolve_size(&self, selection: Size, column_width: f32, _config: &LayoutConfig) -> Size {
        resolve_with_rules(selection, column_width, &self.rules)
    }
}

/// Preferred width, then the height cap for the clip's aspect class, then the
/// width floor. Every branch derives one side from the other through the same
/// ratio, so the result always has the selection's proportions.
pub fn resolve_with_rules(selection: Size, column_width: f32, rules: &SizeRules) -> Size {
    let ratio = selection.height / selection.width;

    let mut width = (column_width - rules.inner_padding).min(rules.preferred_width);
    let mut height = ratio * width;

    let cap = if ratio > rules.tall_aspect_threshold {
        rules.tall_max_height
    } else {
        rules.max_height
    };
    if height > cap {
        height = cap;
        width = height / ratio;
    }

    if width < rules.min_width {
        width = rules.min_width;
        height = ratio * width;
    }

    Size::new(width, height)
}
