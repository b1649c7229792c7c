use crate::LayoutError;
use crate::output::ColumnSide;
use crate::policy::ColumnCount;
use serde::{Deserialize, Serialize};

/// Fixed page geometry and placement constants, in millimetres.
///
/// Every number the engine uses to place something lives here so tests and
/// callers can reason about layouts without magic numbers. The defaults
/// describe an A4 portrait booklet.
///
/// All fields deserialize with `camelCase` names and fall back to their
/// defaults, so a JSON override only needs the values it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    /// Page width. Defaults to `210.0` (A4).
    pub page_width: f32,
    /// Page height. Defaults to `297.0` (A4).
    pub page_height: f32,
    /// Left and right page margin. Defaults to `12.0`.
    pub margin: f32,
    /// Horizontal gap between the two columns. Defaults to `6.0`.
    pub column_gap: f32,
    /// Distance from the page bottom to the lowest allowed placement edge.
    /// Defaults to `18.0`.
    pub bottom_margin: f32,
    /// Vertical space added after every placed question. Defaults to `12.0`.
    pub item_spacing: f32,
    /// Cursor advance for a question that could not be placed. Defaults to `40.0`.
    pub fallback_height: f32,
    /// Horizontal offset of the image from the column edge, leaving room for
    /// the number label. Defaults to `10.0`.
    pub label_gutter: f32,
    /// Label baseline, relative to the placement cursor. Defaults to `6.0`.
    pub label_baseline: f32,
    /// Image top, relative to the placement cursor. Defaults to `1.0`.
    pub image_offset: f32,
    /// Footer baseline, measured up from the page bottom. Defaults to `10.0`.
    pub footer_offset: f32,
    pub sizing: SizeRules,
    pub header: HeaderMetrics,
    pub typography: Typography,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            page_width: 210.0,
            page_height: 297.0,
            margin: 12.0,
            column_gap: 6.0,
            bottom_margin: 18.0,
            item_spacing: 12.0,
            fallback_height: 40.0,
            label_gutter: 10.0,
            label_baseline: 6.0,
            image_offset: 1.0,
            footer_offset: 10.0,
            sizing: SizeRules::default(),
            header: HeaderMetrics::default(),
            typography: Typography::default(),
        }
    }
}

/// Limits for the image size resolution policy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SizeRules {
    /// Width reserved inside a column for the label gutter and breathing room.
    pub inner_padding: f32,
    /// Target width before any clamping.
    pub preferred_width: f32,
    /// Height cap for ordinary clips.
    pub max_height: f32,
    /// Height cap for clips whose aspect ratio exceeds `tall_aspect_threshold`.
    pub tall_max_height: f32,
    /// Aspect ratio (height / width) above which a clip counts as tall.
    pub tall_aspect_threshold: f32,
    /// Readability floor for the placed width.
    pub min_width: f32,
}

impl Default for SizeRules {
    fn default() -> Self {
        Self {
            inner_padding: 12.0,
            preferred_width: 85.0,
            max_height: 70.0,
            tall_max_height: 90.0,
            tall_aspect_threshold: 2.0,
            min_width: 45.0,
        }
    }
}

/// Vertical positions of the header furniture.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HeaderMetrics {
    pub institution_baseline: f32,
    pub title_baseline: f32,
    /// Baseline of the first row of student fields (name, class).
    pub fields_baseline: f32,
    /// Distance between the two rows of student fields.
    pub field_row_gap: f32,
    /// Offset from the margin where the left-hand underlines start.
    pub field_label_width: f32,
    /// Inset from the right margin of the right-hand field labels.
    pub right_field_inset: f32,
    /// Inset from the right margin where the right-hand underlines start.
    pub right_underline_inset: f32,
    /// Baseline of the date / instructor / duration line.
    pub info_baseline: f32,
    /// The full-width rule closing the first-page header.
    pub separator_y: f32,
    pub separator_thickness: f32,
    pub rule_thickness: f32,
    /// Gap between the first-page separator and the first question.
    pub content_gap: f32,
    /// Top of the column rule on continuation pages.
    pub continuation_top: f32,
    /// Gap between `continuation_top` and the first question on a continuation page.
    pub continuation_content_gap: f32,
    /// Distance from the page bottom where the column rule stops.
    pub column_rule_bottom_inset: f32,
}

impl Default for HeaderMetrics {
    fn default() -> Self {
        Self {
            institution_baseline: 18.0,
            title_baseline: 26.0,
            fields_baseline: 38.0,
            field_row_gap: 8.0,
            field_label_width: 30.0,
            right_field_inset: 35.0,
            right_underline_inset: 25.0,
            info_baseline: 52.0,
            separator_y: 58.0,
            separator_thickness: 0.8,
            rule_thickness: 0.3,
            content_gap: 6.0,
            continuation_top: 25.0,
            continuation_content_gap: 5.0,
            column_rule_bottom_inset: 12.0,
        }
    }
}

/// Font sizes in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Typography {
    pub institution: f32,
    pub title: f32,
    pub field: f32,
    pub info: f32,
    pub label: f32,
    pub footer: f32,
}

impl Default for Typography {
    fn default() -> Self {
        Self {
            institution: 16.0,
            title: 12.0,
            field: 10.0,
            info: 8.0,
            label: 10.0,
            footer: 10.0,
        }
    }
}

/// The horizontal extent of one column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnFrame {
    pub side: ColumnSide,
    pub x: f32,
    pub width: f32,
}

impl LayoutConfig {
    pub fn content_width(&self) -> f32 {
        self.page_width - self.margin * 2.0
    }

    /// Width of one column in the two-column layout.
    pub fn column_width(&self) -> f32 {
        (self.content_width() - self.column_gap) / 2.0
    }

    /// The lowest y a placed question (including its trailing spacing) may reach.
    pub fn usable_bottom(&self) -> f32 {
        self.page_height - self.bottom_margin
    }

    pub fn first_page_content_top(&self) -> f32 {
        self.header.separator_y + self.header.content_gap
    }

    pub fn continuation_content_top(&self) -> f32 {
        self.header.continuation_top + self.header.continuation_content_gap
    }

    pub fn column_rule_bottom(&self) -> f32 {
        self.page_height - self.header.column_rule_bottom_inset
    }

    pub fn center_x(&self) -> f32 {
        self.page_width / 2.0
    }

    pub fn column_frames(&self, count: ColumnCount) -> Vec<ColumnFrame> {
        match count {
            ColumnCount::One => vec![ColumnFrame {
                side: ColumnSide::Left,
                x: self.margin,
                width: self.content_width(),
            }],
            ColumnCount::Two => {
                let width = self.column_width();
                vec![
                    ColumnFrame {
                        side: ColumnSide::Left,
                        x: self.margin,
                        width,
                    },
                    ColumnFrame {
                        side: ColumnSide::Right,
                        x: self.margin + width + self.column_gap,
                        width,
                    },
                ]
            }
        }
    }

    /// Rejects configurations the placement algorithm cannot honour.
    pub fn validate(&self) -> Result<(), LayoutError> {
        let scalars = [
            ("pageWidth", self.page_width),
            ("pageHeight", self.page_height),
            ("margin", self.margin),
            ("columnGap", self.column_gap),
            ("bottomMargin", self.bottom_margin),
            ("itemSpacing", self.item_spacing),
            ("fallbackHeight", self.fallback_height),
            ("labelGutter", self.label_gutter),
            ("sizing.innerPadding", self.sizing.inner_padding),
            ("header.separatorY", self.header.separator_y),
            ("header.continuationTop", self.header.continuation_top),
        ];
        for (name, value) in scalars {
            if !value.is_finite() || value < 0.0 {
                return Err(LayoutError::InvalidConfig(format!(
                    "{name} must be a non-negative finite number, got {value}"
                )));
            }
        }

        let positive = [
            ("sizing.preferredWidth", self.sizing.preferred_width),
            ("sizing.maxHeight", self.sizing.max_height),
            ("sizing.tallMaxHeight", self.sizing.tall_max_height),
            ("sizing.tallAspectThreshold", self.sizing.tall_aspect_threshold),
            ("sizing.minWidth", self.sizing.min_width),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(LayoutError::InvalidConfig(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }

        if self.column_width() <= self.sizing.inner_padding {
            return Err(LayoutError::InvalidConfig(format!(
                "column width {:.2} leaves no room after inner padding {:.2}",
                self.column_width(),
                self.sizing.inner_padding
            )));
        }
        if self.first_page_content_top() >= self.usable_bottom()
            || self.continuation_content_top() >= self.usable_bottom()
        {
            return Err(LayoutError::InvalidConfig(
                "header reaches below the usable page bottom".into(),
            ));
        }
        Ok(())
    }
}
