//! Header and footer furniture.
//!
//! The first page carries the full title block; continuation pages only get
//! the column rule so more of the page is left for questions.

use crate::config::LayoutConfig;
use crate::model::Template;
use crate::output::{
    FontWeight, HeaderKind, Page, PageFooter, PageHeader, PageMark, Rule, TextAlign, TextMark,
};
use crate::policy::ColumnCount;
use quire_types::Point;

pub const INSTITUTION_PLACEHOLDER: &str = "INSTITUTION NAME";
pub const TITLE_PLACEHOLDER: &str = "EXAM TITLE";

fn text(text: impl Into<String>, x: f32, y: f32, size: f32, weight: FontWeight, align: TextAlign) -> PageMark {
    PageMark::Text(TextMark {
        text: text.into(),
        position: Point::new(x, y),
        font_size: size,
        weight,
        align,
    })
}

fn rule(x1: f32, y1: f32, x2: f32, y2: f32, thickness: f32) -> PageMark {
    PageMark::Rule(Rule {
        from: Point::new(x1, y1),
        to: Point::new(x2, y2),
        thickness,
    })
}

fn or_placeholder<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    let trimmed = value.trim();
    if trimmed.is_empty() { placeholder } else { trimmed }
}

fn column_rule(config: &LayoutConfig, top: f32) -> PageMark {
    rule(
        config.center_x(),
        top,
        config.center_x(),
        config.column_rule_bottom(),
        config.header.rule_thickness,
    )
}

/// Builds the title block for page 1.
pub fn first_page_header(template: &Template, config: &LayoutConfig, columns: ColumnCount) -> PageHeader {
    let h = &config.header;
    let t = &config.typography;
    let center = config.center_x();
    let left = config.margin;
    let right = config.page_width - config.margin;
    let mut marks = Vec::with_capacity(16);

    marks.push(text(
        or_placeholder(&template.institution_name, INSTITUTION_PLACEHOLDER),
        center,
        h.institution_baseline,
        t.institution,
        FontWeight::Bold,
        TextAlign::Center,
    ));
    marks.push(text(
        or_placeholder(&template.title, TITLE_PLACEHOLDER),
        center,
        h.title_baseline,
        t.title,
        FontWeight::Bold,
        TextAlign::Center,
    ));

    // Student fields: two rows, left and right, each with an underline to write on.
    let row1 = h.fields_baseline;
    let row2 = h.fields_baseline + h.field_row_gap;
    let right_label_x = right - h.right_field_inset;
    let class_label = if template.group_label.trim().is_empty() {
        "CLASS:".to_string()
    } else {
        format!("CLASS: {}", template.group_label.trim())
    };
    for (label, x, y) in [
        ("NAME:".to_string(), left, row1),
        ("NUMBER:".to_string(), left, row2),
        (class_label, right_label_x, row1),
        ("SCORE:".to_string(), right_label_x, row2),
    ] {
        marks.push(text(label, x, y, t.field, FontWeight::Normal, TextAlign::Left));
    }
    for y in [row1 + 1.0, row2 + 1.0] {
        marks.push(rule(left + h.field_label_width, y, center - 5.0, y, h.rule_thickness));
        marks.push(rule(right - h.right_underline_inset, y, right, y, h.rule_thickness));
    }

    if let Some(date) = template.date {
        marks.push(text(
            format!("Date: {}", date.format("%d.%m.%Y")),
            left,
            h.info_baseline,
            t.info,
            FontWeight::Normal,
            TextAlign::Left,
        ));
    }
    if !template.instructor_name.trim().is_empty() {
        marks.push(text(
            format!("Instructor: {}", template.instructor_name.trim()),
            center,
            h.info_baseline,
            t.info,
            FontWeight::Normal,
            TextAlign::Center,
        ));
    }
    if let Some(minutes) = template.duration_minutes {
        marks.push(text(
            format!("Duration: {minutes} min"),
            right,
            h.info_baseline,
            t.info,
            FontWeight::Normal,
            TextAlign::Right,
        ));
    }

    marks.push(rule(left, h.separator_y, right, h.separator_y, h.separator_thickness));
    if columns == ColumnCount::Two {
        marks.push(column_rule(config, h.separator_y));
    }

    PageHeader {
        kind: HeaderKind::Full,
        marks,
        content_top: config.first_page_content_top(),
    }
}

/// Builds the minimal header used from page 2 on.
pub fn continuation_header(config: &LayoutConfig, columns: ColumnCount) -> PageHeader {
    let marks = match columns {
        ColumnCount::Two => vec![column_rule(config, config.header.continuation_top)],
        ColumnCount::One => Vec::new(),
    };
    PageHeader {
        kind: HeaderKind::Minimal,
        marks,
        content_top: config.continuation_content_top(),
    }
}

pub fn footer(page_index: usize, page_count: usize, config: &LayoutConfig) -> PageFooter {
    PageFooter {
        page_index,
        page_count,
        mark: TextMark {
            text: format!("{page_index}/{page_count}"),
            position: Point::new(config.center_x(), config.page_height - config.footer_offset),
            font_size: config.typography.footer,
            weight: FontWeight::Normal,
            align: TextAlign::Center,
        },
    }
}

/// Second pass: once pagination is final, give every page its `i/n` footer.
pub fn stamp_footers(pages: &mut [Page], config: &LayoutConfig) {
    let count = pages.len();
    for (i, page) in pages.iter_mut().enumerate() {
        page.index = i + 1;
        page.footer = Some(footer(i + 1, count, config));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn texts(header: &PageHeader) -> Vec<&str> {
        header
            .marks
            .iter()
            .filter_map(|m| match m {
                PageMark::Text(t) => Some(t.text.as_str()),
                PageMark::Rule(_) => None,
            })
            .collect()
    }

    #[test]
    fn test_empty_template_uses_placeholders() {
        let config = LayoutConfig::default();
        let header = first_page_header(&Template::default(), &config, ColumnCount::Two);
        let texts = texts(&header);
        assert!(texts.contains(&INSTITUTION_PLACEHOLDER));
        assert!(texts.contains(&TITLE_PLACEHOLDER));
        assert!(!texts.iter().any(|t| t.starts_with("Date:")));
        assert!(!texts.iter().any(|t| t.starts_with("Duration:")));
        assert!(!texts.iter().any(|t| t.starts_with("Instructor:")));
        assert_eq!(header.content_top, 64.0);
        assert_eq!(header.kind, HeaderKind::Full);
    }

    #[test]
    fn test_full_template_info_line() {
        let config = LayoutConfig::default();
        let template = Template::new("Midterm")
            .with_institution("North Ridge High")
            .with_group("9-B")
            .with_instructor("R. Okafor")
            .with_date(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap())
            .with_duration(40);
        let header = first_page_header(&template, &config, ColumnCount::Two);
        let texts = texts(&header);
        assert!(texts.contains(&"North Ridge High"));
        assert!(texts.contains(&"Midterm"));
        assert!(texts.contains(&"CLASS: 9-B"));
        assert!(texts.contains(&"Date: 05.03.2024"));
        assert!(texts.contains(&"Instructor: R. Okafor"));
        assert!(texts.contains(&"Duration: 40 min"));
    }

    #[test]
    fn test_first_page_rules() {
        let config = LayoutConfig::default();
        let header = first_page_header(&Template::default(), &config, ColumnCount::Two);
        let rules: Vec<&Rule> = header
            .marks
            .iter()
            .filter_map(|m| match m {
                PageMark::Rule(r) => Some(r),
                PageMark::Text(_) => None,
            })
            .collect();
        // four underlines, the separator and the column rule
        assert_eq!(rules.len(), 6);
        let column = rules.last().unwrap();
        assert_eq!(column.from, Point::new(105.0, 58.0));
        assert_eq!(column.to, Point::new(105.0, 285.0));

        let single = first_page_header(&Template::default(), &config, ColumnCount::One);
        assert_eq!(single.marks.len(), header.marks.len() - 1);
    }

    #[test]
    fn test_continuation_header_is_minimal() {
        let config = LayoutConfig::default();
        let header = continuation_header(&config, ColumnCount::Two);
        assert_eq!(header.kind, HeaderKind::Minimal);
        assert_eq!(header.marks.len(), 1);
        assert_eq!(header.content_top, 30.0);
        assert!(continuation_header(&config, ColumnCount::One).marks.is_empty());
    }

    #[test]
    fn test_footer_text() {
        let config = LayoutConfig::default();
        let f = footer(2, 5, &config);
        assert_eq!(f.mark.text, "2/5");
        assert_eq!(f.mark.align, TextAlign::Center);
        assert_eq!(f.mark.position, Point::new(105.0, 287.0));
    }
}
