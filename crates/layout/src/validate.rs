//! Input checks that run before any placement happens.

use crate::model::{CapturedQuestion, Template};
use crate::LayoutError;
use std::collections::HashSet;

pub fn validate_questions(questions: &[CapturedQuestion]) -> Result<(), LayoutError> {
    if questions.is_empty() {
        return Err(LayoutError::EmptyInput);
    }

    let mut seen = HashSet::with_capacity(questions.len());
    for (index, question) in questions.iter().enumerate() {
        let expected = index as u32 + 1;
        if question.order != expected {
            return Err(LayoutError::InvalidOrder {
                id: question.id.to_string(),
                expected,
                found: question.order,
            });
        }
        if !seen.insert(&question.id) {
            return Err(LayoutError::DuplicateId(question.id.to_string()));
        }
    }
    Ok(())
}

pub fn validate_template(template: &Template) -> Result<(), LayoutError> {
    if template.duration_minutes == Some(0) {
        return Err(LayoutError::InvalidTemplate(
            "durationMinutes must be a positive number of minutes".into(),
        ));
    }
    Ok(())
}
