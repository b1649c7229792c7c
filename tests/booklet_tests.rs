mod common;

use chrono::NaiveDate;
use common::fixtures::*;
use common::pdf_assertions::{count_images, extract_font_names};
use common::{GeneratedPdf, TestResult, generate_booklet, generate_err};
use quire::{
    BookletKind, LayoutError, NumberingStyle, Pipeline, PipelineBuilder, PipelineError, SkipReason,
    Template,
};
use std::sync::Arc;

fn full_template() -> Template {
    Template::new("Electricity Unit Test")
        .with_institution("Riverside Secondary School")
        .with_group("10-C")
        .with_instructor("M. Lindqvist")
        .with_date(NaiveDate::from_ymd_opt(2024, 4, 9).unwrap())
        .with_duration(35)
        .with_kind(BookletKind::Practice)
}

#[test]
fn test_header_fields_are_rendered() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();
    let (_, pdf) = generate_booklet(&questions_with_ratios(&[1.0, 0.5]), &full_template())?;

    assert_pdf_contains_text!(pdf, "Riverside Secondary School");
    assert_pdf_contains_text!(pdf, "Electricity Unit Test");
    assert_pdf_contains_text!(pdf, "CLASS: 10-C");
    assert_pdf_contains_text!(pdf, "Date: 09.04.2024");
    assert_pdf_contains_text!(pdf, "Instructor: M. Lindqvist");
    assert_pdf_contains_text!(pdf, "Duration: 35 min");
    assert_pdf_contains_text!(pdf, "1.");
    assert_pdf_contains_text!(pdf, "2.");
    Ok(())
}

#[test]
fn test_blank_template_uses_placeholders() -> TestResult {
    let (_, pdf) = generate_booklet(&questions_with_ratios(&[1.0]), &Template::default())?;
    assert_pdf_contains_text!(pdf, "INSTITUTION NAME");
    assert_pdf_contains_text!(pdf, "EXAM TITLE");
    assert_pdf_not_contains_text!(pdf, "Duration:");
    assert_pdf_page_count!(pdf, 1);
    Ok(())
}

#[test]
fn test_images_and_fonts_are_embedded() -> TestResult {
    let (booklet, pdf) = generate_booklet(&questions_with_ratios(&[1.0, 2.0, 0.3]), &full_template())?;
    assert_eq!(booklet.document.placed_count(), 3);
    assert_eq!(count_images(&pdf.doc), 3);

    let fonts = extract_font_names(&pdf.doc);
    assert!(fonts.iter().any(|f| f == "Helvetica"));
    assert!(fonts.iter().any(|f| f == "Helvetica-Bold"));
    Ok(())
}

#[test]
fn test_document_info_uses_title_and_kind() -> TestResult {
    let (_, pdf) = generate_booklet(&questions_with_ratios(&[1.0]), &full_template())?;
    let info_id = pdf.doc.trailer.get(b"Info")?.as_reference()?;
    let info = pdf.doc.get_object(info_id)?.as_dict()?;
    assert_eq!(info.get(b"Title")?.as_str()?, b"Electricity Unit Test");
    assert_eq!(info.get(b"Subject")?.as_str()?, b"Practice test");
    Ok(())
}

#[test]
fn test_bad_clip_is_skipped_and_numbering_closes_the_gap() -> TestResult {
    let mut questions = questions_with_ratios(&[1.0, 1.0, 1.0]);
    questions[1].selection.width = 0.0;
    questions[2].image.data = Arc::from(&b"definitely not a png"[..]);
    questions.push(question("q4", 4, 30, 30));

    let template = Template::new("Gaps").with_numbering(NumberingStyle::Alphabetic);
    let (booklet, pdf) = generate_booklet(&questions, &template)?;

    let skipped = &booklet.document.skipped;
    assert_eq!(skipped.len(), 2);
    assert_eq!(skipped[0].order, 2);
    assert!(matches!(skipped[0].reason, SkipReason::InvalidGeometry { .. }));
    assert_eq!(skipped[1].order, 3);
    assert!(matches!(skipped[1].reason, SkipReason::Undecodable(_)));

    assert_eq!(booklet.document.placed_count(), 2);
    assert_pdf_contains_text!(pdf, "a)");
    assert_pdf_contains_text!(pdf, "b)");
    assert_pdf_not_contains_text!(pdf, "c)");
    Ok(())
}

#[test]
fn test_truncated_clip_with_valid_header_is_skipped() -> TestResult {
    let mut questions = vec![question("q1", 1, 40, 30), question("q2", 2, 40, 30), question("q3", 3, 40, 30)];
    let cut = questions[1].image.data[..24].to_vec();
    questions[1].image.data = Arc::from(cut);

    let (booklet, pdf) = generate_booklet(&questions, &Template::new("Cut short"))?;

    let skipped = &booklet.document.skipped;
    assert_eq!(skipped.len(), 1);
    assert_eq!(skipped[0].id.as_str(), "q2");
    assert!(matches!(skipped[0].reason, SkipReason::Undecodable(_)));

    let labels: Vec<&str> = booklet.document.placements().map(|p| p.label.text.as_str()).collect();
    assert_eq!(labels, vec!["1.", "2."]);
    assert_eq!(count_images(&pdf.doc), 2);
    assert_pdf_not_contains_text!(pdf, "3.");
    Ok(())
}

#[test]
fn test_input_errors_fail_the_run() {
    assert!(matches!(
        generate_err(&[], &Template::default()),
        Some(PipelineError::Layout(LayoutError::EmptyInput))
    ));

    let mut duplicated = questions_with_ratios(&[1.0, 1.0]);
    duplicated[1].id = duplicated[0].id.clone();
    assert!(matches!(
        generate_err(&duplicated, &Template::default()),
        Some(PipelineError::Layout(LayoutError::DuplicateId(_)))
    ));

    let questions = questions_with_ratios(&[1.0]);
    assert!(matches!(
        generate_err(&questions, &Template::default().with_duration(0)),
        Some(PipelineError::Layout(LayoutError::InvalidTemplate(_)))
    ));
}

#[test]
fn test_generation_is_deterministic() -> TestResult {
    let questions = questions_with_ratios(&[0.7, 1.3, 2.4, 0.4, 1.0]);
    let template = full_template();
    let pipeline = Pipeline::default();
    let first = pipeline.generate(&questions, &template)?;
    let second = pipeline.generate(&questions, &template)?;
    assert_eq!(first.document, second.document);
    assert_eq!(first.pdf, second.pdf);
    Ok(())
}

#[test]
fn test_generate_into_dir_uses_file_name_policy() -> TestResult {
    let dir = tempfile::tempdir()?;
    let pipeline = PipelineBuilder::new()
        .with_export_date(NaiveDate::from_ymd_opt(2025, 1, 20).unwrap())
        .build()?;
    let template = Template::new("Fizik: Kuvvet ve Hareket");

    let (document, path) = pipeline.generate_into_dir(&questions_with_ratios(&[1.0, 1.0]), &template, dir.path())?;
    assert_eq!(
        path.file_name().and_then(|n| n.to_str()),
        Some("Fizik Kuvvet ve Hareket_2025-01-20.pdf")
    );

    let pdf = GeneratedPdf::from_bytes(std::fs::read(&path)?)?;
    assert_pdf_page_count!(pdf, document.page_count());
    Ok(())
}

#[test]
fn test_generate_to_file_creates_parent_dirs() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("nested/out/booklet.pdf");
    Pipeline::default().generate_to_file(&questions_with_ratios(&[1.0]), &Template::new("Nested"), &path)?;
    assert!(path.exists());
    GeneratedPdf::from_bytes(std::fs::read(&path)?)?;
    Ok(())
}

#[test]
fn test_config_file_overrides_and_validation() -> TestResult {
    let dir = tempfile::tempdir()?;

    let tight = dir.path().join("tight.json");
    std::fs::write(&tight, r#"{ "itemSpacing": 4, "sizing": { "maxHeight": 40 } }"#)?;
    let pipeline = PipelineBuilder::new().with_config_file(&tight)?.build()?;
    assert_eq!(pipeline.engine().config().item_spacing, 4.0);
    assert_eq!(pipeline.engine().config().sizing.max_height, 40.0);

    let broken = dir.path().join("broken.json");
    std::fs::write(&broken, r#"{ "pageHeight": 50 }"#)?;
    assert!(matches!(
        PipelineBuilder::new().with_config_file(&broken),
        Err(PipelineError::Layout(LayoutError::InvalidConfig(_)))
    ));

    let garbage = dir.path().join("garbage.json");
    std::fs::write(&garbage, "not json")?;
    assert!(matches!(
        PipelineBuilder::new().with_config_file(&garbage),
        Err(PipelineError::Json(_))
    ));
    Ok(())
}

#[tokio::test]
async fn test_generate_async_matches_sync() -> TestResult {
    let questions = questions_with_ratios(&[1.0, 3.0, 0.5, 1.2]);
    let template = full_template();
    let pipeline = Pipeline::default();

    let sync = pipeline.generate(&questions, &template)?;
    let booklet = pipeline.generate_async(questions, template).await?;
    assert_eq!(booklet.document, sync.document);
    assert_eq!(booklet.pdf, sync.pdf);
    Ok(())
}

#[tokio::test]
async fn test_concurrent_generation_shares_one_pipeline() -> TestResult {
    let pipeline = Pipeline::default();
    let mut handles = Vec::new();
    for n in 1..=4usize {
        let pipeline = pipeline.clone();
        let questions = questions_with_ratios(&vec![1.0; n * 5]);
        handles.push(tokio::spawn(async move {
            pipeline.generate_async(questions, Template::new(format!("Set {n}"))).await
        }));
    }
    for (i, handle) in handles.into_iter().enumerate() {
        let booklet = handle.await??;
        assert_eq!(booklet.document.placed_count(), (i + 1) * 5);
    }
    Ok(())
}
