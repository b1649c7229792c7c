use lopdf::Document as LopdfDocument;
use std::collections::HashSet;

/// Extract all text content from a PDF document
pub fn extract_text(doc: &LopdfDocument) -> String {
    let mut text = String::new();
    let pages = doc.get_pages();
    for page_num in 1..=pages.len() {
        if let Ok(page_text) = doc.extract_text(&[page_num as u32]) {
            text.push_str(&page_text);
            text.push('\n');
        }
    }
    text
}

/// Base font names referenced by page resources
#[allow(dead_code)]
pub fn extract_font_names(doc: &LopdfDocument) -> Vec<String> {
    fn resolve<'a>(doc: &'a LopdfDocument, object: &'a lopdf::Object) -> Option<&'a lopdf::Dictionary> {
        match object.as_reference() {
            Ok(id) => doc.get_object(id).ok().and_then(|o| o.as_dict().ok()),
            Err(_) => object.as_dict().ok(),
        }
    }

    let mut fonts = HashSet::new();
    for page_id in doc.get_pages().values() {
        let Some(page) = doc.get_object(*page_id).ok().and_then(|o| o.as_dict().ok()) else {
            continue;
        };
        let Some(resources) = page.get(b"Resources").ok().and_then(|r| resolve(doc, r)) else {
            continue;
        };
        let Some(font_dict) = resources.get(b"Font").ok().and_then(|f| resolve(doc, f)) else {
            continue;
        };
        for (_name, font) in font_dict.iter() {
            if let Some(base_font) = resolve(doc, font)
                .and_then(|f| f.get(b"BaseFont").ok())
                .and_then(|b| b.as_name().ok())
            {
                fonts.insert(String::from_utf8_lossy(base_font).to_string());
            }
        }
    }
    fonts.into_iter().collect()
}

/// Number of image XObjects in the document
#[allow(dead_code)]
pub fn count_images(doc: &LopdfDocument) -> usize {
    doc.objects
        .values()
        .filter(|object| {
            object
                .as_stream()
                .ok()
                .and_then(|s| s.dict.get(b"Subtype").ok())
                .and_then(|s| s.as_name().ok())
                == Some(b"Image".as_slice())
        })
        .count()
}

/// Assert that PDF contains specific text
#[macro_export]
macro_rules! assert_pdf_contains_text {
    ($pdf:expr, $text:expr) => {
        let extracted = $crate::common::pdf_assertions::extract_text(&$pdf.doc);
        assert!(
            extracted.contains($text),
            "PDF should contain '{}', but extracted text was:\n{}",
            $text,
            extracted
        );
    };
}

/// Assert that PDF does NOT contain specific text
#[macro_export]
macro_rules! assert_pdf_not_contains_text {
    ($pdf:expr, $text:expr) => {
        let extracted = $crate::common::pdf_assertions::extract_text(&$pdf.doc);
        assert!(
            !extracted.contains($text),
            "PDF should NOT contain '{}', but it was found in:\n{}",
            $text,
            extracted
        );
    };
}

/// Assert the number of pages in a PDF
#[macro_export]
macro_rules! assert_pdf_page_count {
    ($pdf:expr, $count:expr) => {
        assert_eq!(
            $pdf.page_count(),
            $count,
            "Expected {} pages, got {}",
            $count,
            $pdf.page_count()
        );
    };
}
