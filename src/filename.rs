//! Output file naming.

use chrono::NaiveDate;

/// Stem used when nothing of the title survives cleaning.
pub const FALLBACK_STEM: &str = "booklet";

/// Keeps letters, digits and whitespace from `title` (in any script) and
/// trims the result.
pub fn clean_title(title: &str) -> String {
    title
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect::<String>()
        .trim()
        .to_string()
}

/// `"{clean title}_{YYYY-MM-DD}.pdf"`, with `date` being the export date.
pub fn booklet_file_name(title: &str, date: NaiveDate) -> String {
    let stem = clean_title(title);
    let stem = if stem.is_empty() { FALLBACK_STEM } else { stem.as_str() };
    format!("{}_{}.pdf", stem, date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 11, 3).unwrap()
    }

    #[test]
    fn test_punctuation_is_removed() {
        assert_eq!(booklet_file_name("Unit 4: Forces & Motion!", date()), "Unit 4 Forces  Motion_2024-11-03.pdf");
    }

    #[test]
    fn test_unicode_letters_are_kept() {
        assert_eq!(booklet_file_name("Matematik Sınavı (Güz)", date()), "Matematik Sınavı Güz_2024-11-03.pdf");
        assert_eq!(clean_title("  Ölçme-Değerlendirme  "), "ÖlçmeDeğerlendirme");
    }

    #[test]
    fn test_empty_title_falls_back() {
        assert_eq!(booklet_file_name("", date()), "booklet_2024-11-03.pdf");
        assert_eq!(booklet_file_name("?!/", date()), "booklet_2024-11-03.pdf");
    }
}
