use quire_layout::{BookletKind, Template};

/// Values for the PDF document information dictionary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentInfo {
    pub title: String,
    pub subject: String,
    pub producer: String,
}

impl DocumentInfo {
    pub const PRODUCER: &'static str = concat!("quire ", env!("CARGO_PKG_VERSION"));

    pub fn from_template(template: &Template) -> Self {
        let title = template.title.trim();
        Self {
            title: if title.is_empty() { "Booklet".to_string() } else { title.to_string() },
            subject: template.kind.to_string(),
            producer: Self::PRODUCER.to_string(),
        }
    }
}

impl Default for DocumentInfo {
    fn default() -> Self {
        Self {
            title: "Booklet".to_string(),
            subject: BookletKind::default().to_string(),
            producer: Self::PRODUCER.to_string(),
        }
    }
}
