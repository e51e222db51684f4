use serde::{Deserialize, Serialize};

/// Shown in place of a category the source did not provide.
pub const UNKNOWN_CATEGORY: &str = "Unknown";

/// One coupon listing, normalized across sources.
///
/// `title` doubles as the deduplication key. JSON sources can omit it, so it
/// stays optional; such records never match a search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseRecord {
    pub title: Option<String>,
    pub link: String,
    pub category: Option<String>,
}

impl CourseRecord {
    pub fn new(title: impl Into<String>, link: impl Into<String>, category: Option<String>) -> Self {
        Self {
            title: Some(title.into()),
            link: link.into(),
            category,
        }
    }

    pub fn category_label(&self) -> &str {
        self.category.as_deref().unwrap_or(UNKNOWN_CATEGORY)
    }

    /// `needle` must already be lowercase.
    pub fn title_contains(&self, needle: &str) -> bool {
        match &self.title {
            Some(title) => title.to_lowercase().contains(needle),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_label_falls_back_to_unknown() {
        let record = CourseRecord::new("Rust", "https://example.com", None);
        assert_eq!(record.category_label(), "Unknown");

        let record = CourseRecord::new("Rust", "https://example.com", Some("Development".into()));
        assert_eq!(record.category_label(), "Development");
    }

    #[test]
    fn untitled_record_never_contains() {
        let record = CourseRecord {
            title: None,
            link: "https://example.com".into(),
            category: None,
        };
        assert!(!record.title_contains(""));
    }
}
