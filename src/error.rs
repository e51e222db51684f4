use thiserror::Error;

pub type ScrapeResult<T> = std::result::Result<T, ScrapeError>;

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("invalid selector: {0}")]
    InvalidSelector(String),

    #[error("element not found: {0}")]
    MissingElement(String),

    #[error("element {selector} has no `{attribute}` attribute")]
    MissingAttribute { selector: String, attribute: String },

    #[error("invalid link {link}: {reason}")]
    InvalidLink { link: String, reason: String },

    #[error("unexpected response shape: {0}")]
    UnexpectedShape(String),

    #[error("render failed for {url}: {reason}")]
    Render { url: String, reason: String },
}

impl ScrapeError {
    /// Structural failures cost one record; everything else aborts the run.
    pub fn is_structural(&self) -> bool {
        !matches!(self, ScrapeError::Render { .. } | ScrapeError::InvalidSelector(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ScrapeError::MissingAttribute {
            selector: "a.theme-img".to_string(),
            attribute: "href".to_string(),
        };
        assert_eq!(err.to_string(), "element a.theme-img has no `href` attribute");
    }

    #[test]
    fn render_failures_are_not_structural() {
        let err = ScrapeError::Render {
            url: "https://example.com".to_string(),
            reason: "timed out".to_string(),
        };
        assert!(!err.is_structural());
        assert!(ScrapeError::MissingElement("h4".to_string()).is_structural());
    }
}
