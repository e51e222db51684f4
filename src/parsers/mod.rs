pub mod link;

pub use link::*;

use html_escape::decode_html_entities;
use scraper::{ElementRef, Html, Selector};
use serde_json::Value;

use crate::error::{ScrapeError, ScrapeResult};

/// Clean and normalize text by removing extra whitespace and decoding HTML entities
pub fn clean_text(text: &str) -> String {
    let decoded = decode_html_entities(text);
    decoded
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// A CSS selector that remembers its source text for error messages.
pub struct Field {
    css: &'static str,
    selector: Selector,
}

impl Field {
    pub fn new(css: &'static str) -> ScrapeResult<Self> {
        let selector =
            Selector::parse(css).map_err(|_| ScrapeError::InvalidSelector(css.to_string()))?;
        Ok(Self { css, selector })
    }

    pub fn css(&self) -> &'static str {
        self.css
    }

    pub fn select_all<'a>(&'a self, document: &'a Html) -> impl Iterator<Item = ElementRef<'a>> + 'a {
        document.select(&self.selector)
    }

    pub fn first<'a>(&self, scope: ElementRef<'a>) -> ScrapeResult<ElementRef<'a>> {
        scope
            .select(&self.selector)
            .next()
            .ok_or_else(|| ScrapeError::MissingElement(self.css.to_string()))
    }

    pub fn text(&self, scope: ElementRef<'_>) -> ScrapeResult<String> {
        self.first(scope).map(|element| element_text(&element))
    }

    pub fn optional_text(&self, scope: ElementRef<'_>) -> Option<String> {
        self.first(scope).ok().map(|element| element_text(&element))
    }

    /// Absolute target of the first matching link, resolved against `base`.
    pub fn href(&self, scope: ElementRef<'_>, base: &str) -> ScrapeResult<String> {
        let element = self.first(scope)?;
        href_of(&element, self.css, base)
    }
}

pub fn element_text(element: &ElementRef<'_>) -> String {
    clean_text(&element.text().collect::<String>())
}

pub fn href_of(element: &ElementRef<'_>, css: &str, base: &str) -> ScrapeResult<String> {
    let href = element
        .value()
        .attr("href")
        .ok_or_else(|| ScrapeError::MissingAttribute {
            selector: css.to_string(),
            attribute: "href".to_string(),
        })?;
    resolve_href(base, href)
}

/// String content of a JSON field; any other type reads as absent.
pub fn json_text(value: Option<&Value>) -> Option<String> {
    value.and_then(Value::as_str).map(str::to_string)
}

/// Like [`json_text`], but numbers are accepted and printed as-is.
pub fn json_scalar(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::Number(number)) => Some(number.to_string()),
        other => json_text(other),
    }
}
