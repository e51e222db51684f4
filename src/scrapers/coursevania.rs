use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use scraper::Html;
use std::sync::Arc;
use tracing::{info, warn};

use crate::browser::PageRenderer;
use crate::config::{Config, SourceConfig};
use crate::error::ScrapeResult;
use crate::models::{CourseRecord, Source};
use crate::parsers::Field;
use crate::scrapers::{keep_extracted, resolve_offer_links, CourseScraper};

const CARD: &str = ".stm_lms_courses__single--inner";
const TITLE: &str = ".stm_lms_courses__single--title";
const LINK: &str = "a";
const TERM: &str = ".stm_lms_courses__single--term";
const ENROLL_BUTTON: &str = "a.btn.btn-default.btn_big.text-center.no-price";

pub struct CourseVaniaScraper {
    config: Arc<Config>,
}

impl CourseVaniaScraper {
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl CourseScraper for CourseVaniaScraper {
    async fn fetch_listings(
        &self,
        _client: &Client,
        renderer: &dyn PageRenderer,
    ) -> Result<Vec<CourseRecord>> {
        let source_config = self.source_config();
        info!("Scraping CourseVania...");

        let html = renderer.render(&source_config.url).await?;
        let extracted = extract_courses(&html, &source_config.url)?;
        let listed = keep_extracted(&source_config.name, extracted);

        if listed.is_empty() {
            warn!("No course cards matched on CourseVania");
            return Ok(listed);
        }
        info!("Found {} courses on CourseVania listing page", listed.len());

        resolve_offer_links(renderer, &source_config.name, listed, ENROLL_BUTTON).await
    }

    fn source_config(&self) -> &SourceConfig {
        &self.config.sources[&Source::CourseVania]
    }

    fn source(&self) -> Source {
        Source::CourseVania
    }
}

fn extract_courses(html: &str, page_url: &str) -> ScrapeResult<Vec<ScrapeResult<CourseRecord>>> {
    let document = Html::parse_document(html);
    let card = Field::new(CARD)?;
    let title = Field::new(TITLE)?;
    let link = Field::new(LINK)?;
    let term = Field::new(TERM)?;

    Ok(card
        .select_all(&document)
        .map(|element| -> ScrapeResult<CourseRecord> {
            Ok(CourseRecord {
                title: Some(title.text(element)?),
                link: link.href(element, page_url)?,
                category: term.optional_text(element),
            })
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::fixture::FixtureRenderer;
    use crate::config::test_config;
    use pretty_assertions::assert_eq;

    const LISTING: &str = r#"
        <div class="stm_lms_courses__single--inner">
          <a href="https://coursevania.com/courses/kubernetes-101/"><img></a>
          <div class="stm_lms_courses__single--term">IT &amp; Software</div>
          <div class="stm_lms_courses__single--title"><h5>Kubernetes 101</h5></div>
        </div>
        <div class="stm_lms_courses__single--inner">
          <a href="https://coursevania.com/courses/no-button/"><img></a>
          <div class="stm_lms_courses__single--title"><h5>Broken Landing Page</h5></div>
        </div>
    "#;

    #[tokio::test]
    async fn resolves_enroll_button_and_drops_pages_without_it() {
        let config = test_config();
        let url = config.sources[&Source::CourseVania].url.clone();
        let renderer = FixtureRenderer::default()
            .with_page(&url, LISTING)
            .with_page(
                "https://coursevania.com/courses/kubernetes-101/",
                r#"<a class="btn btn-default btn_big text-center no-price" href="https://example.com/final">Enroll</a>"#,
            )
            .with_page(
                "https://coursevania.com/courses/no-button/",
                r#"<a class="btn btn-default btn_big text-center" href="/checkout">Buy</a>"#,
            );
        let scraper = CourseVaniaScraper::new(Arc::new(config));

        let courses = scraper
            .fetch_listings(&Client::new(), &renderer)
            .await
            .unwrap();

        assert_eq!(
            courses,
            vec![CourseRecord::new(
                "Kubernetes 101",
                "https://example.com/final",
                Some("IT & Software".to_string()),
            )]
        );
    }

    #[tokio::test]
    async fn unreachable_listing_is_an_error() {
        let scraper = CourseVaniaScraper::new(Arc::new(test_config()));
        let renderer = FixtureRenderer::default();
        assert!(scraper.fetch_listings(&Client::new(), &renderer).await.is_err());
    }
}
