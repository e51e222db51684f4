use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use scraper::{ElementRef, Html};
use std::sync::Arc;
use tracing::{info, warn};

use crate::browser::PageRenderer;
use crate::config::{Config, SourceConfig};
use crate::error::ScrapeResult;
use crate::models::{CourseRecord, Source};
use crate::parsers::{canonical_out_link, Field};
use crate::scrapers::{keep_extracted, CourseScraper};

const BLOCK: &str = ".row .theme-block";
const LINK: &str = "a.theme-img";
const TITLE: &str = "h4";
const CATEGORY: &str = ".coupon-specility";

pub struct UdemyFreebiesScraper {
    config: Arc<Config>,
}

impl UdemyFreebiesScraper {
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl CourseScraper for UdemyFreebiesScraper {
    async fn fetch_listings(
        &self,
        _client: &Client,
        renderer: &dyn PageRenderer,
    ) -> Result<Vec<CourseRecord>> {
        let source_config = self.source_config();
        info!("Scraping Udemy Freebies...");

        let html = renderer.render(&source_config.url).await?;
        let extracted = extract_courses(&html, &source_config.url)?;
        let courses = keep_extracted(&source_config.name, extracted);

        if courses.is_empty() {
            warn!("No course blocks matched on Udemy Freebies");
        }
        info!("Found {} courses on Udemy Freebies", courses.len());

        Ok(courses)
    }

    fn source_config(&self) -> &SourceConfig {
        &self.config.sources[&Source::UdemyFreebies]
    }

    fn source(&self) -> Source {
        Source::UdemyFreebies
    }
}

fn extract_courses(html: &str, page_url: &str) -> ScrapeResult<Vec<ScrapeResult<CourseRecord>>> {
    let document = Html::parse_document(html);
    let block = Field::new(BLOCK)?;
    let link = Field::new(LINK)?;
    let title = Field::new(TITLE)?;
    let category = Field::new(CATEGORY)?;

    Ok(block
        .select_all(&document)
        .map(|element| extract_course(element, page_url, &link, &title, &category))
        .collect())
}

fn extract_course(
    element: ElementRef<'_>,
    page_url: &str,
    link: &Field,
    title: &Field,
    category: &Field,
) -> ScrapeResult<CourseRecord> {
    let href = link.href(element, page_url)?;

    Ok(CourseRecord {
        title: Some(title.text(element)?),
        link: canonical_out_link(&href),
        category: category.optional_text(element),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::fixture::FixtureRenderer;
    use crate::config::test_config;
    use pretty_assertions::assert_eq;

    const PAGE: &str = r#"
        <div class="row">
          <div class="theme-block">
            <a class="theme-img" href="https://www.udemyfreebies.com/free-udemy-course/python-basics"><img></a>
            <h4> Python Basics </h4>
            <span class="coupon-specility">Development</span>
          </div>
          <div class="theme-block">
            <a class="theme-img" href="/coupon/redirect/out-redirect/go-101"><img></a>
            <h4>Intro to Go</h4>
          </div>
          <div class="theme-block">
            <h4>No link here</h4>
          </div>
        </div>
    "#;

    #[tokio::test]
    async fn rewrites_links_and_skips_blocks_without_link() {
        let config = test_config();
        let url = config.sources[&Source::UdemyFreebies].url.clone();
        let renderer = FixtureRenderer::default().with_page(&url, PAGE);
        let scraper = UdemyFreebiesScraper::new(Arc::new(config));

        let courses = scraper
            .fetch_listings(&Client::new(), &renderer)
            .await
            .unwrap();

        assert_eq!(
            courses,
            vec![
                CourseRecord::new(
                    "Python Basics",
                    "https://www.udemyfreebies.com/out/python-basics",
                    Some("Development".to_string()),
                ),
                CourseRecord::new("Intro to Go", "https://www.udemyfreebies.com/out/go-101", None),
            ]
        );
    }

    #[test]
    fn page_without_blocks_yields_nothing() {
        let extracted = extract_courses("<html><body>maintenance</body></html>", "https://x.test/").unwrap();
        assert!(extracted.is_empty());
    }
}
