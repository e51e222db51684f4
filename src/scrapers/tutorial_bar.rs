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
use crate::parsers::{element_text, href_of, Field};
use crate::scrapers::{keep_extracted, resolve_offer_links, CourseScraper};

const BLOCK: &str = ".content_constructor.pb0.pr20.pl20.mobilepadding";
const HEADLINE_LINK: &str = ".mb15.mt0.font110.mobfont100.fontnormal.lineheight20 a";
const CATEGORY: &str = ".cat_link_meta .cat";
const OFFER_BUTTON: &str = "a.btn_offer_block.re_track_btn";

pub struct TutorialBarScraper {
    config: Arc<Config>,
}

impl TutorialBarScraper {
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl CourseScraper for TutorialBarScraper {
    async fn fetch_listings(
        &self,
        _client: &Client,
        renderer: &dyn PageRenderer,
    ) -> Result<Vec<CourseRecord>> {
        let source_config = self.source_config();
        info!("Scraping Tutorial Bar...");

        let html = renderer.render(&source_config.url).await?;
        let extracted = extract_courses(&html, &source_config.url)?;
        let listed = keep_extracted(&source_config.name, extracted);

        if listed.is_empty() {
            warn!("No course blocks matched on Tutorial Bar");
            return Ok(listed);
        }
        info!("Found {} courses on Tutorial Bar listing page", listed.len());

        resolve_offer_links(renderer, &source_config.name, listed, OFFER_BUTTON).await
    }

    fn source_config(&self) -> &SourceConfig {
        &self.config.sources[&Source::TutorialBar]
    }

    fn source(&self) -> Source {
        Source::TutorialBar
    }
}

fn extract_courses(html: &str, page_url: &str) -> ScrapeResult<Vec<ScrapeResult<CourseRecord>>> {
    let document = Html::parse_document(html);
    let block = Field::new(BLOCK)?;
    let headline = Field::new(HEADLINE_LINK)?;
    let category = Field::new(CATEGORY)?;

    Ok(block
        .select_all(&document)
        .map(|element| extract_course(element, page_url, &headline, &category))
        .collect())
}

fn extract_course(
    element: ElementRef<'_>,
    page_url: &str,
    headline: &Field,
    category: &Field,
) -> ScrapeResult<CourseRecord> {
    let anchor = headline.first(element)?;

    Ok(CourseRecord {
        title: Some(element_text(&anchor)),
        link: href_of(&anchor, headline.css(), page_url)?,
        category: category.optional_text(element),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::fixture::FixtureRenderer;
    use crate::config::test_config;
    use pretty_assertions::assert_eq;

    const LISTING: &str = r#"
        <div class="content_constructor pb0 pr20 pl20 mobilepadding">
          <h3 class="mb15 mt0 font110 mobfont100 fontnormal lineheight20">
            <a href="https://www.tutorialbar.com/rust-in-action/">Rust in Action</a>
          </h3>
          <div class="cat_link_meta"><a class="cat">Programming</a></div>
        </div>
        <div class="content_constructor pb0 pr20 pl20 mobilepadding">
          <h3 class="mb15 mt0 font110 mobfont100 fontnormal lineheight20">
            <a href="/docker-basics/">Docker Basics</a>
          </h3>
        </div>
    "#;

    #[tokio::test]
    async fn follows_each_course_page_to_the_offer_link() {
        let config = test_config();
        let url = config.sources[&Source::TutorialBar].url.clone();
        let renderer = FixtureRenderer::default()
            .with_page(&url, LISTING)
            .with_page(
                "https://www.tutorialbar.com/rust-in-action/",
                r#"<a class="btn_offer_block re_track_btn" href="https://example.com/final">Get</a>"#,
            )
            .with_page(
                "https://www.tutorialbar.com/docker-basics/",
                r#"<a class="btn_offer_block re_track_btn" href="https://www.udemy.com/course/docker/?couponCode=X">Get</a>"#,
            );
        let scraper = TutorialBarScraper::new(Arc::new(config));

        let courses = scraper
            .fetch_listings(&Client::new(), &renderer)
            .await
            .unwrap();

        assert_eq!(
            courses,
            vec![
                CourseRecord::new(
                    "Rust in Action",
                    "https://example.com/final",
                    Some("Programming".to_string()),
                ),
                CourseRecord::new(
                    "Docker Basics",
                    "https://www.udemy.com/course/docker/?couponCode=X",
                    None,
                ),
            ]
        );
        assert_eq!(renderer.visits().len(), 3);
    }

    #[tokio::test]
    async fn empty_listing_skips_resolution() {
        let config = test_config();
        let url = config.sources[&Source::TutorialBar].url.clone();
        let renderer = FixtureRenderer::default().with_page(&url, "<main></main>");
        let scraper = TutorialBarScraper::new(Arc::new(config));

        let courses = scraper
            .fetch_listings(&Client::new(), &renderer)
            .await
            .unwrap();

        assert!(courses.is_empty());
        assert_eq!(renderer.visits(), vec![url]);
    }
}
