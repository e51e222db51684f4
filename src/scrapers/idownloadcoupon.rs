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
use crate::scrapers::{keep_extracted, CourseScraper};

const PRODUCT: &str = ".product";
const TITLE: &str = "h2";
const EXTERNAL_BUTTON: &str = "a.button.product_type_external";

pub struct IDownloadCouponScraper {
    config: Arc<Config>,
}

impl IDownloadCouponScraper {
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl CourseScraper for IDownloadCouponScraper {
    async fn fetch_listings(
        &self,
        _client: &Client,
        renderer: &dyn PageRenderer,
    ) -> Result<Vec<CourseRecord>> {
        let source_config = self.source_config();
        info!("Scraping IDownloadCoupon...");

        let html = renderer.render(&source_config.url).await?;
        let extracted = extract_courses(&html, &source_config.url)?;
        let courses = keep_extracted(&source_config.name, extracted);

        if courses.is_empty() {
            warn!("No products matched on IDownloadCoupon");
        }
        info!("Found {} courses on IDownloadCoupon", courses.len());

        Ok(courses)
    }

    fn source_config(&self) -> &SourceConfig {
        &self.config.sources[&Source::IDownloadCoupon]
    }

    fn source(&self) -> Source {
        Source::IDownloadCoupon
    }
}

// The shop exposes no category, so none is recorded.
fn extract_courses(html: &str, page_url: &str) -> ScrapeResult<Vec<ScrapeResult<CourseRecord>>> {
    let document = Html::parse_document(html);
    let product = Field::new(PRODUCT)?;
    let title = Field::new(TITLE)?;
    let button = Field::new(EXTERNAL_BUTTON)?;

    Ok(product
        .select_all(&document)
        .map(|element| -> ScrapeResult<CourseRecord> {
            Ok(CourseRecord {
                title: Some(title.text(element)?),
                link: button.href(element, page_url)?,
                category: None,
            })
        })
        .collect())
}
