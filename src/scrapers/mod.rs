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

mod coursevania;
mod e_next;
mod idownloadcoupon;
mod real_discount;
mod tutorial_bar;
mod udemy_freebies;

pub use coursevania::CourseVaniaScraper;
pub use e_next::ENextScraper;
pub use idownloadcoupon::IDownloadCouponScraper;
pub use real_discount::RealDiscountScraper;
pub use tutorial_bar::TutorialBarScraper;
pub use udemy_freebies::UdemyFreebiesScraper;

#[async_trait]
pub trait CourseScraper: Send + Sync {
    async fn fetch_listings(
        &self,
        client: &Client,
        renderer: &dyn PageRenderer,
    ) -> Result<Vec<CourseRecord>>;
    fn source_config(&self) -> &SourceConfig;
    fn source(&self) -> Source;
}

/// All scrapers, in the order their results are aggregated.
pub fn registry(config: Arc<Config>) -> Vec<Box<dyn CourseScraper>> {
    vec![
        Box::new(UdemyFreebiesScraper::new(config.clone())),
        Box::new(TutorialBarScraper::new(config.clone())),
        Box::new(RealDiscountScraper::new(config.clone())),
        Box::new(IDownloadCouponScraper::new(config.clone())),
        Box::new(CourseVaniaScraper::new(config.clone())),
        Box::new(ENextScraper::new(config)),
    ]
}

/// Keep the records that extracted cleanly; log and drop the rest.
fn keep_extracted<T>(source_name: &str, results: Vec<ScrapeResult<T>>) -> Vec<T> {
    let mut kept = Vec::with_capacity(results.len());
    for result in results {
        match result {
            Ok(item) => kept.push(item),
            Err(e) => warn!("Skipping {} listing: {}", source_name, e),
        }
    }
    kept
}

/// Read the offer button's target out of an intermediate landing page.
fn extract_offer_link(html: &str, page_url: &str, button_css: &'static str) -> ScrapeResult<String> {
    let document = Html::parse_document(html);
    let button = Field::new(button_css)?;
    button.href(document.root_element(), page_url)
}

/// Replace each record's landing-page link with the offer link found on it.
///
/// Pages are visited one at a time. A page without the button drops its
/// record; a page that cannot be rendered fails the whole source.
async fn resolve_offer_links(
    renderer: &dyn PageRenderer,
    source_name: &str,
    records: Vec<CourseRecord>,
    button_css: &'static str,
) -> Result<Vec<CourseRecord>> {
    let mut resolved = Vec::with_capacity(records.len());

    for mut record in records {
        info!("Resolving {} offer link (URL: {})", source_name, record.link);
        let html = renderer.render(&record.link).await?;

        match extract_offer_link(&html, &record.link, button_css) {
            Ok(link) => {
                record.link = link;
                resolved.push(record);
            }
            Err(e) if !e.is_structural() => return Err(e.into()),
            Err(e) => warn!(
                "Skipping {} listing at {}: {}",
                source_name, record.link, e
            ),
        }
    }

    Ok(resolved)
}
