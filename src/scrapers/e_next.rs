use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

use crate::browser::PageRenderer;
use crate::config::{Config, SourceConfig};
use crate::error::{ScrapeError, ScrapeResult};
use crate::models::{CourseRecord, Source};
use crate::parsers::{json_scalar, json_text, udemy_coupon_link};
use crate::scrapers::{keep_extracted, CourseScraper};
use crate::utils::http::fetch_json;

pub struct ENextScraper {
    config: Arc<Config>,
}

impl ENextScraper {
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }
}

/// One entry of the static data file. `url` is the Udemy course slug; `id`
/// is only consulted when an entry has no `url`.
#[derive(Debug, Deserialize)]
struct CouponEntry {
    url: Option<Value>,
    id: Option<Value>,
    code: Option<Value>,
    title: Option<Value>,
    category: Option<Value>,
}

#[async_trait]
impl CourseScraper for ENextScraper {
    async fn fetch_listings(
        &self,
        client: &Client,
        _renderer: &dyn PageRenderer,
    ) -> Result<Vec<CourseRecord>> {
        let source_config = self.source_config();
        info!("Downloading E-Next coupon data...");

        let body = fetch_json(client, &source_config.url, &[]).await?;

        let courses = match parse_entries(&body) {
            Ok(extracted) => keep_extracted(&source_config.name, extracted),
            Err(e) => {
                warn!("E-Next returned no usable listing: {}", e);
                Vec::new()
            }
        };

        info!("Found {} courses on E-Next", courses.len());
        Ok(courses)
    }

    fn source_config(&self) -> &SourceConfig {
        &self.config.sources[&Source::ENext]
    }

    fn source(&self) -> Source {
        Source::ENext
    }
}

fn parse_entries(body: &Value) -> ScrapeResult<Vec<ScrapeResult<CourseRecord>>> {
    let entries = body
        .as_array()
        .ok_or_else(|| ScrapeError::UnexpectedShape("expected a JSON array".to_string()))?;

    Ok(entries.iter().map(parse_entry).collect())
}

fn parse_entry(value: &Value) -> ScrapeResult<CourseRecord> {
    let entry = CouponEntry::deserialize(value)
        .map_err(|e| ScrapeError::UnexpectedShape(e.to_string()))?;

    let slug = json_text(entry.url.as_ref()).or_else(|| json_scalar(entry.id.as_ref()));
    let (Some(slug), Some(code)) = (slug, json_scalar(entry.code.as_ref())) else {
        return Err(ScrapeError::UnexpectedShape(
            "entry without course slug or coupon code".to_string(),
        ));
    };

    Ok(CourseRecord {
        title: json_text(entry.title.as_ref()),
        link: udemy_coupon_link(&slug, &code),
        category: json_text(entry.category.as_ref()),
    })
}
