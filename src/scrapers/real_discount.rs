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
use crate::parsers::json_text;
use crate::scrapers::{keep_extracted, CourseScraper};
use crate::utils::http::fetch_json;

/// First page of free Udemy courses, newest first.
const QUERY: &[(&str, &str)] = &[
    ("store", "Udemy"),
    ("page", "1"),
    ("per_page", "40"),
    ("orderby", "date"),
    ("free", "1"),
    ("editorschoices", "0"),
];

pub struct RealDiscountScraper {
    config: Arc<Config>,
}

impl RealDiscountScraper {
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }
}

/// Fields are read loosely: a value of the wrong type costs that field only.
#[derive(Debug, Deserialize)]
struct ResultItem {
    url: Option<Value>,
    name: Option<Value>,
    category: Option<Value>,
}

#[async_trait]
impl CourseScraper for RealDiscountScraper {
    async fn fetch_listings(
        &self,
        client: &Client,
        _renderer: &dyn PageRenderer,
    ) -> Result<Vec<CourseRecord>> {
        let source_config = self.source_config();
        info!("Querying Real Discount API...");

        let body = fetch_json(client, &source_config.url, QUERY).await?;

        let courses = match parse_results(&body) {
            Ok(extracted) => keep_extracted(&source_config.name, extracted),
            Err(e) => {
                warn!("Real Discount returned no usable listing: {}", e);
                Vec::new()
            }
        };

        info!("Found {} courses on Real Discount", courses.len());
        Ok(courses)
    }

    fn source_config(&self) -> &SourceConfig {
        &self.config.sources[&Source::RealDiscount]
    }

    fn source(&self) -> Source {
        Source::RealDiscount
    }
}

fn parse_results(body: &Value) -> ScrapeResult<Vec<ScrapeResult<CourseRecord>>> {
    let results = body
        .get("results")
        .and_then(Value::as_array)
        .ok_or_else(|| ScrapeError::UnexpectedShape("missing `results` array".to_string()))?;

    Ok(results.iter().map(parse_item).collect())
}

fn parse_item(value: &Value) -> ScrapeResult<CourseRecord> {
    let item = ResultItem::deserialize(value)
        .map_err(|e| ScrapeError::UnexpectedShape(e.to_string()))?;

    let link = json_text(item.url.as_ref())
        .ok_or_else(|| ScrapeError::UnexpectedShape("result without `url`".to_string()))?;

    Ok(CourseRecord {
        title: json_text(item.name.as_ref()),
        link,
        category: json_text(item.category.as_ref()),
    })
}
