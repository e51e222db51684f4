use anyhow::Result;
use chrono::Local;
use clap::Parser;
use reqwest::Client;
use std::sync::Arc;
use tracing::{error, info};

mod aggregate;
mod browser;
mod config;
mod display;
mod error;
mod models;
mod parsers;
mod scrapers;
mod search;
mod utils;

use crate::aggregate::aggregate;
use crate::browser::PageRenderer;
use crate::config::Config;
use crate::models::CourseRecord;
use crate::scrapers::CourseScraper;
use crate::search::search;

#[derive(Debug, Parser)]
#[command(name = "course-coupons", about = "Search free course coupons from several listing sites")]
struct Args {
    /// Search term; prompts interactively when omitted
    #[arg(short, long)]
    search: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("course_coupons=info".parse()?),
        )
        .init();

    display::print_banner();

    let config = Arc::new(Config::load()?);
    let client = utils::http::create_client(&config)?;
    let scrapers = scrapers::registry(config.clone());

    info!("--- Starting run at {} ---", Local::now().format("%Y-%m-%d %H:%M:%S"));

    let renderer = browser::launch(&config, &client).await?;
    let collected = collect_listings(&scrapers, &client, renderer.as_ref()).await;
    if let Err(e) = renderer.shutdown().await {
        error!("Failed to shut down renderer: {}", e);
    }
    let batches = collected?;

    let courses = aggregate(&batches);
    info!("Collected {} unique courses", courses.len());

    let term = match args.search {
        Some(term) => term,
        None => display::prompt_search_term()?,
    };

    let matches = search(&courses, &term);
    display::print_results(&matches);

    Ok(())
}

/// Run every scraper in turn. The first transport failure ends the run.
async fn collect_listings(
    scrapers: &[Box<dyn CourseScraper>],
    client: &Client,
    renderer: &dyn PageRenderer,
) -> Result<Vec<Vec<CourseRecord>>> {
    let mut batches = Vec::with_capacity(scrapers.len());

    for scraper in scrapers {
        let site_name = scraper.source_config().name.clone();
        let spinner = display::create_spinner(&format!("Loading Coupons from {}!", site_name));

        let result = scraper.fetch_listings(client, renderer).await;
        spinner.finish_and_clear();

        match result {
            Ok(listings) => {
                info!("Collected {} listings from {}", listings.len(), scraper.source());
                batches.push(listings);
            }
            Err(e) => {
                error!("Scraping {} failed: {:#}", site_name, e);
                return Err(e);
            }
        }
    }

    Ok(batches)
}
