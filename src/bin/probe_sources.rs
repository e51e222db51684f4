//! Checks whether the listing selectors still match the live sites.
//!
//! Pages are fetched without a browser, so script-built listings report zero
//! matches here even when the full scraper finds them.

use anyhow::Result;
use reqwest::Client;
use scraper::{Html, Selector};
use std::fs;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/108.0.0.0 Safari/537.36";

const PROBES: &[(&str, &str, &str)] = &[
    (
        "udemyfreebies",
        "https://www.udemyfreebies.com/free-udemy-courses/",
        ".row .theme-block",
    ),
    (
        "tutorialbar",
        "https://www.tutorialbar.com/all-courses/",
        ".content_constructor.pb0.pr20.pl20.mobilepadding",
    ),
    ("idownloadcoupon", "https://idownloadcoupon.com/", ".product"),
    (
        "coursevania",
        "https://coursevania.com/",
        ".stm_lms_courses__single--inner",
    ),
];

#[tokio::main]
async fn main() -> Result<()> {
    let client = Client::builder().user_agent(USER_AGENT).build()?;

    for (key, url, block) in PROBES {
        println!("Fetching {} HTML...", key);
        let html = match client.get(*url).send().await {
            Ok(response) => response.text().await?,
            Err(e) => {
                println!("  request failed: {}", e);
                continue;
            }
        };

        let sample = format!("{}_sample.html", key);
        fs::write(&sample, &html)?;

        let document = Html::parse_document(&html);
        let selector = Selector::parse(block)
            .map_err(|_| anyhow::anyhow!("invalid selector {}", block))?;
        let count = document.select(&selector).count();

        println!("  selector '{}' matched {} elements (saved {})", block, count, sample);
    }

    Ok(())
}
