use anyhow::{Context, Result};
use reqwest::{Client, ClientBuilder, Response};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::Config;

pub fn create_client(config: &Config) -> Result<Client> {
    let client = ClientBuilder::new()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(config.request_timeout_seconds))
        .pool_max_idle_per_host(6)
        .build()?;

    Ok(client)
}

/// Single GET; a non-success status is treated as a transport failure.
pub async fn fetch(client: &Client, url: &str, query: &[(&str, &str)]) -> Result<Response> {
    debug!("GET {}", url);

    let response = client
        .get(url)
        .query(query)
        .send()
        .await
        .with_context(|| format!("Request failed for {}", url))?;

    let status = response.status();
    if !status.is_success() {
        warn!("HTTP error {}: {}", status, url);
        anyhow::bail!("HTTP error {} for {}", status, url);
    }

    Ok(response)
}

pub async fn fetch_json(client: &Client, url: &str, query: &[(&str, &str)]) -> Result<Value> {
    let response = fetch(client, url, query).await?;
    response
        .json()
        .await
        .with_context(|| format!("Response from {} is not JSON", url))
}
