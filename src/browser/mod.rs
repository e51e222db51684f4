//! Page rendering for the listing sites that need a browser.
//!
//! Extractors only see the [`PageRenderer`] trait. One renderer is launched
//! per run and shut down once at the end, even when the run fails.

pub mod chromium;
pub mod http;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use tracing::info;

use crate::config::{Config, RendererKind};

pub use chromium::ChromiumRenderer;
pub use http::HttpRenderer;

#[async_trait]
pub trait PageRenderer: Send + Sync {
    /// Navigate to `url` and return the rendered document's HTML.
    async fn render(&self, url: &str) -> Result<String>;

    /// Release the underlying browser.
    async fn shutdown(&self) -> Result<()>;
}

pub async fn launch(config: &Config, client: &Client) -> Result<Box<dyn PageRenderer>> {
    match config.renderer {
        RendererKind::Chromium => {
            info!("Launching Chromium renderer (headless: {})", config.headless);
            Ok(Box::new(ChromiumRenderer::launch(config).await?))
        }
        RendererKind::Http => {
            info!("Using plain HTTP renderer; pages will not run JavaScript");
            Ok(Box::new(HttpRenderer::new(client.clone())))
        }
    }
}

#[cfg(test)]
pub(crate) mod fixture {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Serves canned HTML per URL and records every visit in order.
    #[derive(Default)]
    pub struct FixtureRenderer {
        pages: HashMap<String, String>,
        visits: Mutex<Vec<String>>,
    }

    impl FixtureRenderer {
        pub fn with_page(mut self, url: &str, html: &str) -> Self {
            self.pages.insert(url.to_string(), html.to_string());
            self
        }

        pub fn visits(&self) -> Vec<String> {
            self.visits.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PageRenderer for FixtureRenderer {
        async fn render(&self, url: &str) -> Result<String> {
            self.visits.lock().unwrap().push(url.to_string());
            self.pages
                .get(url)
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("navigation failed: no page at {}", url))
        }

        async fn shutdown(&self) -> Result<()> {
            Ok(())
        }
    }
}
