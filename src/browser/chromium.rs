use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::page::Page;
use futures::StreamExt;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::PageRenderer;
use crate::config::Config;
use crate::error::ScrapeError;

const WINDOW_WIDTH: u32 = 1280;
const WINDOW_HEIGHT: u32 = 720;
/// How long Chromium gets to exit after being asked to close.
const EXIT_TIMEOUT: Duration = Duration::from_secs(10);

/// A single Chromium instance with one reused tab.
pub struct ChromiumRenderer {
    browser: Mutex<Browser>,
    page: Page,
    handler: Mutex<Option<JoinHandle<()>>>,
    navigation_timeout: Duration,
}

impl ChromiumRenderer {
    pub async fn launch(config: &Config) -> Result<Self> {
        let mut builder = BrowserConfig::builder()
            .window_size(WINDOW_WIDTH, WINDOW_HEIGHT)
            .no_sandbox()
            .arg("--disable-dev-shm-usage")
            .arg("--disable-extensions");

        if !config.headless {
            builder = builder.with_head();
        }
        if let Some(path) = &config.chromium_path {
            builder = builder.chrome_executable(path);
        }

        let browser_config = builder
            .build()
            .map_err(|e| anyhow!("failed to build browser config: {e}"))?;

        let (browser, mut handler) = Browser::launch(browser_config)
            .await
            .context("failed to launch Chromium")?;

        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                let _ = event;
            }
        });

        let page = browser
            .new_page("about:blank")
            .await
            .context("failed to open browser tab")?;

        Ok(Self {
            browser: Mutex::new(browser),
            page,
            handler: Mutex::new(Some(handler)),
            navigation_timeout: Duration::from_secs(config.navigation_timeout_seconds),
        })
    }
}

#[async_trait]
impl PageRenderer for ChromiumRenderer {
    async fn render(&self, url: &str) -> Result<String> {
        debug!("Navigating to {}", url);

        let failure = match tokio::time::timeout(self.navigation_timeout, self.page.goto(url)).await {
            Ok(Ok(_)) => None,
            Ok(Err(e)) => Some(e.to_string()),
            Err(_) => Some(format!(
                "timed out after {}s",
                self.navigation_timeout.as_secs()
            )),
        };
        if let Some(reason) = failure {
            return Err(ScrapeError::Render {
                url: url.to_string(),
                reason,
            }
            .into());
        }

        self.page
            .content()
            .await
            .with_context(|| format!("failed to read rendered document for {}", url))
    }

    async fn shutdown(&self) -> Result<()> {
        let mut browser = self.browser.lock().await;
        let stopped = stop_process(&mut *browser, EXIT_TIMEOUT).await;

        if let Some(handler) = self.handler.lock().await.take() {
            handler.abort();
        }

        stopped?;
        info!("Chromium renderer shut down");
        Ok(())
    }
}

/// The process-level controls shutdown needs from a browser.
#[async_trait]
trait BrowserProcess: Send {
    async fn request_close(&mut self) -> Result<()>;
    async fn wait_exit(&mut self) -> Result<()>;
    async fn force_kill(&mut self) -> Result<()>;
}

#[async_trait]
impl BrowserProcess for Browser {
    async fn request_close(&mut self) -> Result<()> {
        self.close().await?;
        Ok(())
    }

    async fn wait_exit(&mut self) -> Result<()> {
        self.wait().await?;
        Ok(())
    }

    async fn force_kill(&mut self) -> Result<()> {
        match self.kill().await {
            Some(Err(e)) => Err(e.into()),
            _ => Ok(()),
        }
    }
}

/// Ask the browser to close and wait a bounded time for it to exit. A failed
/// close or a slow exit ends in a kill.
async fn stop_process<P>(process: &mut P, exit_timeout: Duration) -> Result<()>
where
    P: BrowserProcess + ?Sized,
{
    if let Err(e) = process.request_close().await {
        warn!("Chromium did not close cleanly, killing it: {}", e);
        return process
            .force_kill()
            .await
            .context("failed to kill Chromium");
    }

    match tokio::time::timeout(exit_timeout, process.wait_exit()).await {
        Ok(exited) => exited.context("failed waiting for Chromium to exit"),
        Err(_) => {
            warn!(
                "Chromium still running {}s after close, killing it",
                exit_timeout.as_secs()
            );
            process.force_kill().await.context("failed to kill Chromium")
        }
    }
}
