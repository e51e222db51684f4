use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::Source;

const ENV_PREFIX: &str = "COURSE_COUPONS";
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/108.0.0.0 Safari/537.36";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub sources: HashMap<Source, SourceConfig>,
    pub user_agent: String,
    pub request_timeout_seconds: u64,
    pub navigation_timeout_seconds: u64,
    pub renderer: RendererKind,
    pub headless: bool,
    pub chromium_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RendererKind {
    Chromium,
    Http,
}

/// The part of the configuration that can be overridden from the environment.
#[derive(Debug, Deserialize)]
struct Settings {
    user_agent: String,
    request_timeout_seconds: u64,
    navigation_timeout_seconds: u64,
    renderer: RendererKind,
    headless: bool,
    #[serde(default)]
    chromium_path: Option<String>,
}

type Builder = config::builder::ConfigBuilder<config::builder::DefaultState>;

impl Config {
    /// Built-in defaults, overridden by `COURSE_COUPONS_*` environment variables.
    pub fn load() -> Result<Self> {
        let builder = default_settings()?.add_source(config::Environment::with_prefix(ENV_PREFIX));
        Self::from_settings(builder)
    }

    fn from_settings(builder: Builder) -> Result<Self> {
        let settings: Settings = builder
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")?;

        let sources = default_sources();
        if let Some(missing) = Source::ALL.iter().find(|source| !sources.contains_key(*source)) {
            anyhow::bail!("No source entry configured for {}", missing);
        }

        Ok(Config {
            sources,
            user_agent: settings.user_agent,
            request_timeout_seconds: settings.request_timeout_seconds,
            navigation_timeout_seconds: settings.navigation_timeout_seconds,
            renderer: settings.renderer,
            headless: settings.headless,
            chromium_path: settings.chromium_path,
        })
    }
}

fn default_settings() -> Result<Builder> {
    Ok(config::Config::builder()
        .set_default("user_agent", DEFAULT_USER_AGENT)?
        .set_default("request_timeout_seconds", 25)?
        .set_default("navigation_timeout_seconds", 60)?
        .set_default("renderer", "chromium")?
        .set_default("headless", true)?)
}

fn default_sources() -> HashMap<Source, SourceConfig> {
    let mut sources = HashMap::new();

    sources.insert(
        Source::UdemyFreebies,
        SourceConfig {
            name: "Udemy Freebies".to_string(),
            url: "https://www.udemyfreebies.com/free-udemy-courses/".to_string(),
        },
    );

    sources.insert(
        Source::TutorialBar,
        SourceConfig {
            name: "Tutorial Bar".to_string(),
            url: "https://www.tutorialbar.com/all-courses/".to_string(),
        },
    );

    sources.insert(
        Source::RealDiscount,
        SourceConfig {
            name: "Real Discount".to_string(),
            url: "https://www.real.discount/api-web/all-courses/".to_string(),
        },
    );

    sources.insert(
        Source::IDownloadCoupon,
        SourceConfig {
            name: "IDownloadCoupon".to_string(),
            url: "https://idownloadcoupon.com/".to_string(),
        },
    );

    sources.insert(
        Source::CourseVania,
        SourceConfig {
            name: "CourseVania".to_string(),
            url: "https://coursevania.com/".to_string(),
        },
    );

    sources.insert(
        Source::ENext,
        SourceConfig {
            name: "E-Next".to_string(),
            url: "https://jobs.e-next.in/public/assets/data/udemy.json".to_string(),
        },
    );

    sources
}

#[cfg(test)]
pub(crate) fn test_config() -> Config {
    Config {
        sources: default_sources(),
        user_agent: DEFAULT_USER_AGENT.to_string(),
        request_timeout_seconds: 5,
        navigation_timeout_seconds: 5,
        renderer: RendererKind::Http,
        headless: true,
        chromium_path: None,
    }
}
