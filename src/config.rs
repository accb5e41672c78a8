//! Scraper configuration.
//!
//! Everything the fetcher and extractor need (target, base origin, headers,
//! timeouts, retry budget, selector) lives in a [`ScrapeConfig`] value that is
//! passed in explicitly. Values are layered in this order, later wins:
//!
//! 1. built-in defaults ([`ScrapeConfig::default`])
//! 2. an optional YAML file ([`PartialConfig`] loaded by [`load_partial`])
//! 3. command-line flags / environment variables ([`crate::cli::Cli`])

use crate::error::{Result, ScrapeError};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://finance.yahoo.com";
pub const DEFAULT_TARGET_URL: &str = "https://finance.yahoo.com/news/";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_RETRY_DELAY_SECS: u64 = 3;
pub const DEFAULT_HEADLINE_SELECTOR: &str = "li.js-stream-content h3";

/// Fully resolved configuration for one scrape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeConfig {
    /// Page to download.
    pub target_url: String,
    /// Origin relative headline links are resolved against.
    pub base_url: String,
    /// Sent as the `User-Agent` header on every attempt.
    pub user_agent: String,
    /// Per-attempt request timeout.
    pub timeout: Duration,
    /// Total number of attempts, at least 1.
    pub max_retries: u32,
    /// Pause between a failed attempt and the next one. Not exposed through
    /// the CLI or YAML; always the 3 second default outside tests.
    pub retry_delay: Duration,
    /// CSS selector matching one headline container.
    pub headline_selector: String,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            target_url: DEFAULT_TARGET_URL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_retries: DEFAULT_MAX_RETRIES,
            retry_delay: Duration::from_secs(DEFAULT_RETRY_DELAY_SECS),
            headline_selector: DEFAULT_HEADLINE_SELECTOR.to_string(),
        }
    }
}

impl ScrapeConfig {
    /// Overlay every value present in `partial`.
    pub fn apply(&mut self, partial: PartialConfig) {
        if let Some(v) = partial.url {
            self.target_url = v;
        }
        if let Some(v) = partial.base_url {
            self.base_url = v;
        }
        if let Some(v) = partial.user_agent {
            self.user_agent = v;
        }
        if let Some(v) = partial.timeout_secs {
            self.timeout = Duration::from_secs(v);
        }
        if let Some(v) = partial.max_retries {
            self.max_retries = v;
        }
        if let Some(v) = partial.selector {
            self.headline_selector = v;
        }
    }

    /// Check ranges and URL shapes before anything touches the network.
    pub fn validate(&self) -> Result<()> {
        if self.max_retries == 0 {
            return Err(ScrapeError::config("max_retries", "must be at least 1"));
        }
        if self.timeout.is_zero() {
            return Err(ScrapeError::config("timeout_secs", "must be greater than zero"));
        }
        if self.target_url.trim().is_empty() {
            return Err(ScrapeError::config("url", "must not be empty"));
        }
        Url::parse(&self.target_url)?;

        let base = Url::parse(&self.base_url)?;
        if base.host_str().is_none_or(str::is_empty) {
            return Err(ScrapeError::config(
                "base_url",
                format!("`{}` has no host", self.base_url),
            ));
        }
        if self.headline_selector.trim().is_empty() {
            return Err(ScrapeError::config("selector", "must not be empty"));
        }
        Ok(())
    }
}

/// Optional overrides, as read from YAML or collected from the CLI.
///
/// Key names match the long CLI flags (`max_retries` ↔ `--max-retries`).
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PartialConfig {
    pub url: Option<String>,
    pub base_url: Option<String>,
    pub user_agent: Option<String>,
    pub timeout_secs: Option<u64>,
    pub max_retries: Option<u32>,
    pub selector: Option<String>,
}

/// Parse overrides from a YAML document.
pub fn parse_partial(yaml: &str) -> Result<PartialConfig> {
    // An empty file deserializes to unit, not a map
    if yaml.trim().is_empty() {
        return Ok(PartialConfig::default());
    }
    Ok(serde_yaml::from_str(yaml)?)
}

/// Read overrides from a YAML file on disk.
#[instrument(level = "debug", skip_all, fields(path = %path.display()))]
pub async fn load_partial(path: &Path) -> Result<PartialConfig> {
    let raw = tokio::fs::read_to_string(path).await?;
    let partial = parse_partial(&raw)?;
    debug!(?partial, "Loaded config file");
    Ok(partial)
}
