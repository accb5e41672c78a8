//! Headline extraction from a news listing page.
//!
//! Headline containers are located with a configurable CSS selector
//! (`li.js-stream-content h3` for Yahoo Finance). For each container the
//! extractor records its text verbatim and the `href` of the first `<a>` inside
//! it, resolved against the site's base origin.
//!
//! # Link Resolution
//!
//! | href | link |
//! |------|------|
//! | missing anchor / missing or empty `href` | `N/A` |
//! | `/news/foo` | `https://finance.yahoo.com/news/foo` |
//! | `https://other.example/x` | `https://other.example/x` |
//! | resolves to something without a host (`mailto:`, `javascript:`) | `N/A` |

use crate::config::ScrapeConfig;
use crate::error::{Result, ScrapeError};
use crate::models::{HeadlineRecord, LINK_SENTINEL};
use crate::utils::truncate_for_log;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info, instrument, warn};
use url::Url;

/// Turns a listing page into [`HeadlineRecord`]s.
#[derive(Debug, Clone)]
pub struct Extractor {
    base: Url,
    headline: Selector,
    anchor: Selector,
}

impl Extractor {
    /// Build an extractor resolving links against `base_url` and matching
    /// headline containers with `selector`.
    pub fn new(base_url: &str, selector: &str) -> Result<Self> {
        let base = Url::parse(base_url)?;
        let headline = Selector::parse(selector).map_err(|e| ScrapeError::InvalidSelector {
            selector: selector.to_string(),
            reason: e.to_string(),
        })?;
        let anchor = Selector::parse("a").map_err(|e| ScrapeError::InvalidSelector {
            selector: "a".to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            base,
            headline,
            anchor,
        })
    }

    pub fn from_config(config: &ScrapeConfig) -> Result<Self> {
        Self::new(&config.base_url, &config.headline_selector)
    }

    /// Extract every headline in document order.
    ///
    /// # Errors
    ///
    /// [`ScrapeError::MalformedResponse`] if the body holds no markup at all
    /// (empty, whitespace, or plain text). A valid page without headlines is
    /// `Ok` with an empty list.
    #[instrument(level = "info", skip_all, fields(bytes = html_body.len()))]
    pub fn extract(&self, html_body: &str) -> Result<Vec<HeadlineRecord>> {
        if html_body.trim().is_empty() {
            warn!("Response body is empty");
            return Err(ScrapeError::MalformedResponse(
                "response body is empty".to_string(),
            ));
        }
        if !html_body.contains('<') {
            warn!(preview = %truncate_for_log(html_body, 120), "Response body contains no markup");
            return Err(ScrapeError::MalformedResponse(format!(
                "response body is not HTML: {}",
                truncate_for_log(html_body, 120)
            )));
        }

        let document = Html::parse_document(html_body);
        let records: Vec<HeadlineRecord> = document
            .select(&self.headline)
            .map(|container| self.record_for(container))
            .collect();

        let unlinked = records.iter().filter(|r| !r.has_link()).count();
        info!(count = records.len(), unlinked, "Extracted headlines");
        Ok(records)
    }

    fn record_for(&self, container: ElementRef<'_>) -> HeadlineRecord {
        let title: String = container.text().collect();

        let href = container
            .select(&self.anchor)
            .next()
            .and_then(|a| a.value().attr("href"))
            .filter(|href| !href.is_empty());

        match href {
            Some(href) => HeadlineRecord {
                link: self.resolve_link(href),
                title,
            },
            None => {
                debug!(%title, "Headline has no link");
                HeadlineRecord::without_link(title)
            }
        }
    }

    /// Join `href` onto the base origin, keeping the result only when it has
    /// both a scheme and a host.
    pub fn resolve_link(&self, href: &str) -> String {
        match self.base.join(href) {
            Ok(url) if has_scheme_and_host(&url) => url.to_string(),
            Ok(url) => {
                debug!(%href, resolved = %url, "Resolved link has no host");
                LINK_SENTINEL.to_string()
            }
            Err(e) => {
                debug!(%href, error = %e, "Could not resolve link");
                LINK_SENTINEL.to_string()
            }
        }
    }
}

fn has_scheme_and_host(url: &Url) -> bool {
    !url.scheme().is_empty() && url.host_str().is_some_and(|h| !h.is_empty())
}
