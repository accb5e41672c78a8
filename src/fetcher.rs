//! Page download with a fixed-delay retry loop.
//!
//! # Architecture
//!
//! - [`PageSource`]: one GET attempt, no retry
//! - [`HttpSource`]: the `reqwest` implementation, carrying the configured
//!   `User-Agent` and per-request timeout
//! - [`Fetcher`]: wraps any [`PageSource`] and retries it sequentially
//!
//! # Retry Strategy
//!
//! - At most `max_retries` attempts, one at a time
//! - A fixed pause (`retry_delay`, 3 seconds by default) after every failed
//!   attempt except the last
//! - The first `200 OK` with a readable body ends the loop immediately
//! - Running out of attempts yields [`FetchOutcome::Exhausted`], never an `Err`

use crate::config::ScrapeConfig;
use crate::error::{AttemptError, Result, ScrapeError};
use crate::models::{FetchOutcome, Page};
use reqwest::{Client, StatusCode};
use std::fmt;
use std::time::{Duration, Instant};
use tokio::time::sleep;
use tracing::{debug, error, info, instrument, warn};

/// A single attempt at downloading a page.
///
/// Implementors report every kind of failure (transport, status, body) as an
/// [`AttemptError`]; retrying is the caller's business.
pub trait PageSource {
    async fn get(&self, url: &str) -> std::result::Result<Page, AttemptError>;
}

/// [`PageSource`] backed by a `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
}

impl HttpSource {
    /// Build a client with the configured user agent and timeout.
    pub fn new(config: &ScrapeConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout)
            .build()
            .map_err(ScrapeError::HttpClient)?;
        Ok(Self { client })
    }
}

impl PageSource for HttpSource {
    #[instrument(level = "debug", skip(self))]
    async fn get(&self, url: &str) -> std::result::Result<Page, AttemptError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(AttemptError::Transport)?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(AttemptError::Status(status));
        }

        let body = response.text().await.map_err(AttemptError::Body)?;
        debug!(bytes = body.len(), "Read response body");
        Ok(Page { status, body })
    }
}

/// Sequential retry loop around a [`PageSource`].
pub struct Fetcher<S> {
    source: S,
    retry_delay: Duration,
}

impl Fetcher<HttpSource> {
    /// Fetcher talking HTTP, configured from `config`.
    pub fn from_config(config: &ScrapeConfig) -> Result<Self> {
        Ok(Self::new(HttpSource::new(config)?, config.retry_delay))
    }
}

impl<S> Fetcher<S>
where
    S: PageSource,
{
    pub fn new(source: S, retry_delay: Duration) -> Self {
        Self {
            source,
            retry_delay,
        }
    }

    /// Download `url`, trying at most `max_retries` times.
    ///
    /// Every failed attempt is logged at `warn` with its attempt number and
    /// error; running out of attempts logs once at `error` and returns
    /// [`FetchOutcome::Exhausted`].
    #[instrument(level = "info", skip(self))]
    pub async fn fetch(&self, url: &str, max_retries: u32) -> FetchOutcome {
        let total_t0 = Instant::now();
        let mut errors = Vec::new();
        let mut attempt = 0u32;

        while attempt < max_retries {
            attempt += 1;
            let attempt_t0 = Instant::now();

            match self.source.get(url).await {
                Ok(page) => {
                    info!(
                        attempt,
                        status = %page.status,
                        bytes = page.body.len(),
                        elapsed_ms_total = total_t0.elapsed().as_millis(),
                        "Fetched page"
                    );
                    return FetchOutcome::Success {
                        page,
                        attempts: attempt,
                    };
                }
                Err(e) => {
                    warn!(
                        attempt,
                        max = max_retries,
                        elapsed_ms_attempt = attempt_t0.elapsed().as_millis(),
                        error = %e,
                        "Fetch attempt failed"
                    );
                    errors.push(e.to_string());

                    if attempt < max_retries {
                        debug!(delay = ?self.retry_delay, "Waiting before next attempt");
                        sleep(self.retry_delay).await;
                    }
                }
            }
        }

        error!(
            attempts = attempt,
            elapsed_ms_total = total_t0.elapsed().as_millis(),
            %url,
            "Giving up after exhausting retries"
        );
        FetchOutcome::Exhausted {
            attempts: attempt,
            errors,
        }
    }
}

impl<S> fmt::Debug for Fetcher<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fetcher")
            .field("retry_delay", &self.retry_delay)
            .finish()
    }
}
