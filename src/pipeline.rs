//! Fetch-then-extract pipeline.
//!
//! A single run moves through these states and stops at the first terminal one:
//!
//! ```text
//! Pending -> Fetching (-> retry)* -> Fetched  -> Extracting -> Done
//!                                 \-> Exhausted              \-> ExtractFailed
//! ```
//!
//! Terminal states map onto [`PipelineOutcome`] variants.

use crate::config::ScrapeConfig;
use crate::error::Result;
use crate::extractor::Extractor;
use crate::fetcher::{Fetcher, HttpSource, PageSource};
use crate::models::{FetchOutcome, PipelineOutcome};
use std::fmt;
use tracing::{debug, error, info, instrument};

/// Pipeline state, used for logging transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Pending,
    Fetching,
    Fetched,
    Exhausted,
    Extracting,
    Done,
    ExtractFailed,
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipelineState::Pending => "pending",
            PipelineState::Fetching => "fetching",
            PipelineState::Fetched => "fetched",
            PipelineState::Exhausted => "exhausted",
            PipelineState::Extracting => "extracting",
            PipelineState::Done => "done",
            PipelineState::ExtractFailed => "extract_failed",
        };
        f.write_str(name)
    }
}

/// One fetcher plus one extractor, wired to a target URL and retry budget.
#[derive(Debug)]
pub struct Pipeline<S> {
    fetcher: Fetcher<S>,
    extractor: Extractor,
    target_url: String,
    max_retries: u32,
}

impl Pipeline<HttpSource> {
    /// Validate `config` and build an HTTP-backed pipeline from it.
    pub fn from_config(config: &ScrapeConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(
            Fetcher::from_config(config)?,
            Extractor::from_config(config)?,
            config,
        ))
    }
}

impl<S> Pipeline<S>
where
    S: PageSource,
{
    pub fn new(fetcher: Fetcher<S>, extractor: Extractor, config: &ScrapeConfig) -> Self {
        Self {
            fetcher,
            extractor,
            target_url: config.target_url.clone(),
            max_retries: config.max_retries,
        }
    }

    /// Run the pipeline once.
    #[instrument(level = "info", skip(self), fields(url = %self.target_url))]
    pub async fn run(&self) -> PipelineOutcome {
        transition(PipelineState::Pending, PipelineState::Fetching);

        let outcome = self.fetcher.fetch(&self.target_url, self.max_retries).await;
        debug!(
            attempts = outcome.attempts(),
            success = outcome.is_success(),
            "Fetch finished"
        );

        let page = match outcome {
            FetchOutcome::Success { page, .. } => {
                transition(PipelineState::Fetching, PipelineState::Fetched);
                page
            }
            FetchOutcome::Exhausted { attempts, errors } => {
                transition(PipelineState::Fetching, PipelineState::Exhausted);
                return PipelineOutcome::Exhausted { attempts, errors };
            }
        };

        transition(PipelineState::Fetched, PipelineState::Extracting);
        match self.extractor.extract(&page.body) {
            Ok(records) => {
                transition(PipelineState::Extracting, PipelineState::Done);
                info!(count = records.len(), "Pipeline finished");
                PipelineOutcome::Done(records)
            }
            Err(e) => {
                transition(PipelineState::Extracting, PipelineState::ExtractFailed);
                error!(error = %e, "Could not extract headlines from response");
                PipelineOutcome::ExtractFailed(e)
            }
        }
    }
}

fn transition(from: PipelineState, to: PipelineState) {
    debug!(%from, %to, "Pipeline state change");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScrapeError;
    use crate::models::HeadlineRecord;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const SAMPLE_HTML: &str = r#"
<ul>
  <li class="js-stream-content">
    <h3 class="Mb(5px)"><a href="/news/foo">Foo</a></h3>
  </li>
  <li class="js-stream-content">
    <h3 class="Mb(5px)"><a href="/news/bar">Bar</a></h3>
  </li>
  <li>
    <h3><a href="/other">Other</a></h3>
  </li>
</ul>
"#;

    fn config_for(server: &MockServer, max_retries: u32) -> ScrapeConfig {
        ScrapeConfig {
            target_url: format!("{}/news/", server.uri()),
            max_retries,
            retry_delay: Duration::from_millis(5),
            timeout: Duration::from_secs(2),
            ..ScrapeConfig::default()
        }
    }

    #[tokio::test]
    async fn test_end_to_end_yahoo_sample() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/news/"))
            .respond_with(ResponseTemplate::new(200).set_body_string(SAMPLE_HTML))
            .mount(&mock_server)
            .await;

        let pipeline = Pipeline::from_config(&config_for(&mock_server, 1)).unwrap();

        match pipeline.run().await {
            PipelineOutcome::Done(records) => assert_eq!(
                records,
                vec![
                    HeadlineRecord {
                        title: "Foo".to_string(),
                        link: "https://finance.yahoo.com/news/foo".to_string(),
                    },
                    HeadlineRecord {
                        title: "Bar".to_string(),
                        link: "https://finance.yahoo.com/news/bar".to_string(),
                    },
                ]
            ),
            other => panic!("expected Done, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unreachable_site_is_exhausted_not_empty() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .expect(2)
            .mount(&mock_server)
            .await;

        let pipeline = Pipeline::from_config(&config_for(&mock_server, 2)).unwrap();

        match pipeline.run().await {
            PipelineOutcome::Exhausted { attempts, errors } => {
                assert_eq!(attempts, 2);
                assert_eq!(errors.len(), 2);
            }
            other => panic!("expected Exhausted, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_garbage_body_is_extract_failed() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(""))
            .mount(&mock_server)
            .await;

        let pipeline = Pipeline::from_config(&config_for(&mock_server, 3)).unwrap();

        match pipeline.run().await {
            PipelineOutcome::ExtractFailed(ScrapeError::MalformedResponse(_)) => {}
            other => panic!("expected ExtractFailed, got {other:?}"),
        }
        // a 200 ends the retry loop even when the body is useless
        let requests = mock_server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
    }

    #[tokio::test]
    async fn test_page_without_headlines_is_done_empty() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string("<html><body><p>nothing</p></body></html>"),
            )
            .mount(&mock_server)
            .await;

        let pipeline = Pipeline::from_config(&config_for(&mock_server, 1)).unwrap();

        match pipeline.run().await {
            PipelineOutcome::Done(records) => assert!(records.is_empty()),
            other => panic!("expected Done, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_independent_pipelines_use_their_own_config() {
        let yahoo_like = MockServer::start().await;
        let other_site = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(SAMPLE_HTML))
            .mount(&yahoo_like)
            .await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"<article><h2><a href="/s/1">One</a></h2></article>"#),
            )
            .mount(&other_site)
            .await;

        let first = Pipeline::from_config(&config_for(&yahoo_like, 1)).unwrap();
        let second = Pipeline::from_config(&ScrapeConfig {
            base_url: "https://news.example.org".to_string(),
            headline_selector: "article h2".to_string(),
            ..config_for(&other_site, 1)
        })
        .unwrap();

        let (a, b) = tokio::join!(first.run(), second.run());

        match (a, b) {
            (PipelineOutcome::Done(a), PipelineOutcome::Done(b)) => {
                assert_eq!(a.len(), 2);
                assert_eq!(
                    b,
                    vec![HeadlineRecord {
                        title: "One".to_string(),
                        link: "https://news.example.org/s/1".to_string(),
                    }]
                );
            }
            other => panic!("expected two Done outcomes, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_config_rejected_before_network() {
        let config = ScrapeConfig {
            max_retries: 0,
            ..ScrapeConfig::default()
        };
        assert!(matches!(
            Pipeline::from_config(&config),
            Err(ScrapeError::Config { .. })
        ));
    }

    #[test]
    fn test_state_names() {
        assert_eq!(PipelineState::ExtractFailed.to_string(), "extract_failed");
        assert_eq!(PipelineState::Pending.to_string(), "pending");
    }
}
