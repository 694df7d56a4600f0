//! Direct HTTP retrieval from the primary site.
//!
//! The cheapest and fastest strategy: one timed request with a browser-like
//! header set, then a static parse of the returned markup. Low fidelity —
//! the site renders most results with JavaScript — so this tier carries the
//! highest satisfaction threshold.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};
use reqwest::Client;

use crate::links;
use crate::query::LINKEDIN_BASE_URL;
use crate::{JobQuery, Result, ScrapeError, Strategy, StrategyConfig, StrategyOutcome};

use super::{LINKEDIN_JOB_MARKER, LINKEDIN_JOB_SELECTORS};

/// Minimum link count for this strategy to stop escalation.
pub const HTTP_THRESHOLD: usize = 5;

/// Result cap for the static parse.
pub const HTTP_MAX_RESULTS: usize = 50;

/// Request timeout in seconds.
pub const HTTP_TIMEOUT_SECS: u64 = 10;

const CHROME_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// HTTP fetch strategy against the primary site.
pub struct LinkedInHttp {
    config: StrategyConfig,
    client: Client,
}

impl LinkedInHttp {
    /// Creates the strategy with its fixed threshold, cap, and timeout.
    pub fn new() -> Self {
        Self {
            config: StrategyConfig {
                name: "linkedin-http".to_string(),
                threshold: HTTP_THRESHOLD,
                timeout: HTTP_TIMEOUT_SECS,
                max_results: HTTP_MAX_RESULTS,
                enabled: true,
            },
            client: Client::builder()
                .default_headers(browser_headers())
                .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
                .build()
                .expect("Failed to create HTTP client"),
        }
    }

    /// Creates with custom configuration.
    pub fn with_config(mut self, config: StrategyConfig) -> Self {
        self.config = config;
        self
    }

    fn parse_links(&self, html: &str) -> Result<Vec<String>> {
        let hrefs = links::extract_hrefs(html, LINKEDIN_JOB_SELECTORS)?;
        Ok(links::resolve_links(
            hrefs,
            LINKEDIN_BASE_URL,
            LINKEDIN_JOB_MARKER,
            self.config.max_results,
        ))
    }
}

impl Default for LinkedInHttp {
    fn default() -> Self {
        Self::new()
    }
}

/// Browser-like request headers to avoid trivial bot-detection rejection.
fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(CHROME_USER_AGENT));
    headers.insert(
        ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
        ),
    );
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));
    headers.insert("upgrade-insecure-requests", HeaderValue::from_static("1"));
    headers
}

/// Detects auth-wall / challenge interstitials served in place of results.
fn looks_blocked(html: &str) -> bool {
    html.contains("/authwall") || html.contains("/checkpoint/challenge")
}

#[async_trait]
impl Strategy for LinkedInHttp {
    fn config(&self) -> &StrategyConfig {
        &self.config
    }

    async fn attempt(&self, query: &JobQuery) -> Result<StrategyOutcome> {
        let target = query.primary_target();

        let response = self.client.get(&target).send().await?.error_for_status()?;
        let html = response.text().await?;

        if looks_blocked(&html) {
            return Err(ScrapeError::Blocked(
                "primary site served an auth wall instead of results".to_string(),
            ));
        }

        let urls = self.parse_links(&html)?;
        Ok(StrategyOutcome::new(self.name(), urls, self.threshold()))
    }
}
