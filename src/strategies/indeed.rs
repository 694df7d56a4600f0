//! Alternate-source retrieval from a secondary listing site.
//!
//! Invoked only when the primary site yields too few results through both
//! the HTTP and browser tiers. Same local-failure-swallowing contract as
//! the HTTP strategy, with a source-specific selector.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::links;
use crate::query::INDEED_BASE_URL;
use crate::{JobQuery, Result, Strategy, StrategyConfig, StrategyOutcome};

/// Minimum link count for this strategy to stop escalation.
pub const ALTERNATE_THRESHOLD: usize = 3;

/// Result cap for the alternate source.
pub const ALTERNATE_MAX_RESULTS: usize = 50;

/// Request timeout in seconds.
pub const ALTERNATE_TIMEOUT_SECS: u64 = 10;

/// Anchor heuristic for job-detail links on the secondary site.
const INDEED_JOB_SELECTORS: &[&str] = &[r#"a[href*="/viewjob"]"#];

/// Path segment present in every job-detail URL on the secondary site.
const INDEED_JOB_MARKER: &str = "/viewjob";

/// Alternate-source strategy against Indeed.
pub struct Indeed {
    config: StrategyConfig,
    client: Client,
}

impl Indeed {
    /// Creates the strategy with its fixed threshold, cap, and timeout.
    pub fn new() -> Self {
        Self {
            config: StrategyConfig {
                name: "indeed".to_string(),
                threshold: ALTERNATE_THRESHOLD,
                timeout: ALTERNATE_TIMEOUT_SECS,
                max_results: ALTERNATE_MAX_RESULTS,
                enabled: true,
            },
            client: Client::builder()
                .user_agent(
                    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                     (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
                )
                .timeout(Duration::from_secs(ALTERNATE_TIMEOUT_SECS))
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
        let hrefs = links::extract_hrefs(html, INDEED_JOB_SELECTORS)?;
        Ok(links::resolve_links(
            hrefs,
            INDEED_BASE_URL,
            INDEED_JOB_MARKER,
            self.config.max_results,
        ))
    }
}

impl Default for Indeed {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Strategy for Indeed {
    fn config(&self) -> &StrategyConfig {
        &self.config
    }

    async fn attempt(&self, query: &JobQuery) -> Result<StrategyOutcome> {
        let target = query.alternate_target();

        let response = self.client.get(&target).send().await?.error_for_status()?;
        let html = response.text().await?;

        let urls = self.parse_links(&html)?;
        Ok(StrategyOutcome::new(self.name(), urls, self.threshold()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indeed_new() {
        let strategy = Indeed::new();
        assert_eq!(strategy.name(), "indeed");
        assert_eq!(strategy.threshold(), 3);
        assert_eq!(strategy.config().max_results, 50);
        assert_eq!(strategy.config().timeout, 10);
        assert!(strategy.is_enabled());
    }

    #[test]
    fn test_indeed_with_config() {
        let strategy = Indeed::new().with_config(StrategyConfig {
            name: "backup".to_string(),
            enabled: false,
            ..Default::default()
        });
        assert_eq!(strategy.name(), "backup");
        assert!(!strategy.is_enabled());
    }

    #[test]
    fn test_parse_links_resolves_relative() {
        let strategy = Indeed::new();
        let html = r#"
            <html><body>
                <a href="/viewjob?jk=abc123">Backend Engineer</a>
                <a href="/viewjob?jk=def456">Data Engineer</a>
            </body></html>
        "#;
        let urls = strategy.parse_links(html).unwrap();
        assert_eq!(
            urls,
            vec![
                "https://www.indeed.com/viewjob?jk=abc123",
                "https://www.indeed.com/viewjob?jk=def456",
            ]
        );
    }

    #[test]
    fn test_parse_links_ignores_other_anchors() {
        let strategy = Indeed::new();
        let html = r#"
            <html><body>
                <a href="/viewjob?jk=abc">Job</a>
                <a href="/cmp/some-company">Company</a>
                <a href="/jobs?q=python">Search</a>
            </body></html>
        "#;
        let urls = strategy.parse_links(html).unwrap();
        assert_eq!(urls, vec!["https://www.indeed.com/viewjob?jk=abc"]);
    }

    #[test]
    fn test_parse_links_dedup() {
        let strategy = Indeed::new();
        let html = r#"
            <html><body>
                <a href="/viewjob?jk=abc">Job</a>
                <a href="https://www.indeed.com/viewjob?jk=abc">Same job</a>
            </body></html>
        "#;
        let urls = strategy.parse_links(html).unwrap();
        assert_eq!(urls.len(), 1);
    }

    #[test]
    fn test_parse_links_empty_document() {
        let strategy = Indeed::new();
        let urls = strategy.parse_links("<html></html>").unwrap();
        assert!(urls.is_empty());
    }
}
