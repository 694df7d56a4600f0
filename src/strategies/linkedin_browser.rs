//! Scripted headless browser retrieval from the primary site.
//!
//! Invoked only when the HTTP strategy under-delivers. Renders JavaScript,
//! scrolls through lazy-loaded content, and parses the rendered markup with
//! the same selector set as the HTTP tier. This strategy's wall-clock cost
//! dominates total pipeline latency, which is exactly why it sits behind
//! the cheap tier.

use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::Page;
use tokio::time::{sleep, Instant};
use tracing::debug;

use crate::browser::{self, BrowserSession, BrowserSessionConfig};
use crate::links;
use crate::query::LINKEDIN_BASE_URL;
use crate::{JobQuery, Result, ScrapeError, Strategy, StrategyConfig, StrategyOutcome};

use super::{LINKEDIN_JOB_MARKER, LINKEDIN_JOB_SELECTORS};

/// Minimum link count for this strategy to stop escalation.
pub const BROWSER_THRESHOLD: usize = 3;

/// Result cap; higher than the HTTP tier to match its higher yield.
pub const BROWSER_MAX_RESULTS: usize = 100;

/// Overall attempt budget in seconds (navigation + waits + scroll cycles).
pub const BROWSER_TIMEOUT_SECS: u64 = 90;

/// Bounded wait for results content to appear after navigation.
const RESULTS_WAIT_SECS: u64 = 10;
const RESULTS_POLL_MS: u64 = 500;

/// Fixed scroll budget that triggers lazy-loaded content.
const SCROLL_PASSES: usize = 8;
const SCROLL_PAUSE_SECS: u64 = 3;
const LOAD_MORE_PAUSE_SECS: u64 = 2;

/// Selectors that indicate result content has rendered.
const RESULTS_READY_SELECTORS: &[&str] = &[
    r#"a[href*="/jobs/view/"]"#,
    ".jobs-search-results",
    ".jobs-search-results-list",
];

/// Control that loads additional results when present.
const LOAD_MORE_SELECTOR: &str = "button[aria-label='Show more jobs']";

/// Automated browser strategy against the primary site.
pub struct LinkedInBrowser {
    config: StrategyConfig,
    session_config: BrowserSessionConfig,
}

impl LinkedInBrowser {
    /// Creates the strategy with its fixed threshold, cap, and budget.
    pub fn new() -> Self {
        Self {
            config: StrategyConfig {
                name: "linkedin-browser".to_string(),
                threshold: BROWSER_THRESHOLD,
                timeout: BROWSER_TIMEOUT_SECS,
                max_results: BROWSER_MAX_RESULTS,
                enabled: true,
            },
            session_config: BrowserSessionConfig::default(),
        }
    }

    /// Overrides the browser session configuration.
    pub fn with_session_config(mut self, session_config: BrowserSessionConfig) -> Self {
        self.session_config = session_config;
        self
    }

    async fn attempt_with_session(
        &self,
        session: &BrowserSession,
        query: &JobQuery,
    ) -> Result<StrategyOutcome> {
        let target = query.primary_target();
        let page = session.open(&target).await?;

        if let Err(e) = page.wait_for_navigation().await {
            debug!("Navigation wait failed, proceeding with current content: {}", e);
        }

        browser::mask_automation(&page).await;
        wait_for_results(&page).await;

        for pass in 0..SCROLL_PASSES {
            browser::scroll_to_bottom(&page).await?;
            sleep(Duration::from_secs(SCROLL_PAUSE_SECS)).await;
            click_load_more(&page).await;
            debug!("Scroll pass {}/{} complete", pass + 1, SCROLL_PASSES);
        }

        let html = page
            .content()
            .await
            .map_err(|e| ScrapeError::Browser(format!("Failed to get page content: {}", e)))?;

        let hrefs = links::extract_hrefs(&html, LINKEDIN_JOB_SELECTORS)?;
        let urls = links::resolve_links(
            hrefs,
            LINKEDIN_BASE_URL,
            LINKEDIN_JOB_MARKER,
            self.config.max_results,
        );
        Ok(StrategyOutcome::new(self.name(), urls, self.threshold()))
    }
}

impl Default for LinkedInBrowser {
    fn default() -> Self {
        Self::new()
    }
}

/// Waits (bounded) for a job anchor or either results container to appear.
///
/// A wait timeout is a soft failure; the caller proceeds with whatever has
/// rendered rather than aborting the attempt.
async fn wait_for_results(page: &Page) {
    let deadline = Instant::now() + Duration::from_secs(RESULTS_WAIT_SECS);
    loop {
        for css in RESULTS_READY_SELECTORS {
            if page.find_element(*css).await.is_ok() {
                return;
            }
        }
        if Instant::now() >= deadline {
            debug!(
                "No results content within {}s, proceeding anyway",
                RESULTS_WAIT_SECS
            );
            return;
        }
        sleep(Duration::from_millis(RESULTS_POLL_MS)).await;
    }
}

/// Clicks the "load more" control when present. Best-effort; every failure
/// is ignored.
async fn click_load_more(page: &Page) {
    if let Ok(button) = page.find_element(LOAD_MORE_SELECTOR).await {
        if button.click().await.is_ok() {
            sleep(Duration::from_secs(LOAD_MORE_PAUSE_SECS)).await;
        }
    }
}

#[async_trait]
impl Strategy for LinkedInBrowser {
    fn config(&self) -> &StrategyConfig {
        &self.config
    }

    async fn attempt(&self, query: &JobQuery) -> Result<StrategyOutcome> {
        let session = BrowserSession::launch(&self.session_config).await?;

        let result = self.attempt_with_session(&session, query).await;

        // The session is released on every exit path, success or failure,
        // before the outcome is reported.
        session.close().await;

        result
    }
}
