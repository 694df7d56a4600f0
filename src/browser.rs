//! Scoped headless browser session for JavaScript-rendered retrieval.
//!
//! This module is only available when the `headless` Cargo feature is
//! enabled. Unlike a long-lived browser pool, a [`BrowserSession`] wraps a
//! single Chrome process launched for one retrieval attempt and torn down
//! before the attempt returns, so repeated pipeline invocations cannot leak
//! automation processes.

use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::Page;
use futures::StreamExt;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::{Result, ScrapeError};

/// Realistic desktop user agent for browser requests.
///
/// Chrome's `--headless=new` mode injects "HeadlessChrome" into the UA,
/// which the target site trivially detects and blocks.
pub const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Scripted property override hiding the automation flag sites can query.
pub const WEBDRIVER_OVERRIDE: &str =
    "Object.defineProperty(navigator, 'webdriver', { get: () => undefined })";

/// Configuration for launching a browser session.
#[derive(Debug, Clone)]
pub struct BrowserSessionConfig {
    /// Whether to run the browser in headless mode.
    pub headless: bool,
    /// Path to the Chrome/Chromium executable. If `None`, auto-detected.
    pub chrome_path: Option<String>,
    /// Additional launch arguments for Chrome.
    pub launch_args: Vec<String>,
}

impl Default for BrowserSessionConfig {
    fn default() -> Self {
        Self {
            headless: true,
            chrome_path: None,
            launch_args: Vec::new(),
        }
    }
}

/// A single-use headless browser process.
///
/// The session owns the Chrome process and its CDP event handler task.
/// Call [`close`](BrowserSession::close) when done; dropping the session
/// also kills the process and aborts the handler as a backstop.
pub struct BrowserSession {
    browser: Browser,
    handler: JoinHandle<()>,
}

impl BrowserSession {
    /// Launches a fresh browser process.
    pub async fn launch(config: &BrowserSessionConfig) -> Result<Self> {
        debug!("Launching headless browser session");

        let mut builder = BrowserConfig::builder();

        if config.headless {
            builder = builder.arg("--headless=new");
        }

        // Resolve Chrome executable: explicit path > auto-detect > auto-download
        if let Some(ref path) = config.chrome_path {
            builder = builder.chrome_executable(path);
        } else {
            let chrome_path = crate::browser_setup::ensure_chrome().await?;
            debug!("Using Chrome at: {}", chrome_path.display());
            builder = builder.chrome_executable(chrome_path);
        }

        builder = builder.arg(format!("--user-agent={}", BROWSER_USER_AGENT));

        // Anti-detection: hide navigator.webdriver and automation indicators.
        // Image loading is skipped; the result markup renders without it.
        builder = builder
            .arg("--disable-blink-features=AutomationControlled")
            .arg("--blink-settings=imagesEnabled=false");

        // Standard arguments for scraping
        builder = builder
            .arg("--disable-gpu")
            .arg("--no-sandbox")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-extensions")
            .arg("--disable-background-networking")
            .arg("--disable-default-apps")
            .arg("--disable-sync")
            .arg("--disable-translate")
            .arg("--mute-audio")
            .arg("--no-first-run");

        for arg in &config.launch_args {
            builder = builder.arg(arg);
        }

        let browser_config = builder
            .build()
            .map_err(|e| ScrapeError::Browser(format!("Failed to build browser config: {}", e)))?;

        let (browser, mut handler) = Browser::launch(browser_config)
            .await
            .map_err(|e| ScrapeError::Browser(format!("Failed to launch browser: {}", e)))?;

        // Drive CDP events until the browser goes away
        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    warn!("Browser CDP handler error: {}", e);
                }
            }
            debug!("Browser CDP handler exited");
        });

        Ok(Self { browser, handler })
    }

    /// Opens a new tab and navigates it to the given URL.
    pub async fn open(&self, url: &str) -> Result<Page> {
        self.browser
            .new_page(url)
            .await
            .map_err(|e| ScrapeError::Browser(format!("Failed to open page: {}", e)))
    }

    /// Tears the session down: closes the browser, waits for the process
    /// to exit, and stops the handler task.
    pub async fn close(mut self) {
        if let Err(e) = self.browser.close().await {
            warn!("Failed to close browser: {}", e);
        }
        if let Err(e) = self.browser.wait().await {
            debug!("Browser process wait failed: {}", e);
        }
        self.handler.abort();
        debug!("Browser session closed");
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        // Dropping `Browser` kills the Chrome process; the handler task
        // still has to be stopped explicitly.
        self.handler.abort();
    }
}

/// Scrolls the page to the bottom of the rendered document.
pub async fn scroll_to_bottom(page: &Page) -> Result<()> {
    page.evaluate("window.scrollTo(0, document.body.scrollHeight)")
        .await
        .map_err(|e| ScrapeError::Browser(format!("Scroll failed: {}", e)))?;
    Ok(())
}

/// Masks `navigator.webdriver` on the current page. Best-effort.
pub async fn mask_automation(page: &Page) {
    if let Err(e) = page.evaluate(WEBDRIVER_OVERRIDE).await {
        debug!("Automation mask injection failed: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_config_default() {
        let config = BrowserSessionConfig::default();
        assert!(config.headless);
        assert!(config.chrome_path.is_none());
        assert!(config.launch_args.is_empty());
    }

    #[test]
    fn test_session_config_custom() {
        let config = BrowserSessionConfig {
            headless: false,
            chrome_path: Some("/usr/bin/chromium".to_string()),
            launch_args: vec!["--window-size=1920,1080".to_string()],
        };
        assert!(!config.headless);
        assert_eq!(config.chrome_path.as_deref(), Some("/usr/bin/chromium"));
        assert_eq!(config.launch_args.len(), 1);
    }

    #[test]
    fn test_session_config_clone() {
        let config = BrowserSessionConfig {
            chrome_path: Some("/opt/chrome".to_string()),
            ..Default::default()
        };
        let cloned = config.clone();
        assert_eq!(cloned.chrome_path.as_deref(), Some("/opt/chrome"));
    }

    #[test]
    fn test_user_agent_is_not_headless() {
        assert!(!BROWSER_USER_AGENT.contains("Headless"));
        assert!(BROWSER_USER_AGENT.starts_with("Mozilla/5.0"));
    }

    #[test]
    fn test_webdriver_override_targets_navigator() {
        assert!(WEBDRIVER_OVERRIDE.contains("navigator"));
        assert!(WEBDRIVER_OVERRIDE.contains("webdriver"));
        assert!(WEBDRIVER_OVERRIDE.contains("undefined"));
    }
}
