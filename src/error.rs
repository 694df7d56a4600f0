//! Error types for the scraping library.

use thiserror::Error;

/// Result type alias for scraping operations.
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Errors that can occur while acquiring job postings.
///
/// Strategy-level failures are recovered inside the pipeline (logged and
/// converted to an empty outcome); none of these variants escapes
/// [`Pipeline::run`](crate::Pipeline::run).
#[derive(Error, Debug)]
pub enum ScrapeError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Failed to parse markup or a selector.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// The site served an auth wall or bot challenge instead of results.
    #[error("Request blocked: {0}")]
    Blocked(String),

    /// Headless browser session failure.
    #[error("Browser error: {0}")]
    Browser(String),

    /// Strategy exceeded its time budget.
    #[error("Strategy timeout exceeded")]
    Timeout,

    /// URL parsing error.
    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Generic error.
    #[error("{0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_parse() {
        let err = ScrapeError::Parse("bad selector".to_string());
        assert_eq!(err.to_string(), "Failed to parse response: bad selector");
    }

    #[test]
    fn test_error_display_blocked() {
        let err = ScrapeError::Blocked("auth wall".to_string());
        assert_eq!(err.to_string(), "Request blocked: auth wall");
    }

    #[test]
    fn test_error_display_browser() {
        let err = ScrapeError::Browser("launch failed".to_string());
        assert_eq!(err.to_string(), "Browser error: launch failed");
    }

    #[test]
    fn test_error_display_timeout() {
        let err = ScrapeError::Timeout;
        assert_eq!(err.to_string(), "Strategy timeout exceeded");
    }

    #[test]
    fn test_error_display_other() {
        let err = ScrapeError::Other("something went wrong".to_string());
        assert_eq!(err.to_string(), "something went wrong");
    }

    #[test]
    fn test_error_from_url_parse() {
        let parse_err = url::Url::parse("not a url").unwrap_err();
        let err: ScrapeError = parse_err.into();
        assert!(matches!(err, ScrapeError::UrlParse(_)));
    }

    #[test]
    fn test_error_debug() {
        let err = ScrapeError::Timeout;
        let debug_str = format!("{:?}", err);
        assert!(debug_str.contains("Timeout"));
    }
}
