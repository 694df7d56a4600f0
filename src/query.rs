//! Job search query representation and canonical search targets.

use serde::{Deserialize, Serialize};

/// Region code used when the caller supplies none.
pub const DEFAULT_REGION: &str = "IN";

/// Base URL of the primary job listing site.
pub const LINKEDIN_BASE_URL: &str = "https://www.linkedin.com";

/// Base URL of the secondary job listing site.
pub const INDEED_BASE_URL: &str = "https://www.indeed.com";

/// A job search query: free-text term plus a region code.
///
/// Immutable once constructed. The caller is expected to lower-case the
/// term before building the query (the CLI does this); the library itself
/// does not alter it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobQuery {
    /// The search term, e.g. "python developer".
    pub term: String,
    /// Region/country code, e.g. "US".
    pub region: String,
}

impl JobQuery {
    /// Creates a new query with the default region.
    pub fn new(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            region: DEFAULT_REGION.to_string(),
        }
    }

    /// Sets the region code. Blank input keeps the default.
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        let region = region.into();
        if !region.trim().is_empty() {
            self.region = region;
        }
        self
    }

    /// Canonical search URL on the primary site.
    ///
    /// The term is percent-encoded so spaces and special characters cannot
    /// break the URL. Any string is acceptable input.
    pub fn primary_target(&self) -> String {
        format!(
            "{}/jobs/search/?keywords={}&location={}",
            LINKEDIN_BASE_URL,
            urlencoding::encode(&self.term),
            urlencoding::encode(&self.region)
        )
    }

    /// Canonical search URL on the secondary site (different query shape).
    pub fn alternate_target(&self) -> String {
        format!(
            "{}/jobs?q={}&l={}",
            INDEED_BASE_URL,
            urlencoding::encode(&self.term),
            urlencoding::encode(&self.region)
        )
    }
}
