//! Retrieval strategy implementations, ordered by escalating cost.

mod indeed;
mod linkedin_http;

pub mod synthetic;

#[cfg(feature = "headless")]
mod linkedin_browser;

pub use indeed::Indeed;
pub use linkedin_http::LinkedInHttp;

#[cfg(feature = "headless")]
pub use linkedin_browser::LinkedInBrowser;

/// Ordered selector heuristics for job-detail anchors on the primary site.
///
/// Multiple independent heuristics are unioned because the site varies its
/// markup between logged-out, logged-in, and bot-suspect renderings. Shared
/// by the HTTP and browser strategies so both parse identically.
pub(crate) const LINKEDIN_JOB_SELECTORS: &[&str] = &[
    r#"a[href*="/jobs/view/"]"#,
    "a.base-card__full-link",
    "a.job-card-container__link",
    "a[data-job-id]",
    r#"a[href*="linkedin.com/jobs/view/"]"#,
];

/// Path segment present in every job-detail URL on the primary site.
pub(crate) const LINKEDIN_JOB_MARKER: &str = "/jobs/view/";
