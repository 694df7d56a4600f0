//! Shared link extraction and normalization.
//!
//! Every live strategy funnels its parsed anchors through the same
//! post-processing: absolute-URL resolution against the source site's base,
//! a job-detail path filter, first-seen-order deduplication, and a cap.

use std::collections::HashSet;

use scraper::{Html, Selector};
use url::Url;

use crate::{Result, ScrapeError};

/// Extracts anchor `href` values matching an ordered list of selectors.
///
/// Selectors are independent heuristics for "this anchor is a job-detail
/// link"; their matches are unioned in selector order. Duplicates are kept
/// here and removed later by [`resolve_links`].
pub fn extract_hrefs(html: &str, selectors: &[&str]) -> Result<Vec<String>> {
    let document = Html::parse_document(html);
    let mut hrefs = Vec::new();

    for css in selectors {
        let selector = Selector::parse(css).map_err(|e| {
            ScrapeError::Parse(format!("Failed to parse selector '{}': {:?}", css, e))
        })?;
        for element in document.select(&selector) {
            if let Some(href) = element.value().attr("href") {
                hrefs.push(href.to_string());
            }
        }
    }

    Ok(hrefs)
}

/// Resolves raw hrefs to absolute URLs, filters on a job-detail path
/// marker, deduplicates preserving first-seen order, and caps the result.
///
/// Hrefs that cannot be resolved are dropped silently; a raw link may be
/// relative, absolute, or malformed.
pub fn resolve_links(
    hrefs: impl IntoIterator<Item = String>,
    base: &str,
    marker: &str,
    cap: usize,
) -> Vec<String> {
    let base_url = match Url::parse(base) {
        Ok(url) => url,
        Err(_) => return Vec::new(),
    };

    let mut seen = HashSet::new();
    let mut resolved = Vec::new();

    for href in hrefs {
        let absolute = if href.starts_with("http://") || href.starts_with("https://") {
            href
        } else {
            match base_url.join(&href) {
                Ok(url) => url.to_string(),
                Err(_) => continue,
            }
        };

        if !absolute.contains(marker) {
            continue;
        }

        if seen.insert(absolute.clone()) {
            resolved.push(absolute);
            if resolved.len() >= cap {
                break;
            }
        }
    }

    resolved
}
