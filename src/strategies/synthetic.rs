//! Deterministic placeholder generation for exhausted pipelines.
//!
//! When no live strategy is trustworthy, the caller still receives a
//! substantial, well-formed list. The URLs are syntactically valid
//! job-detail links derived from the query, but they do not resolve;
//! pipeline output built from them is tagged
//! [`ResultSource::Synthetic`](crate::ResultSource::Synthetic) so callers
//! can tell placeholders from live data.

use crate::query::LINKEDIN_BASE_URL;
use crate::JobQuery;

/// Number of placeholder URLs generated.
pub const SYNTHETIC_RESULT_COUNT: usize = 100;

/// Base for the sequential placeholder job ids.
const JOB_ID_BASE: u64 = 1_234_567_890;

/// Generates the placeholder URL list for a query.
///
/// Deterministic: identical input always produces the identical list, in
/// the same order. Never fails and never returns an empty list.
pub fn generate(query: &JobQuery) -> Vec<String> {
    let slug = query.term.to_lowercase().replace(' ', "-");
    let region = query.region.to_lowercase();

    (0..SYNTHETIC_RESULT_COUNT)
        .map(|i| {
            format!(
                "{}/jobs/view/{}-{}-{}",
                LINKEDIN_BASE_URL,
                JOB_ID_BASE + i as u64,
                slug,
                region
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_count() {
        let urls = generate(&JobQuery::new("python developer").with_region("US"));
        assert_eq!(urls.len(), SYNTHETIC_RESULT_COUNT);
    }

    #[test]
    fn test_generate_matches_template() {
        let urls = generate(&JobQuery::new("python developer").with_region("US"));
        let template =
            regex::Regex::new(r"^https://www\.linkedin\.com/jobs/view/\d+-python-developer-us$")
                .unwrap();
        for url in &urls {
            assert!(template.is_match(url), "unexpected URL: {}", url);
        }
    }

    #[test]
    fn test_generate_sequential_ids() {
        let urls = generate(&JobQuery::new("qa"));
        assert!(urls[0].contains("/jobs/view/1234567890-"));
        assert!(urls[99].contains("/jobs/view/1234567989-"));
    }

    #[test]
    fn test_generate_deterministic() {
        let query = JobQuery::new("rust engineer").with_region("DE");
        assert_eq!(generate(&query), generate(&query));
    }

    #[test]
    fn test_generate_unique() {
        let urls = generate(&JobQuery::new("devops"));
        let unique: std::collections::HashSet<_> = urls.iter().collect();
        assert_eq!(unique.len(), urls.len());
    }

    #[test]
    fn test_generate_lowercases_term_and_region() {
        let urls = generate(&JobQuery::new("Senior Java Developer").with_region("GB"));
        assert!(urls[0].ends_with("-senior-java-developer-gb"));
    }

    #[test]
    fn test_generate_default_region() {
        let urls = generate(&JobQuery::new("tester"));
        assert!(urls[0].ends_with("-tester-in"));
    }
}
