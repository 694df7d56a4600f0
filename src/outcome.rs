//! Strategy outcome and final result types.

use serde::{Deserialize, Serialize};

/// Where the returned URLs came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultSource {
    /// At least one live retrieval strategy produced the list.
    Live,
    /// Deterministic placeholder URLs; no live strategy was trustworthy.
    Synthetic,
    /// Defensive single-entry fallback pointing at a manual search.
    Manual,
}

/// The result of a single strategy attempt.
#[derive(Debug, Clone)]
pub struct StrategyOutcome {
    /// Name of the strategy that produced this outcome.
    pub strategy: String,
    /// Resolved, deduplicated URLs in first-seen order.
    pub urls: Vec<String>,
    /// Whether the strategy met its satisfaction threshold.
    ///
    /// A strategy's output is trustworthy only past a minimum volume; a
    /// single stray match is noise, not a hit.
    pub satisfied: bool,
}

impl StrategyOutcome {
    /// Creates an outcome, computing `satisfied` against the threshold.
    pub fn new(strategy: impl Into<String>, urls: Vec<String>, threshold: usize) -> Self {
        let satisfied = urls.len() >= threshold;
        Self {
            strategy: strategy.into(),
            urls,
            satisfied,
        }
    }

    /// An empty, unsatisfied outcome (failed or fruitless attempt).
    pub fn empty(strategy: impl Into<String>) -> Self {
        Self {
            strategy: strategy.into(),
            urls: Vec::new(),
            satisfied: false,
        }
    }

    /// Number of URLs in the outcome.
    pub fn len(&self) -> usize {
        self.urls.len()
    }

    /// Whether the outcome holds no URLs.
    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}

/// The pipeline's final, caller-facing result.
///
/// Always holds between 1 and 100 URLs with no exact duplicates. The
/// `source` tag lets callers distinguish live results from synthetic
/// placeholders instead of receiving them silently mixed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobLinks {
    /// Ordered job posting URLs.
    pub urls: Vec<String>,
    /// Provenance of the list.
    pub source: ResultSource,
    /// Wall-clock duration of the pipeline run in milliseconds.
    pub duration_ms: u64,
}

impl JobLinks {
    /// Creates a result with the given provenance.
    pub fn new(urls: Vec<String>, source: ResultSource) -> Self {
        Self {
            urls,
            source,
            duration_ms: 0,
        }
    }

    /// Records the pipeline duration.
    pub fn set_duration(&mut self, ms: u64) {
        self.duration_ms = ms;
    }

    /// Number of URLs.
    pub fn len(&self) -> usize {
        self.urls.len()
    }

    /// Whether the list is empty (never true for pipeline output).
    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}
