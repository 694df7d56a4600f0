//! Retrieval strategy trait and configuration.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{JobQuery, Result, StrategyOutcome};

/// Configuration for a retrieval strategy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyConfig {
    /// Short identifier (e.g. "linkedin-http").
    pub name: String,
    /// Minimum result count for the strategy to be considered trustworthy
    /// enough to stop escalation.
    #[serde(default = "default_threshold")]
    pub threshold: usize,
    /// Overall time budget for one attempt, in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// Maximum number of URLs the strategy may return.
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    /// Whether the strategy is enabled.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_threshold() -> usize {
    3
}

fn default_timeout() -> u64 {
    10
}

fn default_max_results() -> usize {
    50
}

fn default_enabled() -> bool {
    true
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            threshold: 3,
            timeout: 10,
            max_results: 50,
            enabled: true,
        }
    }
}

/// Trait for implementing retrieval strategies.
///
/// Each strategy is a self-contained retrieval method with its own cost,
/// reliability, and satisfaction threshold. The pipeline tries strategies
/// in escalating cost order and stops at the first satisfying outcome.
#[async_trait]
pub trait Strategy: Send + Sync {
    /// Returns the strategy configuration.
    fn config(&self) -> &StrategyConfig;

    /// Attempts retrieval for the given query.
    ///
    /// Errors are recovered by the pipeline; an implementation should
    /// return `Err` for any failure rather than panicking.
    async fn attempt(&self, query: &JobQuery) -> Result<StrategyOutcome>;

    /// Returns the strategy name.
    fn name(&self) -> &str {
        &self.config().name
    }

    /// Returns the satisfaction threshold.
    fn threshold(&self) -> usize {
        self.config().threshold
    }

    /// Returns whether the strategy is enabled.
    fn is_enabled(&self) -> bool {
        self.config().enabled
    }
}
