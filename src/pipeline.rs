//! Escalating strategy orchestration.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

use tokio::time::{timeout, Duration};
use tracing::{debug, warn};

use crate::strategies::{synthetic, Indeed, LinkedInHttp};
use crate::{JobLinks, JobQuery, ResultSource, Strategy, StrategyOutcome};

#[cfg(feature = "headless")]
use crate::strategies::LinkedInBrowser;

/// Accumulated link count at which escalation stops once the cheapest
/// tier has already had its chance.
pub const MIN_USABLE_RESULTS: usize = 3;

/// Upper bound on the number of URLs returned to the caller.
pub const MAX_TOTAL_RESULTS: usize = 100;

/// The escalating acquisition pipeline.
///
/// Strategies run one at a time in registration order (escalating cost),
/// never in parallel and never retried; the ordering exists precisely to
/// avoid paying browser-automation cost when the cheap path suffices. The
/// pipeline stops at the first trustworthy outcome and falls back to
/// synthetic generation when every live strategy is exhausted, so the
/// caller always receives a non-empty, deduplicated list.
pub struct Pipeline {
    strategies: Vec<Arc<dyn Strategy>>,
}

impl Pipeline {
    /// Creates a pipeline with no strategies registered.
    pub fn new() -> Self {
        Self {
            strategies: Vec::new(),
        }
    }

    /// Creates a pipeline with the standard escalation chain: HTTP fetch,
    /// then headless browser (with the `headless` feature), then the
    /// alternate source.
    pub fn with_default_strategies() -> Self {
        let mut pipeline = Self::new();
        pipeline.add_strategy(LinkedInHttp::new());
        #[cfg(feature = "headless")]
        pipeline.add_strategy(LinkedInBrowser::new());
        pipeline.add_strategy(Indeed::new());
        pipeline
    }

    /// Appends a strategy; registration order is escalation order.
    pub fn add_strategy<S: Strategy + 'static>(&mut self, strategy: S) {
        self.strategies.push(Arc::new(strategy));
    }

    /// Returns the number of registered strategies.
    pub fn strategy_count(&self) -> usize {
        self.strategies.len()
    }

    /// Runs the pipeline for a query.
    ///
    /// Infallible by signature: strategy failures are logged and swallowed
    /// locally, and the synthetic fallback guarantees a non-empty result
    /// for any input.
    pub async fn run(&self, query: &JobQuery) -> JobLinks {
        let start = Instant::now();

        let mut urls: Vec<String> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        let mut attempted = 0usize;

        for strategy in &self.strategies {
            if !strategy.is_enabled() {
                continue;
            }

            let name = strategy.name().to_string();
            let budget = Duration::from_secs(strategy.config().timeout);
            debug!("Trying strategy '{}'", name);

            let outcome = match timeout(budget, strategy.attempt(query)).await {
                Ok(Ok(outcome)) => outcome,
                Ok(Err(e)) => {
                    warn!("Strategy '{}' failed: {}", name, e);
                    StrategyOutcome::empty(&name)
                }
                Err(_) => {
                    warn!(
                        "Strategy '{}' exceeded its {}s budget",
                        name,
                        strategy.config().timeout
                    );
                    StrategyOutcome::empty(&name)
                }
            };
            attempted += 1;

            let satisfied = outcome.satisfied;
            let contributed = outcome.len();
            for url in outcome.urls {
                if seen.insert(url.clone()) {
                    urls.push(url);
                }
            }
            debug!(
                "Strategy '{}' contributed {} links, {} accumulated",
                name,
                contributed,
                urls.len()
            );

            // Stop at the first trustworthy outcome. From the second tier
            // onward a usable accumulated total also stops escalation.
            if satisfied || (attempted > 1 && urls.len() >= MIN_USABLE_RESULTS) {
                return finish(urls, ResultSource::Live, start);
            }
        }

        if urls.len() >= MIN_USABLE_RESULTS {
            return finish(urls, ResultSource::Live, start);
        }

        debug!("All live strategies exhausted, generating synthetic results");
        let generated = synthetic::generate(query);
        if !generated.is_empty() {
            return finish(generated, ResultSource::Synthetic, start);
        }

        // Unreachable given the generator's contract, but the caller must
        // never receive an empty list.
        finish(vec![query.primary_target()], ResultSource::Manual, start)
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

fn finish(mut urls: Vec<String>, source: ResultSource, start: Instant) -> JobLinks {
    urls.truncate(MAX_TOTAL_RESULTS);
    let mut links = JobLinks::new(urls, source);
    links.set_duration(start.elapsed().as_millis() as u64);
    links
}
