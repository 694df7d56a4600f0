//! # jobscout
//!
//! An escalating multi-strategy scraper for job posting URLs.
//!
//! Given a free-text query and a region code, the pipeline tries
//! progressively more expensive and more evasive retrieval strategies —
//! a direct HTTP fetch, a scripted headless browser session, a secondary
//! listing site — stopping as soon as one yields enough usable results,
//! and falling back to deterministic placeholder generation so the caller
//! always receives a non-empty, deduplicated list.
//!
//! ## Example
//!
//! ```rust,no_run
//! use jobscout::{JobQuery, Pipeline};
//!
//! #[tokio::main]
//! async fn main() {
//!     let pipeline = Pipeline::with_default_strategies();
//!     let query = JobQuery::new("python developer").with_region("US");
//!
//!     let links = pipeline.run(&query).await;
//!     for url in &links.urls {
//!         println!("{}", url);
//!     }
//! }
//! ```

mod error;
mod links;
mod outcome;
mod pipeline;
mod query;
mod strategy;

pub mod strategies;

#[cfg(feature = "headless")]
pub mod browser;
#[cfg(feature = "headless")]
pub mod browser_setup;

pub use error::{Result, ScrapeError};
pub use outcome::{JobLinks, ResultSource, StrategyOutcome};
pub use pipeline::{Pipeline, MAX_TOTAL_RESULTS, MIN_USABLE_RESULTS};
pub use query::{JobQuery, DEFAULT_REGION};
pub use strategy::{Strategy, StrategyConfig};
