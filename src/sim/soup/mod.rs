//! Soup search module - Best-of-N random soup discovery.
//!
//! # Overview
//!
//! A soup search runs a fixed number of attempts. Each attempt:
//!
//! 1. Draws a candidate soup from the configured generator (fresh uniform
//!    noise, or a mutation of a fixed seed soup)
//! 2. Captures the candidate's text encoding
//! 3. Advances it a fixed number of simulation steps
//! 4. Scores it by live cell count
//!
//! The candidate with the strictly highest score wins; ties keep the
//! earliest. The winner is returned both as its pre-simulation encoding and
//! as a materialized field ready to install into a session.
//!
//! # Example
//!
//! ```rust,no_run
//! use soup_search::{SearchConfig, SoupSearch};
//!
//! let config = SearchConfig {
//!     attempts: 1_000,
//!     ..SearchConfig::default()
//! };
//!
//! let mut search = SoupSearch::new(config).unwrap();
//! let outcome = search.run_with_callback(|progress| {
//!     println!("Attempt {}/{}", progress.attempt, progress.total_attempts);
//! });
//!
//! if let Some(best) = outcome.best {
//!     println!("Best soup scored {}: {}", best.score, best.encoded);
//! }
//! ```

mod generator;
mod search;

pub use generator::{SoupRng, SpawnRegion};
pub use search::{
    BestSoup, SearchError, SearchOutcome, SearchPhase, SearchProgress, SearchStats, SoupSearch,
    StopReason,
};
