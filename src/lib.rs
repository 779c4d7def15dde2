//! Soup search for Conway's Game of Life on a bounded grid.
//!
//! This crate simulates the automaton on a fixed square field whose border
//! never wraps, and searches random initial configurations ("soups") for the
//! one leaving the most live cells after a fixed number of steps. Fields
//! round-trip through a compact base64 text encoding so discovered soups can
//! be stored and shared.
//!
//! # Architecture
//!
//! The crate is split into two main modules:
//!
//! - `schema`: Configuration types for fields, generators, and searches
//! - `sim`: Field state, transition engine, codec, session, and soup search
//!
//! # Example
//!
//! ```rust,no_run
//! use soup_search::{
//!     schema::SearchConfig,
//!     sim::{Session, soup::SoupSearch},
//! };
//!
//! // Search for a productive soup
//! let config = SearchConfig {
//!     attempts: 10_000,
//!     ..SearchConfig::default()
//! };
//! let field = config.field;
//!
//! let mut search = SoupSearch::new(config).unwrap();
//! let outcome = search.run();
//!
//! // Install the winner into a session and watch it evolve
//! let mut session = Session::new(field).unwrap();
//! session.observe(|field| println!("{} alive", field.census().alive));
//!
//! if let Some(soup) = outcome.soup {
//!     session.install(soup).unwrap();
//!     for _ in 0..50 {
//!         session.tick();
//!     }
//! }
//! ```

pub mod schema;
pub mod sim;

// Re-export commonly used types
pub use schema::{ConfigError, FieldConfig, SearchConfig, SpawnConfig, SpawnPattern};
pub use sim::soup::{
    BestSoup, SearchError, SearchOutcome, SearchPhase, SearchProgress, SearchStats, SoupRng,
    SoupSearch, StopReason,
};
pub use sim::{CellCensus, CodecError, Field, LifeEngine, Session, SessionError};
