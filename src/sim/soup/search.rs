//! Soup search - repeated generate, simulate, score, keep-best.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::schema::{ConfigError, SearchConfig, SpawnPattern};
use crate::sim::{CodecError, Field, LifeEngine, codec};

use super::generator::SoupRng;

/// Errors that stop a search before the first attempt.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("Invalid search configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("Mutation seed rejected: {0}")]
    InvalidSeed(#[from] CodecError),
}

/// Best candidate retained by a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestSoup {
    /// Live cell count after the configured simulation steps.
    pub score: usize,
    /// Encoding captured before simulation; decoding it reproduces the
    /// starting soup, not the evolved state.
    pub encoded: String,
    /// Attempt number (1-based) that produced this candidate.
    pub attempt: u64,
}

/// Phase reported through the progress callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchPhase {
    /// Attempts are still executing.
    Running,
    /// All configured attempts ran.
    Complete,
    /// The cancellation flag stopped the run.
    Cancelled,
}

/// Progress snapshot passed to the callback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchProgress {
    /// Attempts executed so far.
    pub attempt: u64,
    /// Attempts planned for the run.
    pub total_attempts: u64,
    /// Best candidate so far, if any attempt ran.
    pub best: Option<BestSoup>,
    /// Current phase.
    pub phase: SearchPhase,
}

/// Reason a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopReason {
    /// All configured attempts ran.
    MaxAttempts,
    /// The cancellation flag was set.
    Cancelled,
}

/// Statistics from one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchStats {
    /// Attempts executed; short of the configured count when cancelled.
    pub attempts_run: u64,
    /// Times the best candidate was replaced.
    pub improvements: u64,
    /// Wall-clock duration of the run in seconds.
    pub elapsed_seconds: f64,
    /// Attempt throughput.
    pub attempts_per_second: f64,
    /// Why the run stopped.
    pub stop_reason: StopReason,
}

/// Final result of a run.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// Best candidate found, if any attempt ran.
    pub best: Option<BestSoup>,
    /// The best candidate's starting soup, materialized from its encoding.
    pub soup: Option<Field>,
    /// Run statistics.
    pub stats: SearchStats,
}

/// Best-of-N search over random soups.
///
/// Each attempt draws a candidate from the configured generator, captures its
/// encoding, advances it the configured number of steps, and scores it by
/// live cell count. A candidate replaces the best only on a strictly higher
/// score, so the earliest of tied candidates is kept; the first attempt
/// always installs its candidate. Attempt state is replaced at the start of
/// every run, so one engine can run repeatedly.
pub struct SoupSearch {
    config: SearchConfig,
    rng: SoupRng,
    engine: LifeEngine,
    mutation_seed: Option<Field>,
    best: Option<BestSoup>,
    attempt: u64,
    improvements: u64,
    cancelled: Arc<AtomicBool>,
}

impl SoupSearch {
    /// Create a search from validated configuration.
    ///
    /// A mutation-mode seed string is decoded here, so a bad seed is
    /// rejected before any attempt runs.
    pub fn new(config: SearchConfig) -> Result<Self, SearchError> {
        config.validate()?;

        let mutation_seed = match &config.pattern {
            SpawnPattern::Uniform => None,
            SpawnPattern::Mutation { seed } => Some(codec::decode(seed, config.field.size)?),
        };

        let seed = config.random_seed.unwrap_or_else(rand::random);
        debug!("Soup search seeded with {}", seed);

        Ok(Self {
            rng: SoupRng::new(seed),
            engine: LifeEngine::new(config.field),
            mutation_seed,
            best: None,
            attempt: 0,
            improvements: 0,
            cancelled: Arc::new(AtomicBool::new(false)),
            config,
        })
    }

    /// Get cancellation handle.
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancelled)
    }

    /// Current progress snapshot.
    pub fn progress(&self) -> SearchProgress {
        let phase = if self.cancelled.load(Ordering::Relaxed) {
            SearchPhase::Cancelled
        } else if self.attempt >= self.config.attempts {
            SearchPhase::Complete
        } else {
            SearchPhase::Running
        };

        SearchProgress {
            attempt: self.attempt,
            total_attempts: self.config.attempts,
            best: self.best.clone(),
            phase,
        }
    }

    /// Run one attempt: generate, encode, simulate, score, compare.
    fn run_attempt(&mut self) {
        let mut candidate = match &self.mutation_seed {
            Some(seed) => self.rng.mutated_soup(seed, &self.config.spawn),
            None => self.rng.uniform_soup(self.config.field.size, &self.config.spawn),
        };

        let encoded = codec::encode(&candidate);
        self.engine.run(&mut candidate, self.config.steps);
        let score = candidate.census().alive;

        self.attempt += 1;
        let improved = match &self.best {
            None => true,
            Some(best) => score > best.score,
        };
        if improved {
            debug!(
                "Attempt {}: new best soup with {} live cells",
                self.attempt, score
            );
            self.best = Some(BestSoup {
                score,
                encoded,
                attempt: self.attempt,
            });
            self.improvements += 1;
        }
    }

    /// Materialize the retained best soup from its stored encoding.
    fn materialize(&self) -> Option<Field> {
        self.best.as_ref().map(|best| {
            codec::decode(&best.encoded, self.config.field.size)
                .expect("Stored encoding decodes at the configured size")
        })
    }

    /// Run the search with a progress callback.
    ///
    /// The callback fires after every `report_interval` attempts and once
    /// more with a terminal phase. The cancellation flag is checked before
    /// every attempt, so no attempt starts after it is set.
    pub fn run_with_callback<F>(&mut self, callback: F) -> SearchOutcome
    where
        F: Fn(&SearchProgress),
    {
        let start = Instant::now();
        let total = self.config.attempts;
        info!(
            "Soup search: {} attempts, {} steps each, field size {}",
            total, self.config.steps, self.config.field.size
        );

        self.best = None;
        self.attempt = 0;
        self.improvements = 0;

        let stop_reason = loop {
            if self.cancelled.load(Ordering::Relaxed) {
                break StopReason::Cancelled;
            }
            if self.attempt >= total {
                break StopReason::MaxAttempts;
            }

            self.run_attempt();

            if self.attempt % self.config.report_interval == 0 {
                callback(&self.progress());
            }
        };

        let soup = self.materialize();
        let elapsed = start.elapsed().as_secs_f64();

        callback(&self.progress());

        info!(
            "Soup search stopped after {} attempts ({:?}), best score {:?}",
            self.attempt,
            stop_reason,
            self.best.as_ref().map(|best| best.score)
        );

        SearchOutcome {
            best: self.best.clone(),
            soup,
            stats: SearchStats {
                attempts_run: self.attempt,
                improvements: self.improvements,
                elapsed_seconds: elapsed,
                attempts_per_second: if elapsed > 0.0 {
                    self.attempt as f64 / elapsed
                } else {
                    0.0
                },
                stop_reason,
            },
        }
    }

    /// Run the search without progress reporting.
    pub fn run(&mut self) -> SearchOutcome {
        self.run_with_callback(|_| {})
    }
}
