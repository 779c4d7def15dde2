//! Configuration types for fields, spawn regions, and search runs.

use serde::{Deserialize, Serialize};

/// Largest supported field edge length.
pub const MAX_FIELD_SIZE: usize = 4096;

fn default_field_size() -> usize {
    20
}

/// Field geometry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FieldConfig {
    /// Grid edge length in cells. Fields are always square.
    #[serde(default = "default_field_size")]
    pub size: usize,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            size: default_field_size(),
        }
    }
}

impl FieldConfig {
    /// Total cell count (size squared).
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.size * self.size
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.size == 0 {
            return Err(ConfigError::ZeroFieldSize);
        }
        if self.size > MAX_FIELD_SIZE {
            return Err(ConfigError::FieldTooLarge {
                size: self.size,
                max: MAX_FIELD_SIZE,
            });
        }
        Ok(())
    }
}

/// Spawn region extents and the probability ranges used by the generators.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnConfig {
    /// Spawn region width in cells.
    #[serde(default = "default_spawn_extent")]
    pub width: usize,
    /// Spawn region height in cells.
    #[serde(default = "default_spawn_extent")]
    pub height: usize,
    /// Density range for the uniform generator; one draw per candidate.
    #[serde(default = "default_density_bounds")]
    pub density_bounds: (f64, f64),
    /// Flip probability range for the mutation generator; one draw per candidate.
    #[serde(default = "default_flip_bounds")]
    pub flip_bounds: (f64, f64),
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            width: default_spawn_extent(),
            height: default_spawn_extent(),
            density_bounds: default_density_bounds(),
            flip_bounds: default_flip_bounds(),
        }
    }
}

fn default_spawn_extent() -> usize {
    10
}
fn default_density_bounds() -> (f64, f64) {
    (0.2, 0.8)
}
fn default_flip_bounds() -> (f64, f64) {
    (0.01, 0.1)
}

impl SpawnConfig {
    /// Validate the spawn region against a field edge length.
    pub fn validate(&self, field_size: usize) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::ZeroSpawnExtent);
        }
        if self.width > field_size || self.height > field_size {
            return Err(ConfigError::SpawnRegionTooLarge {
                width: self.width,
                height: self.height,
                field_size,
            });
        }

        let check_bounds = |bounds: (f64, f64), name: &str| {
            if bounds.0 < 0.0 || bounds.1 > 1.0 || bounds.0 > bounds.1 {
                Err(ConfigError::InvalidProbabilityBounds(format!(
                    "{} bounds ({}, {}) must satisfy 0 <= lo <= hi <= 1",
                    name, bounds.0, bounds.1
                )))
            } else {
                Ok(())
            }
        };

        check_bounds(self.density_bounds, "density")?;
        check_bounds(self.flip_bounds, "flip")?;

        Ok(())
    }
}

/// Candidate source for search attempts.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(tag = "type")]
pub enum SpawnPattern {
    /// Fresh uniform-random soup each attempt.
    #[default]
    Uniform,
    /// Per-attempt mutation of a fixed seed soup.
    Mutation {
        /// Encoded seed field, decoded against the configured size.
        seed: String,
    },
}

/// Top-level configuration for a soup search run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Field geometry.
    #[serde(default)]
    pub field: FieldConfig,
    /// Spawn region and probability ranges.
    #[serde(default)]
    pub spawn: SpawnConfig,
    /// Candidate source.
    #[serde(default)]
    pub pattern: SpawnPattern,
    /// Number of attempts in one run.
    #[serde(default = "default_attempts")]
    pub attempts: u64,
    /// Simulation steps per attempt.
    #[serde(default = "default_steps")]
    pub steps: u64,
    /// Progress callback cadence in attempts.
    #[serde(default = "default_report_interval")]
    pub report_interval: u64,
    /// Random seed for reproducibility.
    #[serde(default)]
    pub random_seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            field: FieldConfig::default(),
            spawn: SpawnConfig::default(),
            pattern: SpawnPattern::default(),
            attempts: default_attempts(),
            steps: default_steps(),
            report_interval: default_report_interval(),
            random_seed: None,
        }
    }
}

fn default_attempts() -> u64 {
    50_000
}
fn default_steps() -> u64 {
    1
}
fn default_report_interval() -> u64 {
    100
}

impl SearchConfig {
    /// Validate search configuration.
    ///
    /// Zero attempts and zero steps are both legal: a zero-attempt run
    /// produces no result, and zero steps scores candidates unsimulated.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.field.validate()?;
        self.spawn.validate(self.field.size)?;

        if self.report_interval == 0 {
            return Err(ConfigError::ZeroReportInterval);
        }

        Ok(())
    }
}

/// Configuration validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Field size must be non-zero")]
    ZeroFieldSize,
    #[error("Field size {size} exceeds maximum {max}")]
    FieldTooLarge { size: usize, max: usize },
    #[error("Spawn extents must be non-zero")]
    ZeroSpawnExtent,
    #[error("Spawn region {width}x{height} does not fit a field of size {field_size}")]
    SpawnRegionTooLarge {
        width: usize,
        height: usize,
        field_size: usize,
    },
    #[error("Invalid probability bounds: {0}")]
    InvalidProbabilityBounds(String),
    #[error("Report interval must be non-zero")]
    ZeroReportInterval,
}
