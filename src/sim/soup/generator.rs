//! Soup generation - randomized candidate fields for the search.
//!
//! Both generators confine live cells to a region centered in the field and
//! draw their probability parameter once per candidate, so individual
//! candidates are internally homogeneous while the population spans the
//! configured range.

use rand::prelude::*;
use rand_distr::Bernoulli;

use crate::schema::SpawnConfig;
use crate::sim::Field;

/// Rectangular spawn region within a field, half-open on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnRegion {
    pub row_start: usize,
    pub row_end: usize,
    pub col_start: usize,
    pub col_end: usize,
}

impl SpawnRegion {
    /// Center a `width x height` region in a field of the given edge length.
    ///
    /// The start index is `(size - extent) / 2` with floor division, so when
    /// the margin is odd the spare cell sits on the high-index side. A field
    /// of size 20 with extent 10 spans indices 5..15 on that axis.
    pub fn centered(size: usize, width: usize, height: usize) -> Self {
        debug_assert!(width <= size && height <= size);

        let row_start = (size - height) / 2;
        let col_start = (size - width) / 2;
        Self {
            row_start,
            row_end: row_start + height,
            col_start,
            col_end: col_start + width,
        }
    }

    /// Whether (row, col) lies inside the region.
    #[inline]
    pub fn contains(&self, row: usize, col: usize) -> bool {
        (self.row_start..self.row_end).contains(&row)
            && (self.col_start..self.col_end).contains(&col)
    }
}

/// Random source for soup generation.
pub struct SoupRng {
    rng: StdRng,
}

impl SoupRng {
    /// Create from seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create with entropy from the OS.
    pub fn random() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Uniform draw within inclusive bounds.
    fn uniform(&mut self, bounds: (f64, f64)) -> f64 {
        self.rng.gen_range(bounds.0..=bounds.1)
    }

    /// Generate a uniform-random soup.
    ///
    /// Draws one density from `spawn.density_bounds`, then sets each cell of
    /// the centered region alive with that probability. Cells outside the
    /// region stay dead.
    pub fn uniform_soup(&mut self, size: usize, spawn: &SpawnConfig) -> Field {
        let region = SpawnRegion::centered(size, spawn.width, spawn.height);
        let density = self.uniform(spawn.density_bounds);

        let mut field = Field::empty(size);
        for row in region.row_start..region.row_end {
            for col in region.col_start..region.col_end {
                field.set(row, col, self.rng.gen_bool(density));
            }
        }
        field
    }

    /// Generate a mutated copy of a seed soup.
    ///
    /// Draws one flip probability from `spawn.flip_bounds`. Inside the
    /// centered region each cell is the seed cell flipped with that
    /// probability; outside the region cells are dead even where the seed
    /// is alive.
    pub fn mutated_soup(&mut self, seed: &Field, spawn: &SpawnConfig) -> Field {
        let size = seed.size();
        let region = SpawnRegion::centered(size, spawn.width, spawn.height);
        let flip = Bernoulli::new(self.uniform(spawn.flip_bounds))
            .expect("flip probability within [0, 1]");

        let mut field = Field::empty(size);
        for row in region.row_start..region.row_end {
            for col in region.col_start..region.col_end {
                field.set(row, col, seed.get(row, col) ^ flip.sample(&mut self.rng));
            }
        }
        field
    }
}
