//! Field state and the Life transition engine.

use serde::{Deserialize, Serialize};

use crate::schema::FieldConfig;

/// A square grid of cell states, row-major.
///
/// The grid is bounded and never wraps: coordinates outside `[0, size)` do
/// not exist, so edge and corner cells simply have fewer neighbours. Every
/// cell always holds a definite value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    cells: Vec<bool>,
    size: usize,
}

impl Field {
    /// Create an all-dead field.
    pub fn empty(size: usize) -> Self {
        Self {
            cells: vec![false; size * size],
            size,
        }
    }

    /// Create a field from row-major cell states.
    ///
    /// Panics if `cells.len() != size * size`.
    pub fn from_cells(size: usize, cells: Vec<bool>) -> Self {
        assert_eq!(
            cells.len(),
            size * size,
            "cell count must equal size squared"
        );
        Self { cells, size }
    }

    /// Grid edge length.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Convert (row, col) to flat index.
    #[inline]
    fn idx(&self, row: usize, col: usize) -> usize {
        row * self.size + col
    }

    /// Cell state at (row, col).
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> bool {
        self.cells[self.idx(row, col)]
    }

    /// Set the cell state at (row, col).
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, alive: bool) {
        let idx = self.idx(row, col);
        self.cells[idx] = alive;
    }

    /// Row-major cell states.
    #[inline]
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    /// Count live and dead cells.
    pub fn census(&self) -> CellCensus {
        let alive = self.cells.iter().filter(|&&alive| alive).count();
        let total = self.cells.len();
        CellCensus {
            total,
            alive,
            dead: total - alive,
        }
    }
}

/// Cell population snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellCensus {
    /// Total cell count (size squared).
    pub total: usize,
    /// Live cells.
    pub alive: usize,
    /// Dead cells.
    pub dead: usize,
}

/// Transition engine applying the Conway rule to bounded fields.
///
/// A live cell survives with 2 or 3 live neighbours; a dead cell becomes
/// alive with exactly 3. Neighbour counts are taken from the current
/// generation only, and off-grid positions contribute nothing.
///
/// The engine owns a scratch buffer so repeated stepping allocates nothing;
/// `step` writes the next generation into the scratch buffer and swaps it in,
/// replacing the field's value wholesale.
pub struct LifeEngine {
    size: usize,
    next: Vec<bool>,
}

impl LifeEngine {
    /// Create an engine for fields of the configured edge length.
    pub fn new(config: FieldConfig) -> Self {
        config.validate().expect("Invalid configuration");

        Self {
            size: config.size,
            next: vec![false; config.cell_count()],
        }
    }

    /// Advance the field one generation.
    pub fn step(&mut self, field: &mut Field) {
        assert_eq!(
            field.size, self.size,
            "field size must match engine size"
        );

        let size = self.size as isize;
        for row in 0..self.size {
            for col in 0..self.size {
                let mut neighbours = 0u8;
                for dr in -1isize..=1 {
                    for dc in -1isize..=1 {
                        if dr == 0 && dc == 0 {
                            continue;
                        }
                        let r = row as isize + dr;
                        let c = col as isize + dc;
                        if r < 0 || r >= size || c < 0 || c >= size {
                            continue;
                        }
                        if field.cells[(r * size + c) as usize] {
                            neighbours += 1;
                        }
                    }
                }

                let idx = row * self.size + col;
                self.next[idx] = if field.cells[idx] {
                    matches!(neighbours, 2 | 3)
                } else {
                    neighbours == 3
                };
            }
        }

        std::mem::swap(&mut field.cells, &mut self.next);
    }

    /// Run for the specified number of steps.
    pub fn run(&mut self, field: &mut Field, steps: u64) {
        for _ in 0..steps {
            self.step(field);
        }
    }
}
