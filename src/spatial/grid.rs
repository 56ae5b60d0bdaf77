//! Superposition grid with its entropy cache
//!
//! Keeps one superposition and one entropy score per cell. The entropy array is
//! never independent state: every write to a superposition goes through
//! [`GridState::set_superposition`], which recomputes the cell's score.

use ndarray::Array2;

use crate::algorithm::bitset::Superposition;
use crate::analysis::weights::TileWeights;
use crate::io::error::{AlgorithmError, Result};
use crate::math::probability::entropy;
use crate::spatial::tiles::{Direction, Tile};

/// Working state of one solve
#[derive(Debug, Clone)]
pub struct GridState {
    /// Candidate values per cell (indexed by `row`, `col`)
    pub superpositions: Array2<Superposition>,

    /// Uncertainty score per cell, 0 meaning no further work
    pub entropy: Array2<f64>,

    /// Current grid dimensions (rows, cols)
    pub dimensions: (usize, usize),
}

impl GridState {
    /// Create a grid where every cell holds `initial`
    ///
    /// # Errors
    ///
    /// Returns [`AlgorithmError::EmptySuperposition`] if `initial` is empty
    pub fn new(
        rows: usize,
        cols: usize,
        initial: &Superposition,
        weights: &TileWeights,
    ) -> Result<Self> {
        let dimensions = (rows, cols);
        let score = entropy(weights, initial)?;

        Ok(Self {
            superpositions: Array2::from_elem(dimensions, initial.clone()),
            entropy: Array2::from_elem(dimensions, score),
            dimensions,
        })
    }

    /// Create a grid from explicit superpositions, computing every score
    ///
    /// # Errors
    ///
    /// Returns [`AlgorithmError::EmptySuperposition`] if any cell is empty
    pub fn from_superpositions(
        superpositions: Array2<Superposition>,
        weights: &TileWeights,
    ) -> Result<Self> {
        let dimensions = superpositions.dim();
        let mut scores = Array2::zeros(dimensions);
        for (position, superposition) in superpositions.indexed_iter() {
            if let Some(score) = scores.get_mut(position) {
                *score = entropy(weights, superposition)?;
            }
        }

        Ok(Self {
            superpositions,
            entropy: scores,
            dimensions,
        })
    }

    /// Get the number of rows in the grid
    pub const fn rows(&self) -> usize {
        self.dimensions.0
    }

    /// Get the number of columns in the grid
    pub const fn cols(&self) -> usize {
        self.dimensions.1
    }

    /// Number of cells
    pub const fn cell_count(&self) -> usize {
        self.dimensions.0 * self.dimensions.1
    }

    /// Superposition of a cell, if in bounds
    pub fn superposition(&self, row: usize, col: usize) -> Option<&Superposition> {
        self.superpositions.get((row, col))
    }

    /// Entropy of a cell, if in bounds
    pub fn entropy_at(&self, row: usize, col: usize) -> Option<f64> {
        self.entropy.get((row, col)).copied()
    }

    /// Replace a cell's superposition and refresh its entropy
    ///
    /// The superposition is stored even when empty so snapshots show the
    /// contradiction; the entropy is left untouched in that case.
    ///
    /// # Errors
    ///
    /// Returns [`AlgorithmError::EmptySuperposition`] if `superposition` is empty
    pub fn set_superposition(
        &mut self,
        row: usize,
        col: usize,
        superposition: Superposition,
        weights: &TileWeights,
    ) -> Result<()> {
        let score = entropy(weights, &superposition);
        if let Some(cell) = self.superpositions.get_mut((row, col)) {
            *cell = superposition;
        }
        let score = score?;
        if let Some(cell) = self.entropy.get_mut((row, col)) {
            *cell = score;
        }
        Ok(())
    }

    /// In-bounds 4-neighbors of a cell with the direction leading to each
    ///
    /// Listed in [`Direction::PROPAGATION_ORDER`].
    pub fn neighbors(&self, row: usize, col: usize) -> Vec<(Direction, usize, usize)> {
        Direction::PROPAGATION_ORDER
            .iter()
            .filter_map(|&direction| {
                direction
                    .step(row, col, self.dimensions)
                    .map(|(next_row, next_col)| (direction, next_row, next_col))
            })
            .collect()
    }

    /// Number of cells holding exactly one candidate
    pub fn resolved_count(&self) -> usize {
        self.superpositions
            .iter()
            .filter(|superposition| superposition.is_resolved())
            .count()
    }

    /// Copy of the current superpositions for rendering or reporting
    pub fn snapshot(&self) -> Array2<Superposition> {
        self.superpositions.clone()
    }

    /// Reduce every cell to its single remaining tile
    ///
    /// # Errors
    ///
    /// Returns [`AlgorithmError::InvalidParameter`] naming the first cell that is
    /// not resolved
    pub fn resolved_tiles(&self) -> Result<Array2<Tile>> {
        let mut tiles = Vec::with_capacity(self.cell_count());
        for ((row, col), superposition) in self.superpositions.indexed_iter() {
            let tile = superposition
                .resolved_tile()
                .ok_or_else(|| AlgorithmError::InvalidParameter {
                    parameter: "grid",
                    value: format!("({row}, {col}) = {superposition}"),
                    reason: "cell is not resolved".to_string(),
                })?;
            tiles.push(tile);
        }
        Array2::from_shape_vec(self.dimensions, tiles).map_err(|e| {
            AlgorithmError::InvalidParameter {
                parameter: "grid",
                value: format!("{:?}", self.dimensions),
                reason: e.to_string(),
            }
        })
    }
}
