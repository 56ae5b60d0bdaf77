//! Tile frequency weights learned from the sample

use crate::algorithm::bitset::Superposition;
use crate::spatial::tiles::Tile;
use ndarray::Array2;
use std::fmt;

/// Occurrence count of every tile value in the sample
///
/// Used as the selection weight during collapse and as the mass in entropy.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TileWeights {
    counts: [u64; Tile::COUNT],
}

impl TileWeights {
    /// Create a table from explicit counts in ordinal order
    pub const fn from_counts(counts: [u64; Tile::COUNT]) -> Self {
        Self { counts }
    }

    /// Count every cell of `sample`
    pub fn from_grid(sample: &Array2<Tile>) -> Self {
        let mut weights = Self::default();
        for &tile in sample {
            weights.increment(tile);
        }
        weights
    }

    /// Add one occurrence of `tile`
    pub fn increment(&mut self, tile: Tile) {
        if let Some(count) = self.counts.get_mut(tile.index()) {
            *count += 1;
        }
    }

    /// Weight of a single tile
    pub fn weight(&self, tile: Tile) -> u64 {
        self.counts.get(tile.index()).copied().unwrap_or(0)
    }

    /// Sum of all weights, equal to the sample's cell count
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Sum of the weights of the candidates in `superposition`
    pub fn sum(&self, superposition: &Superposition) -> u64 {
        superposition.iter().map(|tile| self.weight(tile)).sum()
    }

    /// Tiles that occur at least once
    ///
    /// This is the starting superposition of every cell: a value that never
    /// occurs has no weight and cannot be collapsed into.
    pub fn observed(&self) -> Superposition {
        Tile::ALL
            .into_iter()
            .filter(|&tile| self.weight(tile) > 0)
            .collect()
    }
}

impl fmt::Display for TileWeights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries: Vec<String> = Tile::ALL
            .iter()
            .map(|&tile| format!("{tile}: {}", self.weight(tile)))
            .collect();
        write!(f, "{{{}}}", entries.join(", "))
    }
}
