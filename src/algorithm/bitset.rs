use crate::spatial::tiles::Tile;
use bitvec::prelude::*;
use std::fmt;

/// Set of tile values still possible for one cell
///
/// Backed by a fixed-size bitset over the alphabet. Iteration always follows
/// ordinal order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Superposition {
    bits: BitVec,
}

impl Default for Superposition {
    fn default() -> Self {
        Self::empty()
    }
}

impl Superposition {
    /// Create a superposition with no candidates (a contradiction)
    pub fn empty() -> Self {
        Self {
            bits: bitvec![0; Tile::COUNT],
        }
    }

    /// Create a superposition holding the whole alphabet
    pub fn full() -> Self {
        Self {
            bits: bitvec![1; Tile::COUNT],
        }
    }

    /// Create a resolved superposition holding one tile
    pub fn single(tile: Tile) -> Self {
        let mut superposition = Self::empty();
        superposition.insert(tile);
        superposition
    }

    /// Add a candidate
    pub fn insert(&mut self, tile: Tile) {
        self.bits.set(tile.index(), true);
    }

    /// Remove a candidate
    pub fn remove(&mut self, tile: Tile) {
        self.bits.set(tile.index(), false);
    }

    /// Test candidate membership
    pub fn contains(&self, tile: Tile) -> bool {
        self.bits.get(tile.index()).as_deref() == Some(&true)
    }

    /// Keep only candidates also present in `other`
    pub fn intersect_with(&mut self, other: &Self) {
        self.bits &= &other.bits;
    }

    /// Create a new superposition containing the intersection
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        let mut result = self.clone();
        result.intersect_with(other);
        result
    }

    /// Test if no candidates remain
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Number of remaining candidates
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Exactly one candidate remains
    pub fn is_resolved(&self) -> bool {
        self.count() == 1
    }

    /// The remaining tile, when resolved
    pub fn resolved_tile(&self) -> Option<Tile> {
        if self.is_resolved() {
            self.iter().next()
        } else {
            None
        }
    }

    /// Candidates in ordinal order
    pub fn iter(&self) -> impl Iterator<Item = Tile> + '_ {
        self.bits.iter_ones().filter_map(Tile::from_index)
    }

    /// Candidates as a vector in ordinal order
    pub fn to_vec(&self) -> Vec<Tile> {
        self.iter().collect()
    }
}

impl FromIterator<Tile> for Superposition {
    fn from_iter<I: IntoIterator<Item = Tile>>(iter: I) -> Self {
        let mut superposition = Self::empty();
        for tile in iter {
            superposition.insert(tile);
        }
        superposition
    }
}

impl fmt::Display for Superposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbols: String = self.iter().map(Tile::symbol).collect();
        write!(f, "{{{symbols}}}")
    }
}
