//! Empirical adjacency rules and their lookup index

use crate::algorithm::bitset::Superposition;
use crate::spatial::tiles::{Direction, Tile};
use ndarray::Array2;
use std::collections::BTreeSet;
use std::fmt;

/// A cell of value `tile` was observed with `neighbor` immediately in `direction`
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AdjacencyRule {
    /// Value of the observing cell
    pub tile: Tile,
    /// Value of the adjacent cell
    pub neighbor: Tile,
    /// Where the neighbor sits relative to the observing cell
    pub direction: Direction,
}

impl AdjacencyRule {
    /// Create a rule
    pub const fn new(tile: Tile, neighbor: Tile, direction: Direction) -> Self {
        Self {
            tile,
            neighbor,
            direction,
        }
    }
}

impl fmt::Display for AdjacencyRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.tile, self.neighbor, self.direction)
    }
}

/// Derive every adjacency observed in `sample`
///
/// Each cell emits one rule per in-bounds neighbor, with no wraparound and no
/// inverse inference. The result is deduplicated and sorted by
/// (tile, neighbor, direction).
pub fn infer_rules(sample: &Array2<Tile>) -> Vec<AdjacencyRule> {
    let dimensions = sample.dim();
    let mut rules = BTreeSet::new();

    for ((row, col), &tile) in sample.indexed_iter() {
        for direction in Direction::ALL {
            let neighbor = direction
                .step(row, col, dimensions)
                .and_then(|position| sample.get(position));
            if let Some(&neighbor) = neighbor {
                rules.insert(AdjacencyRule::new(tile, neighbor, direction));
            }
        }
    }

    rules.into_iter().collect()
}

/// Lookup from (direction, value) to the set of permitted neighbor values
///
/// Fixed-size table indexed by ordinals. Entries no rule mentions hold the
/// empty set, which forbids every neighbor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuleIndex {
    permitted: Vec<Superposition>,
}

impl Default for RuleIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleIndex {
    /// Create an index with nothing permitted anywhere
    pub fn new() -> Self {
        Self {
            permitted: vec![Superposition::empty(); Direction::COUNT * Tile::COUNT],
        }
    }

    /// Group rules by (direction, tile)
    pub fn from_rules(rules: &[AdjacencyRule]) -> Self {
        let mut index = Self::new();
        for rule in rules {
            index.insert(*rule);
        }
        index
    }

    /// Permit `rule.neighbor` next to `rule.tile` in `rule.direction`
    pub fn insert(&mut self, rule: AdjacencyRule) {
        if let Some(set) = self
            .permitted
            .get_mut(Self::slot(rule.direction, rule.tile))
        {
            set.insert(rule.neighbor);
        }
    }

    /// Values allowed in `direction` of a cell holding `tile`
    ///
    /// Absent entries yield the empty set, never an unconstrained one.
    pub fn permitted(&self, direction: Direction, tile: Tile) -> Superposition {
        self.permitted
            .get(Self::slot(direction, tile))
            .cloned()
            .unwrap_or_else(Superposition::empty)
    }

    /// Whether `neighbor` may sit in `direction` of `tile`
    pub fn allows(&self, tile: Tile, neighbor: Tile, direction: Direction) -> bool {
        self.permitted
            .get(Self::slot(direction, tile))
            .is_some_and(|set| set.contains(neighbor))
    }

    /// Number of (tile, neighbor, direction) facts stored
    pub fn len(&self) -> usize {
        self.permitted.iter().map(Superposition::count).sum()
    }

    /// Whether no fact is stored
    pub fn is_empty(&self) -> bool {
        self.permitted.iter().all(Superposition::is_empty)
    }

    const fn slot(direction: Direction, tile: Tile) -> usize {
        direction.index() * Tile::COUNT + tile.index()
    }
}
