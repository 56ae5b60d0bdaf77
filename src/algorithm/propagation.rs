use crate::{
    algorithm::bitset::Superposition,
    analysis::rules::RuleIndex,
    analysis::weights::TileWeights,
    io::error::{AlgorithmError, ContradictionReport, Result},
    spatial::GridState,
};
use std::collections::VecDeque;

/// How far the effect of a resolved cell travels
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PropagationMode {
    /// Filter only the four neighbors of each explicitly collapsed cell
    ///
    /// Neighbors narrowed to a single value this way score entropy 0, are never
    /// selected, and therefore never constrain their own neighbors.
    #[default]
    SingleHop,
    /// Every cell that becomes resolved, however it got there, filters its
    /// neighbors in turn; resolved neighbors are checked but never re-opened
    Cascade,
}

/// Filter the 4-neighbors of a resolved cell by the rules for its value
///
/// Neighbors with more than one candidate are intersected with the permitted
/// set for (direction, value) and get their entropy recomputed. Resolved
/// neighbors are left untouched unless `check_resolved` is set, in which case
/// they are only checked against the rules. Does nothing if the cell at
/// `(row, col)` is not resolved.
///
/// Returns the neighbors that this call narrowed to a single candidate.
///
/// # Errors
///
/// Returns [`AlgorithmError::Contradiction`] if a neighbor is left without
/// candidates; the grid keeps the empty superposition for inspection.
pub fn propagate_from(
    grid_state: &mut GridState,
    rules: &RuleIndex,
    weights: &TileWeights,
    (row, col): (usize, usize),
    check_resolved: bool,
) -> Result<Vec<(usize, usize)>> {
    let Some(tile) = grid_state
        .superposition(row, col)
        .and_then(Superposition::resolved_tile)
    else {
        return Ok(Vec::new());
    };

    let mut newly_resolved = Vec::new();

    for (direction, next_row, next_col) in grid_state.neighbors(row, col) {
        let Some(current) = grid_state.superposition(next_row, next_col) else {
            continue;
        };
        let was_resolved = current.is_resolved();
        if was_resolved && !check_resolved {
            continue;
        }

        let filtered = current.intersection(&rules.permitted(direction, tile));

        if filtered.is_empty() {
            if let Some(cell) = grid_state.superpositions.get_mut((next_row, next_col)) {
                *cell = filtered;
            }
            return Err(AlgorithmError::Contradiction(Box::new(ContradictionReport {
                row: next_row,
                col: next_col,
                direction,
                tile,
                iteration: 0,
                snapshot: grid_state.snapshot(),
            })));
        }

        if was_resolved {
            continue;
        }

        let resolved_now = filtered.is_resolved();
        grid_state.set_superposition(next_row, next_col, filtered, weights)?;
        if resolved_now {
            newly_resolved.push((next_row, next_col));
        }
    }

    Ok(newly_resolved)
}

/// Queue of resolved cells whose constraints have not been applied yet
#[derive(Debug, Default)]
pub struct PropagationQueue {
    queue: VecDeque<(usize, usize)>,
}

impl PropagationQueue {
    /// Create an empty queue
    pub const fn new() -> Self {
        Self {
            queue: VecDeque::new(),
        }
    }

    /// Add cells to propagate from
    pub fn add_positions(&mut self, positions: impl IntoIterator<Item = (usize, usize)>) {
        self.queue.extend(positions);
    }

    /// Get the next cell in FIFO order
    pub fn take_next(&mut self) -> Option<(usize, usize)> {
        self.queue.pop_front()
    }

    /// Check if the queue is empty
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Number of cells waiting
    pub fn len(&self) -> usize {
        self.queue.len()
    }
}

/// Drain `queue`, propagating from each cell and queueing whatever resolves
///
/// # Errors
///
/// Returns [`AlgorithmError::Contradiction`] from the first failing propagation
pub fn cascade(
    grid_state: &mut GridState,
    rules: &RuleIndex,
    weights: &TileWeights,
    queue: &mut PropagationQueue,
) -> Result<()> {
    while let Some(position) = queue.take_next() {
        let newly_resolved = propagate_from(grid_state, rules, weights, position, true)?;
        queue.add_positions(newly_resolved);
    }
    Ok(())
}
