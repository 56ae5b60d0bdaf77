use crate::spatial::GridState;
use ndarray::Array2;

/// Find the unresolved cell with the strictly smallest entropy
///
/// Cells scoring 0 (the resolved sentinel) are treated as finished and skipped. Ties go to the
/// first cell in row-major order. Returns `None` once no unresolved cell remains.
pub fn find_lowest_entropy(entropy: &Array2<f64>) -> Option<(usize, usize)> {
    let mut best: Option<((usize, usize), f64)> = None;

    for (position, &score) in entropy.indexed_iter() {
        if score <= 0.0 {
            continue;
        }
        if best.is_none_or(|(_, lowest)| score < lowest) {
            best = Some((position, score));
        }
    }

    best.map(|(position, _)| position)
}

/// [`find_lowest_entropy`] over a grid's entropy cache
pub fn select_position(grid_state: &GridState) -> Option<(usize, usize)> {
    find_lowest_entropy(&grid_state.entropy)
}
