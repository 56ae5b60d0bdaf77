use crate::algorithm::bitset::Superposition;
use crate::analysis::weights::TileWeights;
use crate::io::error::{AlgorithmError, Result};
use crate::spatial::tiles::Tile;

/// Frequency-weighted uncertainty of a superposition
///
/// Resolved cells score exactly 0. Otherwise the score is the logarithm of the
/// candidates' total weight in base [`Tile::COUNT`]; only the ordering it
/// induces matters to selection.
///
/// # Errors
///
/// Returns [`AlgorithmError::EmptySuperposition`] when there are no candidates
pub fn entropy(weights: &TileWeights, superposition: &Superposition) -> Result<f64> {
    match superposition.count() {
        0 => Err(AlgorithmError::EmptySuperposition {
            operation: "entropy",
        }),
        1 => Ok(0.0),
        _ => {
            let mass = weights.sum(superposition) as f64;
            Ok(mass.ln() / (Tile::COUNT as f64).ln())
        }
    }
}

/// Walk `candidates` subtracting each weight from `draw`
///
/// Returns the first candidate at which the remainder drops to zero or below.
/// Zero-weight candidates are never selected.
pub fn weighted_walk<T: Copy>(
    candidates: impl IntoIterator<Item = (T, u64)>,
    draw: u64,
) -> Option<T> {
    let mut remainder = i128::from(draw);
    for (candidate, weight) in candidates {
        if weight == 0 {
            continue;
        }
        remainder -= i128::from(weight);
        if remainder <= 0 {
            return Some(candidate);
        }
    }
    None
}
