//! Simple tiled model: wave function collapse driven by rules learned from a sample
//!
//! A small sample map is scanned for every (value, neighbor, direction)
//! adjacency and every value's frequency. A blank grid is then filled by
//! repeatedly collapsing the least uncertain cell to a frequency-weighted random
//! value and narrowing its neighbors to the values the sample allows next to it.

#![forbid(unsafe_code)]

/// Superposition sets, cell selection, propagation and the solver loop
pub mod algorithm;
/// Sample parsing, rule learning and weight tables
pub mod analysis;
/// Command-line interface, errors, rendering and export
pub mod io;
/// Entropy and weighted-choice arithmetic
pub mod math;
/// Tile alphabet, directions and the superposition grid
pub mod spatial;

pub use algorithm::executor::{Solver, SolverConfig, solve};
pub use io::error::{AlgorithmError, Result};
