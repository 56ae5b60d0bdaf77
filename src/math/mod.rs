//! Mathematical utilities for the algorithm

/// Entropy scoring and weighted selection
pub mod probability;
