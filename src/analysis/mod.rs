//! Learning from the sample map

/// Sample grid parsing and validation
pub mod patterns;
/// Adjacency rule inference and the rule index
pub mod rules;
/// Tile frequency weights
pub mod weights;
