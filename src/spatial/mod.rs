//! Spatial data structures
//!
//! This module contains:
//! - The tile alphabet and compass directions
//! - The superposition grid and its entropy cache

/// Superposition grid state
pub mod grid;
/// Tile alphabet and directions
pub mod tiles;

pub use grid::GridState;
