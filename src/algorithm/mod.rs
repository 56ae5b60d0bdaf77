/// Fixed-size bitset holding a cell's candidate values
pub mod bitset;
/// Solver state machine, weighted collapse and seeded randomness
pub mod executor;
/// Neighbor filtering after a cell resolves
pub mod propagation;
/// Lowest-entropy cell selection
pub mod selection;
