/// Bitset of tile indices used for cell options and compatibility lists
pub mod bitset;
/// Solver loop orchestrating collapse, propagation and rollback
pub mod executor;
/// Snapshot stack used for rollback
pub mod history;
/// Constraint propagation from a collapsed cell
pub mod propagation;
/// Minimum-entropy cell selection and injectable random choice
pub mod selection;
