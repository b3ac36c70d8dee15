//! Grid-based wave function collapse over edge-matching tiles
//!
//! Tiles cut from a source image are related by comparing their facing edges.
//! A solver then commits cells one tick at a time, always picking among the
//! cells with the fewest remaining options, propagates the consequences to
//! neighbours, and rolls back through full-grid snapshots on contradiction.

#![forbid(unsafe_code)]

/// Solver core: option bitsets, propagation, selection, history and the tick loop
pub mod algorithm;
/// Input/output operations and error handling
pub mod io;
/// Tiles, adjacency rules and the cell grid
pub mod spatial;

pub use algorithm::executor::{Solver, SolverState, TickOutcome};
pub use io::error::{AlgorithmError, Result};
