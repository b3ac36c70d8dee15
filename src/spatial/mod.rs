//! Spatial data structures for the collapse grid
//!
//! This module contains spatial-related functionality including:
//! - Tile bitmaps and extraction from source images
//! - Directional compatibility rules between tiles
//! - The cell grid and its snapshots

/// Edge directions and the tile compatibility model
pub mod adjacency;
/// Cell grid state and snapshots
pub mod grid;
/// Tile bitmaps and extraction utilities
pub mod tiles;

pub use adjacency::{AdjacencyModel, Direction};
pub use grid::{Cell, Grid, GridSnapshot};
