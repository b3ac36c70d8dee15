//! Input/output surfaces around the solver

/// Command-line interface and batch file processing
pub mod cli;
/// Constants and default parameters
pub mod configuration;
/// Error types
pub mod error;
/// Tile loading and PNG export
pub mod image;
/// Terminal progress reporting
pub mod progress;
/// Text form of grid snapshots
pub mod snapshot;
/// Per-frame rendering and GIF capture
pub mod visualization;
