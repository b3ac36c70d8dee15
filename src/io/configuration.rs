//! Solver constants and runtime configuration defaults

/// Default side length of the generated grid, in cells
pub const DEFAULT_DIMENSION: usize = 20;

/// Side length of tiles cut from the source image, in pixels
pub const TILE_SIZE: usize = 3;

/// Rendered size of one cell (a 600 px canvas split into 20 cells)
pub const DEFAULT_CELL_SIZE: usize = 30;

/// Outline width used to draw uncollapsed cells, in pixels
pub const UNCOLLAPSED_BORDER: usize = 2;

/// Outline color used to draw uncollapsed cells
pub const UNCOLLAPSED_COLOR: [u8; 4] = [0, 0, 0, 255];

// Snapshots copy the whole grid every tick, so keep grids modest
/// Maximum allowed grid dimension
pub const MAX_GRID_DIMENSION: usize = 200;

/// Maximum rendered size of one cell, in pixels
pub const MAX_CELL_SIZE: usize = 256;

/// Maximum side of a painted canvas, in pixels
pub const MAX_CANVAS_SIDE: usize = 16_384;

/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 42;

/// Default tick budget before giving up on a file
pub const DEFAULT_MAX_TICKS: usize = 100_000;

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 30;

// Output settings
/// Suffix added to output filenames
pub const OUTPUT_SUFFIX: &str = "_result";
/// Delay between GIF animation frames
pub const GIF_FRAME_DELAY_MS: u32 = 5;
/// Minimum frame delay that viewers reliably support (in milliseconds)
pub const VIEWER_MIN_FRAME_DELAY_MS: u32 = 50;
