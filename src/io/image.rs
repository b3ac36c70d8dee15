//! PNG tile loading and final grid export

use crate::io::error::{AlgorithmError, Result};
use crate::io::visualization::paint_grid;
use crate::spatial::grid::Grid;
use crate::spatial::tiles::{TileBitmap, TileExtractor};
use std::path::Path;

/// Load a PNG and cut it into `tile_size` tiles
///
/// # Errors
///
/// Returns an error if:
/// - The file at the given path cannot be opened or decoded
/// - The image is empty or `tile_size` is zero
pub fn load_tiles<P: AsRef<Path>>(
    path: P,
    tile_size: usize,
    deduplicate: bool,
) -> Result<TileExtractor> {
    let path_buf = path.as_ref().to_path_buf();
    let img = image::open(&path_buf).map_err(|e| AlgorithmError::ImageLoad {
        path: path_buf,
        source: e,
    })?;
    TileExtractor::extract_tiles(&img.to_rgba8(), tile_size, deduplicate)
}

/// Export the grid as a PNG, each cell drawn `cell_size` pixels wide
///
/// Uncollapsed cells are left transparent with an outline, so a partially
/// solved grid still exports.
///
/// # Errors
///
/// Returns an error if:
/// - A collapsed cell names a tile outside `tiles`
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_grid_as_png(
    grid: &Grid,
    tiles: &[TileBitmap],
    cell_size: usize,
    output_path: &str,
) -> Result<()> {
    if cell_size == 0 {
        return Err(crate::io::error::invalid_parameter(
            "cell_size",
            &cell_size,
            &"must be at least 1",
        ));
    }

    let img = paint_grid(grid, tiles, cell_size)?;

    if let Some(parent) = Path::new(output_path).parent() {
        std::fs::create_dir_all(parent).map_err(|e| AlgorithmError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    img.save(output_path)
        .map_err(|e| AlgorithmError::ImageExport {
            path: output_path.into(),
            source: e,
        })?;

    Ok(())
}
