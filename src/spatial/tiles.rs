//! Tile extraction and edge matching utilities
//!
//! Cuts a source image into square, non-overlapping tiles in row-major order.
//! Tiles that overhang the right or bottom border of the source are padded
//! with transparent pixels so every tile has the same size.

use crate::io::error::{AlgorithmError, Result};
use crate::spatial::adjacency::{Direction, TileEdges};
use image::RgbaImage;
use ndarray::{Array2, ArrayView1};
use std::collections::HashSet;

/// RGBA pixel value
pub type Pixel = [u8; 4];

/// Pixel used for the parts of a tile lying outside the source image
pub const TRANSPARENT: Pixel = [0, 0, 0, 0];

/// Square bitmap of one tile, indexed `[row, col]`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TileBitmap {
    pixels: Array2<Pixel>,
}

impl TileBitmap {
    /// Wrap a pixel array as a tile
    ///
    /// # Errors
    ///
    /// Returns an error if the array is empty or not square
    pub fn new(pixels: Array2<Pixel>) -> Result<Self> {
        let (rows, cols) = pixels.dim();
        if rows == 0 || rows != cols {
            return Err(AlgorithmError::InvalidSourceData {
                reason: format!("Tile bitmap must be square and non-empty, got {rows}x{cols}"),
            });
        }
        Ok(Self { pixels })
    }

    /// A tile filled with a single color
    pub fn filled(size: usize, pixel: Pixel) -> Self {
        Self {
            pixels: Array2::from_elem((size, size), pixel),
        }
    }

    /// Side length in pixels
    pub fn size(&self) -> usize {
        self.pixels.nrows()
    }

    /// Pixel at `(row, col)`, if inside the tile
    pub fn pixel(&self, row: usize, col: usize) -> Option<Pixel> {
        self.pixels.get([row, col]).copied()
    }

    /// The pixel strip along one edge
    ///
    /// Horizontal edges run left to right and vertical edges top to bottom,
    /// so opposite edges of neighbouring tiles line up index by index.
    pub fn edge(&self, direction: Direction) -> ArrayView1<'_, Pixel> {
        let last = self.size().saturating_sub(1);
        match direction {
            Direction::Up => self.pixels.row(0),
            Direction::Down => self.pixels.row(last),
            Direction::Left => self.pixels.column(0),
            Direction::Right => self.pixels.column(last),
        }
    }
}

impl TileEdges for TileBitmap {
    fn edge_matches(&self, other: &Self, direction: Direction) -> bool {
        self.edge(direction) == other.edge(direction.opposite())
    }
}

/// Tile set cut from a source image
pub struct TileExtractor {
    tiles: Vec<TileBitmap>,
    tile_size: usize,
}

impl TileExtractor {
    /// Cut `image` into `tile_size` squares, scanning rows top to bottom
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `tile_size` is zero
    /// - The image has no pixels
    pub fn extract_tiles(image: &RgbaImage, tile_size: usize, deduplicate: bool) -> Result<Self> {
        if tile_size == 0 {
            return Err(crate::io::error::invalid_parameter(
                "tile_size",
                &tile_size,
                &"must be at least 1",
            ));
        }

        let (width, height) = (image.width() as usize, image.height() as usize);
        if width == 0 || height == 0 {
            return Err(AlgorithmError::InvalidSourceData {
                reason: "Source image has no pixels".to_string(),
            });
        }

        let mut tiles = Vec::new();
        for y in (0..height).step_by(tile_size) {
            for x in (0..width).step_by(tile_size) {
                let pixels = Array2::from_shape_fn((tile_size, tile_size), |(row, col)| {
                    image
                        .get_pixel_checked((x + col) as u32, (y + row) as u32)
                        .map_or(TRANSPARENT, |pixel| pixel.0)
                });
                tiles.push(TileBitmap { pixels });
            }
        }

        if deduplicate {
            tiles = Self::deduplicate_tiles(tiles);
        }

        Ok(Self { tiles, tile_size })
    }

    /// Use an already prepared tile set
    ///
    /// # Errors
    ///
    /// Returns an error if the set is empty or tiles differ in size
    pub fn from_tiles(tiles: Vec<TileBitmap>) -> Result<Self> {
        let tile_size = tiles
            .first()
            .map(TileBitmap::size)
            .ok_or_else(|| AlgorithmError::InvalidSourceData {
                reason: "Tile set must contain at least one tile".to_string(),
            })?;
        if let Some(odd) = tiles.iter().find(|tile| tile.size() != tile_size) {
            return Err(AlgorithmError::InvalidSourceData {
                reason: format!(
                    "Tiles must share one size: expected {tile_size}, found {}",
                    odd.size()
                ),
            });
        }
        Ok(Self { tiles, tile_size })
    }

    fn deduplicate_tiles(tiles: Vec<TileBitmap>) -> Vec<TileBitmap> {
        let mut seen = HashSet::new();
        let mut unique_tiles = Vec::new();

        for tile in tiles {
            if seen.insert(tile.clone()) {
                unique_tiles.push(tile);
            }
        }

        unique_tiles
    }

    /// All extracted tiles, indexed by tile id
    pub fn tiles(&self) -> &[TileBitmap] {
        &self.tiles
    }

    /// Side length shared by every tile
    pub const fn tile_size(&self) -> usize {
        self.tile_size
    }

    /// Take ownership of the tile set
    pub fn into_tiles(self) -> Vec<TileBitmap> {
        self.tiles
    }
}
