//! Per-frame rendering and GIF capture of the solving process

use crate::io::configuration::{
    MAX_CANVAS_SIDE, UNCOLLAPSED_BORDER, UNCOLLAPSED_COLOR, VIEWER_MIN_FRAME_DELAY_MS,
};
use crate::io::error::{AlgorithmError, Result, invalid_parameter};
use crate::spatial::grid::Grid;
use crate::spatial::tiles::{TRANSPARENT, TileBitmap};
use image::{Frame, Rgba, RgbaImage};

/// Host-side view of the grid, called once per frame between ticks
///
/// Implementations only read the grid.
pub trait Renderer {
    /// Draw the current grid state
    ///
    /// # Errors
    ///
    /// Returns an error if the renderer cannot draw the frame
    fn render(&mut self, grid: &Grid) -> Result<()>;
}

/// Paint the grid with each collapsed cell showing its tile bitmap
///
/// Tiles are scaled by nearest neighbour to `cell_size` pixels. Uncollapsed
/// cells are transparent with a dark outline.
///
/// # Errors
///
/// Returns an error if:
/// - A collapsed cell names a tile outside `tiles`
/// - The canvas side would exceed `MAX_CANVAS_SIDE` pixels
pub fn paint_grid(grid: &Grid, tiles: &[TileBitmap], cell_size: usize) -> Result<RgbaImage> {
    paint_cells(&grid.chosen_tiles(), grid.dimension(), tiles, cell_size)
}

/// Paint row-major chosen tiles of a `dimension` by `dimension` grid
fn paint_cells(
    chosen: &[Option<usize>],
    dimension: usize,
    tiles: &[TileBitmap],
    cell_size: usize,
) -> Result<RgbaImage> {
    let side = dimension
        .checked_mul(cell_size)
        .filter(|&pixels| pixels <= MAX_CANVAS_SIDE)
        .and_then(|pixels| u32::try_from(pixels).ok())
        .ok_or_else(|| {
            invalid_parameter(
                "cell_size",
                &cell_size,
                &format!("canvas of {dimension} cells must fit in {MAX_CANVAS_SIDE} pixels"),
            )
        })?;
    let mut img = RgbaImage::from_pixel(side, side, Rgba(TRANSPARENT));

    for (index, &choice) in chosen.iter().enumerate() {
        let origin = ((index % dimension) * cell_size, (index / dimension) * cell_size);
        match choice {
            Some(tile_index) => {
                let tile = tiles
                    .get(tile_index)
                    .ok_or(AlgorithmError::InvalidTileIndex {
                        index: tile_index,
                        max_tiles: tiles.len(),
                    })?;
                paint_tile(&mut img, tile, origin, cell_size);
            }
            None => paint_outline(&mut img, origin, cell_size),
        }
    }

    Ok(img)
}

fn paint_tile(img: &mut RgbaImage, tile: &TileBitmap, origin: (usize, usize), cell_size: usize) {
    let size = tile.size();
    for dy in 0..cell_size {
        for dx in 0..cell_size {
            let pixel = tile
                .pixel(dy * size / cell_size, dx * size / cell_size)
                .unwrap_or(TRANSPARENT);
            img.put_pixel((origin.0 + dx) as u32, (origin.1 + dy) as u32, Rgba(pixel));
        }
    }
}

fn paint_outline(img: &mut RgbaImage, origin: (usize, usize), cell_size: usize) {
    let border = UNCOLLAPSED_BORDER.min(cell_size);
    for dy in 0..cell_size {
        for dx in 0..cell_size {
            let on_edge = dx < border
                || dy < border
                || dx >= cell_size - border
                || dy >= cell_size - border;
            if on_edge {
                img.put_pixel(
                    (origin.0 + dx) as u32,
                    (origin.1 + dy) as u32,
                    Rgba(UNCOLLAPSED_COLOR),
                );
            }
        }
    }
}

/// A cell whose shown tile changed at a kept frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellChange {
    /// Linear cell index
    pub cell: usize,
    /// Tile now shown, `None` once the cell is open again
    pub tile: Option<usize>,
    /// Kept frame the change belongs to
    pub frame: usize,
}

/// Records cell changes between render calls for a later GIF
///
/// Only every `skip_factor`-th render becomes a frame, where the skip factor
/// keeps the requested delay at or above what viewers play back. Frames are
/// stored as the cells that changed since the previous kept frame and are
/// painted only at export.
pub struct FrameCapture {
    tiles: Vec<TileBitmap>,
    cell_size: usize,
    delay_ms: u32,
    skip_factor: usize,
    dimension: usize,
    renders: usize,
    kept_frames: usize,
    shown: Vec<Option<usize>>,
    latest: Vec<Option<usize>>,
    changes: Vec<CellChange>,
}

impl FrameCapture {
    /// Create a capture painting with the given tile set
    ///
    /// Delays below `VIEWER_MIN_FRAME_DELAY_MS` are raised to it, and
    /// renders are thinned so the animation keeps its apparent speed. For
    /// example, a 5ms delay against a 50ms viewer minimum keeps every 10th
    /// render.
    pub fn new(tiles: Vec<TileBitmap>, cell_size: usize, frame_delay_ms: u32) -> Self {
        let skip_factor = if frame_delay_ms < VIEWER_MIN_FRAME_DELAY_MS {
            VIEWER_MIN_FRAME_DELAY_MS.div_ceil(frame_delay_ms.max(1)) as usize
        } else {
            1
        };

        Self {
            tiles,
            cell_size,
            delay_ms: frame_delay_ms.max(VIEWER_MIN_FRAME_DELAY_MS),
            skip_factor,
            dimension: 0,
            renders: 0,
            kept_frames: 0,
            shown: Vec::new(),
            latest: Vec::new(),
            changes: Vec::new(),
        }
    }

    /// Renders seen between each kept frame
    pub const fn skip_factor(&self) -> usize {
        self.skip_factor
    }

    /// Number of render calls seen
    pub const fn render_count(&self) -> usize {
        self.renders
    }

    /// Number of frames the GIF will animate, before the closing hold
    pub fn frame_count(&self) -> usize {
        self.kept_frames + usize::from(self.latest != self.shown)
    }

    /// Recorded changes in frame order
    pub fn changes(&self) -> &[CellChange] {
        &self.changes
    }

    fn keep_latest(&mut self) {
        let frame = self.kept_frames;
        for (cell, (shown, &tile)) in self.shown.iter_mut().zip(&self.latest).enumerate() {
            if *shown != tile {
                *shown = tile;
                self.changes.push(CellChange { cell, tile, frame });
            }
        }
        self.kept_frames += 1;
    }

    fn paint(&self, chosen: &[Option<usize>], delay_ms: u32) -> Result<Frame> {
        let img = paint_cells(chosen, self.dimension, &self.tiles, self.cell_size)?;
        Ok(Frame::from_parts(
            img,
            0,
            0,
            image::Delay::from_numer_denom_ms(delay_ms, 1),
        ))
    }

    /// Export the captured frames as a GIF
    ///
    /// Frames are painted and encoded one at a time. The last render always
    /// closes the animation, even when it fell between kept frames.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Nothing was rendered
    /// - A frame cannot be painted
    /// - File system operations fail
    /// - GIF encoding fails
    pub fn export_gif(&self, output_path: &str) -> Result<()> {
        if self.renders == 0 {
            return Err(AlgorithmError::InvalidSourceData {
                reason: "No frames captured for visualization".to_string(),
            });
        }

        if let Some(parent) = std::path::Path::new(output_path).parent() {
            std::fs::create_dir_all(parent).map_err(|e| AlgorithmError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }

        let file = std::fs::File::create(output_path).map_err(|e| AlgorithmError::FileSystem {
            path: output_path.into(),
            operation: "create file",
            source: e,
        })?;

        let mut encoder = image::codecs::gif::GifEncoder::new(file);
        let mut encode = |frame: Frame| {
            encoder
                .encode_frame(frame)
                .map_err(|e| AlgorithmError::ImageExport {
                    path: output_path.into(),
                    source: e,
                })
        };

        let mut state = vec![None; self.shown.len()];
        let mut pending = self.changes.iter().peekable();
        for kept in 0..self.kept_frames {
            while let Some(change) = pending.next_if(|change| change.frame == kept) {
                if let Some(slot) = state.get_mut(change.cell) {
                    *slot = change.tile;
                }
            }
            encode(self.paint(&state, self.delay_ms)?)?;
        }

        if self.latest != self.shown {
            encode(self.paint(&self.latest, self.delay_ms)?)?;
        }

        // Final frame displays longer for better visibility
        encode(self.paint(&self.latest, self.delay_ms.saturating_mul(25))?)?;

        Ok(())
    }
}

impl Renderer for FrameCapture {
    fn render(&mut self, grid: &Grid) -> Result<()> {
        if self.renders == 0 {
            self.dimension = grid.dimension();
            self.shown = vec![None; grid.len()];
        } else if grid.dimension() != self.dimension {
            return Err(invalid_parameter(
                "dimension",
                &grid.dimension(),
                &format!("capture started with {} cells per side", self.dimension),
            ));
        }

        self.latest = grid.chosen_tiles();
        if self.renders % self.skip_factor == 0 {
            self.keep_latest();
        }
        self.renders += 1;
        Ok(())
    }
}
