//! Fixed-size grid of cells holding the mutable solver state
//!
//! Cells are stored in an `ndarray` array indexed `[j, i]` (row, column), so
//! the standard memory order matches the linear cell index `i + j * D`.

use crate::algorithm::bitset::TileBitset;
use crate::spatial::adjacency::Direction;
use ndarray::Array2;

/// Solver state of a single grid position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    /// Tiles that may still be placed here
    pub options: TileBitset,
    /// Whether the solver has committed this cell to one tile
    pub collapsed: bool,
}

impl Cell {
    /// A fresh cell allowing every tile
    pub fn new(tile_count: usize) -> Self {
        Self {
            options: TileBitset::all(tile_count),
            collapsed: false,
        }
    }

    /// Number of remaining options
    pub fn entropy(&self) -> usize {
        self.options.count()
    }

    /// Commit to `tile`, discarding every other option
    pub fn collapse_to(&mut self, tile: usize) {
        self.options = TileBitset::single(tile, self.options.capacity());
        self.collapsed = true;
    }

    /// The committed tile, `None` while uncollapsed
    pub fn chosen_tile(&self) -> Option<usize> {
        if self.collapsed {
            self.options.only()
        } else {
            None
        }
    }
}

/// Full copy of every cell's `(options, collapsed)` in row-major order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridSnapshot {
    dimension: usize,
    cells: Vec<Cell>,
}

impl GridSnapshot {
    /// Assemble a snapshot from row-major cells
    ///
    /// Returns `None` unless exactly `dimension²` cells are given.
    pub fn from_cells(dimension: usize, cells: Vec<Cell>) -> Option<Self> {
        (cells.len() == dimension * dimension).then_some(Self { dimension, cells })
    }

    /// Side length of the captured grid
    pub const fn dimension(&self) -> usize {
        self.dimension
    }

    /// Captured cells in row-major order
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}

/// `D × D` arrangement of cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Array2<Cell>,
    dimension: usize,
    tile_count: usize,
}

impl Grid {
    /// Create a grid where every cell allows every tile and none is collapsed
    pub fn new(dimension: usize, tile_count: usize) -> Self {
        Self {
            cells: Array2::from_elem((dimension, dimension), Cell::new(tile_count)),
            dimension,
            tile_count,
        }
    }

    /// Side length `D`
    pub const fn dimension(&self) -> usize {
        self.dimension
    }

    /// Number of tiles each cell chooses among
    pub const fn tile_count(&self) -> usize {
        self.tile_count
    }

    /// Total number of cells, `D²`
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the grid holds no cells
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Linear index of column `i`, row `j`
    pub const fn index_of(&self, i: usize, j: usize) -> usize {
        i + j * self.dimension
    }

    /// Column and row of a linear index
    pub const fn position_of(&self, index: usize) -> (usize, usize) {
        match (index.checked_rem(self.dimension), index.checked_div(self.dimension)) {
            (Some(i), Some(j)) => (i, j),
            _ => (index, 0),
        }
    }

    /// Cell at a linear index
    pub fn cell(&self, index: usize) -> Option<&Cell> {
        if index >= self.len() {
            return None;
        }
        let (i, j) = self.position_of(index);
        self.cells.get([j, i])
    }

    /// Mutable cell at a linear index
    pub fn cell_mut(&mut self, index: usize) -> Option<&mut Cell> {
        if index >= self.len() {
            return None;
        }
        let (i, j) = self.position_of(index);
        self.cells.get_mut([j, i])
    }

    /// Cell at column `i`, row `j`
    pub fn cell_at(&self, i: usize, j: usize) -> Option<&Cell> {
        self.cells.get([j, i])
    }

    /// Cells in linear index order
    pub fn cells(&self) -> impl Iterator<Item = &Cell> + '_ {
        self.cells.iter()
    }

    /// In-bounds neighbour of `index` in `direction`; edges do not wrap
    pub fn neighbor(&self, index: usize, direction: Direction) -> Option<usize> {
        if index >= self.len() {
            return None;
        }
        let (i, j) = self.position_of(index);
        let (di, dj) = direction.offset();
        let ni = i.checked_add_signed(di)?;
        let nj = j.checked_add_signed(dj)?;
        (ni < self.dimension && nj < self.dimension).then(|| self.index_of(ni, nj))
    }

    /// Indices of all cells not yet collapsed
    pub fn uncollapsed(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| !cell.collapsed)
            .map(|(index, _)| index)
            .collect()
    }

    /// Whether every cell is collapsed
    pub fn is_fully_collapsed(&self) -> bool {
        self.cells.iter().all(|cell| cell.collapsed)
    }

    /// Whether any cell still has more than one option
    pub fn has_open_cell(&self) -> bool {
        self.cells.iter().any(|cell| cell.entropy() > 1)
    }

    /// Chosen tile per cell in linear index order
    pub fn chosen_tiles(&self) -> Vec<Option<usize>> {
        self.cells.iter().map(Cell::chosen_tile).collect()
    }

    /// Copy the whole grid state
    pub fn snapshot(&self) -> GridSnapshot {
        GridSnapshot {
            dimension: self.dimension,
            cells: self.cells.iter().cloned().collect(),
        }
    }

    /// Overwrite every cell with the captured state
    ///
    /// A snapshot of a different dimension leaves the grid untouched and
    /// returns `false`.
    pub fn restore(&mut self, snapshot: &GridSnapshot) -> bool {
        if snapshot.dimension != self.dimension {
            return false;
        }
        for (cell, saved) in self.cells.iter_mut().zip(&snapshot.cells) {
            cell.clone_from(saved);
        }
        true
    }
}
