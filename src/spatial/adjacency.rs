//! Directional compatibility rules derived from a tile set
//!
//! For every tile and every edge direction the model stores the set of tiles
//! allowed to sit on that side. Rules are derived by comparing facing edges,
//! which makes them symmetric by construction: if `B` may sit to the right of
//! `A`, then `A` may sit to the left of `B`.

use crate::algorithm::bitset::TileBitset;
use crate::io::error::{AlgorithmError, Result};
use strum::VariantArray;

/// One of the four edges of a square tile
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, VariantArray)]
pub enum Direction {
    /// Towards row `j - 1`
    Up,
    /// Towards column `i + 1`
    Right,
    /// Towards row `j + 1`
    Down,
    /// Towards column `i - 1`
    Left,
}

impl Direction {
    /// The facing direction on the neighbouring tile
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Right => Self::Left,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
        }
    }

    /// Step `(di, dj)` in grid coordinates, `i` being the column
    pub const fn offset(self) -> (isize, isize) {
        match self {
            Self::Up => (0, -1),
            Self::Right => (1, 0),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
        }
    }

    /// Stable slot of this direction in per-direction tables
    pub const fn index(self) -> usize {
        match self {
            Self::Up => 0,
            Self::Right => 1,
            Self::Down => 2,
            Self::Left => 3,
        }
    }
}

fn per_direction(mut build: impl FnMut(Direction) -> TileBitset) -> [TileBitset; 4] {
    [
        build(Direction::Up),
        build(Direction::Right),
        build(Direction::Down),
        build(Direction::Left),
    ]
}

/// Edge comparison supplied by whatever produced the tiles
pub trait TileEdges {
    /// Whether `other` may be placed on the `direction` side of `self`
    ///
    /// Implementations must compare the edge of `self` facing `direction`
    /// with the edge of `other` facing `direction.opposite()`.
    fn edge_matches(&self, other: &Self, direction: Direction) -> bool;
}

/// Per-tile, per-direction compatibility sets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjacencyModel {
    rules: Vec<[TileBitset; 4]>,
    tile_count: usize,
}

impl AdjacencyModel {
    /// Derive compatibility for every ordered tile pair, self-pairs included
    pub fn compute<T: TileEdges>(tiles: &[T]) -> Self {
        let tile_count = tiles.len();
        let rules = tiles
            .iter()
            .map(|tile| {
                per_direction(|direction| {
                    TileBitset::from_indices(
                        tiles
                            .iter()
                            .enumerate()
                            .filter(|(_, other)| tile.edge_matches(other, direction))
                            .map(|(index, _)| index),
                        tile_count,
                    )
                })
            })
            .collect();

        Self { rules, tile_count }
    }

    /// Build a model from explicit lists, ordered `[Up, Right, Down, Left]`
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The table is empty
    /// - A list names a tile index outside the table
    /// - The rules are not symmetric between opposite directions
    pub fn from_rules(rules: &[[Vec<usize>; 4]]) -> Result<Self> {
        let tile_count = rules.len();
        if tile_count == 0 {
            return Err(AlgorithmError::InvalidSourceData {
                reason: "Tile set must contain at least one tile".to_string(),
            });
        }

        let mut table = Vec::with_capacity(tile_count);
        for lists in rules {
            for &index in lists.iter().flatten() {
                if index >= tile_count {
                    return Err(AlgorithmError::InvalidTileIndex {
                        index,
                        max_tiles: tile_count,
                    });
                }
            }
            table.push(
                lists
                    .clone()
                    .map(|list| TileBitset::from_indices(list, tile_count)),
            );
        }

        let model = Self {
            rules: table,
            tile_count,
        };
        if let Some((tile, other, direction)) = model.first_asymmetry() {
            return Err(AlgorithmError::AsymmetricRule {
                tile,
                other,
                direction,
            });
        }
        Ok(model)
    }

    /// Number of tiles the model covers
    pub const fn tile_count(&self) -> usize {
        self.tile_count
    }

    /// Tiles allowed on the `direction` side of `tile`
    ///
    /// Unknown tiles have no compatible neighbours.
    pub fn compatible(&self, tile: usize, direction: Direction) -> TileBitset {
        self.rules
            .get(tile)
            .and_then(|lists| lists.get(direction.index()))
            .cloned()
            .unwrap_or_else(|| TileBitset::new(self.tile_count))
    }

    /// Compatible tile indices in ascending order
    pub fn compatible_indices(&self, tile: usize, direction: Direction) -> Vec<usize> {
        self.rules
            .get(tile)
            .and_then(|lists| lists.get(direction.index()))
            .map(TileBitset::to_vec)
            .unwrap_or_default()
    }

    /// Union of the `direction` lists of every tile in `options`
    pub fn supported(&self, options: &TileBitset, direction: Direction) -> TileBitset {
        let mut union = TileBitset::new(self.tile_count);
        for tile in options.iter() {
            if let Some(list) = self
                .rules
                .get(tile)
                .and_then(|lists| lists.get(direction.index()))
            {
                union.union_with(list);
            }
        }
        union
    }

    /// Whether `other` may sit on the `direction` side of `tile`
    pub fn allows(&self, tile: usize, other: usize, direction: Direction) -> bool {
        self.rules
            .get(tile)
            .and_then(|lists| lists.get(direction.index()))
            .is_some_and(|list| list.contains(other))
    }

    /// Whether every rule has its mirror in the opposite direction
    pub fn is_symmetric(&self) -> bool {
        self.first_asymmetry().is_none()
    }

    fn first_asymmetry(&self) -> Option<(usize, usize, Direction)> {
        for tile in 0..self.tile_count {
            for &direction in Direction::VARIANTS {
                for other in self.compatible(tile, direction).iter() {
                    if !self.allows(other, tile, direction.opposite()) {
                        return Some((tile, other, direction));
                    }
                }
            }
        }
        None
    }
}
