use bitvec::prelude::*;
use std::fmt;

/// Fixed-size bitset holding a set of tile indices
///
/// Indices are 0-based and must be below the `max_tiles` the set was created
/// with. Used both for the remaining options of a cell and for the
/// per-direction compatibility lists of a tile.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TileBitset {
    bits: BitVec,
    max_tiles: usize,
}

impl TileBitset {
    /// Create a bitset with no tiles present
    pub fn new(max_tiles: usize) -> Self {
        Self {
            bits: bitvec![0; max_tiles],
            max_tiles,
        }
    }

    /// Create a bitset containing all possible tiles
    pub fn all(max_tiles: usize) -> Self {
        Self {
            bits: bitvec![1; max_tiles],
            max_tiles,
        }
    }

    /// Create a bitset containing exactly one tile
    pub fn single(tile: usize, max_tiles: usize) -> Self {
        let mut bitset = Self::new(max_tiles);
        bitset.insert(tile);
        bitset
    }

    /// Build a bitset from any iterator of tile indices
    ///
    /// Out-of-range indices are ignored
    pub fn from_indices<I>(indices: I, max_tiles: usize) -> Self
    where
        I: IntoIterator<Item = usize>,
    {
        let mut bitset = Self::new(max_tiles);
        for tile in indices {
            bitset.insert(tile);
        }
        bitset
    }

    /// Capacity of the set (the tile count it was created for)
    pub const fn capacity(&self) -> usize {
        self.max_tiles
    }

    /// Insert a tile index
    pub fn insert(&mut self, tile: usize) {
        if tile < self.max_tiles {
            self.bits.set(tile, true);
        }
    }

    /// Test tile membership
    pub fn contains(&self, tile: usize) -> bool {
        self.bits.get(tile).as_deref() == Some(&true)
    }

    /// Intersect this bitset with another in-place
    pub fn intersect_with(&mut self, other: &Self) {
        self.bits &= &other.bits;
    }

    /// Add every tile of another bitset to this one in-place
    pub fn union_with(&mut self, other: &Self) {
        self.bits |= &other.bits;
    }

    /// Create a new bitset containing the intersection
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        let mut result = self.clone();
        result.intersect_with(other);
        result
    }

    /// Test whether every tile of this set is also in `other`
    pub fn is_subset(&self, other: &Self) -> bool {
        self.iter().all(|tile| other.contains(tile))
    }

    /// Test if no tiles are present
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Count tiles in the set
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// The only tile in the set, if the set is a singleton
    pub fn only(&self) -> Option<usize> {
        let mut ones = self.bits.iter_ones();
        let first = ones.next()?;
        ones.next().is_none().then_some(first)
    }

    /// The `n`-th tile in ascending index order
    pub fn nth(&self, n: usize) -> Option<usize> {
        self.bits.iter_ones().nth(n)
    }

    /// Iterate tile indices in ascending order
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.iter_ones()
    }

    /// Extract all tile indices as a vector
    pub fn to_vec(&self) -> Vec<usize> {
        self.bits.iter_ones().collect()
    }
}

impl fmt::Display for TileBitset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TileBitset({} tiles: {:?})", self.count(), self.to_vec())
    }
}
