//! Minimum-entropy cell selection and the random choices it depends on
//!
//! All non-determinism in the solver goes through [`ChoiceSource`], so tests
//! can script exact choices with [`SequenceSelector`] while real runs use the
//! seeded [`RandomSelector`].

use crate::spatial::grid::{Cell, Grid};
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Uniform choice among `len` alternatives
pub trait ChoiceSource {
    /// Return an index in `0..len`; `len` is never zero
    fn choose_index(&mut self, len: usize) -> usize;
}

/// Seeded random selector for reproducible stochastic choices
#[derive(Debug, Clone)]
pub struct RandomSelector {
    rng: StdRng,
}

impl RandomSelector {
    /// Create a deterministic random selector
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl ChoiceSource for RandomSelector {
    fn choose_index(&mut self, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        self.rng.random_range(0..len)
    }
}

/// Replays a fixed list of choices, then keeps picking the first alternative
///
/// Each scripted value is reduced modulo the number of alternatives.
#[derive(Debug, Clone, Default)]
pub struct SequenceSelector {
    choices: Vec<usize>,
    position: usize,
}

impl SequenceSelector {
    /// Script the choices to replay
    pub fn new(choices: Vec<usize>) -> Self {
        Self {
            choices,
            position: 0,
        }
    }

    /// Number of scripted choices consumed so far
    pub const fn consumed(&self) -> usize {
        self.position
    }
}

impl ChoiceSource for SequenceSelector {
    fn choose_index(&mut self, len: usize) -> usize {
        let choice = self.choices.get(self.position).copied().unwrap_or(0);
        self.position += 1;
        choice.checked_rem(len).unwrap_or(0)
    }
}

/// Uncollapsed cells sharing the smallest option count
///
/// Returned in ascending index order; empty once every cell is collapsed.
pub fn lowest_entropy_cells(grid: &Grid) -> Vec<usize> {
    let remaining: Vec<(usize, usize)> = grid
        .cells()
        .enumerate()
        .filter(|(_, cell)| !cell.collapsed)
        .map(|(index, cell)| (index, cell.entropy()))
        .collect();

    let Some(min_entropy) = remaining.iter().map(|&(_, entropy)| entropy).min() else {
        return Vec::new();
    };

    remaining
        .into_iter()
        .filter(|&(_, entropy)| entropy == min_entropy)
        .map(|(index, _)| index)
        .collect()
}

/// Pick one of the lowest-entropy cells uniformly
pub fn select_cell<C: ChoiceSource + ?Sized>(grid: &Grid, chooser: &mut C) -> Option<usize> {
    let candidates = lowest_entropy_cells(grid);
    if candidates.is_empty() {
        return None;
    }
    candidates
        .get(chooser.choose_index(candidates.len()))
        .copied()
}

/// Pick one of the cell's remaining options uniformly
pub fn select_tile<C: ChoiceSource + ?Sized>(cell: &Cell, chooser: &mut C) -> Option<usize> {
    let count = cell.entropy();
    if count == 0 {
        return None;
    }
    cell.options.nth(chooser.choose_index(count))
}
