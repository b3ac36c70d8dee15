use crate::{
    spatial::adjacency::{AdjacencyModel, Direction},
    spatial::grid::Grid,
};
use strum::VariantArray;

/// Result of propagating constraints out of a collapsed cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    /// Every reachable neighbour kept at least one option
    Consistent,
    /// A neighbour was left with no options
    Contradiction {
        /// Linear index of the emptied cell
        cell: usize,
    },
}

impl Propagation {
    /// Whether propagation finished without emptying a cell
    pub const fn is_consistent(self) -> bool {
        matches!(self, Self::Consistent)
    }
}

/// Outcome of a single propagation step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropagationStep {
    /// The neighbour was outside the grid, already collapsed, or absent
    Skipped,
    /// The neighbour's options were intersected with the supported set
    Narrowed {
        /// Linear index of the narrowed cell
        cell: usize,
        /// Options left after narrowing
        remaining: usize,
    },
    /// The neighbour narrowed to one option, was collapsed, and will propagate next
    Forced {
        /// Linear index of the forced cell
        cell: usize,
        /// The only tile left
        tile: usize,
    },
    /// Propagation ended; no further steps will change the grid
    Finished(Propagation),
}

/// Pending work: a collapsed cell and the next direction to visit from it
#[derive(Debug, Clone, Copy)]
struct Frame {
    cell: usize,
    next_direction: usize,
}

/// Worklist-driven propagation from one collapsed cell
///
/// Frames form a stack, so a cell forced to a single option is fully
/// propagated before its parent continues with its remaining directions.
/// This visits cells in the same order as the recursive formulation while
/// keeping the call stack flat regardless of grid size.
#[derive(Debug)]
pub struct Propagator {
    stack: Vec<Frame>,
    outcome: Option<Propagation>,
}

impl Propagator {
    /// Start propagating from `origin`, which must already be collapsed
    pub fn new(origin: usize) -> Self {
        Self {
            stack: vec![Frame {
                cell: origin,
                next_direction: 0,
            }],
            outcome: None,
        }
    }

    /// Number of collapsed cells still waiting to propagate
    pub fn pending(&self) -> usize {
        self.stack.len()
    }

    /// Visit one neighbour of the innermost pending cell
    pub fn step(&mut self, grid: &mut Grid, adjacency: &AdjacencyModel) -> PropagationStep {
        if let Some(outcome) = self.outcome {
            return PropagationStep::Finished(outcome);
        }

        let Some(frame) = self.stack.last_mut() else {
            self.outcome = Some(Propagation::Consistent);
            return PropagationStep::Finished(Propagation::Consistent);
        };

        let Some(&direction) = Direction::VARIANTS.get(frame.next_direction) else {
            self.stack.pop();
            return PropagationStep::Skipped;
        };
        frame.next_direction += 1;
        let source = frame.cell;

        let Some(neighbor) = grid.neighbor(source, direction) else {
            return PropagationStep::Skipped;
        };

        let supported = match grid.cell(source) {
            Some(cell) => adjacency.supported(&cell.options, direction),
            None => return PropagationStep::Skipped,
        };

        let Some(target) = grid.cell_mut(neighbor) else {
            return PropagationStep::Skipped;
        };
        if target.collapsed {
            return PropagationStep::Skipped;
        }

        target.options.intersect_with(&supported);
        match target.options.only() {
            Some(tile) => {
                target.collapsed = true;
                self.stack.push(Frame {
                    cell: neighbor,
                    next_direction: 0,
                });
                PropagationStep::Forced {
                    cell: neighbor,
                    tile,
                }
            }
            None if target.options.is_empty() => {
                let outcome = Propagation::Contradiction { cell: neighbor };
                self.outcome = Some(outcome);
                self.stack.clear();
                PropagationStep::Finished(outcome)
            }
            None => PropagationStep::Narrowed {
                cell: neighbor,
                remaining: target.options.count(),
            },
        }
    }

    /// Step until propagation finishes
    pub fn run(&mut self, grid: &mut Grid, adjacency: &AdjacencyModel) -> Propagation {
        loop {
            if let PropagationStep::Finished(outcome) = self.step(grid, adjacency) {
                return outcome;
            }
        }
    }
}

/// Narrow the neighbours of a just-collapsed cell, cascading through forced cells
///
/// Stops at the first cell left without options; the grid is then partially
/// narrowed and the caller must roll it back.
pub fn propagate(grid: &mut Grid, adjacency: &AdjacencyModel, origin: usize) -> Propagation {
    Propagator::new(origin).run(grid, adjacency)
}
