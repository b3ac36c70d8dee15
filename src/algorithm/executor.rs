use crate::{
    algorithm::history::HistoryStack,
    algorithm::propagation::{Propagation, propagate},
    algorithm::selection::{ChoiceSource, RandomSelector, select_cell, select_tile},
    io::configuration::MAX_GRID_DIMENSION,
    io::error::{AlgorithmError, Result, invalid_parameter},
    spatial::adjacency::AdjacencyModel,
    spatial::grid::Grid,
};
use std::sync::Arc;

/// Whole-grid state as seen between ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverState {
    /// Every cell holds exactly one committed tile
    AllCollapsed,
    /// Cells remain and the last tick did not hit a contradiction
    Working,
    /// The last tick hit a contradiction and rolled back or restarted
    Contradicted,
}

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing left to do; the grid was not touched
    AlreadyCollapsed,
    /// A cell was collapsed and propagation stayed consistent
    Collapsed {
        /// Linear index of the chosen cell
        cell: usize,
        /// Tile committed to that cell
        tile: usize,
    },
    /// A contradiction was undone by restoring earlier snapshots
    RolledBack {
        /// Cell left without options
        contradiction: usize,
        /// Number of snapshots popped
        popped: usize,
    },
    /// History ran out before an open state was found; the grid was rebuilt
    Restarted {
        /// Cell left without options
        contradiction: usize,
    },
}

/// Running totals across the life of a solver, restarts included
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolverStats {
    /// Ticks that did work
    pub ticks: usize,
    /// Cells explicitly collapsed by random choice
    pub collapses: usize,
    /// Contradictions found during propagation
    pub contradictions: usize,
    /// Snapshots popped while rolling back
    pub snapshots_popped: usize,
    /// Full grid rebuilds after exhausting history
    pub restarts: usize,
}

/// Grid collapse solver advanced one tick at a time
///
/// Owns the grid and its history exclusively; the adjacency model is shared
/// read-only and survives restarts.
pub struct Solver<C: ChoiceSource = RandomSelector> {
    adjacency: Arc<AdjacencyModel>,
    grid: Grid,
    history: HistoryStack,
    chooser: C,
    dimension: usize,
    last_contradicted: bool,
    stats: SolverStats,
}

impl Solver<RandomSelector> {
    /// Create a solver driven by a seeded random selector
    ///
    /// # Errors
    ///
    /// Returns an error if the dimension is zero or exceeds the grid limit,
    /// or if the model has no tiles
    pub fn with_seed(adjacency: Arc<AdjacencyModel>, dimension: usize, seed: u64) -> Result<Self> {
        Self::new(adjacency, dimension, RandomSelector::new(seed))
    }
}

impl<C: ChoiceSource> Solver<C> {
    /// Create a solver over a fresh `dimension × dimension` grid
    ///
    /// # Errors
    ///
    /// Returns an error if the dimension is zero or exceeds the grid limit,
    /// or if the model has no tiles
    pub fn new(adjacency: Arc<AdjacencyModel>, dimension: usize, chooser: C) -> Result<Self> {
        if dimension == 0 || dimension > MAX_GRID_DIMENSION {
            return Err(invalid_parameter(
                "dimension",
                &dimension,
                &format!("must be between 1 and {MAX_GRID_DIMENSION}"),
            ));
        }
        if adjacency.tile_count() == 0 {
            return Err(AlgorithmError::InvalidSourceData {
                reason: "Tile set must contain at least one tile".to_string(),
            });
        }

        let grid = Grid::new(dimension, adjacency.tile_count());
        Ok(Self {
            adjacency,
            grid,
            history: HistoryStack::new(),
            chooser,
            dimension,
            last_contradicted: false,
            stats: SolverStats::default(),
        })
    }

    /// Current grid, for rendering between ticks
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Snapshot history, most recent last
    pub const fn history(&self) -> &HistoryStack {
        &self.history
    }

    /// Shared compatibility model
    pub fn adjacency(&self) -> &AdjacencyModel {
        &self.adjacency
    }

    /// Running totals
    pub const fn stats(&self) -> SolverStats {
        self.stats
    }

    /// Mutable access to the choice source
    pub const fn chooser_mut(&mut self) -> &mut C {
        &mut self.chooser
    }

    /// Classify the grid as of the last tick
    pub fn state(&self) -> SolverState {
        if self.grid.is_fully_collapsed() {
            SolverState::AllCollapsed
        } else if self.last_contradicted {
            SolverState::Contradicted
        } else {
            SolverState::Working
        }
    }

    /// Drop the grid and history and start over with every cell open
    pub fn restart(&mut self) {
        self.grid = Grid::new(self.dimension, self.adjacency.tile_count());
        self.history = HistoryStack::new();
    }

    /// Advance the algorithm by one step
    ///
    /// Snapshot, collapse the chosen lowest-entropy cell, propagate, and on
    /// contradiction roll back until some cell has more than one option again.
    pub fn tick(&mut self) -> TickOutcome {
        if self.grid.is_fully_collapsed() {
            self.last_contradicted = false;
            return TickOutcome::AlreadyCollapsed;
        }

        self.stats.ticks += 1;
        self.history.push(self.grid.snapshot());

        let Some(cell) = select_cell(&self.grid, &mut self.chooser) else {
            self.history.pop();
            self.last_contradicted = false;
            return TickOutcome::AlreadyCollapsed;
        };

        let chosen = self.grid.cell_mut(cell).and_then(|target| {
            let tile = select_tile(target, &mut self.chooser)?;
            target.collapse_to(tile);
            Some(tile)
        });
        // An uncollapsed cell without options only arises from a corrupt restore
        let Some(tile) = chosen else {
            return self.roll_back(cell);
        };
        self.stats.collapses += 1;

        match propagate(&mut self.grid, &self.adjacency, cell) {
            Propagation::Consistent => {
                self.last_contradicted = false;
                TickOutcome::Collapsed { cell, tile }
            }
            Propagation::Contradiction {
                cell: contradiction,
            } => self.roll_back(contradiction),
        }
    }

    /// Tick until the grid is fully collapsed or `max_ticks` ticks have run
    ///
    /// Returns `true` if the grid ended fully collapsed.
    pub fn run(&mut self, max_ticks: usize) -> bool {
        for _ in 0..max_ticks {
            if self.grid.is_fully_collapsed() {
                return true;
            }
            self.tick();
        }
        self.grid.is_fully_collapsed()
    }

    fn roll_back(&mut self, contradiction: usize) -> TickOutcome {
        self.stats.contradictions += 1;
        self.last_contradicted = true;

        let mut popped = 0;
        while let Some(snapshot) = self.history.pop() {
            popped += 1;
            self.stats.snapshots_popped += 1;
            self.grid.restore(&snapshot);
            if self.grid.has_open_cell() {
                return TickOutcome::RolledBack {
                    contradiction,
                    popped,
                };
            }
        }

        self.stats.restarts += 1;
        self.restart();
        TickOutcome::Restarted { contradiction }
    }
}
