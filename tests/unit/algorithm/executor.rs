//! Tests for the solver tick loop, rollback and restart behavior

#[cfg(test)]
mod tests {
    use crate::fixtures::{hub_and_spokes, isolated_and_self, single_tile};
    use edgetile::algorithm::executor::{Solver, SolverState, SolverStats, TickOutcome};
    use edgetile::algorithm::selection::SequenceSelector;
    use edgetile::io::configuration::MAX_GRID_DIMENSION;
    use edgetile::spatial::{AdjacencyModel, Grid};
    use edgetile::AlgorithmError;
    use std::sync::Arc;

    // Tests invalid dimensions are rejected at construction
    #[test]
    fn test_rejects_bad_dimension() {
        assert!(Solver::with_seed(single_tile(), MAX_GRID_DIMENSION, 1).is_ok());
        for dimension in [0, MAX_GRID_DIMENSION + 1, 1_000] {
            let result = Solver::with_seed(single_tile(), dimension, 1);
            assert!(matches!(
                result,
                Err(AlgorithmError::InvalidParameter {
                    parameter: "dimension",
                    ..
                })
            ));
        }
    }

    // Tests a single self-compatible tile fills any grid in one tick
    // Verified by disabling recursion into forced cells
    #[test]
    fn test_single_tile_one_tick() {
        for dimension in 1..=6 {
            let mut solver = Solver::with_seed(single_tile(), dimension, 3).unwrap();
            let outcome = solver.tick();

            assert!(matches!(outcome, TickOutcome::Collapsed { tile: 0, .. }));
            assert_eq!(solver.state(), SolverState::AllCollapsed);
            assert_eq!(solver.stats().contradictions, 0);
            assert_eq!(solver.tick(), TickOutcome::AlreadyCollapsed);
            assert_eq!(solver.stats().ticks, 1);
        }
    }

    // Tests a contradiction restores the pre-tick grid exactly
    // Verified by skipping the restore after popping
    #[test]
    fn test_contradiction_rolls_back() {
        let chooser = SequenceSelector::new(vec![0, 0, 0, 1]);
        let mut solver = Solver::new(isolated_and_self(), 2, chooser).unwrap();
        let before = solver.grid().snapshot();

        let outcome = solver.tick();

        assert_eq!(
            outcome,
            TickOutcome::RolledBack {
                contradiction: 1,
                popped: 1
            }
        );
        assert_eq!(solver.grid().snapshot(), before);
        assert!(solver.history().is_empty());
        assert_eq!(solver.state(), SolverState::Contradicted);

        let outcome = solver.tick();
        assert_eq!(outcome, TickOutcome::Collapsed { cell: 0, tile: 1 });
        assert_eq!(solver.state(), SolverState::AllCollapsed);
        assert!(solver.grid().chosen_tiles().iter().all(|&t| t == Some(1)));
        assert_eq!(solver.chooser_mut().consumed(), 4);
        assert_eq!(
            solver.stats(),
            SolverStats {
                ticks: 2,
                collapses: 2,
                contradictions: 1,
                snapshots_popped: 1,
                restarts: 0,
            }
        );
    }

    // Tests exhausting history rebuilds a fresh grid
    #[test]
    fn test_exhausted_history_restarts() {
        let adjacency =
            Arc::new(AdjacencyModel::from_rules(&[[vec![], vec![], vec![], vec![]]]).unwrap());
        let mut solver = Solver::with_seed(adjacency, 2, 9).unwrap();

        let outcome = solver.tick();

        assert!(matches!(outcome, TickOutcome::Restarted { .. }));
        assert!(solver.history().is_empty());
        assert_eq!(solver.grid(), &Grid::new(2, 1));
        assert_eq!(solver.stats().restarts, 1);
        assert_eq!(solver.stats().snapshots_popped, 1);
        assert_eq!(solver.state(), SolverState::Contradicted);
    }

    // Tests a lone cell needs no neighbours to be compatible
    #[test]
    fn test_single_cell_without_rules() {
        let adjacency =
            Arc::new(AdjacencyModel::from_rules(&[[vec![], vec![], vec![], vec![]]]).unwrap());
        let mut solver = Solver::with_seed(adjacency, 1, 0).unwrap();
        assert_eq!(solver.tick(), TickOutcome::Collapsed { cell: 0, tile: 0 });
    }

    // Tests successful ticks grow the history by one snapshot each
    #[test]
    fn test_history_grows_per_tick() {
        let chooser = SequenceSelector::new(vec![0, 0]);
        let mut solver = Solver::new(hub_and_spokes(), 4, chooser).unwrap();

        assert_eq!(solver.state(), SolverState::Working);
        let outcome = solver.tick();
        assert_eq!(outcome, TickOutcome::Collapsed { cell: 0, tile: 0 });
        assert_eq!(solver.history().len(), 1);
        assert_eq!(solver.state(), SolverState::Working);
        assert_eq!(solver.history().peek(), Some(&Grid::new(4, 3).snapshot()));
    }

    // Tests run stops as soon as the grid is complete
    #[test]
    fn test_run_until_collapsed() {
        let mut solver = Solver::with_seed(hub_and_spokes(), 5, 11).unwrap();
        assert!(solver.run(1_000));
        assert_eq!(solver.state(), SolverState::AllCollapsed);
        assert!(solver.stats().ticks <= 25);
    }

    // Tests restart discards progress but keeps the statistics
    #[test]
    fn test_manual_restart() {
        let mut solver = Solver::with_seed(hub_and_spokes(), 3, 5).unwrap();
        solver.tick();
        solver.restart();
        assert_eq!(solver.grid(), &Grid::new(3, 3));
        assert!(solver.history().is_empty());
        assert_eq!(solver.stats().ticks, 1);
    }
}
