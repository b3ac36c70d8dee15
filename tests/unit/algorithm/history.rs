//! Tests for the snapshot history stack

#[cfg(test)]
mod tests {
    use edgetile::algorithm::history::HistoryStack;
    use edgetile::spatial::Grid;

    // Tests snapshots come back in last-in first-out order
    // Verified by popping from the front instead of the back
    #[test]
    fn test_push_pop_lifo() {
        let mut history = HistoryStack::new();
        let first = Grid::new(2, 2);
        let mut second = Grid::new(2, 2);
        if let Some(cell) = second.cell_mut(0) {
            cell.collapse_to(1);
        }

        history.push(first.snapshot());
        history.push(second.snapshot());
        assert_eq!(history.len(), 2);

        assert_eq!(history.pop(), Some(second.snapshot()));
        assert_eq!(history.pop(), Some(first.snapshot()));
        assert_eq!(history.pop(), None);
        assert!(history.is_empty());
    }

    // Tests peek leaves the stack unchanged
    #[test]
    fn test_peek() {
        let mut history = HistoryStack::default();
        assert!(history.peek().is_none());

        let grid = Grid::new(3, 2);
        history.push(grid.snapshot());
        assert_eq!(history.peek(), Some(&grid.snapshot()));
        assert_eq!(history.len(), 1);
    }

    // Tests clear drops every snapshot
    #[test]
    fn test_clear() {
        let mut history = HistoryStack::new();
        for _ in 0..4 {
            history.push(Grid::new(1, 1).snapshot());
        }
        history.clear();
        assert!(history.is_empty());
        assert_eq!(history.len(), 0);
    }
}
