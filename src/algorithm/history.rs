use crate::spatial::grid::GridSnapshot;

/// Last-in first-out stack of full grid snapshots
///
/// One entry is pushed before every collapse decision and entries are popped
/// while rolling back from a contradiction.
#[derive(Debug, Clone, Default)]
pub struct HistoryStack {
    entries: Vec<GridSnapshot>,
}

impl HistoryStack {
    /// Create an empty history
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Record a snapshot
    pub fn push(&mut self, snapshot: GridSnapshot) {
        self.entries.push(snapshot);
    }

    /// Remove and return the most recent snapshot
    pub fn pop(&mut self) -> Option<GridSnapshot> {
        self.entries.pop()
    }

    /// Most recent snapshot without removing it
    pub fn peek(&self) -> Option<&GridSnapshot> {
        self.entries.last()
    }

    /// Number of stored snapshots
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no snapshots are stored
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every snapshot
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
