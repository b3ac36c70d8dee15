//! Unit tests mirroring the source tree, one file per source module

mod algorithm;

/// Rule tables shared by the unit tests
pub(crate) mod fixtures {
    use edgetile::spatial::AdjacencyModel;
    use std::sync::Arc;

    /// One tile that may sit next to itself on every side
    pub(crate) fn single_tile() -> Arc<AdjacencyModel> {
        Arc::new(AdjacencyModel::from_rules(&[[vec![0], vec![0], vec![0], vec![0]]]).unwrap())
    }

    /// Tile 0 has no neighbours at all; tile 1 only neighbours itself
    pub(crate) fn isolated_and_self() -> Arc<AdjacencyModel> {
        Arc::new(
            AdjacencyModel::from_rules(&[
                [vec![], vec![], vec![], vec![]],
                [vec![1], vec![1], vec![1], vec![1]],
            ])
            .unwrap(),
        )
    }

    /// Tile 0 neighbours tiles 1 and 2; tiles 1 and 2 only neighbour tile 0
    pub(crate) fn hub_and_spokes() -> Arc<AdjacencyModel> {
        Arc::new(
            AdjacencyModel::from_rules(&[
                [vec![1, 2], vec![1, 2], vec![1, 2], vec![1, 2]],
                [vec![0], vec![0], vec![0], vec![0]],
                [vec![0], vec![0], vec![0], vec![0]],
            ])
            .unwrap(),
        )
    }
}
