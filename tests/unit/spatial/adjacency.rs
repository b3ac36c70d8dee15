//! Tests for directions and the compatibility model

#[cfg(test)]
mod tests {
    use crate::fixtures::hub_and_spokes;
    use edgetile::AlgorithmError;
    use edgetile::algorithm::bitset::TileBitset;
    use edgetile::spatial::adjacency::TileEdges;
    use edgetile::spatial::{AdjacencyModel, Direction};
    use strum::VariantArray;

    /// Tile described by a label per edge, ordered Up, Right, Down, Left
    struct Labels([u8; 4]);

    impl TileEdges for Labels {
        fn edge_matches(&self, other: &Self, direction: Direction) -> bool {
            self.0[direction.index()] == other.0[direction.opposite().index()]
        }
    }

    // Tests opposite is an involution and offsets cancel out
    #[test]
    fn test_direction_opposite() {
        for &direction in Direction::VARIANTS {
            assert_eq!(direction.opposite().opposite(), direction);
            let (di, dj) = direction.offset();
            let (oi, oj) = direction.opposite().offset();
            assert_eq!((di + oi, dj + oj), (0, 0));
        }
        let indices: Vec<usize> = Direction::VARIANTS.iter().map(|d| d.index()).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
    }

    // Tests edge matching compares the facing edges of both tiles
    // Verified by comparing the same direction on both tiles
    #[test]
    fn test_compute_from_edges() {
        let tiles = [Labels([0, 1, 0, 1]), Labels([0, 0, 0, 1]), Labels([2, 2, 2, 2])];
        let model = AdjacencyModel::compute(&tiles);

        assert_eq!(model.tile_count(), 3);
        assert_eq!(model.compatible_indices(0, Direction::Right), vec![0, 1]);
        assert_eq!(model.compatible_indices(1, Direction::Right), Vec::<usize>::new());
        assert_eq!(model.compatible_indices(1, Direction::Left), vec![0]);
        assert_eq!(model.compatible_indices(0, Direction::Left), vec![0]);
        assert_eq!(model.compatible_indices(0, Direction::Down), vec![0, 1]);
        assert_eq!(model.compatible_indices(2, Direction::Up), vec![2]);
        assert!(model.allows(0, 1, Direction::Right));
        assert!(model.allows(1, 0, Direction::Left));
        assert!(!model.allows(0, 2, Direction::Up));
    }

    // Tests derived rules always mirror between opposite directions
    #[test]
    fn test_compute_is_symmetric() {
        let tiles: Vec<Labels> = (0..16u8)
            .map(|n| Labels([n & 1, (n >> 1) & 1, (n >> 2) & 1, (n >> 3) & 1]))
            .collect();
        let model = AdjacencyModel::compute(&tiles);
        assert!(model.is_symmetric());

        for a in 0..16 {
            for b in 0..16 {
                for &direction in Direction::VARIANTS {
                    assert_eq!(
                        model.allows(a, b, direction),
                        model.allows(b, a, direction.opposite())
                    );
                }
            }
        }
    }

    // Tests an asymmetric rule table is rejected with the offending pair
    // Verified by skipping the symmetry check in from_rules
    #[test]
    fn test_from_rules_rejects_asymmetry() {
        let result = AdjacencyModel::from_rules(&[
            [vec![], vec![1], vec![], vec![]],
            [vec![], vec![], vec![], vec![]],
        ]);
        assert!(matches!(
            result,
            Err(AlgorithmError::AsymmetricRule {
                tile: 0,
                other: 1,
                direction: Direction::Right,
            })
        ));
    }

    // Tests rule tables must be non-empty and name known tiles
    #[test]
    fn test_from_rules_rejects_bad_tables() {
        assert!(matches!(
            AdjacencyModel::from_rules(&[]),
            Err(AlgorithmError::InvalidSourceData { .. })
        ));
        assert!(matches!(
            AdjacencyModel::from_rules(&[[vec![0], vec![3], vec![0], vec![0]]]),
            Err(AlgorithmError::InvalidTileIndex {
                index: 3,
                max_tiles: 1,
            })
        ));
    }

    // Tests the supported set is the union over all remaining options
    #[test]
    fn test_supported_union() {
        let model = hub_and_spokes();
        let spokes = TileBitset::from_indices([1, 2], 3);
        assert_eq!(model.supported(&spokes, Direction::Up).to_vec(), vec![0]);

        let all = TileBitset::all(3);
        assert_eq!(model.supported(&all, Direction::Left), TileBitset::all(3));
        assert!(model.supported(&TileBitset::new(3), Direction::Down).is_empty());
    }

    // Tests unknown tiles have no compatible neighbours
    #[test]
    fn test_unknown_tile() {
        let model = hub_and_spokes();
        assert!(model.compatible(7, Direction::Up).is_empty());
        assert!(model.compatible_indices(7, Direction::Up).is_empty());
        assert!(!model.allows(7, 0, Direction::Up));
    }
}
