//! Tests for single-hop and cascading neighbor propagation

#[cfg(test)]
mod tests {
    use ndarray::{Array2, array};
    use simpletiled::AlgorithmError;
    use simpletiled::algorithm::bitset::Superposition;
    use simpletiled::algorithm::propagation::{PropagationQueue, cascade, propagate_from};
    use simpletiled::analysis::patterns::{LearnedModel, SampleGrid};
    use simpletiled::spatial::GridState;
    use simpletiled::spatial::tiles::{Direction, Tile};

    fn learn(sample: &str) -> LearnedModel {
        SampleGrid::parse(sample).expect("Invalid sample").learn()
    }

    fn grid(model: &LearnedModel, cells: Array2<Superposition>) -> GridState {
        GridState::from_superpositions(cells, &model.weights).expect("Invalid grid")
    }

    fn full() -> Superposition {
        Superposition::full()
    }

    // A collapsed coast forces sea to its left and land to its right
    #[test]
    fn test_single_hop_filters_neighbors() {
        let model = learn("sc\ncl");
        let mut state = grid(
            &model,
            array![[full(), Superposition::single(Tile::Coast), full()]],
        );

        let resolved = propagate_from(&mut state, &model.index, &model.weights, (0, 1), false)
            .expect("No contradiction expected");

        assert_eq!(resolved.len(), 2);
        assert_eq!(
            state.superposition(0, 0).and_then(Superposition::resolved_tile),
            Some(Tile::Sea)
        );
        assert_eq!(
            state.superposition(0, 2).and_then(Superposition::resolved_tile),
            Some(Tile::Land)
        );
        assert_eq!(state.entropy_at(0, 0), Some(0.0));
        assert_eq!(state.entropy_at(0, 2), Some(0.0));
    }

    // Filtering without reaching a single value leaves a positive entropy
    #[test]
    fn test_single_hop_recomputes_entropy() {
        let model = learn("ssccl");
        let mut state = grid(&model, array![[Superposition::single(Tile::Sea), full()]]);
        let before = state.entropy_at(0, 1).expect("Cell should exist");

        let resolved = propagate_from(&mut state, &model.index, &model.weights, (0, 0), false)
            .expect("No contradiction expected");

        assert!(resolved.is_empty());
        let narrowed = state.superposition(0, 1).expect("Cell should exist");
        assert_eq!(narrowed.to_vec(), vec![Tile::Sea, Tile::Coast]);
        let after = state.entropy_at(0, 1).expect("Cell should exist");
        assert!(after > 0.0 && after < before);
    }

    // An unresolved source cell propagates nothing
    #[test]
    fn test_unresolved_source_is_a_no_op() {
        let model = learn("sc\ncl");
        let mut state = grid(&model, array![[full(), full()]]);

        let resolved = propagate_from(&mut state, &model.index, &model.weights, (0, 0), false)
            .expect("No contradiction expected");

        assert!(resolved.is_empty());
        assert_eq!(state.superposition(0, 1), Some(&full()));
    }

    // A missing (RIGHT, LAND) entry means nothing may follow land to the right
    #[test]
    fn test_missing_rule_entry_is_a_contradiction() {
        let model = learn("sc\ncl");
        let mut state = grid(&model, array![[Superposition::single(Tile::Land), full()]]);

        let result = propagate_from(&mut state, &model.index, &model.weights, (0, 0), false);

        match result {
            Err(AlgorithmError::Contradiction(report)) => {
                assert_eq!((report.row, report.col), (0, 1));
                assert_eq!(report.direction, Direction::Right);
                assert_eq!(report.tile, Tile::Land);
                assert!(report.snapshot.get((0, 1)).is_some_and(Superposition::is_empty));
            }
            other => unreachable!("Expected Contradiction, got {other:?}"),
        }
    }

    // Horizontal neighbors are filtered first, left before right, and the first
    // emptied one is reported
    #[test]
    fn test_contradiction_names_first_neighbor_in_order() {
        let model = learn("sc\ncl");
        let sea_or_land: Superposition = [Tile::Sea, Tile::Land].into_iter().collect();
        let mut state = grid(
            &model,
            array![
                [full(), full(), full()],
                [sea_or_land, Superposition::single(Tile::Land), full()],
                [full(), full(), full()]
            ],
        );

        let result = propagate_from(&mut state, &model.index, &model.weights, (1, 1), false);

        match result {
            Err(AlgorithmError::Contradiction(report)) => {
                assert_eq!(report.direction, Direction::Left);
                assert_eq!((report.row, report.col), (1, 0));
            }
            other => unreachable!("Expected Contradiction, got {other:?}"),
        }
        // Neighbors after the failing one are left as they were
        assert_eq!(state.superposition(1, 2), Some(&full()));
        assert_eq!(state.superposition(2, 1), Some(&full()));
    }

    // Resolved neighbors are never re-opened or re-checked in single-hop mode
    #[test]
    fn test_single_hop_skips_resolved_neighbors() {
        let model = learn("sc\ncl");
        let cells = array![[
            Superposition::single(Tile::Land),
            Superposition::single(Tile::Sea)
        ]];
        let mut state = grid(&model, cells.clone());

        let resolved = propagate_from(&mut state, &model.index, &model.weights, (0, 0), false)
            .expect("Resolved neighbors must be skipped");

        assert!(resolved.is_empty());
        assert_eq!(state.superpositions, cells);
    }

    // Checking resolved neighbors catches pairs no rule allows
    #[test]
    fn test_checked_resolved_neighbor_contradiction() {
        let model = learn("sc\ncl");
        let mut state = grid(
            &model,
            array![[
                Superposition::single(Tile::Sea),
                Superposition::single(Tile::Land)
            ]],
        );

        let result = propagate_from(&mut state, &model.index, &model.weights, (0, 0), true);
        assert!(result.is_err_and(|e| e.is_contradiction()));
    }

    // Single-hop stops after one ring, cascade keeps going along the row
    #[test]
    fn test_cascade_reaches_beyond_immediate_neighbors() {
        let model = learn("scl");
        let cells = array![[Superposition::single(Tile::Sea), full(), full()]];

        let mut single_hop = grid(&model, cells.clone());
        propagate_from(&mut single_hop, &model.index, &model.weights, (0, 0), false)
            .expect("No contradiction expected");
        assert_eq!(single_hop.superposition(0, 2), Some(&full()));

        let mut cascaded = grid(&model, cells);
        let mut queue = PropagationQueue::new();
        queue.add_positions([(0, 0)]);
        cascade(&mut cascaded, &model.index, &model.weights, &mut queue)
            .expect("No contradiction expected");

        assert!(queue.is_empty());
        let tiles = cascaded.resolved_tiles().expect("Every cell should resolve");
        assert_eq!(tiles, array![[Tile::Sea, Tile::Coast, Tile::Land]]);
    }

    #[test]
    fn test_queue_is_fifo() {
        let mut queue = PropagationQueue::new();
        queue.add_positions([(0, 1), (2, 3)]);
        queue.add_positions([(4, 5)]);

        assert_eq!(queue.len(), 3);
        assert_eq!(queue.take_next(), Some((0, 1)));
        assert_eq!(queue.take_next(), Some((2, 3)));
        assert_eq!(queue.take_next(), Some((4, 5)));
        assert_eq!(queue.take_next(), None);
    }
}
