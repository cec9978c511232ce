#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use rstest::rstest;

    use crate::graph::{EdgeError, Graph};
    use crate::route::{build_cycle, shuffled_order, PatrolRoute, RouteError};

    fn edge_lists(graph: &Graph<&'static str>) -> Vec<(Vec<usize>, Vec<usize>)> {
        graph
            .nodes()
            .map(|(_, n)| {
                (
                    n.incoming().iter().map(|id| id.index()).collect(),
                    n.outgoing().iter().map(|id| id.index()).collect(),
                )
            })
            .collect()
    }

    // ---- Graph ----

    #[test]
    fn test_add_edge_records_both_directions() {
        let mut graph = Graph::new();
        let a = graph.add_node("A");
        let b = graph.add_node("B");
        graph.add_edge(a, b).unwrap();

        assert_eq!(graph.outgoing(a), &[b]);
        assert_eq!(graph.incoming(b), &[a]);
        assert!(graph.incoming(a).is_empty());
        assert!(graph.outgoing(b).is_empty());
    }

    #[test]
    fn test_find_node_returns_first_inserted() {
        let mut graph = Graph::new();
        let first = graph.add_node("A");
        graph.add_node("B");
        let duplicate = graph.add_node("A");

        assert_ne!(first, duplicate, "duplicate data makes a distinct node");
        assert_eq!(graph.len(), 3);
        assert_eq!(graph.find_node(&"A"), Some(first));
        assert_eq!(graph.find_node(&"Z"), None);
    }

    #[test]
    fn test_duplicate_does_not_affect_original_edges() {
        let mut graph = Graph::new();
        let a = graph.add_node("A");
        let b = graph.add_node("B");
        graph.connect(&"A", &"B").unwrap();
        let a2 = graph.add_node("A");
        graph.connect(&"A", &"B").unwrap();

        assert_eq!(graph.outgoing(a), &[b, b], "connect by data resolves to the first A");
        assert!(graph.outgoing(a2).is_empty());
        assert_eq!(graph.incoming(b), &[a, a]);
    }

    #[test]
    fn test_edge_to_missing_data_is_soft_and_repeatable() {
        let mut graph = Graph::new();
        graph.add_node("A");
        graph.add_node("B");
        graph.connect(&"A", &"B").unwrap();
        let before = edge_lists(&graph);

        for _ in 0..3 {
            assert_eq!(graph.connect(&"A", &"missing"), Err(EdgeError::UnknownData));
            assert_eq!(graph.connect(&"missing", &"B"), Err(EdgeError::UnknownData));
        }
        assert_eq!(edge_lists(&graph), before, "failed edges must not mutate");
    }

    #[test]
    fn test_edge_with_not_found_handle_is_soft() {
        let mut graph = Graph::new();
        let a = graph.add_node("A");
        let missing = graph.find_node(&"missing");
        let before = edge_lists(&graph);

        assert_eq!(
            graph.add_edge_between(Some(a), missing),
            Err(EdgeError::MissingNode)
        );
        assert_eq!(
            graph.add_edge_between(missing, Some(a)),
            Err(EdgeError::MissingNode)
        );
        assert_eq!(edge_lists(&graph), before);
    }

    #[test]
    fn test_edge_with_foreign_handle_is_soft() {
        let mut big = Graph::new();
        big.add_node("X");
        big.add_node("Y");
        let foreign = big.add_node("Z");

        let mut graph = Graph::new();
        let a = graph.add_node("A");
        assert_eq!(graph.add_edge(a, foreign), Err(EdgeError::MissingNode));
        assert!(graph.outgoing(a).is_empty());
    }

    #[test]
    fn test_edge_with_in_range_foreign_handle_is_soft() {
        let mut other = Graph::new();
        let x = other.add_node("X");
        let y = other.add_node("Y");

        let mut graph = Graph::new();
        let a = graph.add_node("A");
        let b = graph.add_node("B");
        assert_eq!(x.index(), a.index());

        assert_eq!(graph.add_edge(a, y), Err(EdgeError::MissingNode));
        assert_eq!(graph.add_edge(x, b), Err(EdgeError::MissingNode));
        assert!(!graph.contains(x));
        assert_eq!(graph.node(y).map(|n| *n.data()), None);
        assert!(graph.outgoing(a).is_empty());
        assert!(graph.incoming(b).is_empty());
    }

    #[test]
    fn test_cloned_graph_accepts_original_handles() {
        let mut graph = Graph::new();
        let a = graph.add_node("A");
        let b = graph.add_node("B");

        let mut copy = graph.clone();
        assert_eq!(copy.add_edge(a, b), Ok(()));
        assert_eq!(copy.successor(a), Some(b));
        assert!(graph.outgoing(a).is_empty());
    }

    #[test]
    fn test_handles_stay_valid_for_later_edges() {
        let mut graph = Graph::new();
        let a = graph.add_node("A");
        let b = graph.add_node("B");
        graph.add_edge(a, b).unwrap();
        let c = graph.add_node("C");
        graph.add_edge(b, c).unwrap();
        graph.add_edge(a, c).unwrap();

        assert_eq!(graph.outgoing(a), &[b, c]);
        assert_eq!(graph.successor(a), Some(b), "traversal uses outgoing index 0");
    }

    #[test]
    fn test_walk_stops_at_dead_end() {
        let mut graph = Graph::new();
        let a = graph.add_node("A");
        let b = graph.add_node("B");
        graph.add_edge(a, b).unwrap();
        let visited: Vec<_> = graph.walk(a).collect();
        assert_eq!(visited, vec![a, b]);
    }

    // ---- Cycle ----

    #[rstest]
    #[case(1)]
    #[case(2)]
    #[case(5)]
    #[case(12)]
    fn test_cycle_property(#[case] n: usize) {
        let waypoints: Vec<u32> = (0..n as u32).collect();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let order = shuffled_order(&waypoints, &mut rng);
        let graph = build_cycle(&order);

        assert_eq!(graph.len(), n);
        for (id, node) in graph.nodes() {
            assert_eq!(node.outgoing().len(), 1, "node {id:?} outgoing");
            assert_eq!(node.incoming().len(), 1, "node {id:?} incoming");

            let back = graph.walk(id).nth(n);
            assert_eq!(back, Some(id), "n steps from {id:?} must return to it");
            let distinct: std::collections::HashSet<_> = graph.walk(id).take(n).collect();
            assert_eq!(distinct.len(), n, "a lap visits every node once");
        }
    }

    #[test]
    fn test_permuted_cycle_edges() {
        let graph = build_cycle(&["B", "C", "A"]);
        let b = graph.find_node(&"B").unwrap();
        let c = graph.find_node(&"C").unwrap();
        let a = graph.find_node(&"A").unwrap();

        assert_eq!(graph.outgoing(b), &[c]);
        assert_eq!(graph.outgoing(c), &[a]);
        assert_eq!(graph.outgoing(a), &[b]);

        let visited: Vec<&str> = graph
            .walk(b)
            .take(7)
            .map(|id| *graph.data(id).unwrap())
            .collect();
        assert_eq!(visited, vec!["B", "C", "A", "B", "C", "A", "B"]);

        // Restartable: a second walk yields the same sequence.
        let again: Vec<_> = graph.walk(b).take(7).collect();
        let first: Vec<_> = graph.walk(b).take(7).collect();
        assert_eq!(again, first);
    }

    #[test]
    fn test_empty_cycle() {
        let graph = build_cycle::<u32>(&[]);
        assert!(graph.is_empty());
        let route = PatrolRoute::<u32>::from_order(&[]);
        assert!(route.target().is_none());
        assert!(route.lap().is_empty());
    }

    #[test]
    fn test_shuffled_order_is_permutation_and_seeded() {
        let waypoints: Vec<u32> = (0..10).collect();
        let a = shuffled_order(&waypoints, &mut ChaCha8Rng::seed_from_u64(99));
        let b = shuffled_order(&waypoints, &mut ChaCha8Rng::seed_from_u64(99));
        assert_eq!(a, b, "same seed, same permutation");

        let mut sorted = a.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, waypoints);
    }

    // ---- Route ----

    #[test]
    fn test_route_starts_at_first_of_order() {
        let route = PatrolRoute::from_order(&["B", "C", "A"]);
        assert_eq!(route.target(), Some(&"B"));
        assert_eq!(route.lap(), vec![&"B", &"C", &"A"]);
    }

    #[test]
    fn test_route_reached_targets_successor_of_entered_zone() {
        let mut route = PatrolRoute::from_order(&["B", "C", "A"]);
        assert_eq!(route.reached(&"B"), Ok(&"C"));
        assert_eq!(route.target(), Some(&"C"));
        // Entering a zone other than the current target still advances from it.
        assert_eq!(route.reached(&"C"), Ok(&"A"));
        assert_eq!(route.reached(&"B"), Ok(&"C"));
        assert_eq!(route.target(), Some(&"C"));
    }

    #[test]
    fn test_route_unknown_zone_keeps_target() {
        let mut route = PatrolRoute::from_order(&["B", "C", "A"]);
        assert_eq!(route.reached(&"Q"), Err(RouteError::UnknownZone));
        assert_eq!(route.target(), Some(&"B"));
    }

    #[test]
    fn test_route_dead_end_keeps_target() {
        let mut graph = Graph::new();
        graph.add_node("A");
        graph.add_node("B");
        graph.connect(&"A", &"B").unwrap();
        let mut route = PatrolRoute::new(graph, &"A");

        assert_eq!(route.reached(&"A"), Ok(&"B"));
        assert_eq!(route.reached(&"B"), Err(RouteError::DeadEnd));
        assert_eq!(route.target(), Some(&"B"));
    }

    #[test]
    fn test_route_reset() {
        let mut route = PatrolRoute::from_order(&["B", "C", "A"]);
        route.reached(&"C").unwrap();
        assert_eq!(route.target(), Some(&"A"));
        route.reset();
        assert_eq!(route.target(), Some(&"B"));
    }

    #[test]
    fn test_single_waypoint_self_loop() {
        let mut route = PatrolRoute::from_order(&["A"]);
        let a = route.graph().find_node(&"A").unwrap();
        assert_eq!(route.graph().outgoing(a), &[a]);
        assert_eq!(route.reached(&"A"), Ok(&"A"));
    }

    #[test]
    fn test_random_route_covers_all_waypoints() {
        let waypoints = [10u32, 20, 30, 40];
        let route = PatrolRoute::random(&waypoints, &mut ChaCha8Rng::seed_from_u64(3));
        let mut lap: Vec<u32> = route.lap().into_iter().copied().collect();
        assert_eq!(lap.len(), 4);
        assert_eq!(route.target().copied(), Some(lap[0]));
        lap.sort_unstable();
        assert_eq!(lap, waypoints);
    }
}
