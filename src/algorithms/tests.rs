#[cfg(test)]
mod tests {
    use crate::algorithms::sampling::{ForestFireSampler, RandomWalkWithRestart};
    use crate::algorithms::{connected_components, explorer_for, extract_largest_component, AlgorithmId};
    use crate::error::GraphError;
    use crate::graph::{CanonicalGraph, RawGraph};
    use crate::source::SyntheticKind;
    use petgraph::graph::{NodeIndex, UnGraph};
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    /// Ring of `a0..a149` with chords, and a separate ring of `b0..b9`
    /// whose edges are inserted first.
    fn create_two_component_graph() -> RawGraph {
        let mut graph = RawGraph::new();
        for i in 0..10 {
            graph.add_edge(&format!("b{}", i), &format!("b{}", (i + 1) % 10));
        }
        for i in 0..150 {
            graph.add_edge(&format!("a{}", i), &format!("a{}", (i + 1) % 150));
            if i % 7 == 0 {
                graph.add_edge(&format!("a{}", i), &format!("a{}", (i + 31) % 150));
            }
        }
        graph
    }

    fn create_test_graph(nodes: usize, seed: u64) -> CanonicalGraph {
        let kind = SyntheticKind::Random { nodes, edge_probability: 0.03 };
        let raw = kind.generate(&mut Pcg64::seed_from_u64(seed)).unwrap();
        extract_largest_component(&raw).unwrap()
    }

    fn petgraph_oracle(raw: &RawGraph) -> UnGraph<(), ()> {
        let mut graph = UnGraph::<(), ()>::new_undirected();
        for _ in 0..raw.node_count() {
            graph.add_node(());
        }
        for &(u, v) in raw.edges() {
            graph.add_edge(NodeIndex::new(u), NodeIndex::new(v), ());
        }
        graph
    }

    #[test]
    fn test_largest_component_is_renumbered() {
        let raw = create_two_component_graph();
        let graph = extract_largest_component(&raw).unwrap();

        assert_eq!(graph.node_count(), 150);
        assert_eq!(graph.original_id(0), Some("a0"));
        assert_eq!(graph.original_id(1), Some("a1"));
        assert_eq!(graph.original_id(2), Some("a31"));
        assert_eq!(graph.original_id(150), None);
        assert!((0..150).all(|n| graph.original_id(n).is_some_and(|id| id.starts_with('a'))));
        for node in 0..150 {
            assert!(graph.degree(node) >= 2);
            assert!(graph.neighbors(node).iter().all(|&n| n < 150));
        }
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let raw = create_two_component_graph();
        let a = extract_largest_component(&raw).unwrap();
        let b = extract_largest_component(&raw).unwrap();
        assert_eq!(a.indexes, b.indexes);
    }

    #[test]
    fn test_largest_component_tie_goes_to_first_encountered() {
        let raw = RawGraph::from_edges([("x", "y"), ("y", "z"), ("p", "q"), ("q", "r")]);
        let graph = extract_largest_component(&raw).unwrap();
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.original_id(0), Some("x"));
    }

    #[test]
    fn test_isolated_nodes_form_components() {
        let mut raw = RawGraph::from_edges([("a", "b")]);
        raw.add_node("lonely");
        let components = connected_components(&raw);
        assert_eq!(components, vec![vec![0, 1], vec![2]]);
    }

    #[test]
    fn test_components_match_petgraph() {
        for seed in 0..5 {
            let raw = SyntheticKind::Random { nodes: 300, edge_probability: 0.004 }
                .generate(&mut Pcg64::seed_from_u64(seed))
                .unwrap();
            let oracle = petgraph_oracle(&raw);

            let components = connected_components(&raw);
            assert_eq!(components.len(), petgraph::algo::connected_components(&oracle));

            let oracle_largest = petgraph::algo::tarjan_scc(&oracle)
                .iter()
                .map(Vec::len)
                .max()
                .unwrap();
            let graph = extract_largest_component(&raw).unwrap();
            assert_eq!(graph.node_count(), oracle_largest);
        }
    }

    #[test]
    fn test_explorers_respect_budget_and_stay_connected() {
        let graph = create_test_graph(200, 1);
        let mut rng = Pcg64::seed_from_u64(99);

        for id in AlgorithmId::ALL {
            let explorer = explorer_for(id);
            for seed in [0, graph.node_count() / 2, graph.node_count() - 1] {
                for budget in [1, 12, 47] {
                    let visited = explorer.explore(&graph, seed, budget, &mut rng);

                    assert_eq!(visited.len(), budget.min(graph.node_count()), "{} budget {}", id, budget);
                    assert_eq!(visited[0], seed);

                    let mut seen = std::collections::HashSet::new();
                    for (i, &node) in visited.iter().enumerate() {
                        assert!(seen.insert(node), "{} revisited {}", id, node);
                        if i > 0 {
                            let attached = graph.neighbors(node).iter().any(|n| visited[..i].contains(n));
                            assert!(attached, "{} added {} with no visited neighbor", id, node);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_explorers_stop_when_component_exhausted() {
        let raw = RawGraph::from_edges((0..9).map(|i| (i.to_string(), (i + 1).to_string())));
        let graph = extract_largest_component(&raw).unwrap();
        let mut rng = Pcg64::seed_from_u64(3);

        for id in AlgorithmId::ALL {
            let visited = explorer_for(id).explore(&graph, 4, 47, &mut rng);
            assert_eq!(visited.len(), 10, "{}", id);
        }
    }

    #[test]
    fn test_single_node_graph() {
        let mut raw = RawGraph::new();
        raw.add_node("only");
        let graph = extract_largest_component(&raw).unwrap();
        let mut rng = Pcg64::seed_from_u64(0);

        for id in AlgorithmId::ALL {
            assert_eq!(explorer_for(id).explore(&graph, 0, 20, &mut rng), vec![0]);
        }
    }

    #[test]
    fn test_explorers_are_deterministic_per_rng() {
        let graph = create_test_graph(150, 2);
        for id in AlgorithmId::ALL {
            let explorer = explorer_for(id);
            let a = explorer.explore(&graph, 5, 30, &mut Pcg64::seed_from_u64(17));
            let b = explorer.explore(&graph, 5, 30, &mut Pcg64::seed_from_u64(17));
            assert_eq!(a, b, "{}", id);
        }
    }

    #[test]
    fn test_explorer_names_match_ids() {
        for id in AlgorithmId::ALL {
            assert_eq!(explorer_for(id).name(), id.as_str());
            assert!(!explorer_for(id).description().is_empty());
        }
    }

    #[test]
    fn test_algorithm_id_parsing() {
        assert_eq!("rwr".parse::<AlgorithmId>().unwrap(), AlgorithmId::RandomWalkWithRestart);
        assert_eq!("bfs".parse::<AlgorithmId>().unwrap(), AlgorithmId::Snowball);
        assert_eq!("forest_fire".parse::<AlgorithmId>().unwrap(), AlgorithmId::ForestFire);
        assert!(matches!("pagerank".parse::<AlgorithmId>(), Err(GraphError::InvalidParameter(_))));
        for id in AlgorithmId::ALL {
            assert_eq!(id.to_string().parse::<AlgorithmId>().unwrap(), id);
        }
    }

    #[test]
    fn test_sampler_parameter_validation() {
        assert!(RandomWalkWithRestart::new(1.0).is_err());
        assert!(ForestFireSampler::new(-0.1).is_err());
        assert_eq!(RandomWalkWithRestart::new(0.25).unwrap().restart_probability(), 0.25);
        assert!(ForestFireSampler::new(0.7).is_ok());
    }
}
