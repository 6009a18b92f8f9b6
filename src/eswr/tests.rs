#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use crate::algorithms::{extract_largest_component, AlgorithmId, Explorer};
    use crate::eswr::{draw_sample, induced_subgraph, sample_seed, EswrEngine, SamplerPool};
    use crate::error::GraphError;
    use crate::graph::{CanonicalGraph, RawGraph};
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    /// Connected 200-node graph: a ring with a deterministic set of chords.
    fn create_test_graph() -> CanonicalGraph {
        let mut raw = RawGraph::new();
        for i in 0..200usize {
            raw.add_edge(&i.to_string(), &((i + 1) % 200).to_string());
            raw.add_edge(&i.to_string(), &((i * 37 + 11) % 200).to_string());
        }
        extract_largest_component(&raw).unwrap()
    }

    fn default_pool(range: std::ops::Range<usize>) -> SamplerPool {
        SamplerPool::build(
            &[
                AlgorithmId::MetropolisHastingsRandomWalk,
                AlgorithmId::Diffusion,
                AlgorithmId::DepthFirst,
            ],
            range,
        )
        .unwrap()
    }

    /// Explorer that returns the seed only.
    struct SeedOnly;

    impl Explorer for SeedOnly {
        fn explore(&self, _graph: &CanonicalGraph, seed: usize, _budget: usize, _rng: &mut Pcg64) -> Vec<usize> {
            vec![seed]
        }

        fn name(&self) -> &'static str {
            "seed_only"
        }
    }

    /// Explorer that repeats nodes, strays outside the graph and overshoots its budget.
    struct Sloppy;

    impl Explorer for Sloppy {
        fn explore(&self, graph: &CanonicalGraph, seed: usize, budget: usize, _rng: &mut Pcg64) -> Vec<usize> {
            let mut nodes = vec![seed, seed, graph.node_count() + 5];
            nodes.extend(graph.neighbors(seed).iter().copied());
            nodes.extend(graph.neighbors(seed).iter().copied());
            nodes.extend(0..(budget * 3).min(graph.node_count()));
            nodes
        }

        fn name(&self) -> &'static str {
            "sloppy"
        }
    }

    /// Explorer that returns nothing usable.
    struct Lost;

    impl Explorer for Lost {
        fn explore(&self, graph: &CanonicalGraph, _seed: usize, _budget: usize, _rng: &mut Pcg64) -> Vec<usize> {
            vec![graph.node_count()]
        }

        fn name(&self) -> &'static str {
            "lost"
        }
    }

    #[test]
    fn test_pool_is_full_cross_product() {
        let pool = default_pool(12..48);
        assert_eq!(pool.len(), 3 * 36);
        assert_eq!(pool.max_budget(), 47);
        assert_eq!(pool.budget_range(), 12..48);
        assert_eq!(
            pool.algorithms(),
            vec![
                AlgorithmId::MetropolisHastingsRandomWalk,
                AlgorithmId::Diffusion,
                AlgorithmId::DepthFirst
            ]
        );

        let diffusion_specs = pool.specs().iter().filter(|s| s.algorithm == AlgorithmId::Diffusion).count();
        assert_eq!(diffusion_specs, 36);
        assert!(pool.specs().iter().all(|s| (12..48).contains(&s.budget)));
    }

    #[test]
    fn test_pool_rejects_bad_input() {
        assert!(matches!(SamplerPool::build(&[], 12..48), Err(GraphError::InvalidParameter(_))));
        assert!(SamplerPool::build(&[AlgorithmId::Snowball], 0..10).is_err());
        assert!(SamplerPool::build(&[AlgorithmId::Snowball], 10..10).is_err());
        assert!(SamplerPool::build(&[AlgorithmId::Snowball, AlgorithmId::Snowball], 1..5).is_err());
    }

    #[test]
    fn test_pool_choose_covers_every_algorithm() {
        let pool = SamplerPool::build(&AlgorithmId::ALL, 5..7).unwrap();
        let mut rng = Pcg64::seed_from_u64(1);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..500 {
            seen.insert(pool.choose(&mut rng).algorithm);
        }
        assert_eq!(seen.len(), AlgorithmId::ALL.len());
    }

    #[test]
    fn test_generate_returns_exactly_n() {
        let graph = create_test_graph();
        let pool = default_pool(12..48);
        let engine = EswrEngine::new(4);
        let mut rng = Pcg64::seed_from_u64(0);

        for n in [0, 1, 7, 50] {
            assert_eq!(engine.generate(&graph, n, &pool, &mut rng).unwrap().len(), n);
        }
    }

    #[test]
    fn test_200_node_graph_samples_within_budget() {
        let graph = create_test_graph();
        assert_eq!(graph.node_count(), 200);
        let pool = default_pool(12..48);
        let samples = EswrEngine::new(4)
            .generate(&graph, 50, &pool, &mut Pcg64::seed_from_u64(2024))
            .unwrap();

        assert_eq!(samples.len(), 50);
        for sample in &samples {
            let k = sample.num_nodes();
            assert!((1..=47).contains(&k), "sample has {} nodes", k);
            assert_eq!(sample.source_nodes.len(), k);
            assert!(sample.edge_index.iter().all(|&[u, v]| (u as usize) < k && (v as usize) < k));
            assert_eq!(sample.label, None);
        }
    }

    #[test]
    fn test_generation_is_deterministic_across_worker_counts() {
        let graph = create_test_graph();
        let pool = SamplerPool::build(&AlgorithmId::ALL, 12..48).unwrap();

        let serial = EswrEngine::serial().generate_from_seed(&graph, 40, &pool, 77).unwrap();
        let parallel = EswrEngine::new(4).generate_from_seed(&graph, 40, &pool, 77).unwrap();
        let again = EswrEngine::new(3).generate(&graph, 40, &pool, &mut Pcg64::seed_from_u64(5)).unwrap();
        let again_too = EswrEngine::new(1).generate(&graph, 40, &pool, &mut Pcg64::seed_from_u64(5)).unwrap();

        assert_eq!(serial, parallel);
        assert_eq!(again, again_too);
        assert_ne!(serial, again);
    }

    #[test]
    fn test_sample_index_maps_to_fixed_seed() {
        let graph = create_test_graph();
        let pool = default_pool(12..48);
        let samples = EswrEngine::new(2).generate_from_seed(&graph, 10, &pool, 123).unwrap();

        for (i, sample) in samples.iter().enumerate() {
            let single = draw_sample(&graph, &pool, sample_seed(123, i)).unwrap();
            assert_eq!(&single, sample);
        }
        assert_ne!(sample_seed(123, 0), sample_seed(123, 1));
        assert_ne!(sample_seed(123, 0), sample_seed(124, 0));
    }

    #[test]
    fn test_small_graph_gives_under_budget_samples() {
        let raw = RawGraph::from_edges([("a", "b"), ("b", "c"), ("c", "d")]);
        let graph = extract_largest_component(&raw).unwrap();
        let pool = default_pool(20..30);

        let samples = EswrEngine::serial().generate_from_seed(&graph, 5, &pool, 9).unwrap();
        assert!(samples.iter().all(|s| s.num_nodes() == 4));
    }

    #[test]
    fn test_induced_subgraph_relabels_in_visit_order() {
        let raw = RawGraph::from_edges([("a", "b"), ("b", "c"), ("c", "d"), ("a", "d")]);
        let graph = extract_largest_component(&raw).unwrap();

        // Visit d, b, a: edges a-b and a-d are induced, b-d is not an edge
        let sample = induced_subgraph(&graph, &[3, 1, 0]);
        assert_eq!(sample.num_nodes(), 3);
        assert_eq!(sample.source_nodes, vec![3, 1, 0]);

        let mut edges = sample.edge_index.clone();
        edges.sort();
        assert_eq!(edges, vec![[0, 2], [1, 2], [2, 0], [2, 1]]);
        assert_eq!(sample.edge_attrs.rows(), 4);
        assert_eq!(sample.node_attrs.width(), 0);
    }

    #[test]
    fn test_isolated_nodes_are_retained() {
        let raw = RawGraph::from_edges([("hub", "x"), ("hub", "y"), ("hub", "z")]);
        let graph = extract_largest_component(&raw).unwrap();

        let sample = induced_subgraph(&graph, &[1, 2, 3]);
        assert_eq!(sample.num_nodes(), 3);
        assert_eq!(sample.num_edges(), 0);
        assert_eq!(sample.isolated_nodes(), vec![0, 1, 2]);
    }

    #[test]
    fn test_custom_explorer_registration() {
        let graph = create_test_graph();
        let pool = SamplerPool::with_explorers(
            vec![(AlgorithmId::Snowball, Arc::new(SeedOnly) as Arc<dyn Explorer>)],
            10..20,
        )
        .unwrap();
        assert_eq!(pool.explorer(AlgorithmId::Snowball).map(|e| e.name()), Some("seed_only"));
        assert!(pool.explorer(AlgorithmId::Diffusion).is_none());

        let samples = EswrEngine::new(2).generate_from_seed(&graph, 8, &pool, 1).unwrap();
        assert!(samples.iter().all(|s| s.num_nodes() == 1 && s.num_edges() == 0));
    }

    #[test]
    fn test_misbehaving_explorer_output_is_normalized() {
        let graph = create_test_graph();
        let pool = SamplerPool::with_explorers(
            vec![(AlgorithmId::DepthFirst, Arc::new(Sloppy) as Arc<dyn Explorer>)],
            4..9,
        )
        .unwrap();

        for i in 0..20 {
            let sample = draw_sample(&graph, &pool, sample_seed(3, i)).unwrap();
            let k = sample.num_nodes();
            assert!((1..=8).contains(&k), "sample has {} nodes", k);

            let mut distinct = sample.source_nodes.clone();
            distinct.sort();
            distinct.dedup();
            assert_eq!(distinct.len(), k);
            assert!(sample.source_nodes.iter().all(|&n| (n as usize) < graph.node_count()));
            assert!(sample.edge_index.iter().all(|&[u, v]| (u as usize) < k && (v as usize) < k));
            // The seed keeps local id 0 and its neighbors follow it
            assert!(sample.edge_index.iter().any(|&[u, _]| u == 0));
        }
    }

    #[test]
    fn test_explorer_without_nodes_is_an_error() {
        let graph = create_test_graph();
        let pool = SamplerPool::with_explorers(
            vec![(AlgorithmId::Diffusion, Arc::new(Lost) as Arc<dyn Explorer>)],
            4..9,
        )
        .unwrap();

        let result = EswrEngine::new(2).generate_from_seed(&graph, 4, &pool, 0);
        assert!(matches!(result, Err(GraphError::Algorithm(_))));
    }
}
