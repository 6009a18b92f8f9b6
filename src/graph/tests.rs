#[cfg(test)]
mod tests {
    use crate::error::GraphError;
    use crate::graph::{CanonicalGraph, GraphIndexes, RawGraph};

    fn create_test_graph() -> RawGraph {
        let mut graph = RawGraph::from_edges([("A", "B"), ("A", "C"), ("B", "C"), ("C", "D"), ("D", "E")]);
        graph.set_label("A", 1).unwrap();
        graph.set_label("E", 2).unwrap();
        graph
    }

    #[test]
    fn test_raw_graph_construction() {
        let graph = create_test_graph();

        assert_eq!(graph.node_count(), 5);
        assert_eq!(graph.edge_count(), 5);
        assert!(graph.has_node("A"));
        assert!(!graph.has_node("Z"));
        assert_eq!(graph.node_index("C"), Some(2));
        assert_eq!(graph.node_id(4), Some("E"));
        assert_eq!(graph.label_of("A"), Some(1));
        assert_eq!(graph.label_of("B"), None);
        assert!(graph.has_labels());
    }

    #[test]
    fn test_raw_graph_normalizes_edges() {
        let mut graph = RawGraph::new();
        assert!(graph.add_edge("x", "y"));
        assert!(!graph.add_edge("y", "x"));
        assert!(!graph.add_edge("x", "y"));
        assert!(!graph.add_edge("z", "z"));

        assert_eq!(graph.edge_count(), 1);
        // Self loop still declares the node
        assert_eq!(graph.node_count(), 3);
    }

    #[test]
    fn test_set_label_unknown_node() {
        let mut graph = RawGraph::new();
        graph.add_node("a");
        assert!(matches!(graph.set_label("b", 0), Err(GraphError::NodeNotFound(_))));
    }

    #[test]
    fn test_graph_indexes_csr() {
        let indexes = GraphIndexes::build(4, &[(0, 1), (0, 2), (2, 3)]).unwrap();

        assert_eq!(indexes.node_count, 4);
        assert_eq!(indexes.edge_count, 3);
        assert_eq!(indexes.neighbors(0), &[1, 2]);
        assert_eq!(indexes.neighbors(2), &[0, 3]);
        assert_eq!(indexes.degree(3), 1);
        assert!(indexes.neighbors(9).is_empty());
        assert!(!indexes.has_node(4));
    }

    #[test]
    fn test_graph_indexes_rejects_out_of_range_edge() {
        let result = GraphIndexes::build(2, &[(0, 2)]);
        assert!(matches!(result, Err(GraphError::GraphConstruction(_))));
    }

    #[test]
    fn test_canonical_graph_from_raw() {
        let graph = CanonicalGraph::from_raw(&create_test_graph()).unwrap();

        assert_eq!(graph.node_count(), 5);
        assert_eq!(graph.edge_count(), 5);
        assert_eq!(graph.original_id(0), Some("A"));
        assert_eq!(graph.degree(2), 3);
        assert_eq!(graph.label(0), Some(1));
        assert_eq!(graph.label(4), Some(2));
        assert_eq!(graph.label(1), None);
        assert!(graph.has_labels());

        let expected_density = 2.0 * 5.0 / (5.0 * 4.0);
        assert!((graph.density() - expected_density).abs() < 1e-12);
    }

    #[test]
    fn test_canonical_graph_neighbors_are_symmetric() {
        let graph = CanonicalGraph::from_raw(&create_test_graph()).unwrap();
        for u in 0..graph.node_count() {
            for &v in graph.neighbors(u) {
                assert!(graph.neighbors(v).contains(&u), "{} -> {} missing reverse", u, v);
            }
        }
    }

    #[test]
    fn test_empty_graph() {
        let result = CanonicalGraph::from_raw(&RawGraph::new());
        assert!(matches!(result, Err(GraphError::EmptyGraph)));
    }
}
