use crate::error::Result;
use crate::graph::{GraphIndexes, RawGraph};

/// Largest connected component of a `RawGraph`, renumbered to `0..N`.
///
/// Only `algorithms::components::extract_largest_component` builds these, so
/// every instance is connected. Once built it is never mutated and can be
/// shared across sampling threads by reference.
#[derive(Debug, Clone)]
pub struct CanonicalGraph {
    pub indexes: GraphIndexes,
    original_ids: Vec<String>,
    labels: Vec<Option<i64>>,
    labeled: bool,
}

impl CanonicalGraph {
    pub(crate) fn from_parts(
        original_ids: Vec<String>,
        edges: &[(usize, usize)],
        labels: Vec<Option<i64>>,
    ) -> Result<Self> {
        let indexes = GraphIndexes::build(original_ids.len(), edges)?;
        let labeled = labels.iter().any(Option::is_some);

        Ok(CanonicalGraph {
            indexes,
            original_ids,
            labels,
            labeled,
        })
    }

    /// Shorthand for extracting the largest component of `raw`.
    pub fn from_raw(raw: &RawGraph) -> Result<Self> {
        crate::algorithms::components::extract_largest_component(raw)
    }

    pub fn node_count(&self) -> usize {
        self.indexes.node_count
    }

    pub fn edge_count(&self) -> usize {
        self.indexes.edge_count
    }

    /// Edge density of the undirected graph.
    pub fn density(&self) -> f64 {
        let n = self.node_count() as f64;
        let m = self.edge_count() as f64;

        if n <= 1.0 {
            0.0
        } else {
            2.0 * m / (n * (n - 1.0))
        }
    }

    pub fn neighbors(&self, node: usize) -> &[usize] {
        self.indexes.neighbors(node)
    }

    pub fn degree(&self, node: usize) -> usize {
        self.indexes.degree(node)
    }

    pub fn has_node(&self, node: usize) -> bool {
        self.indexes.has_node(node)
    }

    /// Identifier the node carried in the source graph.
    pub fn original_id(&self, node: usize) -> Option<&str> {
        self.original_ids.get(node).map(String::as_str)
    }

    pub fn has_labels(&self) -> bool {
        self.labeled
    }

    pub fn label(&self, node: usize) -> Option<i64> {
        self.labels.get(node).copied().flatten()
    }
}
