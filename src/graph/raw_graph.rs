use hashbrown::{HashMap, HashSet};
use indexmap::IndexSet;
use crate::error::{GraphError, Result};

/// Undirected source graph as handed over by a `GraphSource`.
///
/// Node identifiers are strings; their enumeration order is the order in which
/// they were first added, which makes everything derived from a `RawGraph`
/// deterministic for a given input file or generator seed.
#[derive(Debug, Clone, Default)]
pub struct RawGraph {
    nodes: IndexSet<String>,
    edges: Vec<(usize, usize)>,
    edge_set: HashSet<(usize, usize)>,
    labels: HashMap<usize, i64>,
}

impl RawGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from `(source, target)` pairs. Self loops and repeated
    /// edges (in either direction) are dropped.
    pub fn from_edges<I, S>(edges: I) -> Self
    where
        I: IntoIterator<Item = (S, S)>,
        S: AsRef<str>,
    {
        let mut graph = Self::new();
        for (source, target) in edges {
            graph.add_edge(source.as_ref(), target.as_ref());
        }
        graph
    }

    /// Add a node and return its enumeration index. Adding an existing node is a no-op.
    pub fn add_node(&mut self, node_id: &str) -> usize {
        match self.nodes.get_index_of(node_id) {
            Some(idx) => idx,
            None => self.nodes.insert_full(node_id.to_string()).0,
        }
    }

    /// Add an undirected edge. Returns `false` when the edge was normalized away.
    pub fn add_edge(&mut self, source: &str, target: &str) -> bool {
        let u = self.add_node(source);
        let v = self.add_node(target);
        if u == v {
            return false;
        }

        let key = if u < v { (u, v) } else { (v, u) };
        if !self.edge_set.insert(key) {
            return false;
        }

        self.edges.push((u, v));
        true
    }

    pub fn set_label(&mut self, node_id: &str, label: i64) -> Result<()> {
        let idx = self
            .nodes
            .get_index_of(node_id)
            .ok_or_else(|| GraphError::node_not_found(node_id))?;
        self.labels.insert(idx, label);
        Ok(())
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn has_node(&self, node_id: &str) -> bool {
        self.nodes.contains(node_id)
    }

    /// Node identifiers in enumeration order.
    pub fn node_ids(&self) -> impl Iterator<Item = &String> {
        self.nodes.iter()
    }

    pub fn node_id(&self, idx: usize) -> Option<&str> {
        self.nodes.get_index(idx).map(String::as_str)
    }

    pub fn node_index(&self, node_id: &str) -> Option<usize> {
        self.nodes.get_index_of(node_id)
    }

    /// Edges as enumeration-index pairs, in insertion order.
    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    pub fn has_labels(&self) -> bool {
        !self.labels.is_empty()
    }

    pub fn label(&self, idx: usize) -> Option<i64> {
        self.labels.get(&idx).copied()
    }

    pub fn label_of(&self, node_id: &str) -> Option<i64> {
        self.node_index(node_id).and_then(|idx| self.label(idx))
    }
}
