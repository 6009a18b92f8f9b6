use crate::error::{GraphError, Result};

/// Compressed sparse row adjacency over contiguous node indices `0..n`.
///
/// Every undirected edge is stored in both directions. Neighbor lists keep
/// the order in which edges were supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphIndexes {
    offsets: Vec<usize>,
    targets: Vec<usize>,
    pub node_count: usize,
    pub edge_count: usize,
}

impl GraphIndexes {
    pub fn build(node_count: usize, edges: &[(usize, usize)]) -> Result<Self> {
        let mut degrees = vec![0usize; node_count];
        for &(u, v) in edges {
            if u >= node_count || v >= node_count {
                return Err(GraphError::graph_construction(format!(
                    "edge ({}, {}) references a node outside 0..{}",
                    u, v, node_count
                )));
            }
            degrees[u] += 1;
            degrees[v] += 1;
        }

        let mut offsets = Vec::with_capacity(node_count + 1);
        offsets.push(0);
        for degree in &degrees {
            let last = offsets[offsets.len() - 1];
            offsets.push(last + degree);
        }

        let mut cursor = offsets[..node_count].to_vec();
        let mut targets = vec![0usize; offsets[node_count]];
        for &(u, v) in edges {
            targets[cursor[u]] = v;
            cursor[u] += 1;
            targets[cursor[v]] = u;
            cursor[v] += 1;
        }

        Ok(GraphIndexes {
            offsets,
            targets,
            node_count,
            edge_count: edges.len(),
        })
    }

    pub fn neighbors(&self, node: usize) -> &[usize] {
        if node >= self.node_count {
            return &[];
        }
        &self.targets[self.offsets[node]..self.offsets[node + 1]]
    }

    pub fn degree(&self, node: usize) -> usize {
        self.neighbors(node).len()
    }

    pub fn has_node(&self, node: usize) -> bool {
        node < self.node_count
    }
}
