use hashbrown::HashMap;
use crate::error::{GraphError, Result};
use crate::graph::{CanonicalGraph, RawGraph};

/// Union-Find (Disjoint Set) over contiguous node indices
#[derive(Debug)]
struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<usize>,
    size: Vec<usize>,
}

impl UnionFind {
    fn new(n: usize) -> Self {
        UnionFind {
            parent: (0..n).collect(),
            rank: vec![0; n],
            size: vec![1; n],
        }
    }

    fn find(&mut self, node: usize) -> usize {
        let mut root = node;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        // Path compression
        let mut current = node;
        while self.parent[current] != root {
            let next = self.parent[current];
            self.parent[current] = root;
            current = next;
        }

        root
    }

    fn union(&mut self, a: usize, b: usize) -> bool {
        let root_a = self.find(a);
        let root_b = self.find(b);
        if root_a == root_b {
            return false;
        }

        // Union by rank
        let (new_root, old_root) = match self.rank[root_a].cmp(&self.rank[root_b]) {
            std::cmp::Ordering::Greater => (root_a, root_b),
            std::cmp::Ordering::Less => (root_b, root_a),
            std::cmp::Ordering::Equal => {
                self.rank[root_a] += 1;
                (root_a, root_b)
            }
        };

        self.parent[old_root] = new_root;
        self.size[new_root] += self.size[old_root];
        true
    }
}

/// Connected components of a raw graph, listed in order of their first node
/// in the graph's enumeration order. Each component lists its nodes in
/// enumeration order too.
pub fn connected_components(graph: &RawGraph) -> Vec<Vec<usize>> {
    let mut uf = UnionFind::new(graph.node_count());
    for &(u, v) in graph.edges() {
        uf.union(u, v);
    }

    let mut slot_of_root: HashMap<usize, usize> = HashMap::new();
    let mut components: Vec<Vec<usize>> = Vec::new();
    for node in 0..graph.node_count() {
        let root = uf.find(node);
        let slot = *slot_of_root.entry(root).or_insert_with(|| {
            components.push(Vec::with_capacity(uf.size[root]));
            components.len() - 1
        });
        components[slot].push(node);
    }

    components
}

/// Select the largest connected component and renumber it to `0..N`.
///
/// Ties go to the component whose first node comes earliest in the
/// enumeration order. New identifiers follow that same order, so the result
/// is fully determined by the input graph.
pub fn extract_largest_component(graph: &RawGraph) -> Result<CanonicalGraph> {
    if graph.is_empty() {
        return Err(GraphError::EmptyGraph);
    }

    let components = connected_components(graph);
    let mut largest = &components[0];
    for component in &components[1..] {
        if component.len() > largest.len() {
            largest = component;
        }
    }

    let mut remap: Vec<Option<usize>> = vec![None; graph.node_count()];
    let mut original_ids = Vec::with_capacity(largest.len());
    let mut labels = Vec::with_capacity(largest.len());
    for (new_id, &old_id) in largest.iter().enumerate() {
        remap[old_id] = Some(new_id);
        let node_id = graph
            .node_id(old_id)
            .ok_or_else(|| GraphError::node_not_found(old_id.to_string()))?;
        original_ids.push(node_id.to_string());
        labels.push(graph.label(old_id));
    }

    let edges: Vec<(usize, usize)> = graph
        .edges()
        .iter()
        .filter_map(|&(u, v)| Some((remap[u]?, remap[v]?)))
        .collect();

    log::debug!(
        "Largest component: {} of {} nodes, {} of {} edges ({} components)",
        largest.len(),
        graph.node_count(),
        edges.len(),
        graph.edge_count(),
        components.len()
    );

    CanonicalGraph::from_parts(original_ids, &edges, labels)
}

