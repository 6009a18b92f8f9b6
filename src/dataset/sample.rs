/// Row-major matrix of per-node or per-edge attribute vectors.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AttrMatrix {
    rows: usize,
    width: usize,
    data: Vec<f32>,
}

impl AttrMatrix {
    pub fn zeros(rows: usize, width: usize) -> Self {
        Self {
            rows,
            width,
            data: vec![0.0; rows * width],
        }
    }

    /// Matrix with every row set to `row`.
    pub fn filled(rows: usize, row: &[f32]) -> Self {
        let mut data = Vec::with_capacity(rows * row.len());
        for _ in 0..rows {
            data.extend_from_slice(row);
        }
        Self {
            rows,
            width: row.len(),
            data,
        }
    }

    pub(crate) fn from_raw(rows: usize, width: usize, data: Vec<f32>) -> Option<Self> {
        (data.len() == rows * width).then_some(Self { rows, width, data })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn row(&self, i: usize) -> Option<&[f32]> {
        if i >= self.rows {
            return None;
        }
        Some(&self.data[i * self.width..(i + 1) * self.width])
    }

    pub fn row_mut(&mut self, i: usize) -> Option<&mut [f32]> {
        if i >= self.rows {
            return None;
        }
        Some(&mut self.data[i * self.width..(i + 1) * self.width])
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[f32]> {
        (0..self.rows).map(move |i| &self.data[i * self.width..(i + 1) * self.width])
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }
}

/// Induced subgraph drawn from a `CanonicalGraph`.
///
/// Nodes are numbered `0..num_nodes` in order of first visit. `edge_index`
/// lists every undirected edge once per direction, and `edge_attrs` has one
/// row per `edge_index` entry. Nodes without incident edges still own a row in
/// `node_attrs`.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub node_attrs: AttrMatrix,
    pub edge_index: Vec<[u32; 2]>,
    pub edge_attrs: AttrMatrix,
    /// Canonical ids of the sampled nodes, indexed by local id.
    pub source_nodes: Vec<u64>,
    /// Always `None` for self-supervised corpora.
    pub label: Option<f32>,
}

impl Sample {
    pub fn num_nodes(&self) -> usize {
        self.node_attrs.rows()
    }

    pub fn num_edges(&self) -> usize {
        self.edge_index.len()
    }

    /// Nodes that appear in no edge of the sample.
    pub fn isolated_nodes(&self) -> Vec<usize> {
        let mut touched = vec![false; self.num_nodes()];
        for &[u, v] in &self.edge_index {
            touched[u as usize] = true;
            touched[v as usize] = true;
        }
        touched
            .iter()
            .enumerate()
            .filter_map(|(node, &t)| (!t).then_some(node))
            .collect()
    }
}
