use std::ops::Range;
use crate::dataset::{AttrMatrix, Sample};
use crate::error::{GraphError, Result};
use crate::features::TaskType;

/// All samples of a split laid end to end.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FlatStorage {
    pub node_width: usize,
    pub edge_width: usize,
    pub node_attrs: Vec<f32>,
    pub edge_index: Vec<[u32; 2]>,
    pub edge_attrs: Vec<f32>,
    pub source_nodes: Vec<u64>,
}

/// Cumulative node and edge offsets; sample `i` owns
/// `node_offsets[i]..node_offsets[i + 1]` and likewise for edges.
#[derive(Debug, Clone, PartialEq)]
pub struct SliceIndex {
    pub node_offsets: Vec<usize>,
    pub edge_offsets: Vec<usize>,
}

impl Default for SliceIndex {
    fn default() -> Self {
        Self {
            node_offsets: vec![0],
            edge_offsets: vec![0],
        }
    }
}

impl SliceIndex {
    pub fn len(&self) -> usize {
        self.node_offsets.len().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn node_range(&self, i: usize) -> Option<Range<usize>> {
        (i < self.len()).then(|| self.node_offsets[i]..self.node_offsets[i + 1])
    }

    pub fn edge_range(&self, i: usize) -> Option<Range<usize>> {
        (i < self.len()).then(|| self.edge_offsets[i]..self.edge_offsets[i + 1])
    }
}

/// Immutable, fully materialized partition of a corpus.
#[derive(Debug, Clone, PartialEq)]
pub struct Split {
    task: TaskType,
    storage: FlatStorage,
    index: SliceIndex,
}

impl Split {
    /// Flatten `samples` in order. Every sample must share the attribute widths of the first.
    pub fn from_samples(task: TaskType, samples: Vec<Sample>) -> Result<Self> {
        let (node_width, edge_width) = samples
            .first()
            .map(|s| (s.node_attrs.width(), s.edge_attrs.width()))
            .unwrap_or((0, 0));

        let mut storage = FlatStorage {
            node_width,
            edge_width,
            ..FlatStorage::default()
        };
        let mut index = SliceIndex::default();

        for (i, sample) in samples.into_iter().enumerate() {
            if sample.node_attrs.width() != node_width || sample.edge_attrs.width() != edge_width {
                return Err(GraphError::invalid_parameter(format!(
                    "sample {} has attribute widths ({}, {}), expected ({}, {})",
                    i,
                    sample.node_attrs.width(),
                    sample.edge_attrs.width(),
                    node_width,
                    edge_width
                )));
            }
            if sample.edge_attrs.rows() != sample.edge_index.len()
                || sample.source_nodes.len() != sample.num_nodes()
            {
                return Err(GraphError::invalid_parameter(format!(
                    "sample {} has inconsistent row counts",
                    i
                )));
            }

            storage.node_attrs.extend_from_slice(sample.node_attrs.as_slice());
            storage.edge_attrs.extend_from_slice(sample.edge_attrs.as_slice());
            storage.source_nodes.extend_from_slice(&sample.source_nodes);
            storage.edge_index.extend_from_slice(&sample.edge_index);

            let last_node = index.node_offsets[index.node_offsets.len() - 1];
            let last_edge = index.edge_offsets[index.edge_offsets.len() - 1];
            index.node_offsets.push(last_node + sample.num_nodes());
            index.edge_offsets.push(last_edge + sample.edge_index.len());
        }

        Ok(Split { task, storage, index })
    }

    /// Reassemble a split from its flattened form, checking that the index covers the storage.
    pub fn from_parts(task: TaskType, storage: FlatStorage, index: SliceIndex) -> Result<Self> {
        let monotonic = |offsets: &[usize]| offsets.first() == Some(&0) && offsets.windows(2).all(|w| w[0] <= w[1]);
        if !monotonic(&index.node_offsets[..])
            || !monotonic(&index.edge_offsets[..])
            || index.node_offsets.len() != index.edge_offsets.len()
        {
            return Err(GraphError::invalid_parameter("slice index offsets are malformed"));
        }

        let total_nodes = index.node_offsets[index.node_offsets.len() - 1];
        let total_edges = index.edge_offsets[index.edge_offsets.len() - 1];
        if storage.node_attrs.len() != total_nodes * storage.node_width
            || storage.source_nodes.len() != total_nodes
            || storage.edge_index.len() != total_edges
            || storage.edge_attrs.len() != total_edges * storage.edge_width
        {
            return Err(GraphError::invalid_parameter(
                "flattened storage does not match its slice index",
            ));
        }

        Ok(Split { task, storage, index })
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn task(&self) -> TaskType {
        self.task
    }

    pub fn storage(&self) -> &FlatStorage {
        &self.storage
    }

    pub fn index(&self) -> &SliceIndex {
        &self.index
    }

    pub fn total_nodes(&self) -> usize {
        self.storage.source_nodes.len()
    }

    pub fn total_edges(&self) -> usize {
        self.storage.edge_index.len()
    }

    /// Materialize the `i`-th sample.
    pub fn get(&self, i: usize) -> Option<Sample> {
        let nodes = self.index.node_range(i)?;
        let edges = self.index.edge_range(i)?;
        let nw = self.storage.node_width;
        let ew = self.storage.edge_width;

        let node_attrs = AttrMatrix::from_raw(
            nodes.len(),
            nw,
            self.storage.node_attrs[nodes.start * nw..nodes.end * nw].to_vec(),
        )?;
        let edge_attrs = AttrMatrix::from_raw(
            edges.len(),
            ew,
            self.storage.edge_attrs[edges.start * ew..edges.end * ew].to_vec(),
        )?;

        Some(Sample {
            node_attrs,
            edge_index: self.storage.edge_index[edges].to_vec(),
            edge_attrs,
            source_nodes: self.storage.source_nodes[nodes].to_vec(),
            label: None,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = Sample> + '_ {
        (0..self.len()).filter_map(move |i| self.get(i))
    }
}
