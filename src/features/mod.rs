//! Placeholder attribute vectors shared by every corpus.
//!
//! Each node gets `node_width` floats: slot 0 holds the source graph's class
//! label when it has one, the rest are zero. Each edge gets `edge_width`
//! floats, currently the constant `[edge_placeholder, 0, 0, ...]`.

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::dataset::{AttrMatrix, Sample};
use crate::error::{GraphError, Result};
use crate::graph::CanonicalGraph;

/// Downstream task declared for a source, instead of inferred from its labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TaskType {
    Classification,
    Regression,
    #[default]
    Unlabeled,
}

impl TaskType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskType::Classification => "classification",
            TaskType::Regression => "regression",
            TaskType::Unlabeled => "unlabeled",
        }
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskType {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "classification" => Ok(TaskType::Classification),
            "regression" => Ok(TaskType::Regression),
            "unlabeled" => Ok(TaskType::Unlabeled),
            other => Err(GraphError::invalid_parameter(format!(
                "Unknown task type: {}. Supported: classification, regression, unlabeled",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureConfig {
    pub node_width: usize,
    pub edge_width: usize,
    /// Slot 0 value for nodes without a class label.
    pub node_placeholder: f32,
    pub edge_placeholder: f32,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            node_width: 9,
            edge_width: 3,
            node_placeholder: 0.0,
            edge_placeholder: 1.0,
        }
    }
}

impl FeatureConfig {
    pub fn validate(&self) -> Result<()> {
        if self.node_width == 0 || self.edge_width == 0 {
            return Err(GraphError::invalid_parameter(
                "node_width and edge_width must be at least 1",
            ));
        }
        Ok(())
    }
}

/// Class labels indexed by canonical node id.
pub trait LabelSource {
    fn label(&self, node: usize) -> Option<i64>;
}

impl LabelSource for CanonicalGraph {
    fn label(&self, node: usize) -> Option<i64> {
        CanonicalGraph::label(self, node)
    }
}

/// Source without labels.
pub struct NoLabels;

impl LabelSource for NoLabels {
    fn label(&self, _node: usize) -> Option<i64> {
        None
    }
}

#[derive(Debug, Clone, Default)]
pub struct FeatureAnnotator {
    config: FeatureConfig,
    task: TaskType,
}

impl FeatureAnnotator {
    pub fn new(config: FeatureConfig, task: TaskType) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, task })
    }

    pub fn config(&self) -> &FeatureConfig {
        &self.config
    }

    pub fn task(&self) -> TaskType {
        self.task
    }

    /// Replace the sample's attributes with the fixed-width placeholders.
    pub fn annotate(&self, mut sample: Sample, labels: &dyn LabelSource) -> Sample {
        let num_nodes = sample.source_nodes.len();
        let mut node_attrs = AttrMatrix::zeros(num_nodes, self.config.node_width);
        for (local, &canonical) in sample.source_nodes.iter().enumerate() {
            let slot = labels
                .label(canonical as usize)
                .map(|class| class as f32)
                .unwrap_or(self.config.node_placeholder);
            if let Some(row) = node_attrs.row_mut(local) {
                row[0] = slot;
            }
        }

        let mut edge_row = vec![0.0; self.config.edge_width];
        edge_row[0] = self.config.edge_placeholder;

        sample.node_attrs = node_attrs;
        sample.edge_attrs = AttrMatrix::filled(sample.edge_index.len(), &edge_row);
        sample.label = None;
        sample
    }

    pub fn annotate_all(&self, samples: Vec<Sample>, labels: &dyn LabelSource) -> Vec<Sample> {
        samples.into_iter().map(|s| self.annotate(s, labels)).collect()
    }
}
