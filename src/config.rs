use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};
use crate::algorithms::AlgorithmId;
use crate::dataset::Stage;
use crate::error::{GraphError, Result};
use crate::eswr::sample_seed;
use crate::features::{FeatureConfig, TaskType};

/// Parameters of one corpus-preparation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorpusConfig {
    pub root: PathBuf,
    /// Source id; also names the dataset directory under `root`.
    pub dataset: String,
    pub stage: Stage,
    pub num_samples: usize,
    /// Half-open node budget range `[lo, hi)`.
    pub node_budget_range: (usize, usize),
    pub seed: u64,
    pub algorithms: Vec<AlgorithmId>,
    /// Sampling threads; `None` uses every core.
    pub workers: Option<usize>,
    pub task: TaskType,
    pub features: FeatureConfig,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("data"),
            dataset: "random".to_string(),
            stage: Stage::Train,
            num_samples: 1000,
            node_budget_range: (24, 96),
            seed: 0,
            algorithms: vec![
                AlgorithmId::MetropolisHastingsRandomWalk,
                AlgorithmId::Diffusion,
                AlgorithmId::DepthFirst,
            ],
            workers: None,
            task: TaskType::Unlabeled,
            features: FeatureConfig::default(),
        }
    }
}

impl CorpusConfig {
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = fs::read_to_string(path.as_ref())?;
        let config: CorpusConfig = serde_json::from_str(&json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.num_samples == 0 {
            return Err(GraphError::invalid_parameter("num_samples must be positive"));
        }
        let (lo, hi) = self.node_budget_range;
        if lo == 0 || lo >= hi {
            return Err(GraphError::invalid_parameter(format!(
                "node_budget_range ({}, {}) must satisfy 0 < lo < hi",
                lo, hi
            )));
        }
        if self.algorithms.is_empty() {
            return Err(GraphError::invalid_parameter("at least one algorithm is required"));
        }
        if self.dataset.is_empty() {
            return Err(GraphError::invalid_parameter("dataset name is empty"));
        }
        if self.workers == Some(0) {
            return Err(GraphError::invalid_parameter("workers must be at least 1"));
        }
        self.features.validate()
    }

    pub fn budget_range(&self) -> Range<usize> {
        self.node_budget_range.0..self.node_budget_range.1
    }

    /// `root/dataset`, the directory holding `raw/` and `processed/`.
    pub fn dataset_root(&self) -> PathBuf {
        self.root.join(&self.dataset)
    }

    /// Base seed for this config's stage. Stages draw from distinct streams of
    /// the configured seed, so the three splits never repeat each other.
    pub fn stage_seed(&self) -> u64 {
        sample_seed(self.seed, self.stage.index())
    }

    pub fn for_stage(&self, stage: Stage) -> Self {
        Self {
            stage,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let config = CorpusConfig::default();
        config.validate().unwrap();
        assert_eq!(config.budget_range(), 24..96);
        assert_eq!(config.features.node_width, 9);
        assert_eq!(config.features.edge_width, 3);
    }

    #[test]
    fn test_invalid_configs_rejected() {
        let bad = [
            CorpusConfig { num_samples: 0, ..Default::default() },
            CorpusConfig { node_budget_range: (0, 10), ..Default::default() },
            CorpusConfig { node_budget_range: (10, 10), ..Default::default() },
            CorpusConfig { algorithms: vec![], ..Default::default() },
            CorpusConfig { workers: Some(0), ..Default::default() },
        ];
        for config in bad {
            assert!(matches!(config.validate(), Err(GraphError::InvalidParameter(_))));
        }
    }

    #[test]
    fn test_stage_seeds_differ() {
        let config = CorpusConfig { seed: 42, ..Default::default() };
        let seeds: Vec<u64> = Stage::ALL.iter().map(|&s| config.for_stage(s).stage_seed()).collect();
        assert_ne!(seeds[0], seeds[1]);
        assert_ne!(seeds[1], seeds[2]);
        assert_eq!(seeds[0], config.stage_seed());
    }

    #[test]
    fn test_from_json_file_partial() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"dataset": "lattice", "stage": "val", "num_samples": 10,
                "node_budget_range": [12, 48], "algorithms": ["forest_fire", "snowball"],
                "task": "classification"}}"#
        )
        .unwrap();

        let config = CorpusConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.dataset, "lattice");
        assert_eq!(config.stage, Stage::Val);
        assert_eq!(config.budget_range(), 12..48);
        assert_eq!(config.algorithms, vec![AlgorithmId::ForestFire, AlgorithmId::Snowball]);
        assert_eq!(config.task, TaskType::Classification);
        assert_eq!(config.seed, 0);
    }

    #[test]
    fn test_from_json_file_rejects_invalid() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"num_samples": 0}}"#).unwrap();
        assert!(CorpusConfig::from_json_file(file.path()).is_err());
    }
}
