pub mod cache;
pub mod combiner;
pub mod sample;
pub mod split;

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::error::{GraphError, Result};

pub use cache::{load_or_build, read_split, write_split, CacheState, SplitCache};
pub use combiner::{DatasetCombiner, DatasetHandle};
pub use sample::{AttrMatrix, Sample};
pub use split::{FlatStorage, SliceIndex, Split};

/// Corpus partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    #[default]
    Train,
    Val,
    Test,
}

impl Stage {
    pub const ALL: [Stage; 3] = [Stage::Train, Stage::Val, Stage::Test];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Train => "train",
            Stage::Val => "val",
            Stage::Test => "test",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Stage::Train => 0,
            Stage::Val => 1,
            Stage::Test => 2,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Stage {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "train" => Ok(Stage::Train),
            "val" | "valid" | "validation" => Ok(Stage::Val),
            "test" => Ok(Stage::Test),
            other => Err(GraphError::invalid_parameter(format!(
                "Unknown stage: {}. Supported stages: train, val, test",
                other
            ))),
        }
    }
}
