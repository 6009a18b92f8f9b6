pub mod algorithms;
pub mod config;
pub mod dataset;
pub mod error;
pub mod eswr;
pub mod features;
pub mod graph;
pub mod pipeline;
pub mod source;

pub use algorithms::{connected_components, explorer_for, extract_largest_component, AlgorithmId, Explorer};
pub use algorithms::sampling::{
    DepthFirstSampler, DiffusionSampler, ForestFireSampler, MetropolisHastingsRandomWalk,
    RandomWalkWithRestart, SnowballSampler,
};
pub use config::CorpusConfig;
pub use dataset::{
    load_or_build, AttrMatrix, CacheState, DatasetCombiner, DatasetHandle, Sample, Split, SplitCache, Stage,
};
pub use error::{GraphError, Result};
pub use eswr::{sample_seed, EswrEngine, SamplerPool, SamplerSpec};
pub use features::{FeatureAnnotator, FeatureConfig, LabelSource, NoLabels, TaskType};
pub use graph::{CanonicalGraph, GraphIndexes, RawGraph};
pub use pipeline::{build_split, prepare_split, prepare_splits};
pub use source::{CachedSource, GraphSource, LocalSource, SyntheticKind, SyntheticSource};

pub mod prelude {
    pub use crate::algorithms::{extract_largest_component, AlgorithmId, Explorer};
    pub use crate::config::CorpusConfig;
    pub use crate::dataset::{DatasetCombiner, DatasetHandle, Sample, Split, SplitCache, Stage};
    pub use crate::error::{GraphError, Result};
    pub use crate::eswr::{EswrEngine, SamplerPool};
    pub use crate::features::{FeatureAnnotator, FeatureConfig, TaskType};
    pub use crate::graph::{CanonicalGraph, RawGraph};
    pub use crate::pipeline::{prepare_split, prepare_splits};
    pub use crate::source::{CachedSource, GraphSource, LocalSource, SyntheticSource};
}
