//! End-to-end preparation of a corpus split: acquire, extract, sample,
//! annotate, cache.

use rand::SeedableRng;
use rand_pcg::Pcg64;
use crate::algorithms::extract_largest_component;
use crate::config::CorpusConfig;
use crate::dataset::{DatasetHandle, Split, SplitCache, Stage};
use crate::error::Result;
use crate::eswr::{EswrEngine, SamplerPool};
use crate::features::FeatureAnnotator;
use crate::source::GraphSource;

/// Run the sampling half of the pipeline on a freshly acquired graph.
pub fn build_split(source: &dyn GraphSource, config: &CorpusConfig) -> Result<Split> {
    let raw = source.acquire(&config.dataset)?;
    let graph = extract_largest_component(&raw)?;
    log::info!(
        "{}: largest component has {} of {} nodes",
        config.dataset,
        graph.node_count(),
        raw.node_count()
    );

    let pool = SamplerPool::build(&config.algorithms, config.budget_range())?;
    let engine = config.workers.map(EswrEngine::new).unwrap_or_default();
    let mut rng = Pcg64::seed_from_u64(config.stage_seed());
    let samples = engine.generate(&graph, config.num_samples, &pool, &mut rng)?;

    let annotator = FeatureAnnotator::new(config.features.clone(), config.task)?;
    let samples = annotator.annotate_all(samples, &graph);
    Split::from_samples(config.task, samples)
}

/// Load the configured split from the cache, building it on a cold cache.
///
/// The raw graph is only acquired when the split has to be built. A cached
/// split is returned as is even when its length no longer matches
/// `num_samples`; clear it with `SplitCache::clear` to resample.
pub fn prepare_split(source: &dyn GraphSource, config: &CorpusConfig) -> Result<DatasetHandle> {
    config.validate()?;

    let cache = SplitCache::new(config.dataset_root());
    let split = cache.load_or_build(config.stage, || build_split(source, config))?;
    if split.len() != config.num_samples {
        log::warn!(
            "{} {} split holds {} samples but {} were requested; using the cached split",
            config.dataset,
            config.stage,
            split.len(),
            config.num_samples
        );
    }

    Ok(DatasetHandle::new(config.dataset.clone(), split))
}

/// `prepare_split` for train, val and test, in that order.
pub fn prepare_splits(source: &dyn GraphSource, config: &CorpusConfig) -> Result<Vec<(Stage, DatasetHandle)>> {
    Stage::ALL
        .iter()
        .map(|&stage| Ok((stage, prepare_split(source, &config.for_stage(stage))?)))
        .collect()
}
