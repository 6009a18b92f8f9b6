use std::ops::Range;
use std::sync::Arc;
use hashbrown::HashMap;
use rand::Rng;
use crate::algorithms::{explorer_for, AlgorithmId, Explorer};
use crate::error::{GraphError, Result};

/// One entry of the pool: an algorithm and the node budget it samples to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SamplerSpec {
    pub algorithm: AlgorithmId,
    pub budget: usize,
}

/// Every (algorithm, budget) pair over `algorithms × budget_range`, materialized once.
///
/// Draws are uniform over the materialized list, so each algorithm is
/// weighted by the number of budgets it is paired with.
#[derive(Clone)]
pub struct SamplerPool {
    specs: Vec<SamplerSpec>,
    explorers: HashMap<AlgorithmId, Arc<dyn Explorer>>,
    budget_range: Range<usize>,
}

impl std::fmt::Debug for SamplerPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SamplerPool")
            .field("specs", &self.specs.len())
            .field("algorithms", &self.algorithms())
            .field("budget_range", &self.budget_range)
            .finish()
    }
}

impl SamplerPool {
    /// Build the pool with each algorithm's default explorer.
    pub fn build(algorithms: &[AlgorithmId], budget_range: Range<usize>) -> Result<Self> {
        let registry = algorithms
            .iter()
            .map(|&id| (id, Arc::from(explorer_for(id))))
            .collect();
        Self::with_explorers(registry, budget_range)
    }

    /// Build the pool from explicitly registered explorers, in the given order.
    pub fn with_explorers(
        registry: Vec<(AlgorithmId, Arc<dyn Explorer>)>,
        budget_range: Range<usize>,
    ) -> Result<Self> {
        if registry.is_empty() {
            return Err(GraphError::invalid_parameter("sampler pool needs at least one algorithm"));
        }
        if budget_range.start == 0 || budget_range.start >= budget_range.end {
            return Err(GraphError::invalid_parameter(format!(
                "node budget range [{}, {}) must be non-empty and start at 1 or more",
                budget_range.start, budget_range.end
            )));
        }

        let mut specs = Vec::with_capacity(registry.len() * budget_range.len());
        let mut explorers: HashMap<AlgorithmId, Arc<dyn Explorer>> = HashMap::new();
        for (algorithm, explorer) in registry {
            if explorers.insert(algorithm, explorer).is_some() {
                return Err(GraphError::invalid_parameter(format!(
                    "algorithm {} registered twice",
                    algorithm
                )));
            }
            specs.extend(budget_range.clone().map(|budget| SamplerSpec { algorithm, budget }));
        }

        Ok(Self {
            specs,
            explorers,
            budget_range,
        })
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    pub fn specs(&self) -> &[SamplerSpec] {
        &self.specs
    }

    pub fn budget_range(&self) -> Range<usize> {
        self.budget_range.clone()
    }

    /// Largest budget any spec in the pool can request.
    pub fn max_budget(&self) -> usize {
        self.budget_range.end - 1
    }

    pub fn algorithms(&self) -> Vec<AlgorithmId> {
        let mut ids: Vec<AlgorithmId> = self.explorers.keys().copied().collect();
        ids.sort();
        ids
    }

    pub fn explorer(&self, algorithm: AlgorithmId) -> Option<&dyn Explorer> {
        self.explorers.get(&algorithm).map(|e| e.as_ref())
    }

    /// Draw one spec uniformly from the materialized list.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> SamplerSpec {
        self.specs[rng.gen_range(0..self.specs.len())]
    }
}
