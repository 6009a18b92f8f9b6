use hashbrown::{HashMap, HashSet};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use rayon::prelude::*;
use crate::dataset::{AttrMatrix, Sample};
use crate::eswr::SamplerPool;
use crate::error::{GraphError, Result};
use crate::graph::CanonicalGraph;

const GOLDEN_GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;

fn splitmix64(mut z: u64) -> u64 {
    z = z.wrapping_add(GOLDEN_GAMMA);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Seed of the random stream that draws sample `index`:
/// `splitmix64(base_seed + index * 0x9E3779B97F4A7C15)` (wrapping).
///
/// The mapping depends only on the base seed and the index, never on which
/// worker draws the sample or when.
pub fn sample_seed(base_seed: u64, index: usize) -> u64 {
    splitmix64(base_seed.wrapping_add((index as u64).wrapping_mul(GOLDEN_GAMMA)))
}

/// Expansion Sampling With Replacement.
#[derive(Debug, Clone)]
pub struct EswrEngine {
    workers: usize,
}

impl Default for EswrEngine {
    fn default() -> Self {
        Self::new(num_cpus::get())
    }
}

impl EswrEngine {
    pub fn new(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
        }
    }

    pub fn serial() -> Self {
        Self::new(1)
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Draw exactly `n` samples. One `u64` is taken from `rng` as the base
    /// seed; everything after that is determined by `sample_seed`.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        graph: &CanonicalGraph,
        n: usize,
        pool: &SamplerPool,
        rng: &mut R,
    ) -> Result<Vec<Sample>> {
        let base_seed = rng.gen::<u64>();
        self.generate_from_seed(graph, n, pool, base_seed)
    }

    pub fn generate_from_seed(
        &self,
        graph: &CanonicalGraph,
        n: usize,
        pool: &SamplerPool,
        base_seed: u64,
    ) -> Result<Vec<Sample>> {
        log::info!(
            "Sampling {} subgraphs from a {}-node graph ({} sampler specs, {} workers)",
            n,
            graph.node_count(),
            pool.len(),
            self.workers
        );

        let samples = if self.workers == 1 || n < 2 {
            (0..n)
                .map(|i| draw_sample(graph, pool, sample_seed(base_seed, i)))
                .collect::<Result<Vec<_>>>()?
        } else {
            let threads = rayon::ThreadPoolBuilder::new()
                .num_threads(self.workers)
                .build()
                .map_err(|e| GraphError::algorithm(format!("failed to start sampling workers: {}", e)))?;

            threads.install(|| {
                (0..n)
                    .into_par_iter()
                    .map(|i| draw_sample(graph, pool, sample_seed(base_seed, i)))
                    .collect::<Result<Vec<_>>>()
            })?
        };

        if !samples.is_empty() {
            let total_nodes: usize = samples.iter().map(Sample::num_nodes).sum();
            log::debug!(
                "Sampled {} subgraphs, mean size {:.1} nodes",
                samples.len(),
                total_nodes as f64 / samples.len() as f64
            );
        }

        Ok(samples)
    }
}

/// Draw one sample from its own random stream.
pub fn draw_sample(graph: &CanonicalGraph, pool: &SamplerPool, seed: u64) -> Result<Sample> {
    let mut rng = Pcg64::seed_from_u64(seed);

    let spec = pool.choose(&mut rng);
    let start = rng.gen_range(0..graph.node_count());
    let explorer = pool.explorer(spec.algorithm).ok_or_else(|| {
        GraphError::algorithm(format!("no explorer registered for {}", spec.algorithm))
    })?;

    let explored = explorer.explore(graph, start, spec.budget, &mut rng);

    // Keep first visits of real nodes only, up to the budget
    let mut seen = HashSet::with_capacity(explored.len());
    let visited: Vec<usize> = explored
        .into_iter()
        .filter(|&node| graph.has_node(node) && seen.insert(node))
        .take(spec.budget)
        .collect();
    if visited.is_empty() {
        return Err(GraphError::algorithm(format!(
            "{} returned no nodes of the graph",
            explorer.name()
        )));
    }

    Ok(induced_subgraph(graph, &visited))
}

/// Induced subgraph on `visited`, relabelled `0..k` in the order given.
/// `visited` must hold distinct nodes of `graph`.
pub fn induced_subgraph(graph: &CanonicalGraph, visited: &[usize]) -> Sample {
    let local: HashMap<usize, u32> = visited
        .iter()
        .enumerate()
        .map(|(local_id, &node)| (node, local_id as u32))
        .collect();

    let mut edge_index = Vec::new();
    for (local_u, &node) in visited.iter().enumerate() {
        for neighbor in graph.neighbors(node) {
            if let Some(&local_v) = local.get(neighbor) {
                edge_index.push([local_u as u32, local_v]);
            }
        }
    }

    Sample {
        node_attrs: AttrMatrix::zeros(visited.len(), 0),
        edge_attrs: AttrMatrix::zeros(edge_index.len(), 0),
        edge_index,
        source_nodes: visited.iter().map(|&node| node as u64).collect(),
        label: None,
    }
}
