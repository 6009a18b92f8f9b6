use std::fmt;
use std::str::FromStr;
use rand_pcg::Pcg64;
use serde::{Deserialize, Serialize};
use crate::error::{GraphError, Result};
use crate::graph::CanonicalGraph;

/// Identifier of a registered exploration strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlgorithmId {
    MetropolisHastingsRandomWalk,
    RandomWalkWithRestart,
    Diffusion,
    DepthFirst,
    ForestFire,
    Snowball,
}

impl AlgorithmId {
    pub const ALL: [AlgorithmId; 6] = [
        AlgorithmId::MetropolisHastingsRandomWalk,
        AlgorithmId::RandomWalkWithRestart,
        AlgorithmId::Diffusion,
        AlgorithmId::DepthFirst,
        AlgorithmId::ForestFire,
        AlgorithmId::Snowball,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AlgorithmId::MetropolisHastingsRandomWalk => "metropolis_hastings_random_walk",
            AlgorithmId::RandomWalkWithRestart => "random_walk_with_restart",
            AlgorithmId::Diffusion => "diffusion",
            AlgorithmId::DepthFirst => "depth_first",
            AlgorithmId::ForestFire => "forest_fire",
            AlgorithmId::Snowball => "snowball",
        }
    }
}

impl fmt::Display for AlgorithmId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlgorithmId {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "metropolis_hastings_random_walk" | "mhrw" => Ok(AlgorithmId::MetropolisHastingsRandomWalk),
            "random_walk_with_restart" | "rwr" => Ok(AlgorithmId::RandomWalkWithRestart),
            "diffusion" => Ok(AlgorithmId::Diffusion),
            "depth_first" | "dfs" => Ok(AlgorithmId::DepthFirst),
            "forest_fire" => Ok(AlgorithmId::ForestFire),
            "snowball" | "bfs" => Ok(AlgorithmId::Snowball),
            other => Err(GraphError::invalid_parameter(format!(
                "Unknown sampling algorithm: {}. Supported algorithms: {}",
                other,
                AlgorithmId::ALL.iter().map(AlgorithmId::as_str).collect::<Vec<_>>().join(", ")
            ))),
        }
    }
}

/// Exploration sampler: grow a visited node set from a seed node.
///
/// Implementations return canonical node ids in order of first visit,
/// starting with `seed`. The result holds at most `budget` nodes and fewer
/// only when every node reachable from `seed` has been visited.
pub trait Explorer: Send + Sync {
    fn explore(
        &self,
        graph: &CanonicalGraph,
        seed: usize,
        budget: usize,
        rng: &mut Pcg64,
    ) -> Vec<usize>;

    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str {
        "Exploration sampler"
    }
}
