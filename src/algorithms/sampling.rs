use std::collections::VecDeque;
use hashbrown::HashSet;
use rand::Rng;
use rand::seq::SliceRandom;
use rand_pcg::Pcg64;
use crate::algorithms::{AlgorithmId, Explorer};
use crate::error::{GraphError, Result};
use crate::graph::CanonicalGraph;

/// Visited node set that remembers first-visit order.
struct Visited {
    order: Vec<usize>,
    seen: HashSet<usize>,
    target: usize,
}

impl Visited {
    fn start(seed: usize, budget: usize, graph: &CanonicalGraph) -> Self {
        let target = budget.min(graph.node_count()).max(1);
        let mut visited = Visited {
            order: Vec::with_capacity(target),
            seen: HashSet::with_capacity(target),
            target,
        };
        visited.mark(seed);
        visited
    }

    fn mark(&mut self, node: usize) -> bool {
        if self.seen.insert(node) {
            self.order.push(node);
            true
        } else {
            false
        }
    }

    fn contains(&self, node: usize) -> bool {
        self.seen.contains(&node)
    }

    fn is_full(&self) -> bool {
        self.order.len() >= self.target
    }

    fn finish(self) -> Vec<usize> {
        self.order
    }
}

/// Build the explorer registered under `id` with its default parameters.
pub fn explorer_for(id: AlgorithmId) -> Box<dyn Explorer> {
    match id {
        AlgorithmId::MetropolisHastingsRandomWalk => Box::new(MetropolisHastingsRandomWalk),
        AlgorithmId::RandomWalkWithRestart => Box::new(RandomWalkWithRestart::default()),
        AlgorithmId::Diffusion => Box::new(DiffusionSampler),
        AlgorithmId::DepthFirst => Box::new(DepthFirstSampler),
        AlgorithmId::ForestFire => Box::new(ForestFireSampler::default()),
        AlgorithmId::Snowball => Box::new(SnowballSampler),
    }
}

/// Random walk whose moves are accepted with probability
/// `min(1, deg(current) / deg(candidate))`, which removes the walk's bias
/// towards high-degree nodes.
pub struct MetropolisHastingsRandomWalk;

impl Explorer for MetropolisHastingsRandomWalk {
    fn explore(&self, graph: &CanonicalGraph, seed: usize, budget: usize, rng: &mut Pcg64) -> Vec<usize> {
        let mut visited = Visited::start(seed, budget, graph);
        let mut current = seed;

        while !visited.is_full() {
            let neighbors = graph.neighbors(current);
            let Some(&candidate) = neighbors.choose(rng) else {
                break; // Isolated seed
            };

            let ratio = graph.degree(current) as f64 / graph.degree(candidate) as f64;
            if rng.gen::<f64>() < ratio {
                current = candidate;
                visited.mark(current);
            }
        }

        visited.finish()
    }

    fn name(&self) -> &'static str {
        "metropolis_hastings_random_walk"
    }

    fn description(&self) -> &'static str {
        "Degree-corrected random walk with Metropolis-Hastings acceptance"
    }
}

/// Random walk that jumps back to the seed with a fixed probability per step.
pub struct RandomWalkWithRestart {
    restart_probability: f64,
}

impl RandomWalkWithRestart {
    pub fn new(restart_probability: f64) -> Result<Self> {
        if !(0.0..1.0).contains(&restart_probability) {
            return Err(GraphError::invalid_parameter(
                "restart_probability must be in [0.0, 1.0)"
            ));
        }
        Ok(Self { restart_probability })
    }

    pub fn restart_probability(&self) -> f64 {
        self.restart_probability
    }
}

impl Default for RandomWalkWithRestart {
    fn default() -> Self {
        Self { restart_probability: 0.1 }
    }
}

impl Explorer for RandomWalkWithRestart {
    fn explore(&self, graph: &CanonicalGraph, seed: usize, budget: usize, rng: &mut Pcg64) -> Vec<usize> {
        let mut visited = Visited::start(seed, budget, graph);
        let mut current = seed;

        while !visited.is_full() {
            if rng.gen_bool(self.restart_probability) {
                current = seed;
                continue;
            }

            let Some(&next) = graph.neighbors(current).choose(rng) else {
                break;
            };
            current = next;
            visited.mark(current);
        }

        visited.finish()
    }

    fn name(&self) -> &'static str {
        "random_walk_with_restart"
    }

    fn description(&self) -> &'static str {
        "Random walk that teleports back to its seed node with a fixed probability"
    }
}

/// Grows the sample by repeatedly picking a visited node and adding one of its neighbors.
pub struct DiffusionSampler;

impl Explorer for DiffusionSampler {
    fn explore(&self, graph: &CanonicalGraph, seed: usize, budget: usize, rng: &mut Pcg64) -> Vec<usize> {
        let mut visited = Visited::start(seed, budget, graph);
        if graph.degree(seed) == 0 {
            return visited.finish();
        }

        while !visited.is_full() {
            let source = visited.order[rng.gen_range(0..visited.order.len())];
            if let Some(&neighbor) = graph.neighbors(source).choose(rng) {
                visited.mark(neighbor);
            }
        }

        visited.finish()
    }

    fn name(&self) -> &'static str {
        "diffusion"
    }

    fn description(&self) -> &'static str {
        "Diffusion expansion from uniformly chosen visited nodes"
    }
}

/// Depth-first traversal with shuffled neighbor order.
pub struct DepthFirstSampler;

impl Explorer for DepthFirstSampler {
    fn explore(&self, graph: &CanonicalGraph, seed: usize, budget: usize, rng: &mut Pcg64) -> Vec<usize> {
        let mut visited = Visited::start(seed, budget, graph);
        let mut stack = vec![seed];
        let mut expanded: HashSet<usize> = HashSet::new();

        while let Some(node) = stack.pop() {
            if visited.is_full() {
                break;
            }
            visited.mark(node);
            if !expanded.insert(node) {
                continue;
            }

            let mut neighbors: Vec<usize> = graph
                .neighbors(node)
                .iter()
                .copied()
                .filter(|&n| !visited.contains(n))
                .collect();
            neighbors.shuffle(rng);
            stack.extend(neighbors);
        }

        visited.finish()
    }

    fn name(&self) -> &'static str {
        "depth_first"
    }

    fn description(&self) -> &'static str {
        "Depth-first frontier growth with randomized neighbor order"
    }
}

/// Forest fire sampling: each burning node ignites a geometrically
/// distributed number of its unvisited neighbors.
pub struct ForestFireSampler {
    burn_probability: f64,
}

impl ForestFireSampler {
    pub fn new(burn_probability: f64) -> Result<Self> {
        if !(0.0..1.0).contains(&burn_probability) {
            return Err(GraphError::invalid_parameter(
                "burn_probability must be in [0.0, 1.0)"
            ));
        }
        Ok(Self { burn_probability })
    }

    fn burn_count(&self, rng: &mut Pcg64) -> usize {
        let mut count = 1;
        while rng.gen_bool(self.burn_probability) {
            count += 1;
        }
        count
    }

    /// Pick a visited node that still has unvisited neighbors, if any.
    fn relight(&self, graph: &CanonicalGraph, visited: &Visited, rng: &mut Pcg64) -> Option<usize> {
        let candidates: Vec<usize> = visited
            .order
            .iter()
            .copied()
            .filter(|&node| graph.neighbors(node).iter().any(|&n| !visited.contains(n)))
            .collect();
        candidates.choose(rng).copied()
    }
}

impl Default for ForestFireSampler {
    fn default() -> Self {
        Self { burn_probability: 0.4 }
    }
}

impl Explorer for ForestFireSampler {
    fn explore(&self, graph: &CanonicalGraph, seed: usize, budget: usize, rng: &mut Pcg64) -> Vec<usize> {
        let mut visited = Visited::start(seed, budget, graph);
        let mut queue = VecDeque::from([seed]);

        while !visited.is_full() {
            let node = match queue.pop_front() {
                Some(node) => node,
                None => match self.relight(graph, &visited, rng) {
                    Some(node) => node,
                    None => break, // Fire reached every reachable node
                },
            };

            let mut unburnt: Vec<usize> = graph
                .neighbors(node)
                .iter()
                .copied()
                .filter(|&n| !visited.contains(n))
                .collect();
            unburnt.shuffle(rng);

            let burn = self.burn_count(rng).min(unburnt.len());
            for &neighbor in &unburnt[..burn] {
                if visited.is_full() {
                    break;
                }
                visited.mark(neighbor);
                queue.push_back(neighbor);
            }
        }

        visited.finish()
    }

    fn name(&self) -> &'static str {
        "forest_fire"
    }

    fn description(&self) -> &'static str {
        "Forest fire expansion with geometric burn counts"
    }
}

/// Snowball sampling (BFS-based expansion), hop by hop until the budget is met.
pub struct SnowballSampler;

impl Explorer for SnowballSampler {
    fn explore(&self, graph: &CanonicalGraph, seed: usize, budget: usize, rng: &mut Pcg64) -> Vec<usize> {
        let mut visited = Visited::start(seed, budget, graph);
        let mut current_frontier = vec![seed];

        while !visited.is_full() && !current_frontier.is_empty() {
            let mut next_frontier = Vec::new();

            for &node in &current_frontier {
                let mut neighbors = graph.neighbors(node).to_vec();
                neighbors.shuffle(rng);
                for neighbor in neighbors {
                    if visited.is_full() {
                        break;
                    }
                    if visited.mark(neighbor) {
                        next_frontier.push(neighbor);
                    }
                }
            }

            current_frontier = next_frontier;
        }

        visited.finish()
    }

    fn name(&self) -> &'static str {
        "snowball"
    }

    fn description(&self) -> &'static str {
        "Breadth-first snowball expansion with shuffled neighbor order"
    }
}
