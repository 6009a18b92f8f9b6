use std::str::FromStr;
use indexmap::IndexMap;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use serde::{Deserialize, Serialize};
use crate::error::{GraphError, Result};
use crate::graph::RawGraph;
use crate::source::GraphSource;

/// Generator family for synthetic source graphs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SyntheticKind {
    /// G(n, p) random graph.
    Random { nodes: usize, edge_probability: f64 },
    /// Planted partition graph; each node is labelled with its community.
    Community {
        communities: usize,
        community_size: usize,
        p_in: f64,
        p_out: f64,
    },
    /// 2D grid.
    Lattice { rows: usize, cols: usize },
    /// Random recursive tree: node `i` attaches to a uniform earlier node.
    Tree { nodes: usize },
}

impl SyntheticKind {
    pub fn name(&self) -> &'static str {
        match self {
            SyntheticKind::Random { .. } => "random",
            SyntheticKind::Community { .. } => "community",
            SyntheticKind::Lattice { .. } => "lattice",
            SyntheticKind::Tree { .. } => "tree",
        }
    }

    pub fn validate(&self) -> Result<()> {
        let probability_ok = |p: f64| (0.0..=1.0).contains(&p);
        let ok = match *self {
            SyntheticKind::Random { nodes, edge_probability } => nodes > 0 && probability_ok(edge_probability),
            SyntheticKind::Community { communities, community_size, p_in, p_out } => {
                communities > 0 && community_size > 0 && probability_ok(p_in) && probability_ok(p_out)
            }
            SyntheticKind::Lattice { rows, cols } => rows > 0 && cols > 0,
            SyntheticKind::Tree { nodes } => nodes > 0,
        };
        if ok {
            Ok(())
        } else {
            Err(GraphError::invalid_parameter(format!(
                "invalid {} generator parameters: {:?}",
                self.name(),
                self
            )))
        }
    }

    pub fn generate(&self, rng: &mut Pcg64) -> Result<RawGraph> {
        self.validate()?;
        let mut graph = RawGraph::new();
        match *self {
            SyntheticKind::Random { nodes, edge_probability } => {
                for i in 0..nodes {
                    graph.add_node(&i.to_string());
                }
                for i in 0..nodes {
                    for j in (i + 1)..nodes {
                        if rng.gen_bool(edge_probability) {
                            graph.add_edge(&i.to_string(), &j.to_string());
                        }
                    }
                }
            }
            SyntheticKind::Community { communities, community_size, p_in, p_out } => {
                let nodes = communities * community_size;
                for i in 0..nodes {
                    graph.add_node(&i.to_string());
                }
                for i in 0..nodes {
                    for j in (i + 1)..nodes {
                        let p = if i / community_size == j / community_size { p_in } else { p_out };
                        if rng.gen_bool(p) {
                            graph.add_edge(&i.to_string(), &j.to_string());
                        }
                    }
                }
                for i in 0..nodes {
                    graph.set_label(&i.to_string(), (i / community_size) as i64)?;
                }
            }
            SyntheticKind::Lattice { rows, cols } => {
                let id = |r: usize, c: usize| (r * cols + c).to_string();
                for r in 0..rows {
                    for c in 0..cols {
                        graph.add_node(&id(r, c));
                        if c + 1 < cols {
                            graph.add_edge(&id(r, c), &id(r, c + 1));
                        }
                        if r + 1 < rows {
                            graph.add_edge(&id(r, c), &id(r + 1, c));
                        }
                    }
                }
            }
            SyntheticKind::Tree { nodes } => {
                graph.add_node("0");
                for i in 1..nodes {
                    let parent = rng.gen_range(0..i);
                    graph.add_edge(&parent.to_string(), &i.to_string());
                }
            }
        }
        Ok(graph)
    }
}

impl FromStr for SyntheticKind {
    type Err = GraphError;

    /// Generator with default parameters, by name.
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "random" => Ok(SyntheticKind::Random { nodes: 1000, edge_probability: 0.01 }),
            "community" => Ok(SyntheticKind::Community {
                communities: 10,
                community_size: 100,
                p_in: 0.1,
                p_out: 0.002,
            }),
            "lattice" => Ok(SyntheticKind::Lattice { rows: 40, cols: 40 }),
            "tree" => Ok(SyntheticKind::Tree { nodes: 1000 }),
            other => Err(GraphError::invalid_parameter(format!(
                "Unknown synthetic graph: {}. Supported: random, community, lattice, tree",
                other
            ))),
        }
    }
}

/// In-process generator source keyed by source id.
///
/// Each `acquire` seeds a fresh `Pcg64` from the source seed, so the same id
/// always yields the same graph.
#[derive(Debug, Clone)]
pub struct SyntheticSource {
    seed: u64,
    generators: IndexMap<String, SyntheticKind>,
}

impl SyntheticSource {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            generators: IndexMap::new(),
        }
    }

    /// Source with the four default generators registered under their names.
    pub fn with_defaults(seed: u64) -> Self {
        let mut source = Self::new(seed);
        for name in ["random", "community", "lattice", "tree"] {
            if let Ok(kind) = name.parse() {
                source.generators.insert(name.to_string(), kind);
            }
        }
        source
    }

    pub fn register<S: Into<String>>(&mut self, source_id: S, kind: SyntheticKind) -> Result<()> {
        kind.validate()?;
        self.generators.insert(source_id.into(), kind);
        Ok(())
    }

    pub fn source_ids(&self) -> impl Iterator<Item = &String> {
        self.generators.keys()
    }
}

impl GraphSource for SyntheticSource {
    fn acquire(&self, source_id: &str) -> Result<RawGraph> {
        let kind = self.generators.get(source_id).ok_or_else(|| {
            GraphError::acquisition(format!("no synthetic generator registered for {}", source_id))
        })?;

        let mut rng = Pcg64::seed_from_u64(self.seed);
        let graph = kind.generate(&mut rng)?;
        log::info!(
            "Generated {} graph {}: {} nodes, {} edges",
            kind.name(),
            source_id,
            graph.node_count(),
            graph.edge_count()
        );
        Ok(graph)
    }
}
