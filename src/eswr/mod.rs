pub mod engine;
pub mod pool;
pub mod tests;

pub use engine::{draw_sample, induced_subgraph, sample_seed, EswrEngine};
pub use pool::{SamplerPool, SamplerSpec};
