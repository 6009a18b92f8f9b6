pub mod canonical_graph;
pub mod indexes;
pub mod raw_graph;
pub mod tests;

pub use canonical_graph::CanonicalGraph;
pub use indexes::GraphIndexes;
pub use raw_graph::RawGraph;
