pub mod traits;
pub mod components;
pub mod sampling;
pub mod tests;

pub use traits::{AlgorithmId, Explorer};
pub use components::{connected_components, extract_largest_component};
pub use sampling::explorer_for;
