pub mod local;
pub mod synthetic;

pub use local::{parse_edge_list, parse_labels, LocalSource};
pub use synthetic::{SyntheticKind, SyntheticSource};

use crate::error::Result;
use crate::graph::RawGraph;

/// Supplier of raw graphs by name.
///
/// Failures are returned as they happen; nothing here retries.
pub trait GraphSource {
    fn acquire(&self, source_id: &str) -> Result<RawGraph>;
}

impl<S: GraphSource + ?Sized> GraphSource for &S {
    fn acquire(&self, source_id: &str) -> Result<RawGraph> {
        (**self).acquire(source_id)
    }
}

impl<S: GraphSource + ?Sized> GraphSource for Box<S> {
    fn acquire(&self, source_id: &str) -> Result<RawGraph> {
        (**self).acquire(source_id)
    }
}

/// Serves graphs from a local raw directory, falling back to `upstream` and
/// keeping a local copy of whatever it fetches.
///
/// A freshly fetched graph is re-read from its local copy before being
/// returned, so cold and warm calls see the same node enumeration order.
#[derive(Debug, Clone)]
pub struct CachedSource<S> {
    local: LocalSource,
    upstream: S,
}

impl<S: GraphSource> CachedSource<S> {
    pub fn new(local: LocalSource, upstream: S) -> Self {
        Self { local, upstream }
    }

    pub fn local(&self) -> &LocalSource {
        &self.local
    }
}

impl<S: GraphSource> GraphSource for CachedSource<S> {
    fn acquire(&self, source_id: &str) -> Result<RawGraph> {
        if self.local.contains(source_id) {
            log::debug!("Raw graph {} found locally", source_id);
            return self.local.acquire(source_id);
        }

        log::info!("Raw graph {} not cached locally, acquiring from upstream", source_id);
        let graph = self.upstream.acquire(source_id)?;
        self.local.store(source_id, &graph)?;
        self.local.acquire(source_id)
    }
}
