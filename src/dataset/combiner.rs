use std::ops::AddAssign;
use crate::dataset::{Sample, Split};
use crate::features::TaskType;

#[derive(Debug, Clone, PartialEq)]
struct Segment {
    name: String,
    split: Split,
}

/// A corpus made of one or more named splits laid end to end.
///
/// Index `i` resolves to the segment whose cumulative range contains it.
/// Merging moves the other handle's segments in, so a merged handle owns all
/// of its data.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DatasetHandle {
    segments: Vec<Segment>,
    cumulative_sizes: Vec<usize>,
}

impl DatasetHandle {
    pub fn new<S: Into<String>>(name: S, split: Split) -> Self {
        let mut handle = Self::default();
        handle.push(name.into(), split);
        handle
    }

    pub fn empty() -> Self {
        Self::default()
    }

    fn push(&mut self, name: String, split: Split) {
        let total = self.len() + split.len();
        self.segments.push(Segment { name, split });
        self.cumulative_sizes.push(total);
    }

    pub fn len(&self) -> usize {
        self.cumulative_sizes.last().copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Segment position and local offset of global index `i`.
    pub fn locate(&self, i: usize) -> Option<(usize, usize)> {
        if i >= self.len() {
            return None;
        }
        let segment = self.cumulative_sizes.partition_point(|&end| end <= i);
        let start = if segment == 0 { 0 } else { self.cumulative_sizes[segment - 1] };
        Some((segment, i - start))
    }

    pub fn get(&self, i: usize) -> Option<Sample> {
        let (segment, local) = self.locate(i)?;
        self.segments[segment].split.get(local)
    }

    /// Name of the source the `i`-th sample came from.
    pub fn source_of(&self, i: usize) -> Option<&str> {
        let (segment, _) = self.locate(i)?;
        Some(&self.segments[segment].name)
    }

    pub fn task_of(&self, i: usize) -> Option<TaskType> {
        let (segment, _) = self.locate(i)?;
        Some(self.segments[segment].split.task())
    }

    /// `(name, length, task)` per segment, in concatenation order.
    pub fn segments(&self) -> impl Iterator<Item = (&str, usize, TaskType)> {
        self.segments
            .iter()
            .map(|s| (s.name.as_str(), s.split.len(), s.split.task()))
    }

    pub fn split(&self, segment: usize) -> Option<&Split> {
        self.segments.get(segment).map(|s| &s.split)
    }

    /// Append `other`'s samples after this handle's.
    pub fn merge(mut self, other: DatasetHandle) -> DatasetHandle {
        self += other;
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = Sample> + '_ {
        self.segments.iter().flat_map(|s| s.split.iter())
    }
}

impl AddAssign for DatasetHandle {
    fn add_assign(&mut self, other: DatasetHandle) {
        for segment in other.segments {
            self.push(segment.name, segment.split);
        }
    }
}

/// Concatenates per-source datasets in the order given. Shuffling is left to
/// whatever consumes the result.
pub struct DatasetCombiner;

impl DatasetCombiner {
    pub fn merge<I>(handles: I) -> DatasetHandle
    where
        I: IntoIterator<Item = DatasetHandle>,
    {
        let combined = handles
            .into_iter()
            .fold(DatasetHandle::empty(), DatasetHandle::merge);
        log::debug!(
            "Combined {} segments into a corpus of {} samples",
            combined.segments.len(),
            combined.len()
        );
        combined
    }
}
