//! On-disk cache of materialized splits.
//!
//! A split lives at `<root>/processed/<stage>` as an Arrow IPC file with one
//! row per sample. Its list columns hold the flattened storage and their
//! offsets are the slice index. The cache key is the file's existence alone:
//! nothing about the sampling parameters is checked on load.

use std::collections::HashMap;
use std::fmt;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use arrow::buffer::OffsetBuffer;
use arrow::ipc::reader::FileReader;
use arrow::ipc::writer::FileWriter;
use arrow::record_batch::RecordBatch;
use arrow_array::types::{Float32Type, UInt32Type, UInt64Type};
use arrow_array::{Array, ArrayRef, ArrowPrimitiveType, ListArray, PrimitiveArray, UInt32Array};
use arrow_schema::{DataType, Field, Schema};
use tempfile::NamedTempFile;
use crate::dataset::{FlatStorage, SliceIndex, Split, Stage};
use crate::error::{GraphError, Result};
use crate::features::TaskType;

const META_FORMAT: &str = "graph_corpus.format";
const META_NODE_WIDTH: &str = "graph_corpus.node_width";
const META_EDGE_WIDTH: &str = "graph_corpus.edge_width";
const META_TASK: &str = "graph_corpus.task";
const META_CREATED_AT: &str = "graph_corpus.created_at";
const FORMAT_VERSION: &str = "1";

/// Where a split is in its load-or-build lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheState {
    Uninitialized,
    Building,
    Persisted,
    Ready,
}

impl fmt::Display for CacheState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CacheState::Uninitialized => "uninitialized",
            CacheState::Building => "building",
            CacheState::Persisted => "persisted",
            CacheState::Ready => "ready",
        };
        f.write_str(name)
    }
}

/// Processed splits of one named dataset, rooted at `<root>/<dataset>`.
#[derive(Debug, Clone)]
pub struct SplitCache {
    root: PathBuf,
}

impl SplitCache {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn processed_dir(&self) -> PathBuf {
        self.root.join("processed")
    }

    pub fn split_path(&self, stage: Stage) -> PathBuf {
        self.processed_dir().join(stage.as_str())
    }

    pub fn state(&self, stage: Stage) -> CacheState {
        if self.split_path(stage).exists() {
            CacheState::Ready
        } else {
            CacheState::Uninitialized
        }
    }

    /// Return the cached split for `stage`, or run `builder`, persist its
    /// result and return it. A present but unreadable file is an error; it
    /// is never rebuilt silently.
    pub fn load_or_build<F>(&self, stage: Stage, builder: F) -> Result<Split>
    where
        F: FnOnce() -> Result<Split>,
    {
        let path = self.split_path(stage);
        if self.state(stage) == CacheState::Ready {
            log::info!("{} split: {} -> {} ({})", stage, CacheState::Uninitialized, CacheState::Ready, path.display());
            return read_split(&path);
        }

        log::info!("{} split: {} -> {}", stage, CacheState::Uninitialized, CacheState::Building);
        let split = builder()?;

        write_split(&path, &split)?;
        log::info!(
            "{} split: {} -> {} ({} samples at {})",
            stage,
            CacheState::Building,
            CacheState::Persisted,
            split.len(),
            path.display()
        );

        log::debug!("{} split: {} -> {}", stage, CacheState::Persisted, CacheState::Ready);
        Ok(split)
    }

    pub fn load(&self, stage: Stage) -> Result<Split> {
        read_split(&self.split_path(stage))
    }

    pub fn store(&self, stage: Stage, split: &Split) -> Result<PathBuf> {
        let path = self.split_path(stage);
        write_split(&path, split)?;
        Ok(path)
    }

    /// Remove the processed file for `stage`. Returns whether one existed.
    pub fn clear(&self, stage: Stage) -> Result<bool> {
        let path = self.split_path(stage);
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(GraphError::cache_write(format!("{}: {}", path.display(), e))),
        }
    }
}

/// `SplitCache::new(root).load_or_build(stage, builder)`.
pub fn load_or_build<P, F>(root: P, stage: Stage, builder: F) -> Result<Split>
where
    P: AsRef<Path>,
    F: FnOnce() -> Result<Split>,
{
    SplitCache::new(root).load_or_build(stage, builder)
}

fn split_schema(split: &Split) -> Schema {
    let storage = split.storage();
    let mut metadata = HashMap::new();
    metadata.insert(META_FORMAT.to_string(), FORMAT_VERSION.to_string());
    metadata.insert(META_NODE_WIDTH.to_string(), storage.node_width.to_string());
    metadata.insert(META_EDGE_WIDTH.to_string(), storage.edge_width.to_string());
    metadata.insert(META_TASK.to_string(), split.task().to_string());
    metadata.insert(META_CREATED_AT.to_string(), chrono::Utc::now().to_rfc3339());

    Schema::new(vec![
        Field::new("num_nodes", DataType::UInt32, false),
        list_field("node_attrs", DataType::Float32),
        list_field("edge_src", DataType::UInt32),
        list_field("edge_dst", DataType::UInt32),
        list_field("edge_attrs", DataType::Float32),
        list_field("source_nodes", DataType::UInt64),
    ])
    .with_metadata(metadata)
}

fn item_field(item_type: DataType) -> Arc<Field> {
    Arc::new(Field::new("item", item_type, false))
}

fn list_field(name: &str, item_type: DataType) -> Field {
    Field::new(name, DataType::List(item_field(item_type)), false)
}

fn list_array<T: ArrowPrimitiveType>(
    values: Vec<T::Native>,
    lengths: impl Iterator<Item = usize>,
) -> Result<ArrayRef> {
    let values = PrimitiveArray::<T>::from_iter_values(values);
    let list = ListArray::try_new(
        item_field(T::DATA_TYPE),
        OffsetBuffer::from_lengths(lengths),
        Arc::new(values),
        None,
    )?;
    Ok(Arc::new(list))
}

fn encode_split(split: &Split) -> Result<RecordBatch> {
    let storage = split.storage();
    let index = split.index();
    if storage.node_attrs.len().max(storage.edge_attrs.len()) > i32::MAX as usize {
        return Err(GraphError::cache_write("split is too large for 32-bit list offsets"));
    }

    let node_counts = || index.node_offsets.windows(2).map(|w| w[1] - w[0]);
    let edge_counts = || index.edge_offsets.windows(2).map(|w| w[1] - w[0]);
    let nw = storage.node_width;
    let ew = storage.edge_width;

    let num_nodes = UInt32Array::from_iter_values(node_counts().map(|c| c as u32));
    let columns: Vec<ArrayRef> = vec![
        Arc::new(num_nodes),
        list_array::<Float32Type>(storage.node_attrs.clone(), node_counts().map(|c| c * nw))?,
        list_array::<UInt32Type>(storage.edge_index.iter().map(|e| e[0]).collect(), edge_counts())?,
        list_array::<UInt32Type>(storage.edge_index.iter().map(|e| e[1]).collect(), edge_counts())?,
        list_array::<Float32Type>(storage.edge_attrs.clone(), edge_counts().map(|c| c * ew))?,
        list_array::<UInt64Type>(storage.source_nodes.clone(), node_counts())?,
    ];

    Ok(RecordBatch::try_new(Arc::new(split_schema(split)), columns)?)
}

/// Serialize `split` to `path`, publishing it atomically: the data goes to a
/// temporary file in the same directory that is renamed into place only once
/// complete.
pub fn write_split(path: &Path, split: &Split) -> Result<()> {
    let write_err = |e: &dyn fmt::Display| GraphError::cache_write(format!("{}: {}", path.display(), e));

    let dir = path
        .parent()
        .ok_or_else(|| GraphError::cache_write(format!("{} has no parent directory", path.display())))?;
    fs::create_dir_all(dir).map_err(|e| write_err(&e))?;

    let batch = encode_split(split).map_err(|e| write_err(&e))?;
    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| write_err(&e))?;
    {
        let mut writer = FileWriter::try_new(BufWriter::new(tmp.as_file_mut()), &batch.schema())
            .map_err(|e| write_err(&e))?;
        writer.write(&batch).map_err(|e| write_err(&e))?;
        let mut buffered = writer.into_inner().map_err(|e| write_err(&e))?;
        buffered.flush().map_err(|e| write_err(&e))?;
    }
    tmp.as_file().sync_all().map_err(|e| write_err(&e))?;
    tmp.persist(path).map_err(|e| write_err(&e.error))?;

    Ok(())
}

fn list_column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a ListArray> {
    batch
        .column_by_name(name)
        .and_then(|col| col.as_any().downcast_ref::<ListArray>())
        .ok_or_else(|| GraphError::cache_read(format!("missing or mistyped column {}", name)))
}

/// Values of a list column together with per-row lengths.
fn list_parts<T: ArrowPrimitiveType>(batch: &RecordBatch, name: &str) -> Result<(Vec<T::Native>, Vec<usize>)> {
    let list = list_column(batch, name)?;
    let offsets = list.value_offsets();
    let values = list
        .values()
        .as_any()
        .downcast_ref::<PrimitiveArray<T>>()
        .ok_or_else(|| GraphError::cache_read(format!("column {} has unexpected item type", name)))?;

    let (first, last) = match (offsets.first(), offsets.last()) {
        (Some(&first), Some(&last)) => (first as usize, last as usize),
        _ => return Ok((Vec::new(), Vec::new())),
    };
    if last > values.len() || first > last {
        return Err(GraphError::cache_read(format!("column {} has offsets beyond its values", name)));
    }

    let lengths = offsets.windows(2).map(|w| (w[1] - w[0]) as usize).collect();
    Ok((values.values()[first..last].to_vec(), lengths))
}

fn metadata_value<'a>(schema: &'a Schema, key: &str) -> Result<&'a str> {
    schema
        .metadata()
        .get(key)
        .map(String::as_str)
        .ok_or_else(|| GraphError::cache_read(format!("missing schema metadata {}", key)))
}

fn decode_batches(schema: &Schema, batches: &[RecordBatch]) -> Result<Split> {
    let parse_width = |key: &str| -> Result<usize> {
        metadata_value(schema, key)?
            .parse()
            .map_err(|_| GraphError::cache_read(format!("schema metadata {} is not a width", key)))
    };
    let node_width = parse_width(META_NODE_WIDTH)?;
    let edge_width = parse_width(META_EDGE_WIDTH)?;
    let task: TaskType = metadata_value(schema, META_TASK)?
        .parse()
        .map_err(|e: GraphError| GraphError::cache_read(e.to_string()))?;
    if let Some(created_at) = schema.metadata().get(META_CREATED_AT) {
        log::debug!("Split created at {}", created_at);
    }

    let mut storage = FlatStorage {
        node_width,
        edge_width,
        ..FlatStorage::default()
    };
    let mut index = SliceIndex::default();

    for batch in batches {
        let (node_attrs, node_attr_lengths) = list_parts::<Float32Type>(batch, "node_attrs")?;
        let (edge_src, edge_lengths) = list_parts::<UInt32Type>(batch, "edge_src")?;
        let (edge_dst, dst_lengths) = list_parts::<UInt32Type>(batch, "edge_dst")?;
        let (edge_attrs, edge_attr_lengths) = list_parts::<Float32Type>(batch, "edge_attrs")?;
        let (source_nodes, node_lengths) = list_parts::<UInt64Type>(batch, "source_nodes")?;
        let num_nodes = batch
            .column_by_name("num_nodes")
            .and_then(|col| col.as_any().downcast_ref::<UInt32Array>())
            .ok_or_else(|| GraphError::cache_read("missing or mistyped column num_nodes"))?;

        let rows = batch.num_rows();
        let per_row = [
            num_nodes.len(),
            node_attr_lengths.len(),
            edge_lengths.len(),
            edge_attr_lengths.len(),
            node_lengths.len(),
        ];
        if per_row.iter().any(|&len| len != rows)
            || edge_lengths != dst_lengths
            || num_nodes.values().iter().zip(&node_lengths).any(|(&k, &n)| k as usize != n)
            || node_attr_lengths.iter().zip(&node_lengths).any(|(&a, &n)| a != n * node_width)
            || edge_attr_lengths.iter().zip(&edge_lengths).any(|(&a, &e)| a != e * edge_width)
        {
            return Err(GraphError::cache_read("per-sample row counts disagree across columns"));
        }

        storage.node_attrs.extend(node_attrs);
        storage.edge_attrs.extend(edge_attrs);
        storage.source_nodes.extend(source_nodes);
        storage.edge_index.extend(edge_src.into_iter().zip(edge_dst).map(|(u, v)| [u, v]));

        for (&nodes, &edges) in node_lengths.iter().zip(&edge_lengths) {
            let last_node = index.node_offsets[index.node_offsets.len() - 1];
            let last_edge = index.edge_offsets[index.edge_offsets.len() - 1];
            index.node_offsets.push(last_node + nodes);
            index.edge_offsets.push(last_edge + edges);
        }
    }

    Split::from_parts(task, storage, index).map_err(|e| GraphError::cache_read(e.to_string()))
}

/// Deserialize a split written by `write_split`. Any failure is a `CacheRead` error.
pub fn read_split(path: &Path) -> Result<Split> {
    let read_err = |e: &dyn fmt::Display| GraphError::cache_read(format!("{}: {}", path.display(), e));

    let file = File::open(path).map_err(|e| read_err(&e))?;
    let reader = FileReader::try_new(BufReader::new(file), None).map_err(|e| read_err(&e))?;
    let schema = reader.schema();
    let batches = reader
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| read_err(&e))?;

    let split = decode_batches(&schema, &batches).map_err(|e| read_err(&e))?;
    log::debug!("Loaded {} samples from {}", split.len(), path.display());
    Ok(split)
}
