use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use crate::error::{GraphError, Result};
use crate::graph::RawGraph;
use crate::source::GraphSource;

pub const EDGES_FILE: &str = "edges.txt";
pub const LABELS_FILE: &str = "labels.txt";

fn tokens(line: &str) -> impl Iterator<Item = &str> {
    line.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
}

fn is_comment(line: &str) -> bool {
    line.is_empty() || line.starts_with('#') || line.starts_with('%')
}

/// Escape a node id into a single token that survives `tokens` and is never
/// read as a comment.
pub fn escape_id(id: &str) -> String {
    if id.is_empty() {
        return "\\e".to_string();
    }
    let mut out = String::with_capacity(id.len());
    for c in id.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            ' ' => out.push_str("\\s"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            ',' => out.push_str("\\c"),
            '#' => out.push_str("\\#"),
            '%' => out.push_str("\\%"),
            c if c.is_whitespace() => out.push_str(&format!("\\u{{{:x}}}", c as u32)),
            c => out.push(c),
        }
    }
    out
}

/// Inverse of `escape_id`. Tokens without a backslash are returned as is.
pub fn unescape_id(token: &str) -> Result<String> {
    if !token.contains('\\') {
        return Ok(token.to_string());
    }
    if token == "\\e" {
        return Ok(String::new());
    }

    let bad = || GraphError::graph_construction(format!("invalid escape in node id `{}`", token));
    let mut out = String::with_capacity(token.len());
    let mut chars = token.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next().ok_or_else(bad)? {
            '\\' => out.push('\\'),
            's' => out.push(' '),
            't' => out.push('\t'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            'c' => out.push(','),
            '#' => out.push('#'),
            '%' => out.push('%'),
            'u' => {
                if chars.next() != Some('{') {
                    return Err(bad());
                }
                let hex: String = chars.by_ref().take_while(|&c| c != '}').collect();
                let decoded = u32::from_str_radix(&hex, 16)
                    .ok()
                    .and_then(char::from_u32)
                    .ok_or_else(bad)?;
                out.push(decoded);
            }
            _ => return Err(bad()),
        }
    }
    Ok(out)
}

/// Parse an edge list: one `source target` pair per line, whitespace or
/// comma separated. A line with a single token declares an isolated node.
/// Ids may use the escapes written by `escape_id`.
pub fn parse_edge_list<R: BufRead>(reader: R) -> Result<RawGraph> {
    let mut graph = RawGraph::new();
    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if is_comment(line) {
            continue;
        }

        let fields: Vec<&str> = tokens(line).collect();
        match fields.as_slice() {
            [node] => {
                graph.add_node(&unescape_id(node)?);
            }
            [source, target, ..] => {
                graph.add_edge(&unescape_id(source)?, &unescape_id(target)?);
            }
            [] => {}
        }
    }
    Ok(graph)
}

/// Apply `node label` lines to `graph`. Labelled nodes missing from the edge
/// list are added as isolated nodes.
pub fn parse_labels<R: BufRead>(reader: R, graph: &mut RawGraph) -> Result<()> {
    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if is_comment(line) {
            continue;
        }

        let fields: Vec<&str> = tokens(line).collect();
        let [node, label, ..] = fields.as_slice() else {
            return Err(GraphError::graph_construction(format!(
                "labels line {}: expected `node label`",
                line_no + 1
            )));
        };
        let label: i64 = label.parse().map_err(|_| {
            GraphError::graph_construction(format!(
                "labels line {}: `{}` is not an integer class",
                line_no + 1,
                label
            ))
        })?;

        let node = unescape_id(node)?;
        graph.add_node(&node);
        graph.set_label(&node, label)?;
    }
    Ok(())
}

/// Write `lines` to a temporary file in `dir` and rename it to `path` once complete.
fn publish<F>(dir: &Path, path: &Path, lines: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<&mut File>) -> std::io::Result<()>,
{
    let mut tmp = NamedTempFile::new_in(dir)?;
    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        lines(&mut writer)?;
        writer.flush()?;
    }
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

fn remove_if_present(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

/// Raw graphs stored under `<root>/<source_id>/raw/`.
///
/// `edges.txt` marks a complete copy: it is published last, after
/// `labels.txt`, and removed first when a copy is rewritten.
#[derive(Debug, Clone)]
pub struct LocalSource {
    root: PathBuf,
}

impl LocalSource {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn raw_dir(&self, source_id: &str) -> PathBuf {
        self.root.join(source_id).join("raw")
    }

    pub fn contains(&self, source_id: &str) -> bool {
        self.raw_dir(source_id).join(EDGES_FILE).is_file()
    }

    /// Write `graph` into the raw directory of `source_id`. Every node is
    /// declared before the edges, so reading the copy back reproduces the
    /// node enumeration order.
    pub fn store(&self, source_id: &str, graph: &RawGraph) -> Result<PathBuf> {
        let dir = self.raw_dir(source_id);
        fs::create_dir_all(&dir)?;
        let edges_path = dir.join(EDGES_FILE);
        let labels_path = dir.join(LABELS_FILE);
        remove_if_present(&edges_path)?;

        if graph.has_labels() {
            publish(&dir, &labels_path, |out| {
                for (idx, node_id) in graph.node_ids().enumerate() {
                    if let Some(label) = graph.label(idx) {
                        writeln!(out, "{} {}", escape_id(node_id), label)?;
                    }
                }
                Ok(())
            })?;
        } else {
            remove_if_present(&labels_path)?;
        }

        publish(&dir, &edges_path, |out| {
            writeln!(out, "# {} nodes, {} edges", graph.node_count(), graph.edge_count())?;
            for node_id in graph.node_ids() {
                writeln!(out, "{}", escape_id(node_id))?;
            }
            for &(u, v) in graph.edges() {
                let (Some(source), Some(target)) = (graph.node_id(u), graph.node_id(v)) else {
                    continue;
                };
                writeln!(out, "{} {}", escape_id(source), escape_id(target))?;
            }
            Ok(())
        })?;

        log::debug!("Stored raw graph {} in {}", source_id, dir.display());
        Ok(dir)
    }
}

/// I/O failures while reading a raw file mean the source could not be acquired.
fn read_failure(path: &Path, error: GraphError) -> GraphError {
    match error {
        GraphError::Io(e) => GraphError::acquisition(format!("{}: {}", path.display(), e)),
        other => other,
    }
}

impl GraphSource for LocalSource {
    fn acquire(&self, source_id: &str) -> Result<RawGraph> {
        let dir = self.raw_dir(source_id);
        let edges_path = dir.join(EDGES_FILE);
        let file = File::open(&edges_path).map_err(|e| {
            GraphError::acquisition(format!("{}: {}", edges_path.display(), e))
        })?;
        let mut graph = parse_edge_list(BufReader::new(file)).map_err(|e| read_failure(&edges_path, e))?;

        let labels_path = dir.join(LABELS_FILE);
        if labels_path.is_file() {
            let file = File::open(&labels_path).map_err(|e| {
                GraphError::acquisition(format!("{}: {}", labels_path.display(), e))
            })?;
            parse_labels(BufReader::new(file), &mut graph).map_err(|e| read_failure(&labels_path, e))?;
        }

        log::info!(
            "Loaded raw graph {}: {} nodes, {} edges{}",
            source_id,
            graph.node_count(),
            graph.edge_count(),
            if graph.has_labels() { ", labelled" } else { "" }
        );
        Ok(graph)
    }
}
