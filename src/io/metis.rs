/*!
# Metis

Writer and reader for the **Metis graph format** the external partitioner
consumes.

A file consists of:
- a **header line** `n m` (unweighted) or `n m 1` (weighted), and
- `n` adjacency lines, line `i` listing the neighbors of dense node `i` as
  1-based ids, weighted files alternating `neighbor weight` pairs. An isolated
  node occupies an empty line.

The header edge count is always derived from the adjacency lists themselves:
the writer computes it from what it is about to emit, and the reader recounts
the body and rejects a file whose header disagrees. Lines starting with a
configurable **comment identifier** (default: `"%"`) are ignored when reading.

# Examples

## Writing a graph
```
use std::io::Cursor;
use metis_prep::{graph::DenseGraph, ingest::EdgeListReader, mapper::DenseMapper};

let list = EdgeListReader::new().try_read(Cursor::new(&b"5 3\n7 5\n"[..])).unwrap();
let mapper = DenseMapper::from_edge_list(&list);
let graph = DenseGraph::from_edge_list(&list, &mapper);

let mut buffer = Cursor::new(Vec::new());
graph.try_write_metis(&mut buffer).unwrap();

assert_eq!(String::from_utf8(buffer.into_inner()).unwrap(), "3 2\n2\n1 3\n2\n");
```

## Reading it back
```
use std::io::Cursor;
use metis_prep::graph::DenseGraph;

let graph = DenseGraph::try_read_metis(Cursor::new(&b"3 2\n2\n1 3\n2\n"[..])).unwrap();
assert_eq!(graph.number_of_nodes(), 3);
assert_eq!(graph.number_of_edges(), 2);
```
*/

use std::{
    fs::File,
    io::{BufRead, BufWriter, Write},
    path::Path,
};

use itertools::Itertools;

use super::*;
use crate::{
    graph::DenseGraph,
    ingest::WeightMode,
    io::{invalid_line, parse_token},
    node::{DenseNode, NumEdges, NumNodes, Weight},
};

/// A writer for the **Metis format**.
#[derive(Debug, Clone, Default)]
pub struct MetisWriter;

impl MetisWriter {
    /// Shorthand for default
    pub fn new() -> Self {
        Self
    }

    /// Writes the graph to a given writer.
    ///
    /// The emitted header counts are recomputed from the graph's adjacency
    /// lists, so re-deriving them from the written body reproduces the header
    /// exactly.
    pub fn try_write<W: Write>(&self, graph: &DenseGraph, mut writer: W) -> Result<()> {
        let n = graph.number_of_nodes();
        let m = graph.number_of_edges();

        if graph.is_weighted() {
            writeln!(writer, "{n} {m} 1")?;
        } else {
            writeln!(writer, "{n} {m}")?;
        }

        for u in 1..=n {
            let entries = graph.neighbors_of(u);
            let line = if graph.is_weighted() {
                entries.iter().map(|&(v, w)| format!("{v} {w}")).join(" ")
            } else {
                entries.iter().map(|&(v, _)| v.to_string()).join(" ")
            };
            writeln!(writer, "{line}")?;
        }

        Ok(())
    }

    /// Writes the graph to a file.
    pub fn try_write_file<P: AsRef<Path>>(&self, graph: &DenseGraph, path: P) -> Result<()> {
        self.try_write(graph, BufWriter::new(File::create(path)?))
    }
}

/// A configurable reader for the **Metis format**.
///
/// Exists so that verifying a produced file is a first-class operation: the
/// reader recounts the body and fails on any header/body disagreement instead
/// of trusting the header.
#[derive(Debug, Clone)]
pub struct MetisReader {
    /// Lines starting with `comment_identifier` are skipped when reading
    comment_identifier: String,
}

impl Default for MetisReader {
    fn default() -> Self {
        Self {
            comment_identifier: "%".to_string(),
        }
    }
}

impl MetisReader {
    /// Shorthand for default
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates the comment identifier.
    pub fn comment_identifier<S: Into<String>>(mut self, c: S) -> MetisReader {
        self.comment_identifier = c.into();
        self
    }

    /// Reads a graph from a given reader.
    ///
    /// Fails if the header is malformed, a body line cannot be parsed, a
    /// neighbor id is outside `1..=n`, fewer than `n` adjacency lines exist,
    /// or the body does not reproduce the header's edge count.
    pub fn try_read<R: BufRead>(&self, reader: R) -> Result<DenseGraph> {
        let mut lines = reader.lines().enumerate();

        let (header_no, header) = self
            .next_non_comment_line(&mut lines)?
            .ok_or_else(|| invalid_line!(0, "missing header"))?;

        let mut tokens = header.split_ascii_whitespace();
        let n: NumNodes = parse_token!(tokens, header_no, "number of nodes");
        let m: NumEdges = parse_token!(tokens, header_no, "number of edges");
        let mode = match tokens.next() {
            None => WeightMode::Unweighted,
            Some("1") => WeightMode::Weighted,
            Some(flag) => {
                return Err(invalid_line!(header_no, "unsupported format flag {:?}", flag));
            }
        };

        let mut graph = DenseGraph::new(n, mode);
        let mut parsed_lines: NumNodes = 0;

        while parsed_lines < n {
            let Some((line_no, line)) = self.next_non_comment_line(&mut lines)? else {
                break;
            };
            let u = parsed_lines + 1;
            self.parse_adjacency_line(&mut graph, u, n, mode, line_no, &line)?;
            parsed_lines += 1;
        }

        if parsed_lines < n {
            return Err(Error::CardinalityMismatch {
                expected: n as usize,
                found: parsed_lines as usize,
            });
        }

        // recount the body instead of trusting the header
        if graph.total_entries() != 2 * m as u64 {
            return Err(Error::HeaderMismatch {
                header: m as u64,
                body: graph.total_entries(),
            });
        }

        graph.sort_adjacencies();
        Ok(graph)
    }

    /// Reads a graph from a file.
    pub fn try_read_file<P: AsRef<Path>>(&self, path: P) -> Result<DenseGraph> {
        self.try_read(open_input(path)?)
    }

    /// Returns the next non-comment line with its 1-based number, if any.
    fn next_non_comment_line<I>(&self, lines: &mut I) -> Result<Option<(usize, String)>>
    where
        I: Iterator<Item = (usize, std::io::Result<String>)>,
    {
        for (idx, line) in lines {
            let line = line?;
            if line.starts_with(self.comment_identifier.as_str()) {
                continue;
            }
            return Ok(Some((idx + 1, line)));
        }
        Ok(None)
    }

    /// Parses one adjacency line into the list of node `u`.
    fn parse_adjacency_line(
        &self,
        graph: &mut DenseGraph,
        u: DenseNode,
        n: NumNodes,
        mode: WeightMode,
        line_no: usize,
        line: &str,
    ) -> Result<()> {
        let mut tokens = line.split_ascii_whitespace();

        while let Some(token) = tokens.next() {
            let v: DenseNode = token
                .parse()
                .map_err(|_| invalid_line!(line_no, "cannot parse neighbor from {:?}", token))?;
            if !(1..=n).contains(&v) {
                return Err(invalid_line!(line_no, "neighbor {} out of range 1..={}", v, n));
            }

            let w: Weight = match mode {
                WeightMode::Weighted => parse_token!(tokens, line_no, "neighbor weight"),
                WeightMode::Unweighted => 1,
            };

            graph.add_entry(u, v, w);
        }

        Ok(())
    }
}

impl DenseGraph {
    /// Writes the graph in **Metis format** using default settings.
    pub fn try_write_metis<W: Write>(&self, writer: W) -> Result<()> {
        MetisWriter::new().try_write(self, writer)
    }

    /// Writes the graph in **Metis format** to a file.
    pub fn try_write_metis_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        MetisWriter::new().try_write_file(self, path)
    }

    /// Reads a graph in **Metis format** using default settings.
    pub fn try_read_metis<R: BufRead>(reader: R) -> Result<Self> {
        MetisReader::new().try_read(reader)
    }

    /// Reads a graph in **Metis format** from a file.
    pub fn try_read_metis_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        MetisReader::new().try_read_file(path)
    }
}
