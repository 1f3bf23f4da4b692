/*!
# Edge-List Ingestion

Readers for the headerless edge-list files this crate consumes. Each
non-comment line holds `source target [weight]` with whitespace-separated
tokens and arbitrary non-negative integer ids.

Ingestion is best-effort: a line that cannot be decomposed into the required
integer fields is skipped and counted, never fatal. Self-loops are dropped.
Surviving edges are canonicalized (smaller endpoint first) and deduplicated,
so duplicate and reverse-direction lines collapse to one logical edge.

Whether a file is weighted is decided up front by [`EdgeListReader::sniff`],
which inspects a sample of leading lines before the full pass.
*/

use std::{io::BufRead, path::Path};

use fxhash::FxHashSet;
use itertools::Itertools;
use tracing::warn;

use crate::{
    edge::RawEdge,
    error::Result,
    io::open_input,
    node::{NumEdges, RawNode, Weight},
};

/// Number of data lines [`EdgeListReader::sniff`] samples before deciding.
pub const SNIFF_SAMPLE: usize = 100;

/// Whether an edge list carries a weight column.
///
/// Controls both parsing (third token honored or ignored) and the output
/// format of the adjacency file.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum WeightMode {
    #[default]
    Unweighted,
    Weighted,
}

impl WeightMode {
    pub fn is_weighted(self) -> bool {
        matches!(self, WeightMode::Weighted)
    }
}

/// Outcome of sniffing an edge list for a weight column.
///
/// A single sampled line with a parseable integer third token makes the file
/// [`WeightMode::Weighted`]. Files mixing weighted and plain lines are legal;
/// the counts expose the ambiguity to the caller and a warning is logged.
#[derive(Debug, Copy, Clone)]
pub struct SniffReport {
    /// The mode the sample resolved to.
    pub mode: WeightMode,
    /// Sampled data lines carrying a parseable weight token.
    pub weighted_lines: usize,
    /// Sampled data lines without one.
    pub plain_lines: usize,
}

impl SniffReport {
    /// Returns true if the sample contained both weighted and plain lines.
    pub fn is_mixed(&self) -> bool {
        self.weighted_lines > 0 && self.plain_lines > 0
    }
}

/// A reader for headerless edge-list files.
///
/// # Example
/// ```
/// use std::io::Cursor;
/// use metis_prep::ingest::EdgeListReader;
///
/// let data = b"# a comment\n5 3\n3 5\n3 3\n7 5\n";
/// let list = EdgeListReader::new().try_read(Cursor::new(&data[..])).unwrap();
///
/// // (5,3) and (3,5) collapse, the self-loop (3,3) is dropped
/// assert_eq!(list.number_of_edges(), 2);
/// assert_eq!(list.nodes(), &[3, 5, 7]);
/// ```
#[derive(Debug, Clone)]
pub struct EdgeListReader {
    /// Lines starting with `comment_identifier` are skipped when reading
    comment_identifier: String,
    /// Whether the third token of a line is honored as a weight
    mode: WeightMode,
}

impl Default for EdgeListReader {
    fn default() -> Self {
        Self {
            comment_identifier: "#".to_string(),
            mode: WeightMode::Unweighted,
        }
    }
}

impl EdgeListReader {
    /// Creates a new (default) reader: `#` comments, unweighted.
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates the comment identifier.
    pub fn comment_identifier<S: Into<String>>(mut self, c: S) -> EdgeListReader {
        self.comment_identifier = c.into();
        self
    }

    /// Updates the weight mode.
    pub fn weight_mode(mut self, mode: WeightMode) -> EdgeListReader {
        self.mode = mode;
        self
    }

    /// Reads and canonicalizes an edge list from a given reader.
    ///
    /// Malformed lines are skipped and counted, not reported as errors.
    pub fn try_read<R: BufRead>(&self, reader: R) -> Result<EdgeList> {
        let mut edges: FxHashSet<RawEdge> = FxHashSet::default();
        let mut skipped_lines = 0u64;
        let mut self_loops = 0u64;

        for line in reader.lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with(self.comment_identifier.as_str()) {
                continue;
            }

            let mut tokens = line.split_ascii_whitespace();
            let (Some(u), Some(v)) = (tokens.next(), tokens.next()) else {
                skipped_lines += 1;
                continue;
            };
            let (Ok(u), Ok(v)) = (u.parse::<RawNode>(), v.parse::<RawNode>()) else {
                skipped_lines += 1;
                continue;
            };

            let weight = match self.mode {
                WeightMode::Weighted => tokens
                    .next()
                    .and_then(|t| t.parse::<Weight>().ok())
                    .unwrap_or(1),
                WeightMode::Unweighted => 1,
            };

            if u == v {
                self_loops += 1;
                continue;
            }

            edges.insert(RawEdge(u, v, weight).normalized());
        }

        if skipped_lines > 0 {
            warn!(skipped_lines, "skipped malformed edge-list lines");
        }

        let mut edges = edges.into_iter().collect_vec();
        edges.sort_unstable();

        let mut nodes = edges
            .iter()
            .flat_map(|e| [e.0, e.1])
            .collect::<FxHashSet<_>>()
            .into_iter()
            .collect_vec();
        nodes.sort_unstable();

        Ok(EdgeList {
            edges,
            nodes,
            mode: self.mode,
            skipped_lines,
            self_loops,
        })
    }

    /// Reads and canonicalizes an edge list from a file.
    pub fn try_read_file<P: AsRef<Path>>(&self, path: P) -> Result<EdgeList> {
        self.try_read(open_input(path)?)
    }

    /// Samples up to [`SNIFF_SAMPLE`] data lines to decide whether the input
    /// carries a weight column. Consumes the reader; file-based callers reopen
    /// via [`EdgeListReader::try_read_file`] afterwards.
    pub fn sniff<R: BufRead>(&self, reader: R) -> Result<SniffReport> {
        let mut weighted_lines = 0usize;
        let mut plain_lines = 0usize;

        for line in reader.lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with(self.comment_identifier.as_str()) {
                continue;
            }

            let tokens = line.split_ascii_whitespace().collect_vec();
            if tokens.len() >= 3 && tokens[2].parse::<Weight>().is_ok() {
                weighted_lines += 1;
            } else if tokens.len() >= 2 {
                plain_lines += 1;
            }

            if weighted_lines + plain_lines >= SNIFF_SAMPLE {
                break;
            }
        }

        let mode = if weighted_lines > 0 {
            WeightMode::Weighted
        } else {
            WeightMode::Unweighted
        };

        let report = SniffReport {
            mode,
            weighted_lines,
            plain_lines,
        };
        if report.is_mixed() {
            warn!(
                weighted_lines,
                plain_lines, "edge list mixes weighted and plain lines; treating it as weighted"
            );
        }

        Ok(report)
    }

    /// Sniffs the weight mode of a file, see [`EdgeListReader::sniff`].
    pub fn sniff_file<P: AsRef<Path>>(&self, path: P) -> Result<SniffReport> {
        self.sniff(open_input(path)?)
    }
}

/// The canonical, deduplicated result of ingesting one edge list.
///
/// Edges are normalized and sorted; the node set contains exactly the
/// endpoints of retained edges, sorted ascending (nodes mentioned only on
/// dropped lines, e.g. in self-loops, do not appear).
///
/// In weighted mode the dedup key includes the weight: two lines naming the
/// same pair with different weights are kept as distinct entries rather than
/// merged. Downstream adjacency lists and edge counts reflect both.
#[derive(Debug, Clone)]
pub struct EdgeList {
    edges: Vec<RawEdge>,
    nodes: Vec<RawNode>,
    mode: WeightMode,
    skipped_lines: u64,
    self_loops: u64,
}

impl EdgeList {
    /// The canonical edges, sorted ascending.
    pub fn edges(&self) -> &[RawEdge] {
        &self.edges
    }

    /// The distinct raw ids touched by retained edges, sorted ascending.
    pub fn nodes(&self) -> &[RawNode] {
        &self.nodes
    }

    /// The weight mode this list was parsed under.
    pub fn mode(&self) -> WeightMode {
        self.mode
    }

    /// Number of canonical edges.
    pub fn number_of_edges(&self) -> NumEdges {
        self.edges.len() as NumEdges
    }

    /// Number of lines skipped because they were malformed.
    pub fn skipped_lines(&self) -> u64 {
        self.skipped_lines
    }

    /// Number of lines dropped because source and target were equal.
    pub fn self_loops(&self) -> u64 {
        self.self_loops
    }

    /// Returns true if no edge survived ingestion.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

#[cfg(test)]
mod test {
    use std::io::Cursor;

    use super::*;

    fn read(data: &str) -> EdgeList {
        EdgeListReader::new().try_read(Cursor::new(data)).unwrap()
    }

    fn read_weighted(data: &str) -> EdgeList {
        EdgeListReader::new()
            .weight_mode(WeightMode::Weighted)
            .try_read(Cursor::new(data))
            .unwrap()
    }

    #[test]
    fn dedup_and_loop_removal() {
        let list = read("5 3\n3 5\n3 3\n7 5\n");

        assert_eq!(list.edges(), &[RawEdge(3, 5, 1), RawEdge(5, 7, 1)]);
        assert_eq!(list.nodes(), &[3, 5, 7]);
        assert_eq!(list.self_loops(), 1);
        assert_eq!(list.skipped_lines(), 0);
    }

    #[test]
    fn comments_and_blank_lines() {
        let list = read("# header\n\n1 2\n   \n# 3 4\n2 1\n");

        assert_eq!(list.edges(), &[RawEdge(1, 2, 1)]);
        assert_eq!(list.skipped_lines(), 0);
    }

    #[test]
    fn malformed_lines_are_skipped() {
        let list = read("1 2\nfoo bar\n3\n4 x\n-1 2\n5 6\n");

        assert_eq!(list.edges(), &[RawEdge(1, 2, 1), RawEdge(5, 6, 1)]);
        assert_eq!(list.skipped_lines(), 4);
    }

    #[test]
    fn unweighted_mode_ignores_extra_tokens() {
        let list = read("1 2 99\n");
        assert_eq!(list.edges(), &[RawEdge(1, 2, 1)]);
    }

    #[test]
    fn weighted_parsing_and_default() {
        let list = read_weighted("1 2 4\n2 3\n3 4 junk\n");

        assert_eq!(
            list.edges(),
            &[RawEdge(1, 2, 4), RawEdge(2, 3, 1), RawEdge(3, 4, 1)]
        );
    }

    #[test]
    fn conflicting_weights_stay_distinct() {
        let list = read_weighted("1 2 4\n2 1 9\n");

        assert_eq!(list.edges(), &[RawEdge(1, 2, 4), RawEdge(1, 2, 9)]);
        assert_eq!(list.number_of_edges(), 2);
    }

    #[test]
    fn equal_weights_collapse() {
        let list = read_weighted("1 2 4\n2 1 4\n");
        assert_eq!(list.edges(), &[RawEdge(1, 2, 4)]);
    }

    #[test]
    fn loop_only_nodes_are_excluded() {
        let list = read("3 3\n1 2\n");
        assert_eq!(list.nodes(), &[1, 2]);
    }

    #[test]
    fn custom_comment_identifier() {
        let list = EdgeListReader::new()
            .comment_identifier("%")
            .try_read(Cursor::new("% skip\n1 2\n"))
            .unwrap();
        assert_eq!(list.number_of_edges(), 1);
    }

    #[test]
    fn sniff_detects_weights() {
        let reader = EdgeListReader::new();

        let report = reader.sniff(Cursor::new("1 2 5\n2 3 1\n")).unwrap();
        assert_eq!(report.mode, WeightMode::Weighted);
        assert!(!report.is_mixed());

        let report = reader.sniff(Cursor::new("1 2\n2 3\n")).unwrap();
        assert_eq!(report.mode, WeightMode::Unweighted);
    }

    #[test]
    fn sniff_reports_mixed_input() {
        let report = EdgeListReader::new()
            .sniff(Cursor::new("1 2\n2 3 7\n3 4\n"))
            .unwrap();

        assert_eq!(report.mode, WeightMode::Weighted);
        assert!(report.is_mixed());
        assert_eq!(report.weighted_lines, 1);
        assert_eq!(report.plain_lines, 2);
    }

    #[test]
    fn sniff_ignores_comments_and_non_integer_third_token() {
        let report = EdgeListReader::new()
            .sniff(Cursor::new("# 1 2 3\n1 2 x\n"))
            .unwrap();
        assert_eq!(report.mode, WeightMode::Unweighted);
    }

    #[test]
    fn empty_input() {
        let list = read("");
        assert!(list.is_empty());
        assert!(list.nodes().is_empty());
    }
}
