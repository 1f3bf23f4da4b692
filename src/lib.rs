/*!
`metis-prep` prepares real-world edge lists for an external graph partitioner
and translates the partitioner's answer back into the original identifier
space.

# Pipeline

A conversion run is four steps, each owned by one module:

1. [`ingest`] parses a line-oriented edge list best-effort: comments, blank
   and malformed lines are skipped, self-loops dropped, and the surviving
   edges canonicalized into an undirected, deduplicated set. Whether the file
   carries a weight column is decided by sniffing a sample of lines.
2. [`mapper`] derives the bijection between the arbitrary raw ids and the
   dense `1..=n` id space the partitioner requires: the k-th smallest raw id
   becomes dense id `k`, so the same input always produces the same mapping.
3. [`graph`] expands the canonical edges into symmetric, sorted adjacency
   lists keyed by dense id.
4. [`io`] serializes the adjacency structure in the Metis format — with a
   header whose edge count is recomputed from the emitted lists, never from a
   separate counter — and persists the mapping as a side file.

A later, independent analysis run loads the mapping and the partitioner's
assignment file and regroups the original ids per partition ([`analyze`]),
reporting counts, extrema and the largest community. [`run`] wires both runs
together at the dataset level and keeps a batch going when one dataset fails.

# Usage

```
use std::io::Cursor;
use metis_prep::prelude::*;

let data = b"5 3\n3 5\n3 3\n7 5\n";
let list = EdgeListReader::new().try_read(Cursor::new(&data[..])).unwrap();
let mapper = DenseMapper::from_edge_list(&list);
let graph = DenseGraph::from_edge_list(&list, &mapper);

let mut out = Cursor::new(Vec::new());
graph.try_write_metis(&mut out).unwrap();
assert_eq!(String::from_utf8(out.into_inner()).unwrap(), "3 2\n2\n1 3\n2\n");
```

# Design

Everything is single-threaded, whole-file batch processing: one pass to read,
one pass to build, one pass to write. Each invocation owns its structures
exclusively; nothing survives across datasets.
*/

pub mod analyze;
pub mod edge;
pub mod error;
pub mod graph;
pub mod ingest;
pub mod io;
pub mod mapper;
pub mod node;
pub mod run;

/// `metis_prep::prelude` includes the node and edge definitions and the core
/// pipeline types. File-format readers/writers live in [`io`], dataset-level
/// operations in [`run`].
pub mod prelude {
    pub use super::{
        analyze::*, edge::*, error::*, graph::*, ingest::*, mapper::*, node::*,
    };
}
