/*!
# Node Representations

This crate deals with two distinct identifier spaces:
- **raw** ids as they appear in an input edge list. These are arbitrary
  non-negative integers with no contiguity or upper bound assumed, so we use
  `u64` for them.
- **dense** ids as required by the external partitioner: the contiguous range
  `1..=n` where `n` is the number of nodes that survived ingestion. As graphs
  with more than `2^32` nodes are out of reach anyway, `u32` suffices and
  halves the memory of every dense-indexed table.

Dense id `0` is never valid; adjacency and partition tables index with
`dense - 1`.
*/

/// A node identifier as found in the input edge list.
pub type RawNode = u64;

/// A node identifier in the contiguous `1..=n` space of the output graph.
pub type DenseNode = u32;

/// There can be at most `2^32 - 1` nodes in a converted graph.
pub type NumNodes = u32;

/// We limit the number of (undirected) edges to `2^32 - 1`.
pub type NumEdges = u32;

/// Edge weights are non-negative integers; unweighted input defaults to `1`.
pub type Weight = u64;

/// A partition identifier as produced by the external partitioner.
pub type PartitionId = u32;
