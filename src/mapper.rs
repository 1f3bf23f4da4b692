/*!
# Dense Node Mapping

The external partitioner requires contiguously numbered nodes `1..=n`, while
input edge lists use arbitrary ids. [`DenseMapper`] is the bijection between
the two spaces: the k-th smallest raw id maps to dense id `k`.

The forward direction (raw → dense) is a hash map since raw ids are sparse;
the reverse direction is a plain array indexed by `dense - 1`, which keeps the
hot lookup during adjacency construction and partition analysis hash-free.

Rebuilding the mapper from the same edge set always yields the identical
mapping: the assignment depends only on the sorted raw id set.
*/

use fxhash::FxHashMap;
use itertools::Itertools;

use crate::{
    error::{Error, Result},
    ingest::EdgeList,
    node::{DenseNode, NumNodes, RawNode},
};

/// A bidirectional mapping between raw node ids and dense ids `1..=n`.
///
/// # Example
/// ```
/// use metis_prep::mapper::DenseMapper;
///
/// let mapper = DenseMapper::from_nodes([7u64, 3, 5]);
///
/// assert_eq!(mapper.dense_id_of(3), Some(1));
/// assert_eq!(mapper.dense_id_of(7), Some(3));
/// assert_eq!(mapper.raw_id_of(2), Some(5));
/// assert_eq!(mapper.dense_id_of(4), None);
/// ```
#[derive(Debug, Clone)]
pub struct DenseMapper {
    raw_to_dense: FxHashMap<RawNode, DenseNode>,
    /// Indexed by `dense - 1`; `None` marks a hole in a loaded sparse mapping.
    dense_to_raw: Vec<Option<RawNode>>,
}

impl DenseMapper {
    /// Builds the mapping from an iterator of raw ids: distinct ids are sorted
    /// ascending and ranked, the smallest receiving dense id `1`.
    pub fn from_nodes<I: IntoIterator<Item = RawNode>>(nodes: I) -> Self {
        let mut sorted = nodes.into_iter().collect_vec();
        sorted.sort_unstable();
        sorted.dedup();

        let raw_to_dense = sorted
            .iter()
            .enumerate()
            .map(|(rank, &raw)| (raw, (rank + 1) as DenseNode))
            .collect();

        Self {
            raw_to_dense,
            dense_to_raw: sorted.into_iter().map(Some).collect(),
        }
    }

    /// Builds the mapping from the node set of an ingested edge list.
    pub fn from_edge_list(list: &EdgeList) -> Self {
        Self::from_nodes(list.nodes().iter().copied())
    }

    /// Rebuilds a mapper from explicit `(raw, dense)` pairs, the load path of
    /// the mapping file.
    ///
    /// Fails if any raw or dense id occurs twice. Dense ids need not be
    /// contiguous; absent dense ids within `1..=n` stay unmapped and are only
    /// rejected once something looks them up.
    ///
    /// Callers must ensure every dense id is positive.
    pub fn from_pairs<I: IntoIterator<Item = (RawNode, DenseNode)>>(pairs: I) -> Result<Self> {
        let pairs = pairs.into_iter().collect_vec();
        let n = pairs.iter().map(|&(_, dense)| dense).max().unwrap_or(0);

        let mut raw_to_dense =
            FxHashMap::with_capacity_and_hasher(pairs.len(), Default::default());
        let mut dense_to_raw = vec![None; n as usize];

        for (raw, dense) in pairs {
            debug_assert!(dense >= 1);
            if raw_to_dense.insert(raw, dense).is_some() {
                return Err(Error::NotABijection {
                    side: "original",
                    id: raw,
                });
            }
            if dense_to_raw[(dense - 1) as usize].replace(raw).is_some() {
                return Err(Error::NotABijection {
                    side: "dense",
                    id: dense as u64,
                });
            }
        }

        Ok(Self {
            raw_to_dense,
            dense_to_raw,
        })
    }

    /// If `raw` is mapped, returns its dense id.
    pub fn dense_id_of(&self, raw: RawNode) -> Option<DenseNode> {
        self.raw_to_dense.get(&raw).copied()
    }

    /// If `dense` is mapped, returns its raw id.
    pub fn raw_id_of(&self, dense: DenseNode) -> Option<RawNode> {
        if dense == 0 {
            return None;
        }
        self.dense_to_raw.get((dense - 1) as usize).copied().flatten()
    }

    /// The size of the dense id space, i.e. the largest dense id.
    pub fn number_of_nodes(&self) -> NumNodes {
        self.dense_to_raw.len() as NumNodes
    }

    /// Number of stored mappings. Equals [`DenseMapper::number_of_nodes`]
    /// unless the mapper was loaded from a sparse pair set.
    pub fn len(&self) -> usize {
        self.raw_to_dense.len()
    }

    /// Returns true if no mapping is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates the mappings as `(raw, dense)` in dense order, skipping holes.
    pub fn entries(&self) -> impl Iterator<Item = (RawNode, DenseNode)> + '_ {
        self.dense_to_raw
            .iter()
            .enumerate()
            .filter_map(|(i, raw)| raw.map(|raw| (raw, (i + 1) as DenseNode)))
    }
}
