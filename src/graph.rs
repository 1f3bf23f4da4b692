/*!
# Dense Adjacency

[`DenseGraph`] is the symmetric adjacency structure the metis writer
serializes: one list of `(neighbor, weight)` entries per dense node, each list
sorted ascending by `(neighbor, weight)`.

The edge count is *always* derived from the lists themselves (half the total
entry count), never tracked separately. The header of a written file therefore
cannot disagree with its body.
*/

use crate::{
    edge::RawEdge,
    ingest::{EdgeList, WeightMode},
    mapper::DenseMapper,
    node::{DenseNode, NumEdges, NumNodes, Weight},
};

/// A symmetric adjacency structure over dense ids `1..=n`.
///
/// Nodes with empty lists are legal and keep their slot; in a graph built via
/// [`DenseGraph::from_edge_list`] they cannot occur since the mapper only
/// covers nodes with at least one retained edge.
#[derive(Debug, Clone)]
pub struct DenseGraph {
    /// Indexed by `dense - 1`.
    adj: Vec<Vec<(DenseNode, Weight)>>,
    mode: WeightMode,
}

impl DenseGraph {
    /// Creates a graph of `n` nodes without any edges.
    pub fn new(n: NumNodes, mode: WeightMode) -> Self {
        Self {
            adj: vec![Vec::new(); n as usize],
            mode,
        }
    }

    /// Expands a canonical edge list into symmetric adjacency lists.
    ///
    /// Every edge contributes one entry to each endpoint's list. Entries that
    /// differ only in weight (retained conflicting-weight duplicates) all
    /// appear.
    ///
    /// # Panics
    /// Panics if an edge endpoint is unknown to `mapper`. Building the mapper
    /// via [`DenseMapper::from_edge_list`] on the same list guarantees this
    /// cannot happen.
    pub fn from_edge_list(list: &EdgeList, mapper: &DenseMapper) -> Self {
        let mut graph = Self::new(mapper.number_of_nodes(), list.mode());

        for &RawEdge(u, v, w) in list.edges() {
            let u = mapper.dense_id_of(u).unwrap();
            let v = mapper.dense_id_of(v).unwrap();
            graph.add_entry_pair(u, v, w);
        }

        graph.sort_adjacencies();
        graph
    }

    /// Appends the symmetric entry pair of one undirected edge.
    pub(crate) fn add_entry_pair(&mut self, u: DenseNode, v: DenseNode, w: Weight) {
        self.adj[(u - 1) as usize].push((v, w));
        self.adj[(v - 1) as usize].push((u, w));
    }

    /// Appends a single directed entry; used when reconstructing a graph from
    /// an adjacency file, where each direction appears on its own line.
    pub(crate) fn add_entry(&mut self, u: DenseNode, v: DenseNode, w: Weight) {
        self.adj[(u - 1) as usize].push((v, w));
    }

    /// Sorts every list ascending by `(neighbor, weight)`.
    pub(crate) fn sort_adjacencies(&mut self) {
        for list in &mut self.adj {
            list.sort_unstable();
        }
    }

    /// Returns the number of nodes of the graph.
    pub fn number_of_nodes(&self) -> NumNodes {
        self.adj.len() as NumNodes
    }

    /// Total number of adjacency entries across all lists. Even for every
    /// symmetric graph, since each edge contributes two entries.
    pub fn total_entries(&self) -> u64 {
        self.adj.iter().map(|list| list.len() as u64).sum()
    }

    /// Returns the number of undirected edges, derived from the current
    /// adjacency lists as half the total entry count.
    pub fn number_of_edges(&self) -> NumEdges {
        (self.total_entries() / 2) as NumEdges
    }

    /// Returns the sorted adjacency list of `u`.
    /// ** Panics if `u` is `0` or exceeds `n` **
    pub fn neighbors_of(&self, u: DenseNode) -> &[(DenseNode, Weight)] {
        &self.adj[(u - 1) as usize]
    }

    /// The weight mode the graph will be serialized under.
    pub fn mode(&self) -> WeightMode {
        self.mode
    }

    /// Returns true if adjacency entries carry meaningful weights.
    pub fn is_weighted(&self) -> bool {
        self.mode.is_weighted()
    }

    /// Returns true if the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.adj.is_empty()
    }

    /// Iterates every undirected edge once as `(u, v, w)` with `u < v`.
    /// Relies on the lists being symmetric and loop-free.
    pub fn edges(&self) -> impl Iterator<Item = (DenseNode, DenseNode, Weight)> + '_ {
        self.adj.iter().enumerate().flat_map(|(i, list)| {
            let u = (i + 1) as DenseNode;
            list.iter()
                .filter(move |&&(v, _)| v > u)
                .map(move |&(v, w)| (u, v, w))
        })
    }
}

#[cfg(test)]
mod test {
    use std::io::Cursor;

    use itertools::Itertools;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64Mcg;

    use super::*;
    use crate::ingest::EdgeListReader;

    fn build(data: &str, mode: WeightMode) -> (EdgeList, DenseMapper, DenseGraph) {
        let list = EdgeListReader::new()
            .weight_mode(mode)
            .try_read(Cursor::new(data))
            .unwrap();
        let mapper = DenseMapper::from_edge_list(&list);
        let graph = DenseGraph::from_edge_list(&list, &mapper);
        (list, mapper, graph)
    }

    #[test]
    fn small_unweighted_graph() {
        let (_, mapper, graph) = build("5 3\n3 5\n3 3\n7 5\n", WeightMode::Unweighted);

        // node set {3, 5, 7} maps to dense 1, 2, 3
        assert_eq!(mapper.dense_id_of(3), Some(1));
        assert_eq!(mapper.dense_id_of(5), Some(2));
        assert_eq!(mapper.dense_id_of(7), Some(3));

        assert_eq!(graph.number_of_nodes(), 3);
        assert_eq!(graph.number_of_edges(), 2);
        assert_eq!(graph.neighbors_of(1), &[(2, 1)]);
        assert_eq!(graph.neighbors_of(2), &[(1, 1), (3, 1)]);
        assert_eq!(graph.neighbors_of(3), &[(2, 1)]);
    }

    #[test]
    fn conflicting_weights_double_the_entries() {
        let (_, _, graph) = build("1 2 4\n2 1 9\n", WeightMode::Weighted);

        assert_eq!(graph.number_of_nodes(), 2);
        assert_eq!(graph.neighbors_of(1), &[(2, 4), (2, 9)]);
        assert_eq!(graph.neighbors_of(2), &[(1, 4), (1, 9)]);
        assert_eq!(graph.number_of_edges(), 2);
    }

    #[test]
    fn empty_edge_list_yields_empty_graph() {
        let (_, _, graph) = build("1 1\n", WeightMode::Unweighted);

        assert!(graph.is_empty());
        assert_eq!(graph.number_of_edges(), 0);
        assert_eq!(graph.total_entries(), 0);
    }

    #[test]
    fn isolated_slot_stays_empty() {
        let mut graph = DenseGraph::new(3, WeightMode::Unweighted);
        graph.add_entry_pair(1, 3, 1);
        graph.sort_adjacencies();

        assert_eq!(graph.neighbors_of(2), &[]);
        assert_eq!(graph.number_of_nodes(), 3);
        assert_eq!(graph.number_of_edges(), 1);
    }

    #[test]
    fn edges_iterates_each_edge_once() {
        let (_, _, graph) = build("1 2\n2 3\n1 3\n", WeightMode::Unweighted);

        assert_eq!(
            graph.edges().collect_vec(),
            vec![(1, 2, 1), (1, 3, 1), (2, 3, 1)]
        );
    }

    #[test]
    fn random_graphs_stay_symmetric_and_even() {
        let rng = &mut Pcg64Mcg::seed_from_u64(3);

        for _ in 0..20 {
            let lines = (0..200)
                .map(|_| {
                    format!(
                        "{} {}",
                        rng.random_range(0..50u64),
                        rng.random_range(0..50u64)
                    )
                })
                .join("\n");

            let (list, mapper, graph) = build(&lines, WeightMode::Unweighted);

            assert_eq!(graph.total_entries() % 2, 0);
            assert_eq!(graph.number_of_edges() as usize, list.edges().len());
            assert_eq!(graph.number_of_nodes(), mapper.number_of_nodes());

            for u in 1..=graph.number_of_nodes() {
                // sorted, loop-free, symmetric
                let list_u = graph.neighbors_of(u);
                assert!(list_u.windows(2).all(|w| w[0] <= w[1]));
                for &(v, w) in list_u {
                    assert_ne!(v, u);
                    assert!(graph.neighbors_of(v).contains(&(u, w)));
                }
            }
        }
    }
}
