/*!
# Partition Analysis

Composes an external partition assignment with the raw↔dense bijection to
report communities in the original identifier space.

The assignment is consumed as-is: entry `i` (0-based) holds the partition id
of dense node `i + 1`. Grouping fails rather than truncates when the
assignment length and the mapping disagree, and when a dense id has no
reverse mapping.

Rendering of the community size distribution is delegated to an external
collaborator behind [`SizeDistributionSink`]; the contract is the sequence of
community sizes sorted descending.
*/

use std::{cmp::Reverse, fmt, io::Write};

use fxhash::FxHashMap;
use itertools::Itertools;

use crate::{
    error::{Error, Result},
    mapper::DenseMapper,
    node::{DenseNode, NumNodes, PartitionId, RawNode},
};

/// Number of members of the largest community quoted in a report.
pub const DEFAULT_SAMPLE_SIZE: usize = 5;

/// The nodes of each partition, translated back to raw ids.
///
/// Groups are sorted by partition id, members ascending by raw id.
///
/// # Example
/// ```
/// use metis_prep::{analyze::Communities, mapper::DenseMapper};
///
/// let mapper = DenseMapper::from_pairs([(40, 1), (10, 2), (30, 3), (20, 4)]).unwrap();
/// let communities = Communities::group(&[0, 0, 1, 1], &mapper).unwrap();
///
/// assert_eq!(communities.members_of(0), Some(&[10, 40][..]));
/// assert_eq!(communities.members_of(1), Some(&[20, 30][..]));
/// ```
#[derive(Debug, Clone)]
pub struct Communities {
    groups: Vec<(PartitionId, Vec<RawNode>)>,
}

impl Communities {
    /// Groups raw ids by their assigned partition.
    ///
    /// Fails if the assignment length differs from the mapping's node count
    /// or if any dense id in range cannot be resolved to a raw id.
    pub fn group(assignment: &[PartitionId], mapper: &DenseMapper) -> Result<Self> {
        let n = mapper.number_of_nodes() as usize;
        if assignment.len() != n {
            return Err(Error::CardinalityMismatch {
                expected: n,
                found: assignment.len(),
            });
        }

        let mut groups: FxHashMap<PartitionId, Vec<RawNode>> = FxHashMap::default();
        for (i, &partition) in assignment.iter().enumerate() {
            let dense = (i + 1) as DenseNode;
            let raw = mapper
                .raw_id_of(dense)
                .ok_or(Error::UnmappedDenseId(dense))?;
            groups.entry(partition).or_default().push(raw);
        }

        let mut groups = groups.into_iter().collect_vec();
        groups.sort_unstable_by_key(|&(partition, _)| partition);
        for (_, members) in &mut groups {
            members.sort_unstable();
        }

        Ok(Self { groups })
    }

    /// Number of non-empty communities.
    pub fn number_of_communities(&self) -> usize {
        self.groups.len()
    }

    /// Total number of grouped nodes; equals the mapping's node count.
    pub fn total_nodes(&self) -> NumNodes {
        self.groups
            .iter()
            .map(|(_, members)| members.len() as NumNodes)
            .sum()
    }

    /// Iterates `(partition, members)` sorted by partition id.
    pub fn iter(&self) -> impl Iterator<Item = (PartitionId, &[RawNode])> + '_ {
        self.groups
            .iter()
            .map(|(partition, members)| (*partition, members.as_slice()))
    }

    /// The ascending member list of one partition, if it is non-empty.
    pub fn members_of(&self, partition: PartitionId) -> Option<&[RawNode]> {
        self.groups
            .binary_search_by_key(&partition, |&(p, _)| p)
            .ok()
            .map(|i| self.groups[i].1.as_slice())
    }

    /// Community sizes sorted descending — the sequence handed to rendering
    /// collaborators.
    pub fn size_distribution(&self) -> Vec<NumNodes> {
        let mut sizes = self
            .groups
            .iter()
            .map(|(_, members)| members.len() as NumNodes)
            .collect_vec();
        sizes.sort_unstable_by_key(|&size| Reverse(size));
        sizes
    }

    /// Computes the summary statistics, quoting up to `sample_size` members
    /// of the largest community.
    pub fn stats(&self, sample_size: usize) -> CommunityStats {
        let sizes = self
            .groups
            .iter()
            .map(|(_, members)| members.len() as NumNodes)
            .collect_vec();

        let total_nodes: NumNodes = sizes.iter().sum();
        let communities = sizes.len();

        // first maximal group in partition-id order
        let mut largest: Option<(PartitionId, &Vec<RawNode>)> = None;
        for (partition, members) in &self.groups {
            if largest.is_none_or(|(_, m)| members.len() > m.len()) {
                largest = Some((*partition, members));
            }
        }

        CommunityStats {
            communities,
            total_nodes,
            min_size: sizes.iter().copied().min().unwrap_or(0),
            max_size: sizes.iter().copied().max().unwrap_or(0),
            mean_size: if communities == 0 {
                0.0
            } else {
                total_nodes as f64 / communities as f64
            },
            largest: largest.map(|(id, members)| LargestCommunity {
                id,
                size: members.len() as NumNodes,
                sample: members.iter().take(sample_size).copied().collect(),
            }),
        }
    }
}

/// The largest community of an analysis, with a member sample in ascending
/// raw-id order.
#[derive(Debug, Clone)]
pub struct LargestCommunity {
    pub id: PartitionId,
    pub size: NumNodes,
    pub sample: Vec<RawNode>,
}

/// Summary statistics over all communities. The mean is taken over the
/// community count, not the node count.
#[derive(Debug, Clone)]
pub struct CommunityStats {
    pub communities: usize,
    pub total_nodes: NumNodes,
    pub min_size: NumNodes,
    pub max_size: NumNodes,
    pub mean_size: f64,
    pub largest: Option<LargestCommunity>,
}

impl fmt::Display for CommunityStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "communities: {}", self.communities)?;
        writeln!(f, "assigned nodes: {}", self.total_nodes)?;
        if let Some(largest) = &self.largest {
            writeln!(
                f,
                "community size: min {} / mean {:.2} / max {}",
                self.min_size, self.mean_size, self.max_size
            )?;
            write!(
                f,
                "largest community: {} ({} nodes), first members {:?}",
                largest.id, largest.size, largest.sample
            )
        } else {
            write!(f, "no communities")
        }
    }
}

/// Collaborator seam for rendering a community size distribution.
///
/// Implementors receive the sizes sorted descending; the rank of a community
/// is its position in the sequence.
pub trait SizeDistributionSink {
    fn render(&mut self, dataset: &str, sizes: &[NumNodes]) -> Result<()>;
}

/// A plain-text sink writing one `rank size` line per community. Stands in
/// where no graphical collaborator is wired up.
pub struct TextDistribution<W>(pub W);

impl<W: Write> SizeDistributionSink for TextDistribution<W> {
    fn render(&mut self, dataset: &str, sizes: &[NumNodes]) -> Result<()> {
        writeln!(self.0, "# community sizes for {dataset}")?;
        for (rank, size) in sizes.iter().enumerate() {
            writeln!(self.0, "{rank} {size}")?;
        }
        Ok(())
    }
}
