/*!
# Dataset Operations

Whole-dataset entry points tying the pipeline together:

- [`convert`]: edge list → adjacency file + mapping file, weight mode decided
  by sniffing.
- [`analyze`]: mapping file + partition file → [`Communities`].
- [`convert_all`]: batch conversion that reports a failed dataset and
  continues with the next one.

[`DatasetPaths`] captures the naming convention connecting the files of one
dataset: `<data>/<name>.edgelist` converts into `<out>/<name>.graph` and
`<out>/<name>.graph.mapping.txt`, and the external partitioner drops
`<out>/<name>.graph.part.<k>` next to the graph file.
*/

use std::path::{Path, PathBuf};

use tracing::{error, info};

use crate::{
    analyze::Communities,
    error::Result,
    graph::DenseGraph,
    ingest::{EdgeListReader, WeightMode},
    io::{MappingReader, MappingWriter, MetisWriter, PartitionReader},
    mapper::DenseMapper,
    node::{NumEdges, NumNodes},
};

/// The conventional file locations of one dataset.
#[derive(Debug, Clone)]
pub struct DatasetPaths {
    pub name: String,
    pub edge_list: PathBuf,
    pub graph: PathBuf,
    pub mapping: PathBuf,
}

impl DatasetPaths {
    /// Derives all paths from a dataset name, the directory holding edge
    /// lists, and the directory receiving converted graphs.
    pub fn new<S, P, Q>(name: S, dataset_dir: P, graph_dir: Q) -> Self
    where
        S: Into<String>,
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        let name = name.into();
        let edge_list = dataset_dir.as_ref().join(format!("{name}.edgelist"));
        let graph = graph_dir.as_ref().join(format!("{name}.graph"));
        let mapping = graph_dir.as_ref().join(format!("{name}.graph.mapping.txt"));
        Self {
            name,
            edge_list,
            graph,
            mapping,
        }
    }

    /// The partitioner's output file for a run with `parts` partitions.
    pub fn partition(&self, parts: u32) -> PathBuf {
        let mut path = self.graph.clone().into_os_string();
        path.push(format!(".part.{parts}"));
        path.into()
    }
}

/// What one conversion produced.
#[derive(Debug, Clone, Copy)]
pub struct ConversionSummary {
    pub nodes: NumNodes,
    pub edges: NumEdges,
    pub mode: WeightMode,
    pub skipped_lines: u64,
    pub self_loops: u64,
}

/// Converts one edge list into an adjacency file and a mapping file.
///
/// The weight mode is sniffed from the input first; the chosen mode is part
/// of the returned summary.
pub fn convert<P, Q, R>(edge_list: P, graph_out: Q, mapping_out: R) -> Result<ConversionSummary>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
    R: AsRef<Path>,
{
    let reader = EdgeListReader::new();
    let sniff = reader.sniff_file(&edge_list)?;
    info!(weighted = sniff.mode.is_weighted(), "sniffed edge-list weight mode");

    let list = reader.weight_mode(sniff.mode).try_read_file(&edge_list)?;
    let mapper = DenseMapper::from_edge_list(&list);
    let graph = DenseGraph::from_edge_list(&list, &mapper);

    MetisWriter::new().try_write_file(&graph, graph_out)?;
    MappingWriter::new().try_write_file(&mapper, mapping_out)?;

    let summary = ConversionSummary {
        nodes: graph.number_of_nodes(),
        edges: graph.number_of_edges(),
        mode: list.mode(),
        skipped_lines: list.skipped_lines(),
        self_loops: list.self_loops(),
    };
    info!(
        nodes = summary.nodes,
        edges = summary.edges,
        skipped_lines = summary.skipped_lines,
        self_loops = summary.self_loops,
        "conversion finished"
    );
    Ok(summary)
}

/// Converts a dataset at its conventional paths.
pub fn convert_dataset(paths: &DatasetPaths) -> Result<ConversionSummary> {
    convert(&paths.edge_list, &paths.graph, &paths.mapping)
}

/// Loads a mapping and a partition assignment and groups the original ids
/// by partition.
pub fn analyze<P, Q>(mapping: P, partition: Q) -> Result<Communities>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let mapper = MappingReader::new().try_read_file(mapping)?;
    let assignment = PartitionReader::new().try_read_file(partition)?;
    let communities = Communities::group(&assignment, &mapper)?;
    info!(
        communities = communities.number_of_communities(),
        nodes = communities.total_nodes(),
        "analysis finished"
    );
    Ok(communities)
}

/// Analyzes a dataset at its conventional paths for a `parts`-way partition.
pub fn analyze_dataset(paths: &DatasetPaths, parts: u32) -> Result<Communities> {
    analyze(&paths.mapping, paths.partition(parts))
}

/// Converts several datasets. A failing dataset is reported and does not stop
/// the batch; callers receive every per-dataset result.
pub fn convert_all<'a, I>(datasets: I) -> Vec<(String, Result<ConversionSummary>)>
where
    I: IntoIterator<Item = &'a DatasetPaths>,
{
    datasets
        .into_iter()
        .map(|paths| {
            info!(dataset = paths.name.as_str(), "converting");
            let result = convert_dataset(paths);
            if let Err(e) = &result {
                error!(dataset = paths.name.as_str(), "conversion failed: {e}");
            }
            (paths.name.clone(), result)
        })
        .collect()
}

#[cfg(test)]
mod test {
    use std::fs;

    use super::*;
    use crate::error::Error;

    fn write_dataset(dir: &Path, name: &str, content: &str) -> DatasetPaths {
        let paths = DatasetPaths::new(name, dir, dir);
        fs::write(&paths.edge_list, content).unwrap();
        paths
    }

    #[test]
    fn conventional_paths() {
        let paths = DatasetPaths::new("toy", "data", "graphs");

        assert_eq!(paths.edge_list, Path::new("data/toy.edgelist"));
        assert_eq!(paths.graph, Path::new("graphs/toy.graph"));
        assert_eq!(paths.mapping, Path::new("graphs/toy.graph.mapping.txt"));
        assert_eq!(paths.partition(8), Path::new("graphs/toy.graph.part.8"));
    }

    #[test]
    fn convert_writes_graph_and_mapping() {
        let dir = tempfile::tempdir().unwrap();
        let paths = write_dataset(dir.path(), "toy", "5 3\n3 5\n3 3\n7 5\n");

        let summary = convert_dataset(&paths).unwrap();

        assert_eq!(summary.nodes, 3);
        assert_eq!(summary.edges, 2);
        assert_eq!(summary.mode, WeightMode::Unweighted);
        assert_eq!(summary.self_loops, 1);

        assert_eq!(fs::read_to_string(&paths.graph).unwrap(), "3 2\n2\n1 3\n2\n");
        assert_eq!(
            fs::read_to_string(&paths.mapping).unwrap(),
            "3 1\n5 2\n7 3\n"
        );
    }

    #[test]
    fn convert_sniffs_weighted_input() {
        let dir = tempfile::tempdir().unwrap();
        let paths = write_dataset(dir.path(), "toy", "1 2 4\n2 3 7\n");

        let summary = convert_dataset(&paths).unwrap();

        assert_eq!(summary.mode, WeightMode::Weighted);
        assert!(fs::read_to_string(&paths.graph)
            .unwrap()
            .starts_with("3 2 1\n"));
    }

    #[test]
    fn convert_then_analyze_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let paths = write_dataset(dir.path(), "toy", "5 3\n3 5\n7 5\n");

        convert_dataset(&paths).unwrap();
        fs::write(paths.partition(2), "0\n1\n1\n").unwrap();

        let communities = analyze_dataset(&paths, 2).unwrap();

        assert_eq!(communities.members_of(0), Some(&[3][..]));
        assert_eq!(communities.members_of(1), Some(&[5, 7][..]));
    }

    #[test]
    fn missing_edge_list_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let paths = DatasetPaths::new("absent", dir.path(), dir.path());

        let err = convert_dataset(&paths).unwrap_err();
        assert!(matches!(err, Error::MissingFile { .. }));
    }

    #[test]
    fn missing_partition_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let paths = write_dataset(dir.path(), "toy", "1 2\n");

        convert_dataset(&paths).unwrap();
        let err = analyze_dataset(&paths, 4).unwrap_err();
        assert!(matches!(err, Error::MissingFile { .. }));
    }

    #[test]
    fn batch_continues_past_failures() {
        let dir = tempfile::tempdir().unwrap();
        let missing = DatasetPaths::new("absent", dir.path(), dir.path());
        let present = write_dataset(dir.path(), "toy", "1 2\n2 3\n");

        let results = convert_all([&missing, &present]);

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].0, "absent");
        assert!(results[0].1.is_err());
        assert_eq!(results[1].0, "toy");
        assert_eq!(results[1].1.as_ref().unwrap().edges, 2);
    }
}
