//! Reading pentagonal adjacency graphs of fullerenes in planar code and
//! classifying them by the partition of 12 their pentagon clusters realise.
//!
//! The pipeline works one graph at a time:
//! [`planar_code::Decoder`] → [`graph::Graph`] → [`cluster::Clustering`] →
//! [`partition::PartitionTable`].

pub mod cli;
pub mod cluster;
pub mod error;
pub mod graph;
pub mod partition;
pub mod planar_code;
pub mod policy;

use std::io::Read;

pub use cluster::{Cluster, Clustering, SizeFrequency};
pub use error::{PlanarCodeError, Result};
pub use graph::{Graph, HalfEdge};
pub use partition::{PartitionOfTwelve, PartitionTable};
pub use planar_code::{AdjacencyRecord, Decoder};

/// The maximum number of vertices a graph may have.
pub const MAX_VERTICES: usize = 12;

/// The maximum number of directed half-edges of a planar graph on
/// [`MAX_VERTICES`] vertices.
pub const MAX_HALF_EDGES: usize = 6 * MAX_VERTICES - 12;

/// The maximum degree of a vertex.
pub const MAX_DEGREE: usize = MAX_VERTICES - 1;

/// The integer whose partitions classify a graph (a fullerene has 12 pentagons).
pub const PARTITION_TOTAL: usize = 12;

/// The number of partitions of [`PARTITION_TOTAL`].
pub const PARTITION_COUNT: usize = 77;

/// =============== consumer facing calls ===============

/// Decode the next record of `decoder` and build its rotation system.
///
/// Returns `Ok(None)` at a clean end of stream.
pub fn next_graph<R: Read>(decoder: &mut Decoder<R>) -> Result<Option<Graph>> {
    match decoder.next_record()? {
        Some(record) => Graph::build(&record).map(Some),
        None => Ok(None),
    }
}

/// How many clusters of each size `graph` has.
pub fn cluster_sizes(graph: &Graph) -> SizeFrequency {
    Clustering::identify(graph).sizes()
}

/// The ordinal of the partition of 12 described by `sizes`.
pub fn classify(sizes: &SizeFrequency) -> Result<usize> {
    PartitionTable::global().classify(sizes)
}

/// Whether a cluster with `size` members having the given degrees is one of
/// the admissible pentagon clusters.
pub fn is_cluster_valid(size: usize, degrees: &[usize]) -> bool {
    partition::is_cluster_valid(size, degrees)
}

/// All partitions of 12, ordered by ordinal.
pub fn all_partitions() -> &'static [PartitionOfTwelve] {
    PartitionTable::global().partitions()
}
