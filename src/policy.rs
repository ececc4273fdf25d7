//! What to do with each classified graph.
//!
//! Each policy sees the graphs one by one, numbered from 1 in stream order,
//! and keeps only the counters it needs for its final report.

use std::cmp::Reverse;
use std::collections::HashMap;

use itertools::Itertools;
use serde::Serialize;

use crate::cluster::Clustering;
use crate::error::{PlanarCodeError, Result};
use crate::graph::Graph;
use crate::partition::{PartitionOfTwelve, PartitionTable};
use crate::PARTITION_TOTAL;

pub trait Policy {
    /// Inspect graph `number` (1-based) and its clusters.
    fn observe(&mut self, number: usize, graph: &Graph, clustering: &Clustering) -> Result<()>;

    /// Number of graphs observed so far.
    fn graphs_read(&self) -> usize;
}

/// =============== appearances of one partition ===============

/// Collects the graphs whose cluster sizes realise a requested partition.
#[derive(Debug, Clone, Serialize)]
pub struct AppearanceCounter {
    pub partition: PartitionOfTwelve,
    pub graphs_read: usize,
    pub matches: Vec<usize>,
}

impl AppearanceCounter {
    pub fn new(ordinal: usize) -> Result<Self> {
        let partition = *PartitionTable::global().get(ordinal)?;
        Ok(Self {
            partition,
            graphs_read: 0,
            matches: Vec::new(),
        })
    }
}

impl Policy for AppearanceCounter {
    fn observe(&mut self, number: usize, _graph: &Graph, clustering: &Clustering) -> Result<()> {
        self.graphs_read += 1;
        let ordinal = PartitionTable::global().classify(&clustering.sizes())?;
        if ordinal == self.partition.ordinal {
            self.matches.push(number);
        }
        Ok(())
    }

    fn graphs_read(&self) -> usize {
        self.graphs_read
    }
}

/// =============== valid clusters ===============

/// Counts of clusters of size 1 to 5.
pub type SmallClusterCounts = [u8; 5];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidClusterEntry {
    pub frequencies: SmallClusterCounts,
    pub count: usize,
}

/// Tabulates the cluster sizes of graphs whose clusters are all valid.
#[derive(Debug, Clone, Default)]
pub struct ValidClusterFilter {
    graphs_read: usize,
    valid: usize,
    histogram: HashMap<SmallClusterCounts, usize>,
}

impl ValidClusterFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of graphs with only valid clusters.
    pub fn valid(&self) -> usize {
        self.valid
    }

    /// Observed frequency vectors, ordered by descending number of 5-, 4-,
    /// 3- and 2-clusters, then ascending number of singletons.
    pub fn entries(&self) -> Vec<ValidClusterEntry> {
        self.histogram
            .iter()
            .sorted_by_key(|(f, _)| (Reverse(f[4]), Reverse(f[3]), Reverse(f[2]), Reverse(f[1]), f[0]))
            .map(|(&frequencies, &count)| ValidClusterEntry { frequencies, count })
            .collect()
    }
}

impl Policy for ValidClusterFilter {
    fn observe(&mut self, number: usize, graph: &Graph, clustering: &Clustering) -> Result<()> {
        if graph.vertex_count() != PARTITION_TOTAL {
            return Err(PlanarCodeError::NotTwelveVertices {
                graph: number,
                vertex_count: graph.vertex_count(),
            });
        }
        self.graphs_read += 1;
        if !clustering.all_valid() {
            return Ok(());
        }

        let sizes = clustering.sizes();
        let mut key = [0u8; 5];
        for (size, slot) in (1..=5).zip(key.iter_mut()) {
            *slot = sizes.counts()[size - 1];
        }
        *self.histogram.entry(key).or_default() += 1;
        self.valid += 1;
        Ok(())
    }

    fn graphs_read(&self) -> usize {
        self.graphs_read
    }
}

/// =============== six-clusters ===============

/// Collects the graphs having a cluster of exactly six vertices.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SixClusterDetector {
    pub graphs_read: usize,
    pub matches: Vec<usize>,
}

impl SixClusterDetector {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Policy for SixClusterDetector {
    fn observe(&mut self, number: usize, _graph: &Graph, clustering: &Clustering) -> Result<()> {
        self.graphs_read += 1;
        if clustering.has_cluster_of_size(6) {
            self.matches.push(number);
        }
        Ok(())
    }

    fn graphs_read(&self) -> usize {
        self.graphs_read
    }
}

/// =============== per-graph listing ===============

#[derive(Debug, Clone, Serialize)]
pub struct ClusterReport {
    /// 1-based vertex ids.
    pub members: Vec<usize>,
    pub degrees: Vec<usize>,
    pub valid: bool,
}

/// Everything known about one graph, for diagnostics.
#[derive(Debug, Clone, Serialize)]
pub struct GraphReport {
    pub number: usize,
    pub vertex_count: usize,
    pub degrees: Vec<usize>,
    pub clusters: Vec<ClusterReport>,
    /// Only for graphs on 12 vertices.
    pub partition: Option<usize>,
}

impl GraphReport {
    pub fn new(number: usize, graph: &Graph, clustering: &Clustering) -> Result<Self> {
        let partition = if graph.vertex_count() == PARTITION_TOTAL {
            Some(PartitionTable::global().classify(&clustering.sizes())?)
        } else {
            None
        };
        let clusters = clustering
            .clusters()
            .iter()
            .map(|c| ClusterReport {
                members: c.members.iter().map(|v| v + 1).collect(),
                degrees: c.degrees.clone(),
                valid: c.is_valid(),
            })
            .collect();
        Ok(Self {
            number,
            vertex_count: graph.vertex_count(),
            degrees: graph.degrees().to_vec(),
            clusters,
            partition,
        })
    }
}

/// Lists every graph with its clusters.
#[derive(Debug, Clone, Default)]
pub struct ClusterListing {
    graphs_read: usize,
    reports: Vec<GraphReport>,
}

impl ClusterListing {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reports gathered since the last call.
    pub fn drain(&mut self) -> Vec<GraphReport> {
        std::mem::take(&mut self.reports)
    }
}

impl Policy for ClusterListing {
    fn observe(&mut self, number: usize, graph: &Graph, clustering: &Clustering) -> Result<()> {
        self.graphs_read += 1;
        self.reports.push(GraphReport::new(number, graph, clustering)?);
        Ok(())
    }

    fn graphs_read(&self) -> usize {
        self.graphs_read
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::SizeFrequency;
    use crate::planar_code::AdjacencyRecord;

    fn observe<P: Policy>(policy: &mut P, number: usize, neighbours: Vec<Vec<usize>>) -> Result<()> {
        let graph = Graph::build(&AdjacencyRecord::new(neighbours))?;
        let clustering = Clustering::identify(&graph);
        policy.observe(number, &graph, &clustering)
    }

    fn isolated() -> Vec<Vec<usize>> {
        vec![vec![]; 12]
    }

    /// A triangle on 1,2,3 and nine singletons.
    fn triangle() -> Vec<Vec<usize>> {
        let mut n = isolated();
        n[0] = vec![3, 2];
        n[1] = vec![1, 3];
        n[2] = vec![2, 1];
        n
    }

    /// A path 1-2-3 and nine singletons.
    fn path() -> Vec<Vec<usize>> {
        let mut n = isolated();
        n[0] = vec![2];
        n[1] = vec![1, 3];
        n[2] = vec![2];
        n
    }

    /// A 6-cycle on 1..=6 and six singletons.
    fn hexagon() -> Vec<Vec<usize>> {
        let mut n = isolated();
        for v in 1..=6usize {
            n[v - 1] = vec![if v == 1 { 6 } else { v - 1 }, if v == 6 { 1 } else { v + 1 }];
        }
        n
    }

    #[test]
    fn counts_appearances_of_the_requested_partition() {
        let all_ones = PartitionTable::global().len() - 1;
        let mut counter = AppearanceCounter::new(all_ones).unwrap();
        observe(&mut counter, 1, isolated()).unwrap();
        observe(&mut counter, 2, triangle()).unwrap();
        observe(&mut counter, 3, isolated()).unwrap();
        assert_eq!(counter.matches, vec![1, 3]);
        assert_eq!(counter.graphs_read(), 3);
    }

    #[test]
    fn rejects_unknown_partition_number() {
        assert!(matches!(
            AppearanceCounter::new(77),
            Err(PlanarCodeError::PartitionOrdinalOutOfRange { ordinal: 77, .. })
        ));
    }

    #[test]
    fn tabulates_only_graphs_with_valid_clusters() {
        let mut filter = ValidClusterFilter::new();
        observe(&mut filter, 1, triangle()).unwrap();
        observe(&mut filter, 2, path()).unwrap();
        observe(&mut filter, 3, isolated()).unwrap();
        observe(&mut filter, 4, triangle()).unwrap();
        assert_eq!(filter.graphs_read(), 4);
        assert_eq!(filter.valid(), 3);
        assert_eq!(
            filter.entries(),
            vec![
                ValidClusterEntry { frequencies: [9, 0, 1, 0, 0], count: 2 },
                ValidClusterEntry { frequencies: [12, 0, 0, 0, 0], count: 1 },
            ]
        );
    }

    #[test]
    fn valid_cluster_filter_needs_twelve_vertices() {
        let mut filter = ValidClusterFilter::new();
        let err = observe(&mut filter, 7, vec![vec![]; 5]).unwrap_err();
        assert!(matches!(
            err,
            PlanarCodeError::NotTwelveVertices { graph: 7, vertex_count: 5 }
        ));
    }

    #[test]
    fn detects_six_clusters() {
        let mut detector = SixClusterDetector::new();
        observe(&mut detector, 1, triangle()).unwrap();
        observe(&mut detector, 2, hexagon()).unwrap();
        assert_eq!(detector.matches, vec![2]);
    }

    #[test]
    fn lists_clusters_with_one_based_members() {
        let mut listing = ClusterListing::new();
        observe(&mut listing, 1, triangle()).unwrap();
        let reports = listing.drain();
        assert_eq!(reports.len(), 1);
        let report = &reports[0];
        assert_eq!(report.clusters.len(), 10);
        assert_eq!(report.clusters[0].members.len(), 3);
        assert!(report.clusters[0].members.contains(&1));
        assert!(report.clusters.iter().all(|c| c.valid));
        let expected = SizeFrequency::from_sizes([3, 1, 1, 1, 1, 1, 1, 1, 1, 1]);
        assert_eq!(
            report.partition,
            Some(PartitionTable::global().classify(&expected).unwrap())
        );
        assert!(listing.drain().is_empty());
    }
}
