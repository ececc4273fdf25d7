use std::fmt;

use serde::Serialize;
use tracing::trace;

use crate::graph::Graph;
use crate::{MAX_VERTICES, partition};

/// How many clusters of each size `1..=12` a graph has.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct SizeFrequency([u8; MAX_VERTICES]);

impl SizeFrequency {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frequencies given as `f[0]` = number of clusters of size 1, and so on.
    pub fn from_counts(counts: [u8; MAX_VERTICES]) -> Self {
        Self(counts)
    }

    /// Frequencies of a list of cluster sizes.
    pub fn from_sizes<I: IntoIterator<Item = usize>>(sizes: I) -> Self {
        let mut f = Self::new();
        for size in sizes {
            f.add(size);
        }
        f
    }

    /// Count one more cluster of `size` (1-based).
    pub fn add(&mut self, size: usize) {
        self.0[size - 1] += 1;
    }

    pub fn remove(&mut self, size: usize) {
        self.0[size - 1] -= 1;
    }

    /// Number of clusters of `size` (1-based).
    pub fn count(&self, size: usize) -> usize {
        usize::from(self.0[size - 1])
    }

    pub fn counts(&self) -> &[u8; MAX_VERTICES] {
        &self.0
    }

    /// Σ size · count, i.e. the number of vertices covered.
    pub fn weight(&self) -> usize {
        self.0
            .iter()
            .enumerate()
            .map(|(i, &n)| (i + 1) * usize::from(n))
            .sum()
    }

    pub fn cluster_count(&self) -> usize {
        self.0.iter().map(|&n| usize::from(n)).sum()
    }

    /// Sizes of all clusters, largest first.
    pub fn parts(&self) -> impl Iterator<Item = usize> + '_ {
        (1..=MAX_VERTICES)
            .rev()
            .flat_map(move |size| std::iter::repeat_n(size, self.count(size)))
    }
}

impl fmt::Display for SizeFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for part in self.parts() {
            if !first {
                f.write_str(" ")?;
            }
            write!(f, "{}", part)?;
            first = false;
        }
        Ok(())
    }
}

/// A maximal connected set of vertices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cluster {
    /// Member vertices (0-based) in discovery order.
    pub members: Vec<usize>,
    /// Degree of each member, parallel to `members`.
    pub degrees: Vec<usize>,
}

impl Cluster {
    pub fn size(&self) -> usize {
        self.members.len()
    }

    /// See [`partition::is_cluster_valid`].
    pub fn is_valid(&self) -> bool {
        partition::is_cluster_valid(self.size(), &self.degrees)
    }
}

/// The clusters of one graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clustering {
    clusters: Vec<Cluster>,
    sizes: SizeFrequency,
}

impl Clustering {
    /// Split the vertices of `graph` into connected clusters.
    ///
    /// Clusters are discovered in ascending order of their lowest vertex.
    pub fn identify(graph: &Graph) -> Self {
        let n = graph.vertex_count();
        let mut visited = [false; MAX_VERTICES];
        let mut stack = [0usize; MAX_VERTICES];
        let mut clusters = Vec::new();
        let mut sizes = SizeFrequency::new();

        for root in 0..n {
            if visited[root] {
                continue;
            }
            let mut members = Vec::with_capacity(n);
            let mut top = 0;
            stack[top] = root;
            top += 1;
            visited[root] = true;
            members.push(root);

            while top > 0 {
                top -= 1;
                let v = stack[top];
                // marked on push, so every vertex enters the stack once
                for e in graph.rotation(v) {
                    let w = graph.edge(e).end;
                    if !visited[w] {
                        visited[w] = true;
                        stack[top] = w;
                        top += 1;
                        members.push(w);
                    }
                }
            }

            let degrees = members.iter().map(|&v| graph.degree(v)).collect();
            let cluster = Cluster { members, degrees };
            trace!(root, size = cluster.size(), "cluster found");
            sizes.add(cluster.size());
            clusters.push(cluster);
        }

        debug_assert_eq!(
            clusters.len(),
            petgraph::algo::connected_components(&graph.to_petgraph())
        );
        Self { clusters, sizes }
    }

    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    pub fn sizes(&self) -> SizeFrequency {
        self.sizes
    }

    /// Whether every cluster passes [`Cluster::is_valid`].
    pub fn all_valid(&self) -> bool {
        self.clusters.iter().all(Cluster::is_valid)
    }

    pub fn has_cluster_of_size(&self, size: usize) -> bool {
        self.clusters.iter().any(|c| c.size() == size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planar_code::AdjacencyRecord;

    fn clustering(neighbours: Vec<Vec<usize>>) -> Clustering {
        let g = Graph::build(&AdjacencyRecord::new(neighbours)).unwrap();
        Clustering::identify(&g)
    }

    #[test]
    fn isolated_vertices_are_singletons() {
        let c = clustering(vec![vec![]; 12]);
        assert_eq!(c.clusters().len(), 12);
        assert_eq!(c.sizes().count(1), 12);
        assert_eq!(c.sizes().weight(), 12);
    }

    #[test]
    fn twelve_cycle_is_one_cluster() {
        let cycle = (1..=12)
            .map(|v| vec![if v == 1 { 12 } else { v - 1 }, if v == 12 { 1 } else { v + 1 }])
            .collect();
        let c = clustering(cycle);
        assert_eq!(c.clusters().len(), 1);
        assert_eq!(c.sizes().count(12), 1);
        assert_eq!(c.clusters()[0].degrees, vec![2; 12]);
    }

    #[test]
    fn clusters_come_in_order_of_lowest_vertex() {
        // {1,4}, {2,3,5}, {6}
        let c = clustering(vec![
            vec![4],
            vec![3],
            vec![2, 5],
            vec![1],
            vec![3],
            vec![],
        ]);
        let firsts: Vec<_> = c.clusters().iter().map(|c| c.members[0]).collect();
        assert_eq!(firsts, vec![0, 1, 5]);
        assert_eq!(c.sizes(), SizeFrequency::from_sizes([2, 3, 1]));
        assert_eq!(c.clusters()[1].degrees.iter().sum::<usize>(), 4);
        assert!(c.has_cluster_of_size(3));
        assert!(!c.has_cluster_of_size(4));
    }

    #[test]
    fn path_of_three_is_not_a_valid_cluster() {
        let c = clustering(vec![vec![2], vec![1, 3], vec![2]]);
        assert!(!c.all_valid());
        let triangle = clustering(vec![vec![3, 2], vec![1, 3], vec![2, 1]]);
        assert!(triangle.all_valid());
    }

    #[test]
    fn displays_parts_descending() {
        assert_eq!(SizeFrequency::from_sizes([3, 6, 3]).to_string(), "6 3 3");
        assert_eq!(SizeFrequency::new().to_string(), "");
    }
}
