use petgraph::Undirected;
use petgraph::graph::NodeIndex;
use tracing::debug;

use crate::error::{PlanarCodeError, Result};
use crate::planar_code::AdjacencyRecord;
use crate::{MAX_DEGREE, MAX_HALF_EDGES, MAX_VERTICES};

/// Undirected simple view of a [`Graph`], one edge per inverse pair.
pub type PetGraph = petgraph::Graph<(), (), Undirected>;

/// A directed edge out of `start`, stored in the flat edge array of a
/// [`Graph`] and referring to other half-edges by position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HalfEdge {
    pub start: usize,
    pub end: usize,
    /// Next half-edge around `start` in clockwise order.
    pub next: usize,
    /// Previous half-edge around `start` in clockwise order.
    pub prev: usize,
    /// The half-edge from `end` back to `start`.
    pub inverse: usize,
}

/// Rotation system of a planar graph with at most [`MAX_VERTICES`] vertices.
///
/// Vertices are numbered from 0 internally. A `Graph` only exists once every
/// half-edge has its inverse, so `inverse` can always be followed.
#[derive(Debug, Clone)]
pub struct Graph {
    vertex_count: usize,
    degree: [usize; MAX_VERTICES],
    first_edge: [Option<usize>; MAX_VERTICES],
    edges: Vec<HalfEdge>,
}

/// Half-edge whose inverse has not been located yet.
#[derive(Debug, Clone, Copy)]
struct PendingEdge {
    start: usize,
    end: usize,
    next: usize,
    prev: usize,
    inverse: Option<usize>,
}

impl Graph {
    /// Build the rotation system described by `record`.
    ///
    /// Fails when some half-edge has no partner, which means the adjacency
    /// lists are not symmetric.
    pub fn build(record: &AdjacencyRecord) -> Result<Self> {
        if record.vertex_count == 0 || record.vertex_count > MAX_VERTICES {
            return Err(PlanarCodeError::VertexCountOutOfRange {
                count: record.vertex_count,
                max: MAX_VERTICES,
            });
        }

        let mut degree = [0usize; MAX_VERTICES];
        let mut first_edge = [None; MAX_VERTICES];
        let mut pending: Vec<PendingEdge> = Vec::with_capacity(MAX_HALF_EDGES);

        // 1) one half-edge per listed neighbour, linked in the given order
        for (v, rotation) in record.neighbours.iter().take(record.vertex_count).enumerate() {
            let base = pending.len();
            let k = rotation.len();
            if k > MAX_DEGREE {
                return Err(PlanarCodeError::DegreeTooLarge {
                    vertex: v + 1,
                    max: MAX_DEGREE,
                });
            }
            for (j, &neighbour) in rotation.iter().enumerate() {
                if neighbour == 0 || neighbour > record.vertex_count {
                    return Err(PlanarCodeError::NeighbourOutOfRange {
                        vertex: v + 1,
                        neighbour,
                        vertex_count: record.vertex_count,
                    });
                }
                pending.push(PendingEdge {
                    start: v,
                    end: neighbour - 1,
                    next: base + (j + 1) % k,
                    prev: base + (j + k - 1) % k,
                    inverse: None,
                });
            }
            degree[v] = k;
            if k > 0 {
                first_edge[v] = Some(base);
            }
        }

        // 2) match every half-edge with one from the vertex built earlier
        for e in 0..pending.len() {
            let PendingEdge { start, end, .. } = pending[e];
            if end > start || pending[e].inverse.is_some() {
                continue;
            }
            let partner = first_edge[end].and_then(|first| {
                let mut f = first;
                loop {
                    let candidate = pending[f];
                    if f != e && candidate.end == start && candidate.inverse.is_none() {
                        return Some(f);
                    }
                    f = candidate.next;
                    if f == first {
                        return None;
                    }
                }
            });
            let Some(f) = partner else {
                return Err(PlanarCodeError::InverseNotFound {
                    from: end + 1,
                    to: start + 1,
                });
            };
            pending[e].inverse = Some(f);
            pending[f].inverse = Some(e);
        }

        let edges = pending
            .iter()
            .map(|p| {
                p.inverse
                    .map(|inverse| HalfEdge {
                        start: p.start,
                        end: p.end,
                        next: p.next,
                        prev: p.prev,
                        inverse,
                    })
                    .ok_or(PlanarCodeError::InverseNotFound {
                        from: p.end + 1,
                        to: p.start + 1,
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(
            vertices = record.vertex_count,
            half_edges = edges.len(),
            "built rotation system"
        );

        Ok(Self {
            vertex_count: record.vertex_count,
            degree,
            first_edge,
            edges,
        })
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    pub fn degree(&self, v: usize) -> usize {
        self.degree[v]
    }

    /// Degrees of all vertices in vertex order.
    pub fn degrees(&self) -> &[usize] {
        &self.degree[..self.vertex_count]
    }

    /// Some half-edge leaving `v`, `None` for an isolated vertex.
    pub fn first_edge(&self, v: usize) -> Option<usize> {
        self.first_edge[v]
    }

    pub fn edge(&self, e: usize) -> &HalfEdge {
        &self.edges[e]
    }

    /// All half-edges, grouped by start vertex.
    pub fn edges(&self) -> &[HalfEdge] {
        &self.edges
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len() / 2
    }

    /// Half-edges leaving `v` in clockwise order, starting at its first edge.
    pub fn rotation(&self, v: usize) -> Rotation<'_> {
        Rotation {
            graph: self,
            first: self.first_edge[v],
            current: self.first_edge[v],
        }
    }

    /// Neighbours of `v` (0-based) in clockwise order.
    pub fn neighbours(&self, v: usize) -> impl Iterator<Item = usize> + '_ {
        self.rotation(v).map(|e| self.edges[e].end)
    }

    /// Undirected petgraph copy, with node `i` standing for vertex `i`.
    pub fn to_petgraph(&self) -> PetGraph {
        let mut g = PetGraph::with_capacity(self.vertex_count, self.edge_count());
        for _ in 0..self.vertex_count {
            g.add_node(());
        }
        for (e, edge) in self.edges.iter().enumerate() {
            if e < edge.inverse {
                g.add_edge(NodeIndex::new(edge.start), NodeIndex::new(edge.end), ());
            }
        }
        g
    }
}

/// Iterator over the cyclic list of half-edges around one vertex.
pub struct Rotation<'a> {
    graph: &'a Graph,
    first: Option<usize>,
    current: Option<usize>,
}

impl Iterator for Rotation<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let e = self.current?;
        let next = self.graph.edges[e].next;
        self.current = if Some(next) == self.first { None } else { Some(next) };
        Some(e)
    }
}
