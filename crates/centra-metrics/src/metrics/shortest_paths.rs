//! Single-source shortest-path DAGs shared by both betweenness variants.
//!
//! Both node and edge betweenness run the same breadth-first phase of
//! Brandes' algorithm from every source; they differ only in how the
//! dependency is accumulated afterwards. This module owns the BFS phase.

use std::collections::VecDeque;

use centra_core::Graph;

/// Dense outgoing adjacency: `out[v]` lists `(destination, edge index)`.
///
/// Built once per computation and shared read-only by every source pass.
#[derive(Debug)]
pub(crate) struct Adjacency {
    pub(crate) out: Vec<Vec<(usize, usize)>>,
    pub(crate) edge_count: usize,
}

impl Adjacency {
    pub(crate) fn new(graph: &Graph) -> Self {
        let mut out = vec![Vec::new(); graph.node_count()];
        for e in graph.edges() {
            out[e.source().index()].push((e.destination().index(), e.id().index()));
        }
        Self {
            out,
            edge_count: graph.edge_count(),
        }
    }

    pub(crate) fn node_count(&self) -> usize {
        self.out.len()
    }
}

/// Shortest-path bookkeeping for one source node.
#[derive(Debug)]
pub(crate) struct ShortestPaths {
    /// Reached nodes in BFS discovery order. Popping from the back visits
    /// farthest nodes first.
    pub(crate) order: Vec<usize>,
    /// `sigma[t]`: number of shortest paths from the source to `t`.
    pub(crate) sigma: Vec<f64>,
    /// `incoming[w]`: `(predecessor, edge)` for every edge that ends a
    /// shortest path to `w`.
    pub(crate) incoming: Vec<Vec<(usize, usize)>>,
}

impl ShortestPaths {
    /// Unweighted BFS from `source` over outgoing edges.
    ///
    /// Equal-length paths are all counted; none is privileged.
    pub(crate) fn from_source(adj: &Adjacency, source: usize) -> Self {
        let n = adj.node_count();

        let mut order: Vec<usize> = Vec::with_capacity(n);
        let mut incoming: Vec<Vec<(usize, usize)>> = vec![Vec::new(); n];

        let mut sigma: Vec<f64> = vec![0.0; n];
        sigma[source] = 1.0;

        // None = unvisited.
        let mut dist: Vec<Option<usize>> = vec![None; n];
        dist[source] = Some(0);

        let mut queue: VecDeque<usize> = VecDeque::new();
        queue.push_back(source);

        while let Some(v) = queue.pop_front() {
            order.push(v);
            let Some(dv) = dist[v] else { continue };

            for &(w, edge) in &adj.out[v] {
                // First visit to w?
                if dist[w].is_none() {
                    dist[w] = Some(dv + 1);
                    queue.push_back(w);
                }

                // Shortest path to w via v?
                if dist[w] == Some(dv + 1) {
                    sigma[w] += sigma[v];
                    incoming[w].push((v, edge));
                }
            }
        }

        Self {
            order,
            sigma,
            incoming,
        }
    }
}

/// Element-wise `a += b`, used to merge per-worker accumulators.
pub(crate) fn sum_into(mut a: Vec<f64>, b: Vec<f64>) -> Vec<f64> {
    for (x, y) in a.iter_mut().zip(b) {
        *x += y;
    }
    a
}
