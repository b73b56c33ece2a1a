//! Betweenness centrality via Brandes' algorithm.
//!
//! # Overview
//!
//! Betweenness centrality measures how often a node lies on shortest paths
//! between other pairs of nodes. High-betweenness actors are "brokers":
//! communication between otherwise distant parts of the graph flows through
//! them.
//!
//! # Algorithm
//!
//! We implement Brandes' algorithm (2001) for unweighted directed graphs:
//!
//! 1. For each source node `s`, run BFS to compute shortest-path counts
//!    and predecessors ([`ShortestPaths`]).
//! 2. Accumulate dependency scores in reverse BFS order (farthest nodes
//!    first): `δ(v) += σ(v)/σ(w) · (1 + δ(w))` for every predecessor `v`
//!    of `w`.
//! 3. Sum the dependency of every node other than `s` across all sources.
//!
//! Complexity: O(V · (V + E)).
//!
//! Source passes are independent, so they run on the rayon pool; every
//! worker folds into a private accumulator and the accumulators are summed
//! at the end.
//!
//! # Output
//!
//! Scores are **not** normalized: on the path `A → B → C`, `B` scores 1.0.
//! Callers can normalize by dividing by `(n-1)*(n-2)`.

use std::collections::HashMap;

use centra_core::{CentralityType, Graph, NodeId};
use rayon::prelude::*;
use tracing::instrument;

use super::shortest_paths::{Adjacency, ShortestPaths, sum_into};
use crate::centrality::{Centrality, Scores};

#[derive(Debug, Clone, Copy, Default)]
pub struct Betweenness;

impl Betweenness {
    pub const NAME: &'static str = "Betweenness";
}

impl Centrality for Betweenness {
    fn kind(&self) -> CentralityType {
        CentralityType::NodeCentrality
    }

    fn name(&self) -> &str {
        Self::NAME
    }

    fn version(&self) -> u32 {
        1
    }

    fn compute_scores(&self, graph: &Graph) -> Scores {
        Scores::Node(betweenness_centrality(graph))
    }
}

/// Compute betweenness centrality for every node in the graph.
///
/// Disconnected nodes and nodes with no shortest paths through them receive
/// a score of 0.0.
#[must_use]
#[instrument(skip(graph), fields(nodes = graph.node_count(), edges = graph.edge_count()))]
pub fn betweenness_centrality(graph: &Graph) -> HashMap<NodeId, f64> {
    let n = graph.node_count();

    if n == 0 {
        return HashMap::new();
    }

    let adj = Adjacency::new(graph);

    // Node-indexed betweenness accumulator.
    let cb: Vec<f64> = (0..n)
        .into_par_iter()
        .fold(
            || vec![0.0; n],
            |mut acc, s| {
                accumulate_source(&adj, s, &mut acc);
                acc
            },
        )
        .reduce(|| vec![0.0; n], sum_into);

    graph.node_ids().map(|id| (id, cb[id.index()])).collect()
}

/// Add the dependencies of one source pass to `cb`.
fn accumulate_source(adj: &Adjacency, s: usize, cb: &mut [f64]) {
    let sp = ShortestPaths::from_source(adj, s);

    let mut delta: Vec<f64> = vec![0.0; adj.node_count()];

    for &w in sp.order.iter().rev() {
        let coeff = 1.0 + delta[w];
        for &(v, _) in &sp.incoming[w] {
            delta[v] += (sp.sigma[v] / sp.sigma[w]) * coeff;
        }

        // The source never credits itself.
        if w != s {
            cb[w] += delta[w];
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
