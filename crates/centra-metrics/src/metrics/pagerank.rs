//! Damped, fixed-iteration PageRank.
//!
//! # Algorithm
//!
//! Every node starts at rank 1.0. Each sweep computes, for every node `n`:
//!
//! ```text
//! PR'(n) = (1 - d) + d * Σ PR(u) / out_degree(u)   for each edge u → n
//! ```
//!
//! where `d` is the damping factor (default 0.85). Sweeps are synchronous:
//! every node reads the previous sweep's ranks, never partially updated
//! ones, and the two rank buffers are swapped afterwards. The number of
//! sweeps is fixed (default 20); there is no convergence check.
//!
//! Ranks are not normalized to sum to 1: a node nobody links to settles at
//! `1 - d`. Nodes without outgoing edges simply keep their rank; they never
//! appear as the source of a contribution, so no division by zero occurs.
//!
//! Sweeps run one after another; the per-node updates inside a sweep run on
//! the rayon pool.

use std::collections::HashMap;

use centra_core::{CentralityType, Graph, NodeId, config::PageRankSettings};
use rayon::prelude::*;
use tracing::{debug, instrument};

use crate::centrality::{Centrality, Scores};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration for PageRank computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageRankConfig {
    /// Damping factor (probability of following a link vs teleporting).
    /// Default: 0.85.
    pub damping: f64,
    /// Number of synchronous sweeps.
    /// Default: 20.
    pub iterations: usize,
}

impl Default for PageRankConfig {
    fn default() -> Self {
        Self {
            damping: 0.85,
            iterations: 20,
        }
    }
}

impl From<&PageRankSettings> for PageRankConfig {
    fn from(settings: &PageRankSettings) -> Self {
        Self {
            damping: settings.damping,
            iterations: settings.iterations,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PageRank {
    config: PageRankConfig,
}

impl PageRank {
    pub const NAME: &'static str = "PageRank";

    #[must_use]
    pub const fn with_config(config: PageRankConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> PageRankConfig {
        self.config
    }
}

impl Centrality for PageRank {
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
        Scores::Node(pagerank(graph, &self.config))
    }
}

// ---------------------------------------------------------------------------
// Computation
// ---------------------------------------------------------------------------

/// Compute PageRank for every node.
#[must_use]
#[allow(clippy::cast_precision_loss)]
#[instrument(skip(graph, config), fields(nodes = graph.node_count(), iterations = config.iterations))]
pub fn pagerank(graph: &Graph, config: &PageRankConfig) -> HashMap<NodeId, f64> {
    let n = graph.node_count();

    if n == 0 {
        return HashMap::new();
    }

    let d = config.damping;
    let base = 1.0 - d;

    // incoming[v]: source of every edge ending at v (parallel edges repeat).
    let mut incoming: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut out_degree: Vec<f64> = vec![0.0; n];
    for e in graph.edges() {
        let u = e.source().index();
        incoming[e.destination().index()].push(u);
        out_degree[u] += 1.0;
    }

    let mut ranks = vec![1.0_f64; n];
    let mut next = vec![0.0_f64; n];

    for _ in 0..config.iterations {
        (0..n)
            .into_par_iter()
            .map(|v| {
                let inflow: f64 = incoming[v]
                    .iter()
                    .map(|&u| ranks[u] / out_degree[u])
                    .sum();
                d.mul_add(inflow, base)
            })
            .collect_into_vec(&mut next);

        std::mem::swap(&mut ranks, &mut next);
    }

    if config.iterations > 0 {
        // After the swap `next` holds the previous sweep; reported only.
        let residual: f64 = ranks
            .iter()
            .zip(next.iter())
            .map(|(new, old)| (new - old).abs())
            .sum();
        debug!(residual, "pagerank finished");
    }

    graph.node_ids().map(|id| (id, ranks[id.index()])).collect()
}
