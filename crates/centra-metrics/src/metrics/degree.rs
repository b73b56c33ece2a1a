//! Outdegree centrality.
//!
//! Each node scores the number of edges it is the source of. Parallel edges
//! count individually and a self-loop counts once.

use std::collections::HashMap;

use centra_core::{CentralityType, Graph, NodeId};

use crate::centrality::{Centrality, Scores};

#[derive(Debug, Clone, Copy, Default)]
pub struct Outdegree;

impl Outdegree {
    pub const NAME: &'static str = "Outdegree";
}

impl Centrality for Outdegree {
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
        Scores::Node(outdegree(graph))
    }
}

/// Count outgoing edges per node. O(V + E).
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn outdegree(graph: &Graph) -> HashMap<NodeId, f64> {
    let mut counts: HashMap<NodeId, usize> = graph.node_ids().map(|n| (n, 0)).collect();
    for e in graph.edges() {
        if let Some(c) = counts.get_mut(&e.source()) {
            *c += 1;
        }
    }
    counts.into_iter().map(|(n, c)| (n, c as f64)).collect()
}
