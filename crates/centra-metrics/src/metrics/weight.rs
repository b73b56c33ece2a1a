//! Weight pass-through.
//!
//! Surfaces externally assigned weights through the same interface as
//! computed centralities: each element scores its original weight, or 0.0
//! when none was set.

use centra_core::{CentralityType, Graph};

use crate::centrality::{Centrality, Scores};

/// Scores each node with its original weight.
#[derive(Debug, Clone, Copy, Default)]
pub struct NodeWeight;

impl NodeWeight {
    pub const NAME: &'static str = "Node Weight";
}

impl Centrality for NodeWeight {
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
        Scores::Node(
            graph
                .nodes()
                .map(|(id, n)| (id, n.original_weight().unwrap_or(0.0)))
                .collect(),
        )
    }
}

/// Scores each edge with its original weight.
#[derive(Debug, Clone, Copy, Default)]
pub struct EdgeWeight;

impl EdgeWeight {
    pub const NAME: &'static str = "Edge Weight";
}

impl Centrality for EdgeWeight {
    fn kind(&self) -> CentralityType {
        CentralityType::EdgeCentrality
    }

    fn name(&self) -> &str {
        Self::NAME
    }

    fn version(&self) -> u32 {
        1
    }

    fn compute_scores(&self, graph: &Graph) -> Scores {
        Scores::Edge(
            graph
                .edges()
                .map(|e| (e.id(), e.original_weight().unwrap_or(0.0)))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use centra_core::GraphBuilder;

    fn weighted() -> Graph {
        let mut b = GraphBuilder::new();
        b.add_node("a", Some(-2.5)).unwrap();
        b.add_node("b", None).unwrap();
        b.add_edge("a", "b", Some(4.0)).unwrap();
        b.add_edge("b", "a", None).unwrap();
        b.build()
    }

    #[test]
    fn node_weight_passes_through_or_zero() {
        let g = weighted();
        let s = NodeWeight.compute_scores(&g).by_node_key(&g);
        assert!((s["a"] + 2.5).abs() < 1e-12);
        assert!((s["b"] - 0.0).abs() < 1e-12);
    }

    #[test]
    fn edge_weight_passes_through_or_zero() {
        let g = weighted();
        let s = EdgeWeight.compute_scores(&g).by_edge_keys(&g);
        assert!((s[&("a", "b")] - 4.0).abs() < 1e-12);
        assert!((s[&("b", "a")] - 0.0).abs() < 1e-12);
    }
}
