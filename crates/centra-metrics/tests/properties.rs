//! Property tests: every algorithm against random directed multigraphs.

use std::collections::VecDeque;
use std::sync::Arc;

use centra_core::graph::file::{EdgeRecord, GraphFile, NodeRecord};
use centra_core::{CentralityDescriptor, Graph};
use centra_metrics::metrics::{
    Betweenness, EdgeBetweenness, EdgeWeight, NodeWeight, Outdegree, PageRank,
};
use centra_metrics::{Centrality, Scores, compute_all, compute_scores};
use proptest::prelude::*;

fn arb_graph() -> impl Strategy<Value = Graph> {
    (1usize..10).prop_flat_map(|n| {
        let weights = prop::collection::vec(prop::option::of(-50.0f64..50.0), n);
        let edges = prop::collection::vec(
            (0..n, 0..n, prop::option::of(0.0f64..10.0)),
            0..(n * 3),
        );
        (weights, edges).prop_map(|(weights, edges)| {
            GraphFile {
                nodes: weights
                    .into_iter()
                    .enumerate()
                    .map(|(i, weight)| NodeRecord {
                        id: format!("n{i}"),
                        weight,
                    })
                    .collect(),
                edges: edges
                    .into_iter()
                    .map(|(s, t, weight)| EdgeRecord {
                        source: format!("n{s}"),
                        target: format!("n{t}"),
                        weight,
                    })
                    .collect(),
                implicit_nodes: false,
            }
            .into_graph()
            .unwrap()
        })
    })
}

fn all_builtins() -> Vec<Arc<dyn Centrality>> {
    vec![
        Arc::new(Outdegree),
        Arc::new(Betweenness),
        Arc::new(EdgeBetweenness),
        Arc::new(PageRank::default()),
        Arc::new(NodeWeight),
        Arc::new(EdgeWeight),
    ]
}

/// Sum over ordered reachable pairs `(s, t)`, `s != t`, of `f(dist(s, t))`.
fn sum_over_reachable_pairs(g: &Graph, f: impl Fn(usize) -> f64) -> f64 {
    let mut total = 0.0;
    for s in g.node_ids() {
        let mut dist: Vec<Option<usize>> = vec![None; g.node_count()];
        dist[s.index()] = Some(0);
        let mut queue = VecDeque::from([s]);
        while let Some(v) = queue.pop_front() {
            let dv = dist[v.index()].unwrap();
            for e in g.outgoing_edges(v) {
                let w = e.destination();
                if dist[w.index()].is_none() {
                    dist[w.index()] = Some(dv + 1);
                    queue.push_back(w);
                }
            }
        }
        total += dist.iter().flatten().filter(|&&d| d > 0).map(|&d| f(d)).sum::<f64>();
    }
    total
}

fn assert_near(actual: f64, expected: f64) -> Result<(), TestCaseError> {
    let tolerance = 1e-9 * expected.abs().max(1.0);
    prop_assert!(
        (actual - expected).abs() < tolerance,
        "expected {expected}, got {actual}"
    );
    Ok(())
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(128))]

    #[test]
    fn every_algorithm_scores_every_element(g in arb_graph()) {
        let results = compute_all(Some(&g), &all_builtins()).unwrap();
        for (descriptor, scores) in results {
            match &scores {
                Scores::Node(m) => {
                    prop_assert_eq!(m.len(), g.node_count(), "{}", descriptor);
                    for id in g.node_ids() {
                        prop_assert!(m[&id].is_finite());
                    }
                }
                Scores::Edge(m) => {
                    prop_assert_eq!(m.len(), g.edge_count(), "{}", descriptor);
                    for e in g.edges() {
                        prop_assert!(m[&e.id()].is_finite());
                    }
                }
            }
        }
    }

    #[test]
    fn outdegree_sums_to_edge_count(g in arb_graph()) {
        let scores = compute_scores(&Outdegree, Some(&g)).unwrap();
        let total: f64 = scores.as_node_map().unwrap().values().sum();
        assert_near(total, f64::from(u32::try_from(g.edge_count()).unwrap()))?;
    }

    #[test]
    fn weights_pass_through_exactly(g in arb_graph()) {
        let nodes = compute_scores(&NodeWeight, Some(&g)).unwrap();
        for (id, node) in g.nodes() {
            let expected = node.original_weight().unwrap_or(0.0);
            prop_assert_eq!(nodes.node(id).unwrap().to_bits(), expected.to_bits());
        }
        let edges = compute_scores(&EdgeWeight, Some(&g)).unwrap();
        for e in g.edges() {
            let expected = e.original_weight().unwrap_or(0.0);
            prop_assert_eq!(edges.edge(e.id()).unwrap().to_bits(), expected.to_bits());
        }
    }

    #[test]
    fn node_betweenness_counts_interior_hops(g in arb_graph()) {
        // Each shortest s→t path of length d has d - 1 interior nodes, and
        // the fractional credits along all of them sum to exactly that.
        let scores = compute_scores(&Betweenness, Some(&g)).unwrap();
        let total: f64 = scores.as_node_map().unwrap().values().sum();
        #[allow(clippy::cast_precision_loss)]
        let expected = sum_over_reachable_pairs(&g, |d| (d - 1) as f64);
        assert_near(total, expected)?;
        prop_assert!(scores.as_node_map().unwrap().values().all(|&s| s >= 0.0));
    }

    #[test]
    fn edge_betweenness_counts_every_hop(g in arb_graph()) {
        let scores = compute_scores(&EdgeBetweenness, Some(&g)).unwrap();
        let total: f64 = scores.as_edge_map().unwrap().values().sum();
        #[allow(clippy::cast_precision_loss)]
        let expected = sum_over_reachable_pairs(&g, |d| d as f64);
        assert_near(total, expected)?;
    }

    #[test]
    fn pagerank_never_drops_below_teleport_mass(g in arb_graph()) {
        let scores = compute_scores(&PageRank::default(), Some(&g)).unwrap();
        for &s in scores.as_node_map().unwrap().values() {
            prop_assert!(s >= 0.15 - 1e-12, "score {s}");
        }
    }

    #[test]
    fn scores_are_deterministic(g in arb_graph()) {
        for c in all_builtins() {
            let a = compute_scores(c.as_ref(), Some(&g)).unwrap();
            let b = compute_scores(c.as_ref(), Some(&g)).unwrap();
            prop_assert_eq!(a.len(), b.len());
            match (&a, &b) {
                (Scores::Node(x), Scores::Node(y)) => {
                    for (id, s) in x {
                        assert_near(*s, y[id])?;
                    }
                }
                (Scores::Edge(x), Scores::Edge(y)) => {
                    for (id, s) in x {
                        assert_near(*s, y[id])?;
                    }
                }
                _ => prop_assert!(false, "kind changed between runs"),
            }
        }
    }

    #[test]
    fn descriptor_survives_the_wire(
        name in "[A-Za-z]([A-Za-z ]{0,14}[A-Za-z])?",
        version in 1u32..100,
        edge in any::<bool>(),
    ) {
        let kind = if edge {
            centra_core::CentralityType::EdgeCentrality
        } else {
            centra_core::CentralityType::NodeCentrality
        };
        let d = CentralityDescriptor::new(name.clone(), version, kind);
        let back: CentralityDescriptor =
            serde_json::from_str(&serde_json::to_string(&d).unwrap()).unwrap();
        prop_assert_eq!(&back, &d);
        prop_assert_eq!(back.kind(), kind);
        let selector = format!("{name}@{version}");
        prop_assert!(back.matches_selector(&selector));
    }
}
