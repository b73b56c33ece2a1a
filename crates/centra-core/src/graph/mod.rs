//! Immutable directed graph of actors and their relationships.
//!
//! # Overview
//!
//! A [`Graph`] owns a keyed set of [`Node`]s and an ordered list of directed
//! edges. Nodes and edges may carry an *original weight*: a real number
//! assigned by whoever built the graph, absent meaning "unset".
//!
//! The graph is backed by a [`petgraph`] `DiGraph`, so node and edge identity
//! is the petgraph index ([`NodeId`], [`EdgeId`]). Two nodes with identical
//! attributes are still distinct nodes.
//!
//! ## Construction
//!
//! Graphs are assembled once through [`build::GraphBuilder`] (or loaded from
//! a [`file::GraphFile`]) and never mutated afterwards. Centrality
//! computations only ever see `&Graph`, so any number of them can run
//! against the same graph concurrently.

pub mod build;
pub mod file;

use std::collections::HashMap;

use petgraph::{
    Direction,
    graph::{DiGraph, EdgeIndex, NodeIndex},
    visit::EdgeRef as _,
};

pub use build::{GraphBuilder, GraphError};

/// Identity of a node within its owning [`Graph`].
pub type NodeId = NodeIndex;

/// Identity of an edge within its owning [`Graph`].
pub type EdgeId = EdgeIndex;

// ---------------------------------------------------------------------------
// Node / Edge
// ---------------------------------------------------------------------------

/// A vertex of the graph, identified by a unique string key.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    key: String,
    original_weight: Option<f64>,
}

impl Node {
    pub(crate) const fn new(key: String, original_weight: Option<f64>) -> Self {
        Self {
            key,
            original_weight,
        }
    }

    /// The node's unique key (for example an actor address).
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Externally assigned weight, if any.
    #[must_use]
    pub const fn original_weight(&self) -> Option<f64> {
        self.original_weight
    }
}

/// Payload stored on each petgraph edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct EdgeData {
    pub(crate) original_weight: Option<f64>,
}

/// A borrowed view of one directed edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeRef {
    id: EdgeId,
    source: NodeId,
    destination: NodeId,
    original_weight: Option<f64>,
}

impl EdgeRef {
    #[must_use]
    pub const fn id(&self) -> EdgeId {
        self.id
    }

    #[must_use]
    pub const fn source(&self) -> NodeId {
        self.source
    }

    #[must_use]
    pub const fn destination(&self) -> NodeId {
        self.destination
    }

    /// Externally assigned weight, if any.
    #[must_use]
    pub const fn original_weight(&self) -> Option<f64> {
        self.original_weight
    }

    /// Whether this edge leaves `node`.
    #[must_use]
    pub fn is_outgoing(&self, node: NodeId) -> bool {
        self.source == node
    }

    /// Whether this edge enters `node`.
    #[must_use]
    pub fn is_incoming(&self, node: NodeId) -> bool {
        self.destination == node
    }
}

// ---------------------------------------------------------------------------
// Graph
// ---------------------------------------------------------------------------

/// An immutable directed graph.
///
/// Every edge endpoint is guaranteed to be a node of this graph; the only
/// way to obtain a `Graph` is through [`GraphBuilder`], which enforces it.
#[derive(Debug, Clone)]
pub struct Graph {
    inner: DiGraph<Node, EdgeData>,
    keys: HashMap<String, NodeId>,
}

impl Graph {
    pub(crate) const fn from_parts(
        inner: DiGraph<Node, EdgeData>,
        keys: HashMap<String, NodeId>,
    ) -> Self {
        Self { inner, keys }
    }

    /// Number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    /// Number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    /// Iterate over every node.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> + '_ {
        self.inner
            .node_indices()
            .map(move |idx| (idx, &self.inner[idx]))
    }

    /// Iterate over node identities only.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.inner.node_indices()
    }

    /// Look up a node by identity.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.inner.node_weight(id)
    }

    /// Look up a node by its key.
    #[must_use]
    pub fn node_by_key(&self, key: &str) -> Option<NodeId> {
        self.keys.get(key).copied()
    }

    /// Key of the node, or `None` for an identity from another graph.
    #[must_use]
    pub fn node_key(&self, id: NodeId) -> Option<&str> {
        self.inner.node_weight(id).map(Node::key)
    }

    /// `(source key, destination key)` of an edge, or `None` for an
    /// identity from another graph.
    #[must_use]
    pub fn edge_keys(&self, id: EdgeId) -> Option<(&str, &str)> {
        let (source, destination) = self.inner.edge_endpoints(id)?;
        Some((self.inner[source].key(), self.inner[destination].key()))
    }

    /// Iterate over every edge in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = EdgeRef> + '_ {
        self.inner.edge_indices().filter_map(move |id| self.edge(id))
    }

    /// Look up an edge by identity.
    #[must_use]
    pub fn edge(&self, id: EdgeId) -> Option<EdgeRef> {
        let (source, destination) = self.inner.edge_endpoints(id)?;
        let data = self.inner.edge_weight(id)?;
        Some(EdgeRef {
            id,
            source,
            destination,
            original_weight: data.original_weight,
        })
    }

    /// Edges leaving `node`.
    pub fn outgoing_edges(&self, node: NodeId) -> impl Iterator<Item = EdgeRef> + '_ {
        self.directed_edges(node, Direction::Outgoing)
    }

    /// Edges entering `node`.
    pub fn incoming_edges(&self, node: NodeId) -> impl Iterator<Item = EdgeRef> + '_ {
        self.directed_edges(node, Direction::Incoming)
    }

    /// Every edge touching `node`, outgoing first, then incoming.
    ///
    /// A self-loop is reported twice, once in each direction.
    pub fn incident_edges(&self, node: NodeId) -> impl Iterator<Item = EdgeRef> + '_ {
        self.outgoing_edges(node).chain(self.incoming_edges(node))
    }

    /// Number of edges whose source is `node`.
    #[must_use]
    pub fn out_degree(&self, node: NodeId) -> usize {
        self.inner
            .edges_directed(node, Direction::Outgoing)
            .count()
    }

    fn directed_edges(
        &self,
        node: NodeId,
        direction: Direction,
    ) -> impl Iterator<Item = EdgeRef> + '_ {
        self.inner.edges_directed(node, direction).map(|e| EdgeRef {
            id: e.id(),
            source: e.source(),
            destination: e.target(),
            original_weight: e.weight().original_weight,
        })
    }

    /// BLAKE3 fingerprint of the graph's content.
    ///
    /// Derived from the sorted node keys with their weights and the sorted
    /// `(source key, destination key, weight)` edge list, so two graphs built
    /// from the same data in a different order hash identically.
    #[must_use]
    pub fn content_hash(&self) -> String {
        let mut nodes: Vec<(&str, Option<f64>)> = self
            .nodes()
            .map(|(_, n)| (n.key(), n.original_weight()))
            .collect();
        nodes.sort_unstable_by(|a, b| a.0.cmp(b.0));

        let mut edges: Vec<(&str, &str, Option<f64>)> = self
            .edges()
            .map(|e| {
                (
                    self.inner[e.source()].key(),
                    self.inner[e.destination()].key(),
                    e.original_weight(),
                )
            })
            .collect();
        edges.sort_unstable_by(|a, b| {
            a.0.cmp(b.0)
                .then_with(|| a.1.cmp(b.1))
                .then_with(|| weight_bits(a.2).cmp(&weight_bits(b.2)))
        });

        let mut hasher = blake3::Hasher::new();
        for (key, weight) in nodes {
            hasher.update(b"n\x00");
            hasher.update(key.as_bytes());
            hasher.update(b"\x00");
            hasher.update(&weight_bits(weight).to_le_bytes());
        }
        for (source, destination, weight) in edges {
            hasher.update(b"e\x00");
            hasher.update(source.as_bytes());
            hasher.update(b"\x00");
            hasher.update(destination.as_bytes());
            hasher.update(b"\x00");
            hasher.update(&weight_bits(weight).to_le_bytes());
        }

        format!("blake3:{}", hasher.finalize().to_hex())
    }
}

/// Stable bit pattern for an optional weight (`u64::MAX` for unset).
fn weight_bits(weight: Option<f64>) -> u64 {
    weight.map_or(u64::MAX, f64::to_bits)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Graph {
        let mut b = GraphBuilder::new();
        b.add_node("A", Some(1.5)).unwrap();
        b.add_node("B", None).unwrap();
        b.add_node("C", None).unwrap();
        b.add_edge("A", "B", None).unwrap();
        b.add_edge("B", "C", Some(2.0)).unwrap();
        b.add_edge("A", "C", None).unwrap();
        b.build()
    }

    #[test]
    fn directionality_matches_endpoints() {
        let g = triangle();
        let a = g.node_by_key("A").unwrap();
        let b = g.node_by_key("B").unwrap();

        for e in g.edges() {
            assert!(e.is_outgoing(e.source()));
            assert!(e.is_incoming(e.destination()));
        }

        let ab = g.outgoing_edges(a).find(|e| e.destination() == b).unwrap();
        assert!(ab.is_outgoing(a));
        assert!(!ab.is_incoming(a));
        assert!(ab.is_incoming(b));
        assert!(!ab.is_outgoing(b));
    }

    #[test]
    fn incident_edges_mix_both_directions() {
        let g = triangle();
        let b = g.node_by_key("B").unwrap();
        let incident: Vec<EdgeRef> = g.incident_edges(b).collect();
        assert_eq!(incident.len(), 2);
        assert_eq!(incident.iter().filter(|e| e.is_outgoing(b)).count(), 1);
        assert_eq!(incident.iter().filter(|e| e.is_incoming(b)).count(), 1);
    }

    #[test]
    fn edges_keep_insertion_order() {
        let g = triangle();
        let pairs: Vec<(&str, &str)> = g
            .edges()
            .filter_map(|e| g.edge_keys(e.id()))
            .collect();
        assert_eq!(pairs, vec![("A", "B"), ("B", "C"), ("A", "C")]);
    }

    #[test]
    fn keys_of_foreign_identities_are_none() {
        let g = triangle();
        let mut b = GraphBuilder::new();
        b.add_node("solo", None).unwrap();
        let small = b.build();

        let c = g.node_by_key("C").unwrap();
        assert_eq!(g.node_key(c), Some("C"));
        assert_eq!(small.node_key(c), None);

        let last = g.edges().last().unwrap().id();
        assert_eq!(g.edge_keys(last), Some(("A", "C")));
        assert_eq!(small.edge_keys(last), None);
    }

    #[test]
    fn weights_are_exposed() {
        let g = triangle();
        let a = g.node_by_key("A").unwrap();
        assert_eq!(g.node(a).unwrap().original_weight(), Some(1.5));
        let weights: Vec<Option<f64>> = g.edges().map(|e| e.original_weight()).collect();
        assert_eq!(weights, vec![None, Some(2.0), None]);
    }

    #[test]
    fn out_degree_counts_source_edges() {
        let g = triangle();
        assert_eq!(g.out_degree(g.node_by_key("A").unwrap()), 2);
        assert_eq!(g.out_degree(g.node_by_key("B").unwrap()), 1);
        assert_eq!(g.out_degree(g.node_by_key("C").unwrap()), 0);
    }

    #[test]
    fn content_hash_ignores_insertion_order() {
        let mut b = GraphBuilder::new();
        b.add_node("C", None).unwrap();
        b.add_node("B", None).unwrap();
        b.add_node("A", Some(1.5)).unwrap();
        b.add_edge("A", "C", None).unwrap();
        b.add_edge("B", "C", Some(2.0)).unwrap();
        b.add_edge("A", "B", None).unwrap();
        let shuffled = b.build();

        assert_eq!(triangle().content_hash(), shuffled.content_hash());
        assert!(shuffled.content_hash().starts_with("blake3:"));
    }

    #[test]
    fn content_hash_sees_weight_changes() {
        let mut b = GraphBuilder::new();
        b.add_node("A", Some(9.0)).unwrap();
        b.add_node("B", None).unwrap();
        b.add_node("C", None).unwrap();
        b.add_edge("A", "B", None).unwrap();
        b.add_edge("B", "C", Some(2.0)).unwrap();
        b.add_edge("A", "C", None).unwrap();
        assert_ne!(triangle().content_hash(), b.build().content_hash());
    }
}
