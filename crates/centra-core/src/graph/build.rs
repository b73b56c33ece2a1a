//! Validated construction of [`Graph`]s.
//!
//! [`GraphBuilder`] is the only way to assemble a graph. It rejects
//! duplicate node keys, edges whose endpoints were never added, and
//! non-finite weights, so a built graph always satisfies the endpoint
//! invariant and every weight pass-through score is finite.

#![allow(clippy::module_name_repetitions)]

use std::collections::HashMap;

use petgraph::graph::DiGraph;

use super::{EdgeData, EdgeId, Graph, Node, NodeId};

/// Errors raised while assembling a graph.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GraphError {
    /// A node with this key was already added.
    #[error("duplicate node '{key}'")]
    DuplicateNode { key: String },

    /// An edge references a node that was never added.
    #[error("edge {source_key} -> {destination_key} references unknown node '{missing}'")]
    UnknownNode {
        source_key: String,
        destination_key: String,
        missing: String,
    },

    /// A weight is NaN or infinite.
    #[error("weight of {element} is not finite ({value})")]
    NonFiniteWeight { element: String, value: f64 },
}

/// Incremental builder for an immutable [`Graph`].
#[derive(Debug, Default)]
pub struct GraphBuilder {
    graph: DiGraph<Node, EdgeData>,
    keys: HashMap<String, NodeId>,
}

impl GraphBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-size the builder for `nodes` nodes and `edges` edges.
    #[must_use]
    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            graph: DiGraph::with_capacity(nodes, edges),
            keys: HashMap::with_capacity(nodes),
        }
    }

    /// Add a node with a unique key.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::DuplicateNode`] if the key is taken, or
    /// [`GraphError::NonFiniteWeight`] for a NaN or infinite weight.
    pub fn add_node(
        &mut self,
        key: impl Into<String>,
        original_weight: Option<f64>,
    ) -> Result<NodeId, GraphError> {
        let key = key.into();
        if self.keys.contains_key(&key) {
            return Err(GraphError::DuplicateNode { key });
        }
        check_finite(original_weight, || format!("node '{key}'"))?;

        let idx = self
            .graph
            .add_node(Node::new(key.clone(), original_weight));
        self.keys.insert(key, idx);
        Ok(idx)
    }

    /// Whether a node with this key has been added.
    #[must_use]
    pub fn contains_node(&self, key: &str) -> bool {
        self.keys.contains_key(key)
    }

    /// Add a directed edge between two previously added nodes.
    ///
    /// Parallel edges and self-loops are allowed; each is a distinct edge.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnknownNode`] if either endpoint is missing, or
    /// [`GraphError::NonFiniteWeight`] for a NaN or infinite weight.
    pub fn add_edge(
        &mut self,
        source: &str,
        destination: &str,
        original_weight: Option<f64>,
    ) -> Result<EdgeId, GraphError> {
        let unknown = |missing: &str| GraphError::UnknownNode {
            source_key: source.to_string(),
            destination_key: destination.to_string(),
            missing: missing.to_string(),
        };
        let from = *self.keys.get(source).ok_or_else(|| unknown(source))?;
        let to = *self
            .keys
            .get(destination)
            .ok_or_else(|| unknown(destination))?;
        check_finite(original_weight, || {
            format!("edge {source} -> {destination}")
        })?;

        Ok(self.graph.add_edge(from, to, EdgeData { original_weight }))
    }

    /// Finish construction.
    #[must_use]
    pub fn build(self) -> Graph {
        Graph::from_parts(self.graph, self.keys)
    }
}

fn check_finite(
    weight: Option<f64>,
    element: impl FnOnce() -> String,
) -> Result<(), GraphError> {
    match weight {
        Some(value) if !value.is_finite() => Err(GraphError::NonFiniteWeight {
            element: element(),
            value,
        }),
        _ => Ok(()),
    }
}
