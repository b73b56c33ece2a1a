//! JSON interchange format for graphs.
//!
//! ```json
//! {
//!   "nodes": [{ "id": "alice", "weight": 2.5 }, { "id": "bob" }],
//!   "edges": [{ "source": "alice", "target": "bob", "weight": 1.0 }],
//!   "implicit_nodes": false
//! }
//! ```
//!
//! With `implicit_nodes` set, endpoints that only appear in `edges` are added
//! as unweighted nodes instead of being rejected. This matches communication
//! logs where some partners are never listed as actors of their own.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::{Graph, GraphBuilder, GraphError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub source: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

/// On-disk representation of a [`Graph`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphFile {
    #[serde(default)]
    pub nodes: Vec<NodeRecord>,
    #[serde(default)]
    pub edges: Vec<EdgeRecord>,
    #[serde(default)]
    pub implicit_nodes: bool,
}

impl GraphFile {
    /// Parse a graph file from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON does not match the format.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("invalid graph JSON")
    }

    /// Read and parse a graph file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_json(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Validate and build the graph.
    ///
    /// # Errors
    ///
    /// Returns the first [`GraphError`] the builder reports.
    #[instrument(skip(self), fields(nodes = self.nodes.len(), edges = self.edges.len()))]
    pub fn into_graph(self) -> Result<Graph, GraphError> {
        let mut builder = GraphBuilder::with_capacity(self.nodes.len(), self.edges.len());

        for node in self.nodes {
            builder.add_node(node.id, node.weight)?;
        }

        let mut implicit = 0usize;
        for edge in &self.edges {
            if self.implicit_nodes {
                for key in [&edge.source, &edge.target] {
                    if !builder.contains_node(key) {
                        builder.add_node(key.clone(), None)?;
                        implicit += 1;
                    }
                }
            }
            builder.add_edge(&edge.source, &edge.target, edge.weight)?;
        }

        if implicit > 0 {
            debug!(implicit, "added nodes referenced only by edges");
        }

        Ok(builder.build())
    }

    /// Snapshot an existing graph back into its file form.
    #[must_use]
    pub fn from_graph(graph: &Graph) -> Self {
        let nodes = graph
            .nodes()
            .map(|(_, n)| NodeRecord {
                id: n.key().to_string(),
                weight: n.original_weight(),
            })
            .collect();
        let edges = graph
            .edges()
            .filter_map(|e| {
                let (source, target) = graph.edge_keys(e.id())?;
                Some(EdgeRecord {
                    source: source.to_string(),
                    target: target.to_string(),
                    weight: e.original_weight(),
                })
            })
            .collect();

        Self {
            nodes,
            edges,
            implicit_nodes: false,
        }
    }
}
