//! The capability contract shared by every scoring algorithm.
//!
//! # Overview
//!
//! A [`Centrality`] turns a [`Graph`] into [`Scores`]: one finite `f64` per
//! node (for [`CentralityType::NodeCentrality`]) or per edge (for
//! [`CentralityType::EdgeCentrality`]). Implementations are stateless per
//! call, never mutate the graph, and may be shared across threads.
//!
//! Callers that cannot vouch for their inputs go through
//! [`compute_scores`], which fails fast on a missing graph and checks the
//! returned mapping against the contract before handing it out.

use std::collections::HashMap;
use std::sync::Arc;

use centra_core::error::ErrorCode;
use centra_core::{CentralityDescriptor, CentralityType, EdgeId, Graph, NodeId};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Errors from running a centrality.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CentralityError {
    /// The computation was called without a usable graph.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The requested descriptor is not in the registry's admitted set.
    #[error("centrality {0} is not admitted")]
    NotAdmitted(String),

    /// An implementation returned a mapping that breaks the score contract.
    #[error("centrality {name} broke its contract: {reason}")]
    ContractViolation { name: String, reason: String },
}

impl CentralityError {
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidArgument(_) => ErrorCode::InvalidArgument,
            Self::NotAdmitted(_) => ErrorCode::CentralityNotAdmitted,
            Self::ContractViolation { .. } => ErrorCode::InternalUnexpected,
        }
    }
}

/// A scoring algorithm.
pub trait Centrality: Send + Sync {
    /// Which elements this algorithm scores.
    fn kind(&self) -> CentralityType;

    /// Declared display name.
    fn name(&self) -> &str;

    /// Semantic version of the algorithm's scoring rules.
    fn version(&self) -> u32;

    /// Minimum host API version this implementation needs.
    fn required_api_version(&self) -> u32 {
        1
    }

    /// Score every node or every edge of `graph`.
    fn compute_scores(&self, graph: &Graph) -> Scores;

    /// Serializable identity of this algorithm.
    fn descriptor(&self) -> CentralityDescriptor {
        CentralityDescriptor::new(self.name(), self.version(), self.kind())
    }
}

// ---------------------------------------------------------------------------
// Scores
// ---------------------------------------------------------------------------

/// Result of one centrality invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum Scores {
    Node(HashMap<NodeId, f64>),
    Edge(HashMap<EdgeId, f64>),
}

impl Scores {
    #[must_use]
    pub const fn kind(&self) -> CentralityType {
        match self {
            Self::Node(_) => CentralityType::NodeCentrality,
            Self::Edge(_) => CentralityType::EdgeCentrality,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Node(m) => m.len(),
            Self::Edge(m) => m.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Score of a node, if this is a node mapping containing it.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<f64> {
        match self {
            Self::Node(m) => m.get(&id).copied(),
            Self::Edge(_) => None,
        }
    }

    /// Score of an edge, if this is an edge mapping containing it.
    #[must_use]
    pub fn edge(&self, id: EdgeId) -> Option<f64> {
        match self {
            Self::Edge(m) => m.get(&id).copied(),
            Self::Node(_) => None,
        }
    }

    #[must_use]
    pub const fn as_node_map(&self) -> Option<&HashMap<NodeId, f64>> {
        match self {
            Self::Node(m) => Some(m),
            Self::Edge(_) => None,
        }
    }

    #[must_use]
    pub const fn as_edge_map(&self) -> Option<&HashMap<EdgeId, f64>> {
        match self {
            Self::Edge(m) => Some(m),
            Self::Node(_) => None,
        }
    }

    /// Node scores re-keyed by node key, for display and comparison.
    #[must_use]
    pub fn by_node_key<'g>(&self, graph: &'g Graph) -> HashMap<&'g str, f64> {
        self.as_node_map()
            .map(|m| {
                m.iter()
                    .filter_map(|(&id, &s)| Some((graph.node_key(id)?, s)))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Edge scores re-keyed by `(source key, destination key)`.
    ///
    /// Parallel edges collapse onto one entry; use [`Scores::edge`] when the
    /// graph may contain them.
    #[must_use]
    pub fn by_edge_keys<'g>(&self, graph: &'g Graph) -> HashMap<(&'g str, &'g str), f64> {
        let Some(m) = self.as_edge_map() else {
            return HashMap::new();
        };
        m.iter()
            .filter_map(|(&id, &s)| Some((graph.edge_keys(id)?, s)))
            .collect()
    }

    /// Check this mapping against the score contract for `graph`.
    ///
    /// Every element of the declared kind must be present with a finite
    /// score, and nothing else may appear.
    fn check_contract(&self, graph: &Graph, declared: CentralityType) -> Result<(), String> {
        if self.kind() != declared {
            return Err(format!(
                "declared {declared} scores but returned {} scores",
                self.kind()
            ));
        }

        let (expected, foreign, non_finite) = match self {
            Self::Node(m) => (
                graph.node_count(),
                m.keys().filter(|&&id| graph.node(id).is_none()).count(),
                m.values().filter(|s| !s.is_finite()).count(),
            ),
            Self::Edge(m) => (
                graph.edge_count(),
                m.keys().filter(|&&id| graph.edge(id).is_none()).count(),
                m.values().filter(|s| !s.is_finite()).count(),
            ),
        };

        if foreign > 0 {
            return Err(format!("{foreign} keys are not elements of the graph"));
        }
        if self.len() != expected {
            return Err(format!(
                "scored {} of {expected} elements",
                self.len()
            ));
        }
        if non_finite > 0 {
            return Err(format!("{non_finite} scores are not finite"));
        }
        Ok(())
    }
}

/// Score `graph` with `centrality`, failing fast on bad input.
///
/// # Errors
///
/// - [`CentralityError::InvalidArgument`] when `graph` is `None`; nothing is
///   computed in that case.
/// - [`CentralityError::ContractViolation`] when the implementation returns
///   the wrong element kind, misses or invents elements, or produces
///   non-finite scores.
#[instrument(skip(centrality, graph), fields(centrality = centrality.name()))]
pub fn compute_scores(
    centrality: &dyn Centrality,
    graph: Option<&Graph>,
) -> Result<Scores, CentralityError> {
    let graph = graph.ok_or_else(|| {
        CentralityError::InvalidArgument(format!(
            "{} was called without a graph",
            centrality.name()
        ))
    })?;

    let scores = centrality.compute_scores(graph);
    scores
        .check_contract(graph, centrality.kind())
        .map_err(|reason| CentralityError::ContractViolation {
            name: centrality.name().to_string(),
            reason,
        })?;

    debug!(
        elements = scores.len(),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "centrality computed"
    );
    Ok(scores)
}

/// Score one graph with several centralities, independently of each other.
///
/// # Errors
///
/// Fails on the first error [`compute_scores`] reports.
pub fn compute_all(
    graph: Option<&Graph>,
    centralities: &[Arc<dyn Centrality>],
) -> Result<Vec<(CentralityDescriptor, Scores)>, CentralityError> {
    if graph.is_none() {
        return Err(CentralityError::InvalidArgument(
            "no graph supplied".to_string(),
        ));
    }
    centralities
        .iter()
        .map(|c| Ok((c.descriptor(), compute_scores(c.as_ref(), graph)?)))
        .collect()
}

// ---------------------------------------------------------------------------
// Wire form
// ---------------------------------------------------------------------------

/// Identifies a scored element without petgraph indices leaking over the
/// wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ElementRef {
    Node {
        key: String,
    },
    Edge {
        index: usize,
        source: String,
        destination: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRow {
    pub element: ElementRef,
    pub score: f64,
}

/// Transmittable result of one centrality run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreReport {
    pub centrality: CentralityDescriptor,
    pub graph_hash: String,
    /// Highest score first; ties broken by node key or edge index.
    pub scores: Vec<ScoreRow>,
}

impl ScoreReport {
    /// Render `scores` against the graph they were computed on.
    ///
    /// # Errors
    ///
    /// Returns [`CentralityError::InvalidArgument`] if any scored element is
    /// not part of `graph`.
    pub fn new(
        centrality: CentralityDescriptor,
        scores: &Scores,
        graph: &Graph,
    ) -> Result<Self, CentralityError> {
        let foreign = || {
            CentralityError::InvalidArgument(format!(
                "{centrality} scores do not belong to graph {}",
                graph.content_hash()
            ))
        };

        let mut rows: Vec<(ScoreRow, String, usize)> = match scores {
            Scores::Node(m) => m
                .iter()
                .map(|(&id, &score)| {
                    let key = graph.node_key(id).ok_or_else(foreign)?.to_string();
                    Ok((
                        ScoreRow {
                            element: ElementRef::Node { key: key.clone() },
                            score,
                        },
                        key,
                        id.index(),
                    ))
                })
                .collect::<Result<_, CentralityError>>()?,
            Scores::Edge(m) => m
                .iter()
                .map(|(&id, &score)| {
                    let (source, destination) = graph.edge_keys(id).ok_or_else(foreign)?;
                    Ok((
                        ScoreRow {
                            element: ElementRef::Edge {
                                index: id.index(),
                                source: source.to_string(),
                                destination: destination.to_string(),
                            },
                            score,
                        },
                        String::new(),
                        id.index(),
                    ))
                })
                .collect::<Result<_, CentralityError>>()?,
        };

        rows.sort_by(|a, b| {
            b.0.score
                .total_cmp(&a.0.score)
                .then_with(|| a.1.cmp(&b.1))
                .then_with(|| a.2.cmp(&b.2))
        });

        Ok(Self {
            centrality,
            graph_hash: graph.content_hash(),
            scores: rows.into_iter().map(|(row, _, _)| row).collect(),
        })
    }

    /// Keep only the `n` highest-scoring rows.
    #[must_use]
    pub fn top(mut self, n: usize) -> Self {
        self.scores.truncate(n);
        self
    }
}
