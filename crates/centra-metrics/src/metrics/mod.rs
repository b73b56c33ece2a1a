//! Built-in centrality algorithms.
//!
//! # Overview
//!
//! Each algorithm answers a different question about an actor graph:
//!
//! - **Outdegree** (`degree`): how many relationships does an actor start?
//! - **Betweenness** (`betweenness`): which actors broker communication
//!   between others?
//! - **Edge betweenness** (`edge_betweenness`): which relationships carry
//!   the most shortest paths?
//! - **PageRank** (`pagerank`): which actors are reached by other
//!   important actors?
//! - **Node / Edge weight** (`weight`): pass externally assigned weights
//!   through unchanged.
//!
//! # Usage
//!
//! Every algorithm is a zero-sized (or config-only) struct implementing
//! [`crate::Centrality`], plus a free function returning the raw map:
//!
//! ```rust,ignore
//! use centra_metrics::metrics::betweenness::betweenness_centrality;
//! use centra_metrics::metrics::pagerank::{pagerank, PageRankConfig};
//!
//! let bc = betweenness_centrality(&graph);
//! let pr = pagerank(&graph, &PageRankConfig::default());
//! ```

pub mod betweenness;
pub mod degree;
pub mod edge_betweenness;
pub mod pagerank;
pub(crate) mod shortest_paths;
pub mod weight;

pub use betweenness::Betweenness;
pub use degree::Outdegree;
pub use edge_betweenness::EdgeBetweenness;
pub use pagerank::{PageRank, PageRankConfig};
pub use weight::{EdgeWeight, NodeWeight};
