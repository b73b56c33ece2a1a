#![forbid(unsafe_code)]
//! centra-core library.
//!
//! The graph model that centralities are computed over, the wire-safe
//! [`descriptor::CentralityDescriptor`], stable error codes, and config.
//!
//! # Conventions
//!
//! - **Errors**: `thiserror` enums for library errors, `anyhow::Result` for
//!   file-loading helpers.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod config;
pub mod descriptor;
pub mod error;
pub mod graph;

pub use descriptor::{CentralityDescriptor, CentralityType, DescriptorError};
pub use graph::{EdgeId, EdgeRef, Graph, GraphBuilder, GraphError, Node, NodeId};
