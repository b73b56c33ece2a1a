#![forbid(unsafe_code)]
//! centra-metrics library.
//!
//! Centrality algorithms over a [`centra_core::Graph`] and the registry that
//! decides which of them a process may run.
//!
//! # Conventions
//!
//! - **Errors**: `thiserror` enums ([`CentralityError`], [`registry::PluginError`]);
//!   `anyhow::Result` only where files are read.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod centrality;
pub mod metrics;
pub mod registry;

pub use centrality::{
    Centrality, CentralityError, ElementRef, ScoreReport, ScoreRow, Scores, compute_all,
    compute_scores,
};
pub use registry::{CentralityRegistry, FactoryResolver, Manifest, PluginError, ReloadReport};
