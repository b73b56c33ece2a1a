//! `centra compute`: score a graph file with admitted centralities.

use std::io::{self, Write};
use std::path::PathBuf;

use centra_core::config::CentraConfig;
use centra_core::error::ErrorCode;
use centra_core::graph::file::GraphFile;
use centra_metrics::{CentralityError, ElementRef, ScoreReport, compute_all};
use clap::Args;
use serde::Serialize;
use tracing::{info, instrument};

use super::load_registry;
use crate::output::{OutputMode, fail, pretty_kv, pretty_section, render_mode};

/// Arguments for `centra compute`.
#[derive(Args, Debug, Default)]
pub struct ComputeArgs {
    /// Graph file (JSON: `nodes`, `edges`, optional `implicit_nodes`).
    #[arg(value_name = "GRAPH")]
    pub graph: PathBuf,

    /// Centrality to run, by name or `name@version`. Repeatable; all
    /// admitted centralities run when omitted.
    #[arg(short = 'c', long = "centrality", value_name = "NAME[@VERSION]")]
    pub centralities: Vec<String>,

    /// Keep only the N highest scores per centrality.
    #[arg(long, value_name = "N")]
    pub top: Option<usize>,

    /// Manifest of centrality identifiers (overrides the config).
    #[arg(long, value_name = "FILE")]
    pub manifest: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct GraphSummary {
    path: String,
    nodes: usize,
    edges: usize,
    hash: String,
}

/// Report payload for `centra compute`.
#[derive(Debug, Serialize)]
pub struct ComputeOutput {
    graph: GraphSummary,
    reports: Vec<ScoreReport>,
}

/// Execute `centra compute`.
#[instrument(skip_all, fields(graph = %args.graph.display()))]
pub fn run_compute(
    args: &ComputeArgs,
    config: &CentraConfig,
    output: OutputMode,
) -> anyhow::Result<()> {
    let file = GraphFile::from_path(&args.graph)
        .map_err(|e| fail(output, ErrorCode::GraphFileUnreadable, format!("{e:#}")))?;
    let graph = file.into_graph().map_err(|e| {
        fail(
            output,
            ErrorCode::GraphInvalid,
            format!("{}: {e}", args.graph.display()),
        )
    })?;

    let loaded = load_registry(config, args.manifest.as_deref(), output)?;
    let selected = loaded
        .registry
        .select(args.centralities.as_slice())
        .map_err(|e| fail(output, e.code(), e.to_string()))?;

    let results =
        compute_all(Some(&graph), &selected).map_err(|e| fail(output, e.code(), e.to_string()))?;

    let reports = results
        .into_iter()
        .map(|(descriptor, scores)| {
            let report = ScoreReport::new(descriptor, &scores, &graph)?;
            Ok(match args.top {
                Some(n) => report.top(n),
                None => report,
            })
        })
        .collect::<Result<Vec<_>, CentralityError>>()
        .map_err(|e| fail(output, e.code(), e.to_string()))?;

    info!(
        centralities = reports.len(),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "graph scored"
    );

    let payload = ComputeOutput {
        graph: GraphSummary {
            path: args.graph.display().to_string(),
            nodes: graph.node_count(),
            edges: graph.edge_count(),
            hash: graph.content_hash(),
        },
        reports,
    };

    render_mode(output, &payload, render_text, render_pretty)
}

fn element_label(element: &ElementRef) -> String {
    match element {
        ElementRef::Node { key } => key.clone(),
        ElementRef::Edge {
            index,
            source,
            destination,
        } => format!("{source}->{destination}#{index}"),
    }
}

fn render_text(payload: &ComputeOutput, w: &mut dyn Write) -> io::Result<()> {
    for report in &payload.reports {
        let d = &report.centrality;
        for row in &report.scores {
            writeln!(
                w,
                "{}@{}\t{}\t{}",
                d.name(),
                d.version(),
                element_label(&row.element),
                row.score
            )?;
        }
    }
    Ok(())
}

fn render_pretty(payload: &ComputeOutput, w: &mut dyn Write) -> io::Result<()> {
    pretty_section(w, "Graph")?;
    pretty_kv(w, "Path", &payload.graph.path)?;
    pretty_kv(w, "Nodes", payload.graph.nodes.to_string())?;
    pretty_kv(w, "Edges", payload.graph.edges.to_string())?;
    pretty_kv(w, "Hash", &payload.graph.hash)?;

    for report in &payload.reports {
        writeln!(w)?;
        pretty_section(w, &report.centrality.to_string())?;
        if report.scores.is_empty() {
            writeln!(w, "  (no elements)")?;
        }
        for row in &report.scores {
            writeln!(w, "  {:<32} {:>14.6}", element_label(&row.element), row.score)?;
        }
    }
    Ok(())
}
