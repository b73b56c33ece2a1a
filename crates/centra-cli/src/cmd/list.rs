//! `centra list`: reload the registry and show what it admitted.

use std::io::{self, Write};
use std::path::PathBuf;

use centra_core::CentralityDescriptor;
use centra_core::config::CentraConfig;
use centra_metrics::PluginError;
use clap::Args;
use serde::Serialize;

use super::load_registry;
use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode};

/// Arguments for `centra list`.
#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Manifest of centrality identifiers (overrides the config).
    #[arg(long, value_name = "FILE")]
    pub manifest: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct Rejection {
    identifier: String,
    error_code: &'static str,
    reason: String,
}

impl From<&PluginError> for Rejection {
    fn from(err: &PluginError) -> Self {
        Self {
            identifier: err.identifier().to_string(),
            error_code: err.code().code(),
            reason: err.to_string(),
        }
    }
}

/// Report payload for `centra list`.
#[derive(Debug, Serialize)]
pub struct RegistryListing {
    api_version: u32,
    manifest: Option<String>,
    admitted: Vec<CentralityDescriptor>,
    rejected: Vec<Rejection>,
}

/// Execute `centra list`.
pub fn run_list(args: &ListArgs, config: &CentraConfig, output: OutputMode) -> anyhow::Result<()> {
    let loaded = load_registry(config, args.manifest.as_deref(), output)?;

    let listing = RegistryListing {
        api_version: loaded.registry.api_version(),
        manifest: loaded.manifest.map(|p| p.display().to_string()),
        admitted: loaded.registry.available_centralities(),
        rejected: loaded.report.rejected.iter().map(Rejection::from).collect(),
    };

    render_mode(output, &listing, render_text, render_pretty)
}

fn render_text(listing: &RegistryListing, w: &mut dyn Write) -> io::Result<()> {
    for d in &listing.admitted {
        writeln!(w, "admitted\t{}\t{}\t{}", d.name(), d.version(), d.kind())?;
    }
    for r in &listing.rejected {
        writeln!(w, "rejected\t{}\t{}\t{}", r.identifier, r.error_code, r.reason)?;
    }
    Ok(())
}

fn render_pretty(listing: &RegistryListing, w: &mut dyn Write) -> io::Result<()> {
    pretty_section(w, "Centrality registry")?;
    pretty_kv(w, "API", listing.api_version.to_string())?;
    pretty_kv(
        w,
        "Manifest",
        listing.manifest.as_deref().unwrap_or("(built-in)"),
    )?;
    writeln!(w)?;

    pretty_section(w, &format!("Admitted ({})", listing.admitted.len()))?;
    if listing.admitted.is_empty() {
        writeln!(w, "  (none)")?;
    }
    for d in &listing.admitted {
        writeln!(w, "  {:<20} v{:<4} {}", d.name(), d.version(), d.kind())?;
    }

    if !listing.rejected.is_empty() {
        writeln!(w)?;
        pretty_section(w, &format!("Rejected ({})", listing.rejected.len()))?;
        for r in &listing.rejected {
            writeln!(w, "  [{}] {}", r.error_code, r.reason)?;
        }
    }
    Ok(())
}
