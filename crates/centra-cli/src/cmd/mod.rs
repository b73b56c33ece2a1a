pub mod completions;
pub mod compute;
pub mod list;

use std::path::{Path, PathBuf};

use centra_core::config::CentraConfig;
use centra_core::error::ErrorCode;
use centra_metrics::metrics::PageRankConfig;
use centra_metrics::{CentralityRegistry, FactoryResolver, Manifest, ReloadReport};
use tracing::debug;

use crate::output::{OutputMode, fail};

/// A freshly reloaded registry and what the reload decided.
pub struct LoadedRegistry {
    pub registry: CentralityRegistry,
    pub report: ReloadReport,
    /// Manifest file the set came from; `None` for the built-in set.
    pub manifest: Option<PathBuf>,
}

/// Build the registry the way every command sees it.
///
/// The manifest is `manifest_flag` if given, else the config's
/// `[registry] manifest`, else every built-in centrality.
pub fn load_registry(
    config: &CentraConfig,
    manifest_flag: Option<&Path>,
    output: OutputMode,
) -> anyhow::Result<LoadedRegistry> {
    let resolver = FactoryResolver::builtin_with(PageRankConfig::from(&config.pagerank));
    let registry = CentralityRegistry::new(config.registry.api_version);

    let manifest_path = manifest_flag
        .map(Path::to_path_buf)
        .or_else(|| config.registry.manifest.clone());

    let manifest = match &manifest_path {
        Some(path) => Manifest::from_path(path)
            .map_err(|e| fail(output, ErrorCode::ManifestUnreadable, format!("{e:#}")))?,
        None => Manifest::builtin(),
    };
    debug!(
        manifest = ?manifest_path,
        candidates = manifest.identifiers().len(),
        "loading centralities"
    );

    let report = registry.reload(&manifest, &resolver);
    Ok(LoadedRegistry {
        registry,
        report,
        manifest: manifest_path,
    })
}
