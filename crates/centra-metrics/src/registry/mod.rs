//! The centrality registry: which algorithms this process may run.
//!
//! # Overview
//!
//! A [`CentralityRegistry`] holds the *admitted* set of centralities. The
//! set starts empty and is replaced wholesale by [`CentralityRegistry::reload`],
//! which walks a [`Manifest`] of identifiers and, for each one:
//!
//! 1. asks a [`CentralityResolver`] to instantiate it,
//! 2. rejects it if it reports version 0,
//! 3. rejects it if it needs a newer API than the registry offers,
//! 4. rejects it if an earlier candidate already claimed its descriptor,
//! 5. otherwise admits it.
//!
//! Rejections are logged at `warn!` and reported in the [`ReloadReport`];
//! they never fail the reload as a whole. A manifest of one good and one
//! broken identifier yields a registry of one.
//!
//! # Sharing
//!
//! The host builds one registry at startup and passes it by reference.
//! Reads and reloads may race from different threads: the admitted set sits
//! behind an `RwLock` and a reload swaps it in a single write.

pub mod manifest;
pub mod resolver;

use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

use centra_core::{
    CentralityDescriptor, Graph, config::HOST_API_VERSION, error::ErrorCode,
};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

pub use manifest::Manifest;
pub use resolver::{CentralityFactory, CentralityResolver, FactoryResolver};

use crate::centrality::{Centrality, CentralityError, Scores, compute_scores};

/// Why a manifest candidate was not admitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PluginError {
    /// The identifier could not be resolved or its factory failed.
    #[error("cannot load centrality '{identifier}': {reason}")]
    LoadFailure { identifier: String, reason: String },

    /// The candidate needs a newer host API.
    #[error(
        "centrality '{identifier}' requires API version {required}, host provides {provided}"
    )]
    VersionMismatch {
        identifier: String,
        required: u32,
        provided: u32,
    },

    /// Another admitted candidate already has the same name and version.
    #[error("centrality '{identifier}' duplicates already admitted {descriptor}")]
    Duplicate {
        identifier: String,
        descriptor: String,
    },
}

impl PluginError {
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::LoadFailure { .. } | Self::Duplicate { .. } => ErrorCode::PluginLoadFailure,
            Self::VersionMismatch { .. } => ErrorCode::VersionMismatch,
        }
    }

    #[must_use]
    pub fn identifier(&self) -> &str {
        match self {
            Self::LoadFailure { identifier, .. }
            | Self::VersionMismatch { identifier, .. }
            | Self::Duplicate { identifier, .. } => identifier,
        }
    }
}

/// Outcome of one reload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReloadReport {
    pub admitted: Vec<CentralityDescriptor>,
    pub rejected: Vec<PluginError>,
}

/// Process-wide set of admitted centralities.
pub struct CentralityRegistry {
    api_version: u32,
    admitted: RwLock<Vec<Arc<dyn Centrality>>>,
}

impl Default for CentralityRegistry {
    fn default() -> Self {
        Self::new(HOST_API_VERSION)
    }
}

impl std::fmt::Debug for CentralityRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CentralityRegistry")
            .field("api_version", &self.api_version)
            .field("admitted", &self.available_centralities())
            .finish()
    }
}

impl CentralityRegistry {
    /// An empty registry offering `api_version` to plugins.
    #[must_use]
    pub fn new(api_version: u32) -> Self {
        Self {
            api_version,
            admitted: RwLock::new(Vec::new()),
        }
    }

    #[must_use]
    pub const fn api_version(&self) -> u32 {
        self.api_version
    }

    /// Replace the admitted set with the candidates from `manifest`.
    ///
    /// Candidates are instantiated outside the lock; the previous set stays
    /// readable until the new one is swapped in.
    #[instrument(skip_all, fields(candidates = manifest.identifiers().len(), api_version = self.api_version))]
    pub fn reload(
        &self,
        manifest: &Manifest,
        resolver: &dyn CentralityResolver,
    ) -> ReloadReport {
        let mut admitted: Vec<Arc<dyn Centrality>> = Vec::new();
        let mut report = ReloadReport::default();

        for identifier in manifest.identifiers() {
            match self.admit(identifier, resolver, &admitted) {
                Ok(centrality) => {
                    debug!(identifier = %identifier, centrality = %centrality.descriptor(), "centrality admitted");
                    report.admitted.push(centrality.descriptor());
                    admitted.push(centrality);
                }
                Err(err) => {
                    warn!(identifier = %identifier, code = %err.code(), error = %err, "centrality rejected");
                    report.rejected.push(err);
                }
            }
        }

        *self
            .admitted
            .write()
            .unwrap_or_else(PoisonError::into_inner) = admitted;

        info!(
            admitted = report.admitted.len(),
            rejected = report.rejected.len(),
            "centrality registry reloaded"
        );
        report
    }

    /// Read a manifest file and reload from it.
    ///
    /// # Errors
    ///
    /// Returns an error if the manifest cannot be read; the admitted set is
    /// left untouched in that case, so the call can simply be retried.
    pub fn reload_from_path(
        &self,
        path: &Path,
        resolver: &dyn CentralityResolver,
    ) -> anyhow::Result<ReloadReport> {
        let manifest = Manifest::from_path(path)?;
        Ok(self.reload(&manifest, resolver))
    }

    fn admit(
        &self,
        identifier: &str,
        resolver: &dyn CentralityResolver,
        admitted: &[Arc<dyn Centrality>],
    ) -> Result<Arc<dyn Centrality>, PluginError> {
        let centrality: Arc<dyn Centrality> = Arc::from(resolver.instantiate(identifier)?);

        let descriptor = centrality.descriptor();
        descriptor
            .validate()
            .map_err(|err| PluginError::LoadFailure {
                identifier: identifier.to_string(),
                reason: err.to_string(),
            })?;

        let required = centrality.required_api_version();
        if required > self.api_version {
            return Err(PluginError::VersionMismatch {
                identifier: identifier.to_string(),
                required,
                provided: self.api_version,
            });
        }

        if admitted.iter().any(|c| c.descriptor() == descriptor) {
            return Err(PluginError::Duplicate {
                identifier: identifier.to_string(),
                descriptor: descriptor.to_string(),
            });
        }

        Ok(centrality)
    }

    /// Descriptors of the admitted centralities, in manifest order.
    ///
    /// Empty before the first reload.
    #[must_use]
    pub fn available_centralities(&self) -> Vec<CentralityDescriptor> {
        self.read().iter().map(|c| c.descriptor()).collect()
    }

    /// Handles to every admitted centrality.
    #[must_use]
    pub fn admitted(&self) -> Vec<Arc<dyn Centrality>> {
        self.read().clone()
    }

    /// The admitted centrality with this descriptor's name and version.
    #[must_use]
    pub fn get(&self, descriptor: &CentralityDescriptor) -> Option<Arc<dyn Centrality>> {
        self.read()
            .iter()
            .find(|c| &c.descriptor() == descriptor)
            .cloned()
    }

    /// Pick admitted centralities by selector (`name` or `name@version`).
    ///
    /// No selectors selects everything.
    ///
    /// # Errors
    ///
    /// Returns [`CentralityError::NotAdmitted`] for the first selector that
    /// matches nothing.
    pub fn select<S: AsRef<str>>(
        &self,
        selectors: &[S],
    ) -> Result<Vec<Arc<dyn Centrality>>, CentralityError> {
        let admitted = self.admitted();
        if selectors.is_empty() {
            return Ok(admitted);
        }

        let mut picked: Vec<Arc<dyn Centrality>> = Vec::new();
        for selector in selectors {
            let selector = selector.as_ref();
            let matching: Vec<&Arc<dyn Centrality>> = admitted
                .iter()
                .filter(|c| c.descriptor().matches_selector(selector))
                .collect();
            if matching.is_empty() {
                return Err(CentralityError::NotAdmitted(selector.to_string()));
            }
            for c in matching {
                if !picked.iter().any(|p| p.descriptor() == c.descriptor()) {
                    picked.push(Arc::clone(c));
                }
            }
        }
        Ok(picked)
    }

    /// Look up `descriptor` and score `graph` with it.
    ///
    /// # Errors
    ///
    /// [`CentralityError::NotAdmitted`] if the descriptor is unknown, plus
    /// anything [`compute_scores`] reports.
    pub fn compute(
        &self,
        descriptor: &CentralityDescriptor,
        graph: Option<&Graph>,
    ) -> Result<Scores, CentralityError> {
        let centrality = self
            .get(descriptor)
            .ok_or_else(|| CentralityError::NotAdmitted(descriptor.to_string()))?;
        compute_scores(centrality.as_ref(), graph)
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Vec<Arc<dyn Centrality>>> {
        self.admitted.read().unwrap_or_else(PoisonError::into_inner)
    }
}
