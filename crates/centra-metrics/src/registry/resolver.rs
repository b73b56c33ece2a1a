//! Identifier → factory resolution for centrality plugins.
//!
//! A resolver turns a manifest identifier into a fresh [`Centrality`]
//! instance. [`FactoryResolver`] is a plain lookup table of factories; the
//! built-in table registers every algorithm in [`crate::metrics`] under a
//! fully qualified identifier. Embedders add their own factories with
//! [`FactoryResolver::register`].

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::PluginError;
use crate::centrality::Centrality;
use crate::metrics::{
    Betweenness, EdgeBetweenness, EdgeWeight, NodeWeight, Outdegree, PageRank, PageRankConfig,
};

pub const OUTDEGREE_ID: &str = "centra.metrics.Outdegree";
pub const BETWEENNESS_ID: &str = "centra.metrics.Betweenness";
pub const EDGE_BETWEENNESS_ID: &str = "centra.metrics.EdgeBetweenness";
pub const PAGERANK_ID: &str = "centra.metrics.PageRank";
pub const NODE_WEIGHT_ID: &str = "centra.metrics.NodeWeight";
pub const EDGE_WEIGHT_ID: &str = "centra.metrics.EdgeWeight";

/// Every identifier [`FactoryResolver::builtin`] knows.
pub const BUILTIN_IDENTIFIERS: [&str; 6] = [
    OUTDEGREE_ID,
    BETWEENNESS_ID,
    EDGE_BETWEENNESS_ID,
    PAGERANK_ID,
    NODE_WEIGHT_ID,
    EDGE_WEIGHT_ID,
];

/// Builds one centrality instance, or explains why it cannot.
pub type CentralityFactory =
    Arc<dyn Fn() -> Result<Box<dyn Centrality>, String> + Send + Sync>;

/// Resolves manifest identifiers to centrality instances.
pub trait CentralityResolver: Send + Sync {
    /// Instantiate the centrality named by `identifier`.
    ///
    /// # Errors
    ///
    /// Returns [`PluginError::LoadFailure`] when the identifier is unknown or
    /// its factory fails.
    fn instantiate(&self, identifier: &str) -> Result<Box<dyn Centrality>, PluginError>;
}

/// Table-driven [`CentralityResolver`].
#[derive(Clone, Default)]
pub struct FactoryResolver {
    factories: HashMap<String, CentralityFactory>,
}

impl FactoryResolver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolver for the built-in algorithms with default PageRank settings.
    #[must_use]
    pub fn builtin() -> Self {
        Self::builtin_with(PageRankConfig::default())
    }

    /// Resolver for the built-in algorithms with the given PageRank settings.
    #[must_use]
    pub fn builtin_with(pagerank: PageRankConfig) -> Self {
        let mut resolver = Self::new();
        resolver
            .register(OUTDEGREE_ID, || Ok(Box::new(Outdegree)))
            .register(BETWEENNESS_ID, || Ok(Box::new(Betweenness)))
            .register(EDGE_BETWEENNESS_ID, || Ok(Box::new(EdgeBetweenness)))
            .register(PAGERANK_ID, move || {
                if pagerank.damping.is_finite() && (0.0..=1.0).contains(&pagerank.damping) {
                    Ok(Box::new(PageRank::with_config(pagerank)))
                } else {
                    Err(format!("damping {} outside [0, 1]", pagerank.damping))
                }
            })
            .register(NODE_WEIGHT_ID, || Ok(Box::new(NodeWeight)))
            .register(EDGE_WEIGHT_ID, || Ok(Box::new(EdgeWeight)));
        resolver
    }

    /// Register (or replace) the factory for `identifier`.
    pub fn register<F>(&mut self, identifier: impl Into<String>, factory: F) -> &mut Self
    where
        F: Fn() -> Result<Box<dyn Centrality>, String> + Send + Sync + 'static,
    {
        self.factories.insert(identifier.into(), Arc::new(factory));
        self
    }

    #[must_use]
    pub fn contains(&self, identifier: &str) -> bool {
        self.factories.contains_key(identifier)
    }

    /// Known identifiers, sorted.
    #[must_use]
    pub fn identifiers(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}

impl fmt::Debug for FactoryResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FactoryResolver")
            .field("identifiers", &self.identifiers())
            .finish()
    }
}

impl CentralityResolver for FactoryResolver {
    fn instantiate(&self, identifier: &str) -> Result<Box<dyn Centrality>, PluginError> {
        let factory = self
            .factories
            .get(identifier)
            .ok_or_else(|| PluginError::LoadFailure {
                identifier: identifier.to_string(),
                reason: "no factory registered for this identifier".to_string(),
            })?;

        factory().map_err(|reason| PluginError::LoadFailure {
            identifier: identifier.to_string(),
            reason,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_resolves_every_identifier() {
        let r = FactoryResolver::builtin();
        for id in BUILTIN_IDENTIFIERS {
            let c = r.instantiate(id).unwrap();
            assert_eq!(c.version(), 1, "{id}");
        }
        assert_eq!(r.identifiers().len(), BUILTIN_IDENTIFIERS.len());
    }

    #[test]
    fn unknown_identifier_is_load_failure() {
        let r = FactoryResolver::builtin();
        let err = r.instantiate("com.example.Missing").err().unwrap();
        assert!(matches!(err, PluginError::LoadFailure { .. }));
    }

    #[test]
    fn failing_factory_is_load_failure() {
        let mut r = FactoryResolver::new();
        r.register("broken", || Err("constructor exploded".to_string()));
        let err = r.instantiate("broken").err().unwrap();
        assert!(err.to_string().contains("constructor exploded"));
    }

    #[test]
    fn invalid_pagerank_damping_fails_instantiation() {
        let r = FactoryResolver::builtin_with(PageRankConfig {
            damping: 2.0,
            iterations: 20,
        });
        assert!(r.instantiate(PAGERANK_ID).is_err());
        assert!(r.instantiate(OUTDEGREE_ID).is_ok());
    }

    #[test]
    fn register_replaces_existing_factory() {
        let mut r = FactoryResolver::builtin();
        r.register(OUTDEGREE_ID, || Ok(Box::new(PageRank::default())));
        assert_eq!(r.instantiate(OUTDEGREE_ID).unwrap().name(), PageRank::NAME);
        assert!(r.contains(OUTDEGREE_ID));
    }
}
