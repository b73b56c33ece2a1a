//! Centrality manifests: the list of identifiers a registry reload tries.
//!
//! The on-disk form is plain text, one identifier per line:
//!
//! ```text
//! # core set
//! centra.metrics.PageRank
//! centra.metrics.Betweenness   # brokers
//! ```
//!
//! Blank lines and `#` comments are ignored. Order is preserved; it decides
//! which of two candidates with the same descriptor wins.

use std::path::Path;

use anyhow::{Context, Result};

use super::resolver::BUILTIN_IDENTIFIERS;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    identifiers: Vec<String>,
}

impl Manifest {
    /// Parse manifest text. Never fails: anything that is not a comment is
    /// an identifier, and bad identifiers are the registry's problem.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let identifiers = text
            .lines()
            .map(|line| line.split_once('#').map_or(line, |(before, _)| before))
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        Self { identifiers }
    }

    /// Read a manifest file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read manifest {}", path.display()))?;
        Ok(Self::parse(&text))
    }

    /// Manifest listing every built-in centrality.
    #[must_use]
    pub fn builtin() -> Self {
        Self::from_identifiers(BUILTIN_IDENTIFIERS.iter().copied())
    }

    #[must_use]
    pub fn from_identifiers<I, S>(identifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            identifiers: identifiers.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn identifiers(&self) -> &[String] {
        &self.identifiers
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.identifiers.is_empty()
    }
}
