//! Serializable identity of a centrality algorithm.
//!
//! A [`CentralityDescriptor`] names an algorithm without carrying its code,
//! so it can cross a process or network boundary and still be matched
//! against the registry on the other side. Identity is `name + version`;
//! the declared [`CentralityType`] is informational and does not take part
//! in equality or hashing.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// Which graph elements an algorithm scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CentralityType {
    NodeCentrality,
    EdgeCentrality,
}

impl fmt::Display for CentralityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NodeCentrality => f.write_str("node"),
            Self::EdgeCentrality => f.write_str("edge"),
        }
    }
}

/// Why a descriptor was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DescriptorError {
    #[error("centrality '{name}' has version 0; versions start at 1")]
    ZeroVersion { name: String },
}

/// Wire-safe stand-in for a centrality implementation.
///
/// Versions start at 1. Deserializing a zero version fails; descriptors
/// built in-process are checked with [`CentralityDescriptor::validate`]
/// before the registry admits them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "DescriptorWire")]
pub struct CentralityDescriptor {
    name: String,
    version: u32,
    #[serde(rename = "type")]
    kind: CentralityType,
}

#[derive(Deserialize)]
struct DescriptorWire {
    name: String,
    version: u32,
    #[serde(rename = "type")]
    kind: CentralityType,
}

impl TryFrom<DescriptorWire> for CentralityDescriptor {
    type Error = DescriptorError;

    fn try_from(wire: DescriptorWire) -> Result<Self, Self::Error> {
        let descriptor = Self::new(wire.name, wire.version, wire.kind);
        descriptor.validate()?;
        Ok(descriptor)
    }
}

impl CentralityDescriptor {
    #[must_use]
    pub fn new(name: impl Into<String>, version: u32, kind: CentralityType) -> Self {
        Self {
            name: name.into(),
            version,
            kind,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn version(&self) -> u32 {
        self.version
    }

    #[must_use]
    pub const fn kind(&self) -> CentralityType {
        self.kind
    }

    /// Check the version is at least 1.
    ///
    /// # Errors
    ///
    /// Returns [`DescriptorError::ZeroVersion`] for version 0.
    pub fn validate(&self) -> Result<(), DescriptorError> {
        if self.version == 0 {
            return Err(DescriptorError::ZeroVersion {
                name: self.name.clone(),
            });
        }
        Ok(())
    }

    /// Whether `selector` picks this descriptor.
    ///
    /// A selector is either a bare name (`PageRank`, any version) or
    /// `name@version` (`PageRank@1`). Names compare case-insensitively.
    #[must_use]
    pub fn matches_selector(&self, selector: &str) -> bool {
        let (name, version) = match selector.rsplit_once('@') {
            Some((name, version)) => (name, Some(version)),
            None => (selector, None),
        };
        if !self.name.eq_ignore_ascii_case(name.trim()) {
            return false;
        }
        version.is_none_or(|v| v.trim().parse::<u32>().ok() == Some(self.version))
    }
}

impl PartialEq for CentralityDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.version == other.version
    }
}

impl Eq for CentralityDescriptor {}

impl Hash for CentralityDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.version.hash(state);
    }
}

impl fmt::Display for CentralityDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{} ({})", self.name, self.version, self.kind)
    }
}
