use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::error::ErrorCode;

/// API version this build of centra offers to centrality plugins.
pub const HOST_API_VERSION: u32 = 1;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "CENTRA_CONFIG";

/// A named config file that is missing or cannot be read.
#[derive(Debug, thiserror::Error)]
#[error("cannot read config file {}", .path.display())]
pub struct ConfigUnreadable {
    pub path: PathBuf,
}

/// Error code for a failed config load: unreadable files are told apart
/// from files that were read but do not parse or validate.
#[must_use]
pub fn error_code(err: &anyhow::Error) -> ErrorCode {
    if err.downcast_ref::<ConfigUnreadable>().is_some() {
        ErrorCode::ConfigUnreadable
    } else {
        ErrorCode::ConfigParseError
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CentraConfig {
    #[serde(default)]
    pub registry: RegistryConfig,
    #[serde(default)]
    pub pagerank: PageRankSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Manifest listing centrality identifiers, one per line. `None` loads
    /// every built-in centrality.
    #[serde(default)]
    pub manifest: Option<PathBuf>,
    #[serde(default = "default_api_version")]
    pub api_version: u32,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            manifest: None,
            api_version: default_api_version(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageRankSettings {
    #[serde(default = "default_damping")]
    pub damping: f64,
    #[serde(default = "default_iterations")]
    pub iterations: usize,
}

impl Default for PageRankSettings {
    fn default() -> Self {
        Self {
            damping: default_damping(),
            iterations: default_iterations(),
        }
    }
}

/// Parse a config document.
///
/// # Errors
///
/// Returns an error if the TOML is malformed or has invalid values.
pub fn parse_config(content: &str) -> Result<CentraConfig> {
    let config = toml::from_str::<CentraConfig>(content)?;
    validate(&config)?;
    Ok(config)
}

/// Load a config file; a missing file yields the defaults.
///
/// Relative manifest paths are resolved against the config file's directory.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_config(path: &Path) -> Result<CentraConfig> {
    if !path.exists() {
        return Ok(CentraConfig::default());
    }

    let content = std::fs::read_to_string(path).with_context(|| ConfigUnreadable {
        path: path.to_path_buf(),
    })?;

    let mut config =
        parse_config(&content).with_context(|| format!("Failed to parse {}", path.display()))?;

    if let (Some(manifest), Some(dir)) = (config.registry.manifest.as_mut(), path.parent()) {
        if manifest.is_relative() {
            *manifest = dir.join(&*manifest);
        }
    }

    Ok(config)
}

/// Default per-user config location (`<config_dir>/centra/config.toml`).
#[must_use]
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("centra/config.toml"))
}

/// Resolve and load the effective config.
///
/// Precedence: explicit `cli_path`, then `CENTRA_CONFIG`, then the user
/// config file, then built-in defaults.
///
/// # Errors
///
/// Returns an error if the chosen file exists but is invalid, or if an
/// explicitly requested file does not exist.
pub fn resolve_config(cli_path: Option<&Path>) -> Result<CentraConfig> {
    let env_path = env::var_os(CONFIG_ENV).map(PathBuf::from);
    resolve_config_inner(cli_path, env_path, user_config_path())
}

fn resolve_config_inner(
    cli_path: Option<&Path>,
    env_path: Option<PathBuf>,
    user_path: Option<PathBuf>,
) -> Result<CentraConfig> {
    let explicit = cli_path.map(Path::to_path_buf).or(env_path);

    if let Some(path) = explicit {
        if !path.exists() {
            return Err(ConfigUnreadable { path }.into());
        }
        return load_config(&path);
    }

    match user_path {
        Some(path) => load_config(&path),
        None => Ok(CentraConfig::default()),
    }
}

fn validate(config: &CentraConfig) -> Result<()> {
    let damping = config.pagerank.damping;
    if !(0.0..=1.0).contains(&damping) {
        anyhow::bail!("pagerank.damping must be within [0, 1], got {damping}");
    }
    if config.registry.api_version == 0 {
        anyhow::bail!("registry.api_version must be at least 1");
    }
    Ok(())
}

const fn default_api_version() -> u32 {
    HOST_API_VERSION
}

const fn default_damping() -> f64 {
    0.85
}

const fn default_iterations() -> usize {
    20
}
