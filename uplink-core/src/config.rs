use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
}

/// Settings for one parent-resolution deployment.
///
/// The metadata (context, key) pairs select the operator-provisioned gateway
/// hint and parent override on each node. Delays are in milliseconds and feed
/// the fixed-delay scheduler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    pub context: String,
    pub gateway_key: String,
    pub parent_key: String,
    pub excluded_foreign_source: String,
    pub max_hops: usize,
    pub orphan_fallback: bool,
    pub initial_delay_ms: u64,
    pub delay_ms: u64,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            context: "provision".to_string(),
            gateway_key: "gateway".to_string(),
            parent_key: "parent".to_string(),
            excluded_foreign_source: "NODES".to_string(),
            max_hops: 10,
            orphan_fallback: true,
            initial_delay_ms: 1_000_000,
            delay_ms: 3_600_000,
        }
    }
}

impl ResolverConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }
}
