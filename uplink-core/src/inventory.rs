use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;
use uplink_topology::catalog::InMemoryCatalog;
use uplink_topology::model::{Node, TopologyEdge};

#[derive(Error, Debug)]
pub enum InventoryError {
    #[error("failed to read inventory {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse inventory {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
}

/// A file-backed inventory: the node snapshot plus the discovered edges for
/// every protocol, as exported from the monitoring platform.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Inventory {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<TopologyEdge>,
}

impl Inventory {
    pub fn from_file(path: &Path) -> Result<Self, InventoryError> {
        let content = fs::read_to_string(path).map_err(|source| InventoryError::Io {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| InventoryError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Wrap this inventory in an in-memory catalog serving both the node and
    /// edge contracts.
    pub fn into_catalog(self) -> InMemoryCatalog {
        InMemoryCatalog::new(self.nodes, self.edges)
    }
}
