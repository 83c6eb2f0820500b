use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::net::IpAddr;

/// Link-discovery protocol that produced a topology edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Protocol {
    Lldp,
    Cdp,
    Bridge,
}

impl Protocol {
    /// Merge priority for multi-protocol parent discovery. Earlier protocols
    /// win over later ones when both resolve the same child.
    pub const PRIORITY: [Protocol; 3] = [Protocol::Lldp, Protocol::Cdp, Protocol::Bridge];

    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::Lldp => "lldp",
            Protocol::Cdp => "cdp",
            Protocol::Bridge => "bridge",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Requisition identity of a node: (foreign source, foreign id).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeIdentity {
    pub foreign_source: String,
    pub foreign_id: String,
}

impl NodeIdentity {
    pub fn new(foreign_source: impl Into<String>, foreign_id: impl Into<String>) -> Self {
        Self {
            foreign_source: foreign_source.into(),
            foreign_id: foreign_id.into(),
        }
    }
}

impl fmt::Display for NodeIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.foreign_source, self.foreign_id)
    }
}

/// A single (context, key, value) metadata entry attached to a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaData {
    pub context: String,
    pub key: String,
    pub value: String,
}

impl MetaData {
    pub fn new(
        context: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            context: context.into(),
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Immutable snapshot of an inventory node for the duration of one
/// discovery cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub identity: NodeIdentity,
    pub label: String,
    pub location: String,
    #[serde(default)]
    pub categories: BTreeSet<String>,
    #[serde(default)]
    pub meta_data: Vec<MetaData>,
    #[serde(default)]
    pub ip_interfaces: Vec<IpAddr>,
}

impl Node {
    /// First metadata value matching (context, key), if any.
    pub fn meta_value(&self, context: &str, key: &str) -> Option<&str> {
        self.meta_data
            .iter()
            .find(|m| m.context == context && m.key == key)
            .map(|m| m.value.as_str())
    }

    pub fn owns_ip(&self, addr: &IpAddr) -> bool {
        self.ip_interfaces.contains(addr)
    }
}

/// One end of a topology edge.
///
/// The source system reveals endpoint kinds through visitor double-dispatch;
/// here they are a tagged union matched directly. A `Segment` endpoint carries
/// no resolvable node identity, so an edge touching one is dropped during
/// adjacency construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EdgeEndpoint {
    Node { identity: NodeIdentity },
    Port { node: NodeIdentity },
    Segment { criteria: String },
}

impl EdgeEndpoint {
    /// The node identity this endpoint resolves through, when it has one.
    pub fn node_identity(&self) -> Option<&NodeIdentity> {
        match self {
            EdgeEndpoint::Node { identity } => Some(identity),
            EdgeEndpoint::Port { node } => Some(node),
            EdgeEndpoint::Segment { .. } => None,
        }
    }
}

/// A protocol-tagged topology edge between two endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopologyEdge {
    pub id: String,
    pub protocol: Protocol,
    pub source: EdgeEndpoint,
    pub target: EdgeEndpoint,
}

impl TopologyEdge {
    pub fn new(
        id: impl Into<String>,
        protocol: Protocol,
        source: EdgeEndpoint,
        target: EdgeEndpoint,
    ) -> Self {
        Self {
            id: id.into(),
            protocol,
            source,
            target,
        }
    }
}
