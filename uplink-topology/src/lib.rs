pub mod catalog;
pub mod discovery;
pub mod error;
pub mod gateway;
pub mod graph;
pub mod model;

pub use catalog::{EdgeCatalog, InMemoryCatalog, NodeCatalog};
pub use discovery::{DiscoveryOptions, ParentMap, resolve_parents};
pub use error::CatalogError;
pub use gateway::{GatewayMap, GatewayResolver};
pub use graph::{AdjacencyGraph, build_adjacency};
pub use model::{EdgeEndpoint, MetaData, Node, NodeIdentity, Protocol, TopologyEdge};
