pub mod config;
pub mod inventory;
pub mod scheduler;
pub mod service;
pub mod snapshot;

pub use config::{ConfigError, ResolverConfig};
pub use inventory::{Inventory, InventoryError};
pub use scheduler::Scheduler;
pub use service::{CycleSummary, NO_GATEWAY_LABEL, NO_PARENT_FOUND, ParentService};
pub use snapshot::{ParentSnapshot, SnapshotCell};
