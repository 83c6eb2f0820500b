use chrono::{DateTime, Utc};
use std::sync::{Arc, RwLock};
use uplink_topology::discovery::ParentMap;

/// Immutable result of one completed discovery cycle.
#[derive(Debug, Clone)]
pub struct ParentSnapshot {
    pub parents: ParentMap,
    pub computed_at: DateTime<Utc>,
    pub cycle: u64,
}

impl ParentSnapshot {
    /// The pre-first-cycle snapshot: empty, cycle zero.
    pub fn empty() -> Self {
        Self {
            parents: ParentMap::new(),
            computed_at: Utc::now(),
            cycle: 0,
        }
    }

    pub fn parent_of(&self, label: &str) -> Option<&str> {
        self.parents.get(label).map(String::as_str)
    }
}

/// Holder for the currently published snapshot.
///
/// Writers publish a complete replacement by swapping the inner `Arc`;
/// readers clone the `Arc` and keep working against a consistent map even
/// while the next cycle publishes. Nobody ever observes a half-built map.
#[derive(Debug)]
pub struct SnapshotCell {
    inner: RwLock<Arc<ParentSnapshot>>,
}

impl SnapshotCell {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Arc::new(ParentSnapshot::empty())),
        }
    }

    pub fn load(&self) -> Arc<ParentSnapshot> {
        // Lock poisoning can only happen if a writer panicked mid-swap; the
        // stored Arc is still a complete snapshot either way.
        match self.inner.read() {
            Ok(guard) => Arc::clone(&guard),
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }

    pub fn store(&self, snapshot: ParentSnapshot) {
        let snapshot = Arc::new(snapshot);
        match self.inner.write() {
            Ok(mut guard) => *guard = snapshot,
            Err(poisoned) => *poisoned.into_inner() = snapshot,
        }
    }
}

impl Default for SnapshotCell {
    fn default() -> Self {
        Self::new()
    }
}
