//! Open fragments awaiting a connecting neighbour.
//!
//! Fragments live in a slab; the endpoint map points both free ends of each
//! fragment at its slab slot.  Taking a fragment through either end empties
//! the slot and removes the entry for the other end as well.
//!
//! Registering a fragment overwrites whatever entry already sits at its
//! endpoints.  The displaced fragment stays in the slab (it can still be
//! reached through its other end, and it is always flushed), so no geometry
//! is dropped.

use rustc_hash::FxHashMap;

use cg_core::NodeId;

use crate::Fragment;

/// Per-category pending-endpoint map.
#[derive(Debug, Default)]
pub struct PendingEndpoints {
    slab: Vec<Option<Fragment>>,
    open: FxHashMap<NodeId, usize>,
}

impl PendingEndpoints {
    pub fn new() -> Self {
        Self::default()
    }

    /// Park `fragment` under both of its endpoints.  Empty fragments are
    /// ignored.
    pub fn register(&mut self, fragment: Fragment) {
        let (Some(first), Some(last)) = (fragment.first(), fragment.last()) else {
            return;
        };
        let slot = self.slab.len();
        self.slab.push(Some(fragment));
        self.open.insert(first, slot);
        self.open.insert(last, slot);
    }

    /// Remove and return the fragment open at `node`, if any.
    pub fn take(&mut self, node: NodeId) -> Option<Fragment> {
        let slot = self.open.remove(&node)?;
        let fragment = self.slab[slot].take()?;

        for end in [fragment.first(), fragment.last()].into_iter().flatten() {
            if self.open.get(&end) == Some(&slot) {
                self.open.remove(&end);
            }
        }
        Some(fragment)
    }

    /// Fragment open at `node`, without removing it.
    pub fn peek(&self, node: NodeId) -> Option<&Fragment> {
        let slot = *self.open.get(&node)?;
        self.slab[slot].as_ref()
    }

    /// Number of endpoint entries currently open.
    pub fn open_endpoints(&self) -> usize {
        self.open.len()
    }

    /// Number of fragments still pending.
    pub fn len(&self) -> usize {
        self.slab.iter().filter(|f| f.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.slab.iter().all(Option::is_none)
    }

    /// Consume the map, yielding every pending fragment in registration
    /// order.
    pub fn drain(self) -> impl Iterator<Item = Fragment> {
        self.slab.into_iter().flatten()
    }
}
