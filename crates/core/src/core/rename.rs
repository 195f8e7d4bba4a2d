//! The false-dependency rename map.
//!
//! Maps a rename-pool register to the original architectural register it is
//! currently standing in for, if any. Consulted at issue time to redirect
//! operand reads away from a register with a write still in flight, and
//! walked in full on every write-back to retire stale entries (see
//! invariant 6).

use std::collections::HashMap;

use crate::core::register::RegId;

/// `rename -> arch` substitutions currently in effect.
#[derive(Debug, Clone, Default)]
pub struct RenameMap {
    active: HashMap<RegId, RegId>,
}

impl RenameMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// The rename-pool register currently standing in for `arch`, if any.
    pub fn resolve(&self, arch: RegId) -> Option<RegId> {
        self.active.get(&arch).copied()
    }

    /// Records that `rename` now stands in for `arch`, the original
    /// architectural register it ultimately traces back to.
    pub fn insert(&mut self, rename: RegId, arch: RegId) {
        self.active.insert(rename, arch);
    }

    /// Removes and returns the entry keyed by `rename`, if the completing
    /// register was itself standing in for an earlier name.
    pub fn take(&mut self, rename: RegId) -> Option<RegId> {
        self.active.remove(&rename)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_missing_is_none() {
        let map = RenameMap::new();
        assert_eq!(map.resolve(RegId(0)), None);
    }

    #[test]
    fn insert_then_resolve() {
        let mut map = RenameMap::new();
        map.insert(RegId(0), RegId(16));
        assert_eq!(map.resolve(RegId(0)), Some(RegId(16)));
    }

    #[test]
    fn take_removes_only_that_key() {
        let mut map = RenameMap::new();
        map.insert(RegId(0), RegId(16));
        map.insert(RegId(1), RegId(17));
        assert_eq!(map.take(RegId(0)), Some(RegId(16)));
        assert_eq!(map.resolve(RegId(0)), None);
        assert_eq!(map.resolve(RegId(1)), Some(RegId(17)));
    }
}
