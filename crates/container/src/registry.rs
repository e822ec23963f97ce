//! The thread-safe slot map behind a container.
//!
//! Structural operations never corrupt state under concurrent mutation, but
//! resolution of a given key is not atomic end-to-end: the resolver performs
//! lookup, build, and memoization as three separate operations against this
//! map, on purpose. See the crate docs for the resulting caveat.

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::key::Key;
use crate::registration::Registration;

#[derive(Default)]
pub(crate) struct Registry {
    slots: RwLock<HashMap<Key, Registration>>,
}

impl Registry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Idempotent overwrite: a later registration silently replaces an
    /// earlier one under the same key.
    pub(crate) fn insert(&self, key: Key, registration: Registration) {
        self.slots.write().insert(key, registration);
    }

    /// Clones the registration out so no lock is held while its builder
    /// runs (builders recurse into the registry).
    pub(crate) fn lookup(&self, key: &Key) -> Option<Registration> {
        self.slots.read().get(key).cloned()
    }

    pub(crate) fn contains(&self, key: &Key) -> bool {
        self.slots.read().contains_key(key)
    }

    /// Removes every registration, returning how many were dropped.
    pub(crate) fn clear(&self) -> usize {
        let mut slots = self.slots.write();
        let dropped = slots.len();
        slots.clear();
        dropped
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.read().len()
    }
}
