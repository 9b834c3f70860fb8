//! Compute-once property cells for semantic nodes.
//!
//! Every derived property of a semantic node (a base type, an enum member's
//! value, a node's diagnostics) lives in a [`Cache`]. The cell starts empty;
//! the first read runs the compute function and every later read returns the
//! stored value.
//!
//! ## Concurrency
//!
//! Cells are backed by [`OnceLock`]: when several threads read the same
//! empty cell, exactly one runs the compute function and the others block
//! until the value is published. A published model can therefore be shared
//! across threads (see `SemanticModel::validate`).
//!
//! A compute function must never read its own cell, directly or through
//! another node. Such a cycle is a bug in this crate, not a runtime condition:
//! the reentrant read deadlocks or panics.

use std::fmt;
use std::sync::OnceLock;

/// A memoized property slot.
pub struct Cache<T> {
    slot: OnceLock<T>,
}

impl<T> Cache<T> {
    pub const fn new() -> Self {
        Self {
            slot: OnceLock::new(),
        }
    }

    /// Return the cached value, computing it with `compute` on first access.
    pub fn get_or_compute<F>(&self, compute: F) -> &T
    where
        F: FnOnce() -> T,
    {
        self.slot.get_or_init(compute)
    }

    /// Return the value if it has already been computed.
    pub fn get(&self) -> Option<&T> {
        self.slot.get()
    }

    pub fn is_computed(&self) -> bool {
        self.slot.get().is_some()
    }
}

impl<T> Default for Cache<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for Cache<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.slot.get() {
            Some(value) => f.debug_tuple("Cache").field(value).finish(),
            None => f.write_str("Cache(<pending>)"),
        }
    }
}
