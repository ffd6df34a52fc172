// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fixed-capacity arena of slot-groups.
//!
//! Groups are allocated once and addressed by position. A LIFO stack holds the
//! positions of free groups; a map from primary index to position holds the bound
//! ones. Both are sized up front, so binding and unbinding never allocate.

use alloc::vec::Vec;

use hashbrown::HashMap;

/// Free stack plus active map over a fixed set of groups.
#[derive(Debug)]
pub(crate) struct SlotPool<G> {
    groups: Vec<G>,
    /// Primary index each group is bound to, by position.
    bound: Vec<Option<usize>>,
    free: Vec<usize>,
    active: HashMap<usize, usize>,
}

impl<G> SlotPool<G> {
    /// Takes ownership of `groups`, all initially free.
    pub(crate) fn new(groups: Vec<G>) -> Self {
        let len = groups.len();
        let mut bound = Vec::with_capacity(len);
        bound.resize(len, None);
        Self {
            groups,
            bound,
            // Reversed so the first group is popped first.
            free: (0..len).rev().collect(),
            active: HashMap::with_capacity(len),
        }
    }

    /// Total number of groups.
    pub(crate) fn capacity(&self) -> usize {
        self.groups.len()
    }

    pub(crate) fn free_len(&self) -> usize {
        self.free.len()
    }

    pub(crate) fn active_len(&self) -> usize {
        self.active.len()
    }

    pub(crate) fn is_active(&self, key: usize) -> bool {
        self.active.contains_key(&key)
    }

    /// Bound primary indices, in unspecified order.
    pub(crate) fn keys(&self) -> impl Iterator<Item = usize> + '_ {
        self.active.keys().copied()
    }

    /// Pops a free group and binds it to `key`.
    ///
    /// Returns `None` if `key` is already bound.
    ///
    /// # Panics
    ///
    /// Panics if no free group is left. The pool is sized so that this cannot happen;
    /// running dry means the sizing is wrong, and silently dropping the index would
    /// leave a hole in the grid.
    pub(crate) fn bind(&mut self, key: usize) -> Option<&mut G> {
        if self.active.contains_key(&key) {
            return None;
        }
        let Some(pos) = self.free.pop() else {
            tracing::error!(
                key,
                capacity = self.groups.len(),
                active = self.active.len(),
                "slot pool exhausted"
            );
            panic!(
                "slot pool exhausted while binding index {key} ({} groups, all bound)",
                self.groups.len()
            );
        };
        self.active.insert(key, pos);
        self.bound[pos] = Some(key);
        Some(&mut self.groups[pos])
    }

    /// Unbinds `key` and returns its group to the free stack.
    ///
    /// The returned reference lets the caller reset the group; it stays valid until the
    /// next mutation of the pool.
    pub(crate) fn unbind(&mut self, key: usize) -> Option<&mut G> {
        let pos = self.active.remove(&key)?;
        self.bound[pos] = None;
        self.free.push(pos);
        Some(&mut self.groups[pos])
    }

    /// Bound groups with their primary index, in unspecified order.
    pub(crate) fn active_mut(&mut self) -> impl Iterator<Item = (usize, &mut G)> + '_ {
        self.groups
            .iter_mut()
            .zip(self.bound.iter())
            .filter_map(|(group, key)| key.map(|key| (key, group)))
    }

    /// Consumes the pool, yielding every group exactly once.
    pub(crate) fn into_groups(self) -> Vec<G> {
        self.groups
    }
}
