//! Insertion-ordered operations.
//!
//! A [`LinkedProbeTable`] is a [`ProbeTable`] whose order store is
//! [`InsertionOrder`]: the same probing kernel, with a doubly-linked list
//! threaded through the slot indices. Iteration follows insertion order
//! regardless of how backward shifts move entries between slots, and the
//! endpoints support O(1) queue-style access.

use crate::order::{InsertionOrder, OrderStore};
use crate::policy::{HashPolicy, NaturalPolicy};
use crate::table::{Iter, Probe, ProbeTable};
use core::borrow::Borrow;

/// An insertion-ordered [`ProbeTable`].
pub type LinkedProbeTable<K, V, P = NaturalPolicy> = ProbeTable<K, V, P, InsertionOrder>;

impl<K, V, P> LinkedProbeTable<K, V, P> {
    /// The oldest entry, or `None` when empty.
    pub fn first(&self) -> Option<(&K, &V)> {
        self.order.first().map(|slot| self.entry_at(slot))
    }

    /// The newest entry, or `None` when empty.
    pub fn last(&self) -> Option<(&K, &V)> {
        self.order.last().map(|slot| self.entry_at(slot))
    }

    /// Remove and return the oldest entry. Goes through the normal removal
    /// path, so the order hooks run and the shrink check applies.
    pub fn poll_first(&mut self) -> Option<(K, V)> {
        let slot = self.order.first()?;
        let entry = self.take_slot(slot, |_, _| {});
        self.shrink_if_sparse();
        Some(entry)
    }

    /// Remove and return the newest entry.
    pub fn poll_last(&mut self) -> Option<(K, V)> {
        let slot = self.order.last()?;
        let entry = self.take_slot(slot, |_, _| {});
        self.shrink_if_sparse();
        Some(entry)
    }

    /// Relink an existing key to the front of the order in O(1), without
    /// touching the slot array. Returns whether the key was present.
    /// A structural change for order purposes: live cursors are invalidated.
    pub fn move_to_front<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized,
        P: HashPolicy<Q>,
    {
        match self.probe(key) {
            Probe::Hit(slot) => {
                self.order.unlink(slot);
                self.order.push_front(slot);
                self.bump_stamp();
                true
            }
            Probe::Open(_) => false,
        }
    }

    /// Relink an existing key to the back of the order in O(1).
    pub fn move_to_back<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized,
        P: HashPolicy<Q>,
    {
        match self.probe(key) {
            Probe::Hit(slot) => {
                self.order.unlink(slot);
                self.order.push_back(slot);
                self.bump_stamp();
                true
            }
            Probe::Open(_) => false,
        }
    }

    /// Iterate newest-to-oldest.
    pub fn iter_rev(&self) -> RevIter<'_, K, V, P> {
        RevIter {
            table: self,
            next: self.order.last(),
            remaining: self.len(),
        }
    }
}

/// Reverse (newest-first) iterator over a [`LinkedProbeTable`].
pub struct RevIter<'a, K, V, P> {
    table: &'a LinkedProbeTable<K, V, P>,
    next: Option<usize>,
    remaining: usize,
}

impl<'a, K, V, P> Iterator for RevIter<'a, K, V, P> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let slot = self.next?;
        self.next = self.table.order.prev(slot);
        self.remaining -= 1;
        Some(self.table.entry_at(slot))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V, P> ExactSizeIterator for RevIter<'_, K, V, P> {}

// Keep the public iterator name usable in linked contexts too.
pub type LinkedIter<'a, K, V, P = NaturalPolicy> = Iter<'a, K, V, P, InsertionOrder>;
