//! Set facade over the table kernel.
//!
//! A [`ProbeSet`] is a [`ProbeTable`] with `()` values; every probing,
//! resize, and ordering behavior carries over unchanged. The linked variant
//! gives an insertion-ordered set with queue-style endpoint access.

use crate::order::{InsertionOrder, OrderStore, Unordered};
use crate::policy::{HashPolicy, NaturalPolicy};
use crate::table::ProbeTable;
use core::borrow::Borrow;
use core::fmt;

/// Open-addressing hash set.
pub struct ProbeSet<K, P = NaturalPolicy, O = Unordered> {
    table: ProbeTable<K, (), P, O>,
}

/// An insertion-ordered [`ProbeSet`].
pub type LinkedProbeSet<K, P = NaturalPolicy> = ProbeSet<K, P, InsertionOrder>;

impl<K, P: Default, O: OrderStore> ProbeSet<K, P, O> {
    pub fn new() -> Self {
        Self {
            table: ProbeTable::new(),
        }
    }

    pub fn with_capacity(min_capacity: usize) -> Result<Self, crate::error::TableError> {
        Ok(Self {
            table: ProbeTable::with_capacity(min_capacity)?,
        })
    }
}

impl<K, P, O: OrderStore> ProbeSet<K, P, O> {
    pub fn with_policy(policy: P) -> Self {
        Self {
            table: ProbeTable::with_policy(policy),
        }
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    pub fn clear(&mut self) {
        self.table.clear();
    }

    pub fn trim(&mut self) -> bool {
        self.table.trim()
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized,
        P: HashPolicy<Q>,
    {
        self.table.contains_key(key)
    }

    /// Add a key. Returns `true` if it was not already present.
    pub fn insert(&mut self, key: K) -> bool
    where
        P: HashPolicy<K>,
    {
        self.table.put(key, ()).is_none()
    }

    /// Remove a key. Returns `true` if it was present.
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized,
        P: HashPolicy<Q>,
    {
        self.table.remove(key).is_some()
    }

    /// Remove and return the stored key itself, which may differ from the
    /// query under a custom policy.
    pub fn take<Q>(&mut self, key: &Q) -> Option<K>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        P: HashPolicy<Q>,
    {
        self.table.remove_entry(key).map(|(k, ())| k)
    }

    pub fn iter(&self) -> impl Iterator<Item = &K> {
        self.table.keys()
    }
}

impl<K, P> LinkedProbeSet<K, P> {
    /// The oldest key.
    pub fn first(&self) -> Option<&K> {
        self.table.first().map(|(k, _)| k)
    }

    /// The newest key.
    pub fn last(&self) -> Option<&K> {
        self.table.last().map(|(k, _)| k)
    }

    pub fn poll_first(&mut self) -> Option<K> {
        self.table.poll_first().map(|(k, ())| k)
    }

    pub fn poll_last(&mut self) -> Option<K> {
        self.table.poll_last().map(|(k, ())| k)
    }

    pub fn move_to_front<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized,
        P: HashPolicy<Q>,
    {
        self.table.move_to_front(key)
    }

    pub fn move_to_back<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized,
        P: HashPolicy<Q>,
    {
        self.table.move_to_back(key)
    }

    pub fn iter_rev(&self) -> impl Iterator<Item = &K> {
        self.table.iter_rev().map(|(k, _)| k)
    }
}

impl<K, P: Default, O: OrderStore> Default for ProbeSet<K, P, O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, P, O> Clone for ProbeSet<K, P, O>
where
    K: Clone,
    P: Clone,
    O: OrderStore + Clone,
{
    fn clone(&self) -> Self {
        Self {
            table: self.table.clone(),
        }
    }
}

impl<K, P, O> fmt::Debug for ProbeSet<K, P, O>
where
    K: fmt::Debug,
    O: OrderStore,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<K, P, O> PartialEq for ProbeSet<K, P, O>
where
    P: HashPolicy<K>,
    O: OrderStore,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|k| other.contains(k))
    }
}

impl<K, P, O> Extend<K> for ProbeSet<K, P, O>
where
    P: HashPolicy<K>,
    O: OrderStore,
{
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<K, P, O> FromIterator<K> for ProbeSet<K, P, O>
where
    P: HashPolicy<K> + Default,
    O: OrderStore,
{
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<K, P, O: OrderStore> IntoIterator for ProbeSet<K, P, O> {
    type Item = K;
    type IntoIter = IntoIter<K>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            entries: self.table.into_iter(),
        }
    }
}

/// Owning key iterator.
pub struct IntoIter<K> {
    entries: crate::table::IntoIter<K, ()>,
}

impl<K> Iterator for IntoIter<K> {
    type Item = K;

    fn next(&mut self) -> Option<K> {
        self.entries.next().map(|(k, ())| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

impl<K> ExactSizeIterator for IntoIter<K> {}
