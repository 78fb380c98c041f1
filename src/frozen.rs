//! Build-once tables.
//!
//! A [`FrozenTable`] is populated in one shot and never mutated again. The
//! backing array is sized for the final contents before any entry goes in,
//! so construction performs no growth rehash. The table carries no internal
//! synchronization; like the live tables it is `Send` but not `Sync`, and
//! cross-thread sharing goes through an external lock or per-thread clones.
//!
//! The mutating surface is present but inert: [`put`](FrozenTable::put),
//! [`remove`](FrozenTable::remove), and [`clear`](FrozenTable::clear) return
//! [`TableError::Unsupported`] without touching the table. Iteration follows
//! insertion order; duplicate keys in the input keep the first key's
//! position with the last value.

use crate::error::TableError;
use crate::linked::{LinkedProbeTable, RevIter};
use crate::order::InsertionOrder;
use crate::policy::{HashPolicy, NaturalPolicy};
use crate::table::{self, Iter, DEFAULT_LOAD_FACTOR};
use core::borrow::Borrow;
use core::fmt;

/// An immutable, insertion-ordered hash table.
pub struct FrozenTable<K, V, P = NaturalPolicy> {
    inner: LinkedProbeTable<K, V, P>,
}

impl<K, V, P> FrozenTable<K, V, P>
where
    P: HashPolicy<K>,
{
    /// Freeze the `(key, value)` pairs of an iterator. Later duplicates
    /// overwrite the value but keep the first occurrence's position.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        P: Default,
    {
        Self::from_pairs_with_policy(pairs, P::default())
    }

    pub fn from_pairs_with_policy<I>(pairs: I, policy: P) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let pairs = pairs.into_iter();
        let expected = pairs.size_hint().0;
        let capacity = table::capacity_for(expected, DEFAULT_LOAD_FACTOR, 1);
        let mut inner = match LinkedProbeTable::with_capacity_and_policy(
            capacity,
            DEFAULT_LOAD_FACTOR,
            policy,
        ) {
            Ok(table) => table,
            Err(_) => unreachable!("frozen build configuration is valid"),
        };
        for (key, value) in pairs {
            inner.put(key, value);
        }
        Self { inner }
    }

    /// Freeze parallel key/value arrays. The arrays must have equal
    /// lengths.
    pub fn from_arrays(keys: Vec<K>, values: Vec<V>) -> Result<Self, TableError>
    where
        P: Default,
    {
        if keys.len() != values.len() {
            return Err(TableError::MismatchedArrays {
                keys: keys.len(),
                values: values.len(),
            });
        }
        Ok(Self::from_pairs(keys.into_iter().zip(values)))
    }

    /// Freeze the current contents of a live table, preserving its
    /// insertion order and policy.
    pub fn from_table(table: LinkedProbeTable<K, V, P>) -> Self {
        Self { inner: table }
    }
}

impl<K, V, P> FrozenTable<K, V, P> {
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        P: HashPolicy<Q>,
    {
        self.inner.get(key)
    }

    pub fn get_or_default<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        P: HashPolicy<Q>,
    {
        self.inner.get_or_default(key)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized,
        P: HashPolicy<Q>,
    {
        self.inner.contains_key(key)
    }

    /// Iterate in insertion order.
    pub fn iter(&self) -> Iter<'_, K, V, P, InsertionOrder> {
        self.inner.iter()
    }

    pub fn iter_rev(&self) -> RevIter<'_, K, V, P> {
        self.inner.iter_rev()
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.inner.keys()
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.inner.values()
    }

    /// The oldest entry.
    pub fn first(&self) -> Option<(&K, &V)> {
        self.inner.first()
    }

    /// The newest entry.
    pub fn last(&self) -> Option<(&K, &V)> {
        self.inner.last()
    }

    /// Always fails; a frozen table never accepts entries after build.
    pub fn put(&mut self, _key: K, _value: V) -> Result<(), TableError> {
        Err(TableError::Unsupported("put"))
    }

    /// Always fails.
    pub fn remove<Q>(&mut self, _key: &Q) -> Result<(), TableError>
    where
        Q: ?Sized,
    {
        Err(TableError::Unsupported("remove"))
    }

    /// Always fails.
    pub fn clear(&mut self) -> Result<(), TableError> {
        Err(TableError::Unsupported("clear"))
    }

    /// Thaw back into a mutable insertion-ordered table.
    pub fn into_table(self) -> LinkedProbeTable<K, V, P> {
        self.inner
    }
}

impl<K, V, P> Clone for FrozenTable<K, V, P>
where
    K: Clone,
    V: Clone,
    P: Clone,
{
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<K, V, P> fmt::Debug for FrozenTable<K, V, P>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, P> PartialEq for FrozenTable<K, V, P>
where
    V: PartialEq,
    P: HashPolicy<K>,
{
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<'a, K, V, P> IntoIterator for &'a FrozenTable<K, V, P> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, P, InsertionOrder>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, P> FromIterator<(K, V)> for FrozenTable<K, V, P>
where
    P: HashPolicy<K> + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}
