//! The open-addressing kernel: parallel slot storage, linear probing,
//! backward-shift deletion, and the grow/shrink rehash policy.
//!
//! One `ProbeTable` serves every map flavor in this crate. The hash/equality
//! strategy is the `P` parameter; order tracking is the `O` parameter
//! ([`Unordered`] costs nothing, [`InsertionOrder`](crate::InsertionOrder)
//! threads a linked list through the slots). The frozen and set types wrap
//! this one.
//!
//! Invariants maintained by every operation:
//! - every live entry is found by linear probing from its ideal slot before
//!   any empty slot is reached (deletion closes gaps by backward shift, no
//!   tombstones);
//! - `size` equals the number of occupied slots;
//! - capacity is a power of two and never drops below the configured
//!   minimum;
//! - no partial mutation: an operation completes fully or leaves the table
//!   exactly as before.
//!
//! Each entry stores its mixed hash. Policy hash code runs once per key at
//! insert/lookup; rehashing and gap closing never call back into user code.

use crate::error::TableError;
use crate::order::{OrderStore, Unordered};
use crate::policy::{mix64, HashPolicy, NaturalPolicy};
use crate::reentry::ReentryCheck;
use core::borrow::Borrow;
use core::fmt;
use core::mem;

pub(crate) const DEFAULT_CAPACITY: usize = 16;
pub(crate) const DEFAULT_LOAD_FACTOR: f64 = 0.75;

// Smallest backing array we ever allocate.
const FLOOR_CAPACITY: usize = 2;

#[derive(Clone, Debug)]
pub(crate) enum Slot<K, V> {
    Empty,
    Occupied {
        hash: u64,
        key: K,
        value: V,
    },
}

impl<K, V> Default for Slot<K, V> {
    fn default() -> Self {
        Slot::Empty
    }
}

impl<K, V> Slot<K, V> {
    #[inline]
    pub(crate) fn is_occupied(&self) -> bool {
        matches!(self, Slot::Occupied { .. })
    }
}

/// Probe outcome: the key's slot, or the slot where it would be inserted.
pub(crate) enum Probe {
    Hit(usize),
    Open(usize),
}

/// Validate a `(min_capacity, load_factor)` configuration eagerly.
fn check_config(min_capacity: usize, load_factor: f64) -> Result<(), TableError> {
    if min_capacity == 0 {
        return Err(TableError::ZeroCapacity);
    }
    if !(load_factor > 0.0 && load_factor < 1.0) {
        return Err(TableError::InvalidLoadFactor(load_factor));
    }
    Ok(())
}

/// Smallest power-of-two capacity whose fill threshold covers `n` entries,
/// floored at `min_capacity`.
pub(crate) fn capacity_for(n: usize, load_factor: f64, min_capacity: usize) -> usize {
    let needed = ((n as f64 / load_factor).ceil() as usize).max(1);
    let mut cap = needed.next_power_of_two().max(min_capacity);
    // Float rounding guard: ensure the threshold really covers n.
    while fill_threshold(cap, load_factor) < n {
        cap <<= 1;
    }
    cap
}

#[inline]
fn fill_threshold(capacity: usize, load_factor: f64) -> usize {
    (capacity as f64 * load_factor) as usize
}

/// Open-addressing hash table with linear probing.
///
/// `P` supplies hash and equality ([`NaturalPolicy`] by default), `O` the
/// order tracking ([`Unordered`] by default; see
/// [`LinkedProbeTable`](crate::LinkedProbeTable) for insertion order).
///
/// Absent keys read back as `None`; a table may also carry a configured
/// default value surfaced by [`get_or_default`](ProbeTable::get_or_default).
/// Callers distinguish "absent" from "present with the default value" via
/// [`contains_key`](ProbeTable::contains_key).
pub struct ProbeTable<K, V, P = NaturalPolicy, O = Unordered> {
    pub(crate) slots: Vec<Slot<K, V>>,
    pub(crate) mask: usize,
    pub(crate) size: usize,
    load_factor: f64,
    threshold: usize,
    min_capacity: usize,
    pub(crate) policy: P,
    pub(crate) order: O,
    /// Structural-change counter; cursors validate against it.
    pub(crate) stamp: u64,
    default_value: Option<V>,
    reentry: ReentryCheck,
}

impl<K, V, P: Default, O: OrderStore> ProbeTable<K, V, P, O> {
    /// A table with default capacity (16) and load factor (0.75).
    pub fn new() -> Self {
        match Self::with_capacity_and_policy(DEFAULT_CAPACITY, DEFAULT_LOAD_FACTOR, P::default()) {
            Ok(table) => table,
            Err(_) => unreachable!("default configuration is valid"),
        }
    }

    /// A table that will never shrink below `min_capacity` slots.
    pub fn with_capacity(min_capacity: usize) -> Result<Self, TableError> {
        Self::with_capacity_and_policy(min_capacity, DEFAULT_LOAD_FACTOR, P::default())
    }

    /// A table with an explicit minimum capacity and load factor.
    pub fn with_capacity_and_load_factor(
        min_capacity: usize,
        load_factor: f64,
    ) -> Result<Self, TableError> {
        Self::with_capacity_and_policy(min_capacity, load_factor, P::default())
    }
}

impl<K, V, P, O: OrderStore> ProbeTable<K, V, P, O> {
    /// A default-sized table probing with `policy`.
    pub fn with_policy(policy: P) -> Self {
        match Self::with_capacity_and_policy(DEFAULT_CAPACITY, DEFAULT_LOAD_FACTOR, policy) {
            Ok(table) => table,
            Err(_) => unreachable!("default configuration is valid"),
        }
    }

    /// Fully explicit constructor. `min_capacity` must be nonzero (it is
    /// rounded up to a power of two) and `load_factor` must lie in (0, 1).
    pub fn with_capacity_and_policy(
        min_capacity: usize,
        load_factor: f64,
        policy: P,
    ) -> Result<Self, TableError> {
        check_config(min_capacity, load_factor)?;
        let min_capacity = min_capacity.next_power_of_two().max(FLOOR_CAPACITY);
        let mut slots = Vec::new();
        slots.resize_with(min_capacity, Slot::default);
        let mut order = O::default();
        order.resize(min_capacity);
        Ok(Self {
            slots,
            mask: min_capacity - 1,
            size: 0,
            load_factor,
            threshold: fill_threshold(min_capacity, load_factor),
            min_capacity,
            policy,
            order,
            stamp: 0,
            default_value: None,
            reentry: ReentryCheck::new(),
        })
    }

    /// Configure the value that [`get_or_default`](Self::get_or_default)
    /// falls back to for absent keys.
    pub fn with_default_value(mut self, value: V) -> Self {
        self.default_value = Some(value);
        self
    }

    pub fn set_default_value(&mut self, value: Option<V>) {
        self.default_value = value;
    }

    pub fn default_value(&self) -> Option<&V> {
        self.default_value.as_ref()
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Current number of slots (a power of two).
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn load_factor(&self) -> f64 {
        self.load_factor
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// Empty the table, keeping the current capacity.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            *slot = Slot::Empty;
        }
        self.size = 0;
        self.order.clear();
        self.bump_stamp();
    }

    /// Empty the table and reallocate it at the capacity sized for
    /// `expected` entries.
    pub fn clear_and_trim(&mut self, expected: usize) {
        let capacity = capacity_for(expected, self.load_factor, self.min_capacity);
        self.slots.clear();
        self.slots.shrink_to_fit();
        self.slots.resize_with(capacity, Slot::default);
        self.mask = capacity - 1;
        self.threshold = fill_threshold(capacity, self.load_factor);
        self.size = 0;
        self.order.resize(capacity);
        self.bump_stamp();
    }

    /// Shrink the backing array to the capacity sized for the current
    /// contents. Returns `false` (leaving the table untouched) if the new
    /// array cannot be allocated.
    pub fn trim(&mut self) -> bool {
        self.trim_to(0)
    }

    /// Shrink the backing array to hold `expected` entries (at least the
    /// current contents). A no-op returning `true` when already small
    /// enough; a no-op returning `false` on allocation failure.
    pub fn trim_to(&mut self, expected: usize) -> bool {
        let target = capacity_for(
            self.size.max(expected),
            self.load_factor,
            self.min_capacity,
        );
        if target >= self.slots.len() {
            return true;
        }
        let mut new_slots: Vec<Slot<K, V>> = Vec::new();
        if new_slots.try_reserve_exact(target).is_err() {
            return false;
        }
        new_slots.resize_with(target, Slot::default);
        self.rehash_into(new_slots);
        true
    }

    #[inline]
    pub(crate) fn bump_stamp(&mut self) {
        self.stamp = self.stamp.wrapping_add(1);
    }

    /// Move every entry into `new_slots` (already sized to a power of two)
    /// and swap it in. Entries are re-placed at their first open slot under
    /// the new mask, walking in iteration order so insertion order survives
    /// for ordered tables. Stored hashes make this independent of user code.
    pub(crate) fn rehash_into(&mut self, new_slots: Vec<Slot<K, V>>) {
        let new_capacity = new_slots.len();
        debug_assert!(new_capacity.is_power_of_two());
        debug_assert!(fill_threshold(new_capacity, self.load_factor) >= self.size);

        let mut old_slots = mem::replace(&mut self.slots, new_slots);
        let old_order = mem::take(&mut self.order);
        self.order.resize(new_capacity);
        self.mask = new_capacity - 1;
        self.threshold = fill_threshold(new_capacity, self.load_factor);
        self.bump_stamp();

        if O::ORDERED {
            let mut slot = old_order.first();
            while let Some(s) = slot {
                slot = old_order.next(s);
                if let Slot::Occupied { hash, key, value } = mem::take(&mut old_slots[s]) {
                    self.place_rehashed(hash, key, value);
                }
            }
        } else {
            for slot in old_slots {
                if let Slot::Occupied { hash, key, value } = slot {
                    self.place_rehashed(hash, key, value);
                }
            }
        }
    }

    pub(crate) fn rehash(&mut self, new_capacity: usize) {
        let mut new_slots = Vec::new();
        new_slots.resize_with(new_capacity, Slot::default);
        self.rehash_into(new_slots);
    }

    fn place_rehashed(&mut self, hash: u64, key: K, value: V) {
        let mut pos = (hash as usize) & self.mask;
        while self.slots[pos].is_occupied() {
            pos = (pos + 1) & self.mask;
        }
        self.slots[pos] = Slot::Occupied { hash, key, value };
        self.order.on_added(pos);
    }

    #[inline]
    pub(crate) fn is_live(&self, slot: usize) -> bool {
        self.slots[slot].is_occupied()
    }

    pub(crate) fn entry_at(&self, slot: usize) -> (&K, &V) {
        match &self.slots[slot] {
            Slot::Occupied { key, value, .. } => (key, value),
            Slot::Empty => unreachable!("slot {slot} expected to be live"),
        }
    }

    pub(crate) fn entry_at_mut(&mut self, slot: usize) -> (&K, &mut V) {
        match &mut self.slots[slot] {
            Slot::Occupied { key, value, .. } => (&*key, value),
            Slot::Empty => unreachable!("slot {slot} expected to be live"),
        }
    }

    /// First occupied slot at or after `from`, in slot order.
    pub(crate) fn next_occupied(&self, from: usize) -> Option<usize> {
        (from..self.slots.len()).find(|&i| self.slots[i].is_occupied())
    }

    /// First occupied slot at or before `from`, in descending slot order.
    pub(crate) fn prev_occupied(&self, from: usize) -> Option<usize> {
        (0..=from.min(self.slots.len() - 1))
            .rev()
            .find(|&i| self.slots[i].is_occupied())
    }

    /// Clear `slot`, run the order hook, close the probe gap, and bump the
    /// stamp. Every entry relocation is reported to `on_move` (and to the
    /// order store). The shrink check is the caller's business: table-level
    /// removal applies it, cursor removal must not.
    pub(crate) fn take_slot(
        &mut self,
        slot: usize,
        on_move: impl FnMut(usize, usize),
    ) -> (K, V) {
        let Slot::Occupied { key, value, .. } = mem::take(&mut self.slots[slot]) else {
            unreachable!("removal of an empty slot")
        };
        self.size -= 1;
        self.order.on_removed(slot);
        self.close_gap(slot, on_move);
        self.bump_stamp();
        (key, value)
    }

    /// Backward-shift deletion. Starting after `hole`, slide every entry
    /// whose ideal slot does not lie strictly within the wrapping range
    /// `(hole, pos]` back into the hole, then continue from its old slot;
    /// stop at the first empty slot. Preserves probe reachability without
    /// tombstones.
    fn close_gap(&mut self, hole: usize, mut on_move: impl FnMut(usize, usize)) {
        let mask = self.mask;
        let mut last = hole;
        let mut pos = (hole + 1) & mask;
        loop {
            loop {
                let home = match &self.slots[pos] {
                    Slot::Empty => return,
                    Slot::Occupied { hash, .. } => (*hash as usize) & mask,
                };
                let stays = if last <= pos {
                    last < home && home <= pos
                } else {
                    home <= pos || last < home
                };
                if !stays {
                    break;
                }
                pos = (pos + 1) & mask;
            }
            self.slots[last] = mem::take(&mut self.slots[pos]);
            self.order.on_moved(pos, last);
            on_move(pos, last);
            last = pos;
            pos = (pos + 1) & mask;
        }
    }

    /// Shrink by half (floored at the minimum capacity) once the table is
    /// sparse enough. Runs after table-level removals only.
    pub(crate) fn shrink_if_sparse(&mut self) {
        if self.size < self.threshold / 4 && self.slots.len() > self.min_capacity {
            let target = (self.slots.len() / 2).max(self.min_capacity);
            self.rehash(target);
        }
    }

    /// Iterate `(key, value)` pairs: insertion order for ordered tables,
    /// slot order (unspecified but repeatable) otherwise.
    pub fn iter(&self) -> Iter<'_, K, V, P, O> {
        let next = if O::ORDERED {
            self.order.first()
        } else {
            self.next_occupied(0)
        };
        Iter {
            table: self,
            next,
            remaining: self.size,
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(_, v)| v)
    }

    /// Visit every entry mutably, in iteration order.
    pub fn for_each_mut(&mut self, mut f: impl FnMut(&K, &mut V)) {
        if O::ORDERED {
            let mut slot = self.order.first();
            while let Some(s) = slot {
                slot = self.order.next(s);
                if let Slot::Occupied { key, value, .. } = &mut self.slots[s] {
                    f(&*key, value);
                }
            }
        } else {
            for slot in &mut self.slots {
                if let Slot::Occupied { key, value, .. } = slot {
                    f(&*key, value);
                }
            }
        }
    }
}

impl<K, V, P, O> ProbeTable<K, V, P, O>
where
    O: OrderStore,
{
    /// Mixed hash for a key under this table's policy. Policy code runs
    /// inside the reentry guard.
    #[inline]
    pub(crate) fn hash_of<Q>(&self, key: &Q) -> u64
    where
        Q: ?Sized,
        P: HashPolicy<Q>,
    {
        let _g = self.reentry.enter();
        mix64(self.policy.hash(key))
    }

    /// Linear probe from the hash's home slot. Stored hashes filter before
    /// the policy's `eq` runs. Terminates because the fill threshold keeps
    /// at least one slot empty.
    pub(crate) fn probe_hashed<Q>(&self, hash: u64, key: &Q) -> Probe
    where
        K: Borrow<Q>,
        Q: ?Sized,
        P: HashPolicy<Q>,
    {
        let _g = self.reentry.enter();
        let mut pos = (hash as usize) & self.mask;
        loop {
            match &self.slots[pos] {
                Slot::Empty => return Probe::Open(pos),
                Slot::Occupied { hash: h, key: k, .. } => {
                    if *h == hash && self.policy.eq(k.borrow(), key) {
                        return Probe::Hit(pos);
                    }
                }
            }
            pos = (pos + 1) & self.mask;
        }
    }

    #[inline]
    pub(crate) fn probe<Q>(&self, key: &Q) -> Probe
    where
        K: Borrow<Q>,
        Q: ?Sized,
        P: HashPolicy<Q>,
    {
        self.probe_hashed(self.hash_of(key), key)
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        P: HashPolicy<Q>,
    {
        match self.probe(key) {
            Probe::Hit(slot) => Some(self.entry_at(slot).1),
            Probe::Open(_) => None,
        }
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        P: HashPolicy<Q>,
    {
        match self.probe(key) {
            Probe::Hit(slot) => Some(self.entry_at_mut(slot).1),
            Probe::Open(_) => None,
        }
    }

    /// `get` falling back to the configured default value for absent keys.
    pub fn get_or_default<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        P: HashPolicy<Q>,
    {
        self.get(key).or(self.default_value.as_ref())
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized,
        P: HashPolicy<Q>,
    {
        matches!(self.probe(key), Probe::Hit(_))
    }

    /// Insert or overwrite. Returns the previous value for an existing key.
    /// A new key may grow the table first: one rehash to the smallest
    /// power-of-two capacity whose threshold covers `len() + 1`.
    pub fn put(&mut self, key: K, value: V) -> Option<V>
    where
        P: HashPolicy<K>,
    {
        let hash = self.hash_of(&key);
        match self.probe_hashed(hash, &key) {
            Probe::Hit(slot) => {
                let Slot::Occupied { value: old, .. } = &mut self.slots[slot] else {
                    unreachable!("probe hit an empty slot")
                };
                // Overwrite is not a structural change; cursors survive it.
                Some(mem::replace(old, value))
            }
            Probe::Open(slot) => {
                let slot = if self.size + 1 > self.threshold {
                    self.rehash(capacity_for(
                        self.size + 1,
                        self.load_factor,
                        self.min_capacity,
                    ));
                    match self.probe_hashed(hash, &key) {
                        Probe::Open(s) => s,
                        Probe::Hit(_) => unreachable!("key appeared during rehash"),
                    }
                } else {
                    slot
                };
                self.slots[slot] = Slot::Occupied { hash, key, value };
                self.size += 1;
                self.order.on_added(slot);
                self.bump_stamp();
                None
            }
        }
    }

    /// Remove a key. Absent keys are a no-op returning `None`, idempotent.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        P: HashPolicy<Q>,
    {
        self.remove_entry(key).map(|(_, v)| v)
    }

    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        P: HashPolicy<Q>,
    {
        match self.probe(key) {
            Probe::Hit(slot) => {
                let entry = self.take_slot(slot, |_, _| {});
                self.shrink_if_sparse();
                Some(entry)
            }
            Probe::Open(_) => None,
        }
    }

    /// Bulk construction from `(key, value)` pairs, presized from the
    /// iterator's lower size bound. Later duplicates overwrite earlier ones.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        P: HashPolicy<K> + Default,
    {
        let pairs = pairs.into_iter();
        let mut table = match Self::with_capacity_and_policy(
            capacity_for(pairs.size_hint().0, DEFAULT_LOAD_FACTOR, FLOOR_CAPACITY),
            DEFAULT_LOAD_FACTOR,
            P::default(),
        ) {
            Ok(table) => table,
            Err(_) => unreachable!("bulk build configuration is valid"),
        };
        table.extend(pairs);
        table
    }

    /// Bulk construction from parallel key/value arrays. The arrays must
    /// have equal lengths; later duplicates overwrite earlier ones.
    pub fn from_arrays(keys: Vec<K>, values: Vec<V>) -> Result<Self, TableError>
    where
        P: HashPolicy<K> + Default,
    {
        Self::from_arrays_with_policy(keys, values, P::default())
    }

    pub fn from_arrays_with_policy(
        keys: Vec<K>,
        values: Vec<V>,
        policy: P,
    ) -> Result<Self, TableError>
    where
        P: HashPolicy<K>,
    {
        if keys.len() != values.len() {
            return Err(TableError::MismatchedArrays {
                keys: keys.len(),
                values: values.len(),
            });
        }
        let mut table = Self::with_capacity_and_policy(
            capacity_for(keys.len(), DEFAULT_LOAD_FACTOR, FLOOR_CAPACITY),
            DEFAULT_LOAD_FACTOR,
            policy,
        )?;
        for (key, value) in keys.into_iter().zip(values) {
            table.put(key, value);
        }
        Ok(table)
    }
}

impl<K, V, P: Default, O: OrderStore> Default for ProbeTable<K, V, P, O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, P, O> Clone for ProbeTable<K, V, P, O>
where
    K: Clone,
    V: Clone,
    P: Clone,
    O: OrderStore + Clone,
{
    fn clone(&self) -> Self {
        Self {
            slots: self.slots.clone(),
            mask: self.mask,
            size: self.size,
            load_factor: self.load_factor,
            threshold: self.threshold,
            min_capacity: self.min_capacity,
            policy: self.policy.clone(),
            order: self.order.clone(),
            stamp: self.stamp,
            default_value: self.default_value.clone(),
            reentry: ReentryCheck::new(),
        }
    }
}

impl<K, V, P, O> fmt::Debug for ProbeTable<K, V, P, O>
where
    K: fmt::Debug,
    V: fmt::Debug,
    O: OrderStore,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Same key set and equal values, regardless of iteration order or capacity.
impl<K, V, P, O> PartialEq for ProbeTable<K, V, P, O>
where
    V: PartialEq,
    P: HashPolicy<K>,
    O: OrderStore,
{
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size
            && self
                .iter()
                .all(|(k, v)| other.get(k).is_some_and(|ov| v == ov))
    }
}

impl<K, V, P, O> Extend<(K, V)> for ProbeTable<K, V, P, O>
where
    P: HashPolicy<K>,
    O: OrderStore,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

impl<K, V, P, O> FromIterator<(K, V)> for ProbeTable<K, V, P, O>
where
    P: HashPolicy<K> + Default,
    O: OrderStore,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}

/// Borrowing iterator over `(key, value)` pairs.
pub struct Iter<'a, K, V, P, O: OrderStore> {
    table: &'a ProbeTable<K, V, P, O>,
    next: Option<usize>,
    remaining: usize,
}

impl<'a, K, V, P, O: OrderStore> Iterator for Iter<'a, K, V, P, O> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let slot = self.next?;
        self.next = if O::ORDERED {
            self.table.order.next(slot)
        } else {
            self.table.next_occupied(slot + 1)
        };
        self.remaining -= 1;
        Some(self.table.entry_at(slot))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V, P, O: OrderStore> ExactSizeIterator for Iter<'_, K, V, P, O> {}
impl<K, V, P, O: OrderStore> core::iter::FusedIterator for Iter<'_, K, V, P, O> {}

impl<'a, K, V, P, O: OrderStore> IntoIterator for &'a ProbeTable<K, V, P, O> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, P, O>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Owning iterator; entries are drained in iteration order up front.
pub struct IntoIter<K, V> {
    entries: std::vec::IntoIter<(K, V)>,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.entries.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

impl<K, V, P, O: OrderStore> IntoIterator for ProbeTable<K, V, P, O> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(mut self) -> Self::IntoIter {
        let mut entries = Vec::with_capacity(self.size);
        if O::ORDERED {
            let mut slot = self.order.first();
            while let Some(s) = slot {
                slot = self.order.next(s);
                if let Slot::Occupied { key, value, .. } = mem::take(&mut self.slots[s]) {
                    entries.push((key, value));
                }
            }
        } else {
            for slot in self.slots.drain(..) {
                if let Slot::Occupied { key, value, .. } = slot {
                    entries.push((key, value));
                }
            }
        }
        IntoIter {
            entries: entries.into_iter(),
        }
    }
}

impl<K, V, P> ProbeTable<K, V, P, Unordered> {
    /// Mutable iterator in slot order. Ordered tables use
    /// [`for_each_mut`](ProbeTable::for_each_mut) instead.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&K, &mut V)> {
        self.slots.iter_mut().filter_map(|slot| match slot {
            Slot::Occupied { key, value, .. } => Some((&*key, value)),
            Slot::Empty => None,
        })
    }
}
