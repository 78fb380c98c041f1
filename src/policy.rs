//! Hash/equality strategy.
//!
//! Every lookup, insert, and delete goes through a [`HashPolicy`]. The
//! default, [`NaturalPolicy`], delegates to the key's own `Hash` and `Eq`;
//! a custom policy substitutes different semantics (case-insensitive keys,
//! identity comparison) without touching the table mechanics.
//!
//! Policies must be pure: the same key must always produce the same hash,
//! and `eq` must be a proper equivalence consistent with it. A policy that
//! violates this leaves the table in a state the *caller* owns; the table
//! never detects it. Policies must not panic.

use core::hash::{BuildHasher, Hash};
use core::marker::PhantomData;
use hashbrown::hash_map::DefaultHashBuilder;

/// Hash and equality for keys of type `K`.
///
/// Implemented for `?Sized` key views so tables can be probed with borrowed
/// forms (`str` for `String` keys) whenever the policy covers both.
pub trait HashPolicy<K: ?Sized> {
    /// Raw hash for `key`. The table avalanche-mixes this before masking,
    /// so a policy may return low-entropy values (e.g. the integer itself).
    fn hash(&self, key: &K) -> u64;

    /// Whether two keys are equal under this policy.
    fn eq(&self, a: &K, b: &K) -> bool;
}

/// The natural policy: the key's own `Hash` through a `BuildHasher`, the
/// key's own `Eq`.
#[derive(Clone, Debug, Default)]
pub struct NaturalPolicy<S = DefaultHashBuilder> {
    build_hasher: S,
}

impl<S: BuildHasher> NaturalPolicy<S> {
    pub fn with_hasher(build_hasher: S) -> Self {
        Self { build_hasher }
    }
}

impl<K, S> HashPolicy<K> for NaturalPolicy<S>
where
    K: ?Sized + Hash + Eq,
    S: BuildHasher,
{
    #[inline]
    fn hash(&self, key: &K) -> u64 {
        self.build_hasher.hash_one(key)
    }

    #[inline]
    fn eq(&self, a: &K, b: &K) -> bool {
        a == b
    }
}

/// A policy backed by plain functions, for one-off strategies in tests or
/// call sites that do not warrant a named type.
pub struct FnPolicy<K: ?Sized, H, E> {
    hash: H,
    eq: E,
    _key: PhantomData<fn(&K)>,
}

impl<K, H, E> FnPolicy<K, H, E>
where
    K: ?Sized,
    H: Fn(&K) -> u64,
    E: Fn(&K, &K) -> bool,
{
    pub fn new(hash: H, eq: E) -> Self {
        Self {
            hash,
            eq,
            _key: PhantomData,
        }
    }
}

impl<K: ?Sized, H: Clone, E: Clone> Clone for FnPolicy<K, H, E> {
    fn clone(&self) -> Self {
        Self {
            hash: self.hash.clone(),
            eq: self.eq.clone(),
            _key: PhantomData,
        }
    }
}

impl<K, H, E> HashPolicy<K> for FnPolicy<K, H, E>
where
    K: ?Sized,
    H: Fn(&K) -> u64,
    E: Fn(&K, &K) -> bool,
{
    #[inline]
    fn hash(&self, key: &K) -> u64 {
        (self.hash)(key)
    }

    #[inline]
    fn eq(&self, a: &K, b: &K) -> bool {
        (self.eq)(a, b)
    }
}

/// Murmur3 64-bit finalizer. Raw policy hashes pass through this before
/// masking so that sequential or otherwise low-entropy keys spread across
/// the table instead of clustering into one probe run.
#[inline]
pub(crate) fn mix64(mut h: u64) -> u64 {
    h ^= h >> 33;
    h = h.wrapping_mul(0xff51_afd7_ed55_8ccd);
    h ^= h >> 33;
    h = h.wrapping_mul(0xc4ce_b9fe_1a85_ec53);
    h ^= h >> 33;
    h
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mix64_spreads_sequential_inputs() {
        // Consecutive inputs must not map to consecutive outputs; check the
        // low bits (the ones masking keeps) differ across a small run.
        let lows: Vec<u64> = (0u64..16).map(|i| mix64(i) & 0xf).collect();
        let distinct = lows
            .iter()
            .collect::<std::collections::BTreeSet<_>>()
            .len();
        assert!(distinct > 8, "low bits barely vary: {lows:?}");
    }

    #[test]
    fn mix64_is_deterministic() {
        assert_eq!(mix64(0xdead_beef), mix64(0xdead_beef));
        assert_ne!(mix64(1), mix64(2));
    }

    #[test]
    fn natural_policy_matches_key_eq() {
        let p: NaturalPolicy = NaturalPolicy::default();
        assert!(HashPolicy::<str>::eq(&p, "a", "a"));
        assert!(!HashPolicy::<str>::eq(&p, "a", "b"));
        assert_eq!(
            HashPolicy::<str>::hash(&p, "key"),
            HashPolicy::<str>::hash(&p, "key")
        );
    }

    #[test]
    fn fn_policy_case_insensitive() {
        let p = FnPolicy::new(
            |s: &str| {
                let mut h = 0u64;
                for b in s.bytes() {
                    h = h.wrapping_mul(31).wrapping_add(b.to_ascii_lowercase() as u64);
                }
                h
            },
            |a: &str, b: &str| a.eq_ignore_ascii_case(b),
        );
        assert!(p.eq("Hello", "hELLO"));
        assert_eq!(p.hash("Hello"), p.hash("hello"));
    }
}
