#![cfg(test)]

// Property tests for ProbeTable kept inside the crate so they do not
// require feature gates to access internal modules.

use crate::policy::NaturalPolicy;
use crate::table::ProbeTable;
use proptest::prelude::*;
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::hash::Hasher;

// Key newtype with Borrow<str> to exercise borrowed lookup.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
struct Key(String);
impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
impl std::borrow::Borrow<str> for Key {
    fn borrow(&self) -> &str {
        &self.0
    }
}

// Pool-indexed operations to improve shrinking: indices shrink to earlier
// keys, pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Put(usize, i32),
    Remove(usize),
    Get(usize),
    Contains(String),
    Mutate(usize, i32),
    Iterate,
    Trim,
}

fn key_from(pool: &[String], i: usize) -> Key {
    Key(pool[i].clone())
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z]{0,5}", 1..=8).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let contains_pool = proptest::sample::select(pool.clone());
        let op = prop_oneof![
            4 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Put(i, v)),
            3 => idx.clone().prop_map(OpI::Remove),
            2 => idx.clone().prop_map(OpI::Get),
            1 => prop_oneof![
                contains_pool.prop_map(|s: String| s),
                "[a-z]{0,5}".prop_map(|s| s)
            ]
            .prop_map(OpI::Contains),
            2 => (idx.clone(), any::<i32>()).prop_map(|(i, d)| OpI::Mutate(i, d)),
            1 => Just(OpI::Iterate),
            1 => Just(OpI::Trim),
        ];
        proptest::collection::vec(op, 1..80).prop_map(move |ops| (pool.clone(), ops))
    })
}

fn run_scenario<P>(mut sut: ProbeTable<Key, i32, P>, pool: &[String], ops: Vec<OpI>) -> Result<(), TestCaseError>
where
    P: crate::policy::HashPolicy<Key> + crate::policy::HashPolicy<str>,
{
    let mut model: HashMap<Key, i32> = HashMap::new();

    for op in ops {
        match op {
            OpI::Put(i, v) => {
                let k = key_from(pool, i);
                let prev = sut.put(k.clone(), v);
                let model_prev = model.insert(k, v);
                prop_assert_eq!(prev, model_prev, "put must report the replaced value");
            }
            OpI::Remove(i) => {
                let k = key_from(pool, i);
                let removed = sut.remove(k.0.as_str());
                let model_removed = model.remove(&k);
                prop_assert_eq!(removed, model_removed);
            }
            OpI::Get(i) => {
                let k = key_from(pool, i);
                prop_assert_eq!(sut.get(k.0.as_str()), model.get(&k));
            }
            OpI::Contains(s) => {
                let has = sut.contains_key(s.as_str());
                let has_model = model.keys().any(|k| k.0 == s);
                prop_assert_eq!(has, has_model);
            }
            OpI::Mutate(i, d) => {
                let k = key_from(pool, i);
                let sut_hit = match sut.get_mut(k.0.as_str()) {
                    Some(v) => {
                        *v = v.saturating_add(d);
                        true
                    }
                    None => false,
                };
                let model_hit = match model.get_mut(&k) {
                    Some(v) => {
                        *v = v.saturating_add(d);
                        true
                    }
                    None => false,
                };
                prop_assert_eq!(sut_hit, model_hit);
            }
            OpI::Iterate => {
                let s_keys: BTreeSet<_> = sut.iter().map(|(k, _)| k.clone()).collect();
                let m_keys: BTreeSet<_> = model.keys().cloned().collect();
                prop_assert_eq!(s_keys, m_keys);
                prop_assert_eq!(sut.iter().count(), model.len());
            }
            OpI::Trim => {
                prop_assert!(sut.trim(), "in-memory trim must succeed");
            }
        }

        // Post-conditions after each op
        // 1) Every pool key reads back exactly as in the model.
        for s in pool {
            prop_assert_eq!(sut.get(s.as_str()), model.get(s.as_str()));
        }
        // 2) Size parity and capacity discipline.
        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
        prop_assert!(sut.capacity().is_power_of_two());
        prop_assert!(sut.len() <= (sut.capacity() as f64 * sut.load_factor()) as usize);
    }
    Ok(())
}

// Property: state-machine equivalence against std::collections::HashMap.
// Invariants exercised across random operation sequences:
// - `put` returns the replaced value exactly when the model replaces one.
// - `get`/`get_mut`/`contains_key` parity, queried through Borrow<str>.
// - `remove` parity and idempotence on absent keys.
// - `iter` yields each live entry exactly once; key set equals the model's.
// - After every op: per-key read parity, `len` parity, capacity is a power
//   of two, and the fill threshold is respected.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        let sut: ProbeTable<Key, i32> = ProbeTable::new();
        run_scenario(sut, &pool, ops)?;
    }
}

// Collision variant using a constant hasher to stress equality resolution.
#[derive(Clone, Default)]
struct ConstBuildHasher;
struct ConstHasher;
impl std::hash::BuildHasher for ConstBuildHasher {
    type Hasher = ConstHasher;
    fn build_hasher(&self) -> Self::Hasher {
        ConstHasher
    }
}
impl Hasher for ConstHasher {
    fn write(&mut self, _bytes: &[u8]) {}
    fn finish(&self) -> u64 {
        0
    }
}

// Property: same state-machine invariants under worst-case collision
// behavior (constant hasher). Every key lands in one probe run, stressing
// linear probing and backward-shift deletion.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions((pool, ops) in arb_scenario()) {
        let sut: ProbeTable<Key, i32, NaturalPolicy<ConstBuildHasher>> =
            ProbeTable::with_policy(NaturalPolicy::with_hasher(ConstBuildHasher));
        run_scenario(sut, &pool, ops)?;
    }
}
