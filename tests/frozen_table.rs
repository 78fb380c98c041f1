// FrozenTable test suite.
//
// Invariants exercised:
// - Build-once: all entries go in at construction; the mutating surface
//   exists but always fails with Unsupported, leaving no side effects.
// - Reads: get/contains_key/first/last/iteration match the build input,
//   in insertion order.
// - Duplicate build keys: last value wins, first position kept.

use probe_table::{FrozenTable, TableError};

// Test: the canonical parallel-arrays build.
// Verifies: remove(1) raises Unsupported; get(2) still yields "b".
#[test]
fn build_from_arrays_then_reject_mutation() {
    let mut t: FrozenTable<u64, &str> =
        FrozenTable::from_arrays(vec![1, 2, 3], vec!["a", "b", "c"]).unwrap();
    assert_eq!(t.remove(&1), Err(TableError::Unsupported("remove")));
    assert_eq!(t.get(&2), Some(&"b"));
    assert_eq!(t.len(), 3);
    assert_eq!(t.put(4, "d"), Err(TableError::Unsupported("put")));
    assert_eq!(t.clear(), Err(TableError::Unsupported("clear")));
    assert_eq!(t.len(), 3, "failed mutations must leave no trace");
}

// Test: array length validation happens before any work.
#[test]
fn mismatched_arrays_rejected() {
    let err = FrozenTable::<u64, &str>::from_arrays(vec![1, 2, 3], vec!["a"]).unwrap_err();
    assert_eq!(err, TableError::MismatchedArrays { keys: 3, values: 1 });
}

// Test: iteration order and endpoints reflect the build sequence.
#[test]
fn ordered_reads() {
    let t: FrozenTable<String, i32> = FrozenTable::from_pairs(
        [("z", 26), ("a", 1), ("m", 13)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v)),
    );
    let keys: Vec<&String> = t.keys().collect();
    assert_eq!(keys, ["z", "a", "m"]);
    assert_eq!(t.first().map(|(k, _)| k.as_str()), Some("z"));
    assert_eq!(t.last().map(|(k, _)| k.as_str()), Some("m"));
    assert_eq!(t.get("a"), Some(&1), "borrowed str lookup");
    let rev: Vec<&String> = t.iter_rev().map(|(k, _)| k).collect();
    assert_eq!(rev, ["m", "a", "z"]);
}

// Test: duplicate keys in the build input.
// Verifies: last value wins while the key keeps its first position.
#[test]
fn duplicates_collapse() {
    let t: FrozenTable<u64, &str> =
        FrozenTable::from_pairs([(7, "old"), (3, "x"), (7, "new")]);
    assert_eq!(t.len(), 2);
    assert_eq!(t.get(&7), Some(&"new"));
    let keys: Vec<u64> = t.keys().copied().collect();
    assert_eq!(keys, vec![7, 3]);
}

// Test: freezing a live table and thawing it back.
#[test]
fn freeze_and_thaw() {
    let mut live = probe_table::LinkedProbeTable::<u64, u64>::new();
    for k in 0..100u64 {
        live.put(k, k * 3);
    }
    let frozen = FrozenTable::from_table(live);
    for k in 0..100u64 {
        assert_eq!(frozen.get(&k), Some(&(k * 3)));
    }
    let mut thawed = frozen.into_table();
    assert_eq!(thawed.put(200, 600), None);
    assert_eq!(thawed.len(), 101);
}

// Test: a large build stays read-correct (no growth pathology during the
// presized one-shot construction).
#[test]
fn large_build() {
    let n = 10_000u64;
    let t: FrozenTable<u64, u64> = FrozenTable::from_pairs((0..n).map(|k| (k, !k)));
    assert_eq!(t.len(), n as usize);
    for k in (0..n).step_by(997) {
        assert_eq!(t.get(&k), Some(&!k));
    }
    assert!(!t.contains_key(&n));
}
