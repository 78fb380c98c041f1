// LinkedProbeTable test suite.
//
// Invariants exercised:
// - Ordering law: with no removals, iteration order equals insertion
//   order; overwrites keep the original position.
// - Endpoint access: first/last/poll_first/poll_last behave like a queue
//   over the insertion order.
// - move_to_front/move_to_back relink in O(1) and count as structural
//   changes for cursors.
// - Order survives backward shifts, rehashes, and trims.

use probe_table::{LinkedProbeSet, LinkedProbeTable, StructuralChange};

fn keys<V>(t: &LinkedProbeTable<u64, V>) -> Vec<u64> {
    t.iter().map(|(k, _)| *k).collect()
}

// Test: the ordered scenario from the class of queue-like uses.
// Verifies: iteration yields 5,1,9; poll_first removes 5's entry; the
// next iteration yields 1,9.
#[test]
fn insertion_order_and_poll() {
    let mut t: LinkedProbeTable<u64, &str> = LinkedProbeTable::new();
    t.put(5, "a");
    t.put(1, "b");
    t.put(9, "c");
    assert_eq!(keys(&t), vec![5, 1, 9]);
    assert_eq!(t.poll_first(), Some((5, "a")));
    assert_eq!(keys(&t), vec![1, 9]);
}

// Test: move_to_front reorders without touching values.
// Verifies: the moved key is yielded first on the next iteration.
#[test]
fn move_to_front_leads_iteration() {
    let mut t: LinkedProbeTable<u64, i32> = LinkedProbeTable::new();
    for k in [10u64, 20, 30] {
        t.put(k, k as i32);
    }
    assert!(t.move_to_front(&30));
    assert_eq!(keys(&t), vec![30, 10, 20]);
    assert_eq!(t.get(&30), Some(&30));
}

// Test: LRU-style usage: touch on access, evict from the back.
// Verifies: the eviction order tracks the touch order exactly.
#[test]
fn lru_discipline() {
    let mut t: LinkedProbeTable<u64, ()> = LinkedProbeTable::new();
    for k in 0..8u64 {
        t.put(k, ());
    }
    // Touch even keys: they become the most recent, in touch order.
    for k in [0u64, 2, 4, 6] {
        assert!(t.move_to_back(&k));
    }
    let mut evicted = Vec::new();
    while let Some((k, ())) = t.poll_first() {
        evicted.push(k);
    }
    assert_eq!(evicted, vec![1, 3, 5, 7, 0, 2, 4, 6]);
}

// Test: order is independent of slot placement.
// Assumes: growth rehashes re-place every entry; removal shifts slots.
// Verifies: logical order never changes unless asked.
#[test]
fn order_survives_rehash_and_shift() {
    let mut t: LinkedProbeTable<u64, u64> = LinkedProbeTable::with_capacity(4).unwrap();
    let mut expected: Vec<u64> = Vec::new();
    for i in 0..200u64 {
        let k = i.wrapping_mul(0x9e37_79b9).rotate_left(7);
        if t.put(k, i).is_none() {
            expected.push(k);
        }
    }
    assert_eq!(keys(&t), expected);

    let victims: Vec<u64> = expected.iter().copied().skip(1).step_by(4).collect();
    for k in &victims {
        assert!(t.remove(k).is_some());
    }
    expected.retain(|k| !victims.contains(k));
    assert_eq!(keys(&t), expected);

    assert!(t.trim());
    assert_eq!(keys(&t), expected);
}

// Test: bidirectional cursor with foreign-change detection.
// Verifies: prev() re-yields the last entry; a foreign move_to_front is
// structural and kills the cursor.
#[test]
fn linked_cursor_protocol() {
    let mut t: LinkedProbeTable<u64, u64> = LinkedProbeTable::new();
    for k in [4u64, 8, 15, 16] {
        t.put(k, k);
    }
    let mut c = t.cursor();
    assert_eq!(c.next(&t).unwrap().map(|(k, _)| *k), Some(4));
    assert_eq!(c.next(&t).unwrap().map(|(k, _)| *k), Some(8));
    assert_eq!(c.prev(&t).unwrap().map(|(k, _)| *k), Some(8));

    assert!(t.move_to_front(&16));
    assert_eq!(c.next(&t), Err(StructuralChange));

    let order: Vec<u64> = t.iter().map(|(k, _)| *k).collect();
    assert_eq!(order, vec![16, 4, 8, 15]);
}

// Test: ordered set rides on the same machinery.
#[test]
fn linked_set_endpoints() {
    let mut s: LinkedProbeSet<&str> = LinkedProbeSet::new();
    for name in ["ada", "grace", "edsger"] {
        s.insert(name);
    }
    assert_eq!(s.first(), Some(&"ada"));
    assert_eq!(s.last(), Some(&"edsger"));
    assert!(s.move_to_front("edsger"));
    assert_eq!(s.poll_first(), Some("edsger"));
    let rest: Vec<&str> = s.iter().copied().collect();
    assert_eq!(rest, vec!["ada", "grace"]);
}
