// Property tests for LinkedProbeTable against an ordered model.
//
// The model is a Vec of (key, value) pairs in logical order: put appends
// new keys and overwrites in place, remove deletes, move_to_front/back
// splice. After every operation the table's iteration must equal the
// model exactly, element for element, in order.

use probe_table::LinkedProbeTable;
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum OpI {
    Put(usize, i32),
    Remove(usize),
    MoveFront(usize),
    MoveBack(usize),
    PollFirst,
    PollLast,
    Trim,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<u64>, Vec<OpI>)> {
    proptest::collection::btree_set(any::<u64>(), 1..=10).prop_flat_map(|pool| {
        let pool: Vec<u64> = pool.into_iter().collect();
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let op = prop_oneof![
            4 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Put(i, v)),
            2 => idx.clone().prop_map(OpI::Remove),
            2 => idx.clone().prop_map(OpI::MoveFront),
            2 => idx.clone().prop_map(OpI::MoveBack),
            1 => Just(OpI::PollFirst),
            1 => Just(OpI::PollLast),
            1 => Just(OpI::Trim),
        ];
        proptest::collection::vec(op, 1..80).prop_map(move |ops| (pool.clone(), ops))
    })
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_order_matches_model((pool, ops) in arb_scenario()) {
        let mut sut: LinkedProbeTable<u64, i32> = LinkedProbeTable::with_capacity(4).unwrap();
        let mut model: Vec<(u64, i32)> = Vec::new();

        for op in ops {
            match op {
                OpI::Put(i, v) => {
                    let k = pool[i];
                    let prev = sut.put(k, v);
                    match model.iter_mut().find(|(mk, _)| *mk == k) {
                        Some((_, mv)) => {
                            prop_assert_eq!(prev, Some(*mv), "overwrite reports old value");
                            *mv = v;
                        }
                        None => {
                            prop_assert_eq!(prev, None);
                            model.push((k, v));
                        }
                    }
                }
                OpI::Remove(i) => {
                    let k = pool[i];
                    let removed = sut.remove(&k);
                    match model.iter().position(|(mk, _)| *mk == k) {
                        Some(p) => {
                            let (_, mv) = model.remove(p);
                            prop_assert_eq!(removed, Some(mv));
                        }
                        None => prop_assert_eq!(removed, None),
                    }
                }
                OpI::MoveFront(i) => {
                    let k = pool[i];
                    let moved = sut.move_to_front(&k);
                    match model.iter().position(|(mk, _)| *mk == k) {
                        Some(p) => {
                            prop_assert!(moved);
                            let e = model.remove(p);
                            model.insert(0, e);
                        }
                        None => prop_assert!(!moved),
                    }
                }
                OpI::MoveBack(i) => {
                    let k = pool[i];
                    let moved = sut.move_to_back(&k);
                    match model.iter().position(|(mk, _)| *mk == k) {
                        Some(p) => {
                            prop_assert!(moved);
                            let e = model.remove(p);
                            model.push(e);
                        }
                        None => prop_assert!(!moved),
                    }
                }
                OpI::PollFirst => {
                    let polled = sut.poll_first();
                    if model.is_empty() {
                        prop_assert_eq!(polled, None);
                    } else {
                        prop_assert_eq!(polled, Some(model.remove(0)));
                    }
                }
                OpI::PollLast => {
                    let polled = sut.poll_last();
                    prop_assert_eq!(polled, model.pop());
                }
                OpI::Trim => {
                    prop_assert!(sut.trim());
                }
            }

            // Post-conditions after each op: exact ordered equality with
            // the model, in both directions, plus endpoint parity.
            let got: Vec<(u64, i32)> = sut.iter().map(|(k, v)| (*k, *v)).collect();
            prop_assert_eq!(&got, &model);
            let got_rev: Vec<(u64, i32)> = sut.iter_rev().map(|(k, v)| (*k, *v)).collect();
            let mut model_rev = model.clone();
            model_rev.reverse();
            prop_assert_eq!(&got_rev, &model_rev);
            prop_assert_eq!(sut.first().map(|(k, v)| (*k, *v)), model.first().copied());
            prop_assert_eq!(sut.last().map(|(k, v)| (*k, *v)), model.last().copied());
            prop_assert_eq!(sut.len(), model.len());
        }
    }
}
