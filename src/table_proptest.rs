#![cfg(test)]

// Property tests for ChainedTable kept inside the crate so they can grow
// internal assertions later without feature gates.

use crate::ChainedTable;
use proptest::prelude::*;
use std::borrow::Borrow;
use std::hash::{Hash, Hasher};

// Record with a key for hashing/equality, a serial to tell duplicates
// apart, and a count to exercise in-place mutation.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct Entry {
    key: String,
    serial: u32,
    count: u32,
}

impl Hash for Entry {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl Borrow<str> for Entry {
    fn borrow(&self) -> &str {
        &self.key
    }
}

// Pool-indexed operations to improve shrinking: indices shrink to earlier
// keys, pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Insert(usize),
    Get(usize),
    Bump(usize),
    Iterate,
}

fn arb_scenario() -> impl Strategy<Value = (usize, Vec<String>, Vec<OpI>)> {
    (
        1usize..=8,
        proptest::collection::vec("[a-z]{0,4}", 1..=6),
    )
        .prop_flat_map(|(slot_count, pool)| {
            let idxs: Vec<usize> = (0..pool.len()).collect();
            let idx = proptest::sample::select(idxs);
            let op = prop_oneof![
                idx.clone().prop_map(OpI::Insert),
                idx.clone().prop_map(OpI::Get),
                idx.prop_map(OpI::Bump),
                Just(OpI::Iterate),
            ];
            proptest::collection::vec(op, 1..80)
                .prop_map(move |ops| (slot_count, pool.clone(), ops))
        })
}

// The model is the raw insertion log. Lookup must resolve to the entry
// inserted last among equal keys; enumeration must yield exactly the log's
// multiset of records.
fn model_latest<'a>(log: &'a [Entry], key: &str) -> Option<&'a Entry> {
    log.iter().rev().find(|e| e.key == key)
}

fn model_latest_mut<'a>(log: &'a mut Vec<Entry>, key: &str) -> Option<&'a mut Entry> {
    log.iter_mut().rev().find(|e| e.key == key)
}

// Property: state-machine equivalence against the insertion log, across
// slot counts from 1 (everything collides) to 8. Invariants exercised:
// - Round-trip: inserted records are found by their key.
// - Most-recent-wins: lookup resolves duplicates to the latest insert.
// - Mutation: get_mut updates are visible to later gets and to iteration.
// - Enumeration: iter yields the exact multiset, once each.
// - len/is_empty parity with the model after every op.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((slot_count, pool, ops) in arb_scenario()) {
        let mut sut: ChainedTable<Entry> = ChainedTable::with_slots(slot_count).unwrap();
        let mut log: Vec<Entry> = Vec::new();
        let mut serial = 0u32;

        for op in ops {
            match op {
                OpI::Insert(i) => {
                    serial += 1;
                    let entry = Entry { key: pool[i].clone(), serial, count: 1 };
                    log.push(entry.clone());
                    sut.insert(entry).unwrap();
                }
                OpI::Get(i) => {
                    let got = sut.get(pool[i].as_str());
                    let expected = model_latest(&log, &pool[i]);
                    prop_assert_eq!(got, expected);
                }
                OpI::Bump(i) => {
                    let got = sut.get_mut(pool[i].as_str());
                    let expected = model_latest_mut(&mut log, &pool[i]);
                    prop_assert_eq!(got.is_some(), expected.is_some());
                    if let (Some(g), Some(e)) = (got, expected) {
                        g.count += 1;
                        e.count += 1;
                        prop_assert_eq!(&*g, &*e);
                    }
                }
                OpI::Iterate => {
                    let mut seen: Vec<Entry> = sut.iter().cloned().collect();
                    let mut expected = log.clone();
                    seen.sort();
                    expected.sort();
                    prop_assert_eq!(seen, expected);
                }
            }

            prop_assert_eq!(sut.len(), log.len());
            prop_assert_eq!(sut.is_empty(), log.is_empty());
        }

        // Final sweep: enumeration completeness after the whole scenario.
        let mut seen: Vec<Entry> = sut.iter().cloned().collect();
        let mut expected = log;
        seen.sort();
        expected.sort();
        prop_assert_eq!(seen, expected);
    }
}
