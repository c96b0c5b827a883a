// ChainedTable property tests (black box).
//
// Property 1: round-trip and completeness over arbitrary key multisets.
//  - Model: the list of inserted keys.
//  - Invariant: every key inserted is found; len equals insert count;
//    iter yields the exact multiset of inserted keys.
//
// Property 2: slot count is behaviorally invisible (apart from order).
//  - The same inserts against 1..=16 slots agree on every lookup result
//    and on the enumeration multiset.
use chained_table::ChainedTable;
use proptest::prelude::*;
use std::collections::BTreeMap;

fn multiset(keys: impl Iterator<Item = String>) -> BTreeMap<String, usize> {
    let mut m = BTreeMap::new();
    for k in keys {
        *m.entry(k).or_default() += 1;
    }
    m
}

proptest! {
    // Property 1: whatever goes in comes back out.
    #[test]
    fn prop_round_trip_and_completeness(
        slot_count in 1usize..=16,
        keys in proptest::collection::vec("[a-z]{0,6}", 0..64),
    ) {
        let mut t: ChainedTable<String> = ChainedTable::with_slots(slot_count).unwrap();
        for k in &keys {
            t.insert(k.clone()).unwrap();
        }

        prop_assert_eq!(t.len(), keys.len());
        for k in &keys {
            prop_assert_eq!(t.get(k.as_str()).map(String::as_str), Some(k.as_str()));
        }

        let seen = multiset(t.iter().cloned());
        let expected = multiset(keys.into_iter());
        prop_assert_eq!(seen, expected);
    }

    // Property 2: lookups and the stored multiset are slot-count-agnostic.
    #[test]
    fn prop_slot_count_is_invisible_to_lookups(
        keys in proptest::collection::vec("[a-z]{0,4}", 0..40),
        probes in proptest::collection::vec("[a-z]{0,4}", 0..20),
    ) {
        let mut narrow: ChainedTable<String> = ChainedTable::with_slots(1).unwrap();
        let mut wide: ChainedTable<String> = ChainedTable::with_slots(16).unwrap();
        for k in &keys {
            narrow.insert(k.clone()).unwrap();
            wide.insert(k.clone()).unwrap();
        }

        for p in &probes {
            prop_assert_eq!(narrow.get(p.as_str()), wide.get(p.as_str()));
        }

        prop_assert_eq!(
            multiset(narrow.iter().cloned()),
            multiset(wide.iter().cloned())
        );
    }
}
