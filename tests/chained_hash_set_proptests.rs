// ChainedHashSet property tests over the public API.
//
// Property 1: uniqueness, len() equals the number of distinct inserted values.
// Property 2: membership round-trip, every inserted, non-erased value is found.
// Property 3: rehash preserves content and reaches the requested bucket count.
// Property 4: load factor bound after every insert.
// Property 5: full traversal visits len() elements, each exactly once.
// Property 6: erase-then-find misses.
use chained_hashset::ChainedHashSet;
use proptest::prelude::*;
use std::collections::{BTreeSet, HashSet};

proptest! {
    #[test]
    fn prop_uniqueness(values in proptest::collection::vec(0i32..64, 0..200)) {
        let mut s: ChainedHashSet<i32> = ChainedHashSet::new();
        let mut flags = Vec::new();
        for &v in &values {
            flags.push(s.insert(v).1);
        }
        let distinct: HashSet<i32> = values.iter().copied().collect();
        prop_assert_eq!(s.len(), distinct.len());
        prop_assert_eq!(flags.iter().filter(|&&f| f).count(), distinct.len());
    }

    #[test]
    fn prop_membership_and_erase(
        values in proptest::collection::vec(any::<u32>(), 0..120),
        erase_mask in proptest::collection::vec(any::<bool>(), 120),
    ) {
        let mut s: ChainedHashSet<u32> = ChainedHashSet::with_buckets(1);
        s.insert_all(values.iter().copied());
        let mut erased = BTreeSet::new();
        for (v, &drop_it) in values.iter().zip(&erase_mask) {
            if drop_it && erased.insert(*v) {
                s.erase(v);
                prop_assert!(s.find(v).is_end());
            }
        }
        for v in &values {
            if erased.contains(v) {
                prop_assert!(!s.contains(v));
            } else {
                prop_assert_eq!(s.find(v).get(&s), Some(v));
            }
        }
    }

    #[test]
    fn prop_rehash_preserves_content(
        values in proptest::collection::vec(any::<i64>(), 0..100),
        extra in 0usize..300,
    ) {
        let mut s: ChainedHashSet<i64> = values.iter().copied().collect();
        let before: BTreeSet<i64> = s.iter().copied().collect();
        let n = s.bucket_count() + extra;
        s.rehash(n);
        prop_assert!(s.bucket_count() >= n);
        let after: BTreeSet<i64> = s.iter().copied().collect();
        prop_assert_eq!(before, after);
    }

    #[test]
    fn prop_load_factor_bound(
        values in proptest::collection::vec(any::<u16>(), 1..300),
        quarters in 1u8..=12,
        initial in 1usize..20,
    ) {
        let mut s: ChainedHashSet<u16> = ChainedHashSet::with_buckets(initial);
        s.set_max_load_factor(quarters as f32 / 4.0).unwrap();
        for v in values {
            s.insert(v);
            let bound = s.max_load_factor().max(1.0 / s.bucket_count() as f32);
            prop_assert!(s.load_factor() <= bound + 1e-6,
                "load {} above bound {}", s.load_factor(), bound);
        }
    }

    #[test]
    fn prop_traversal_complete(values in proptest::collection::vec(any::<u8>(), 0..200)) {
        let s: ChainedHashSet<u8> = values.iter().copied().collect();
        let visited: Vec<u8> = s.iter().copied().collect();
        prop_assert_eq!(visited.len(), s.len());
        let unique: BTreeSet<u8> = visited.iter().copied().collect();
        prop_assert_eq!(unique.len(), visited.len());
        let expected: BTreeSet<u8> = values.into_iter().collect();
        prop_assert_eq!(unique, expected);

        let mut cursor_steps = 0;
        let mut c = s.begin();
        while c != s.end() {
            prop_assert!(c.get(&s).is_some(), "cursor landed on an empty bucket");
            cursor_steps += 1;
            c = s.advance(c);
        }
        prop_assert_eq!(cursor_steps, s.len());
    }
}
