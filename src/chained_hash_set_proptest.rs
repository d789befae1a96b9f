#![cfg(test)]

// Property tests for ChainedHashSet kept inside the crate so they can check
// per-bucket placement and list links, not only the public contract.

use crate::chained_hash_set::ChainedHashSet;
use core::hash::BuildHasher;
use proptest::prelude::*;
use std::collections::{BTreeSet, HashSet};
use std::hash::Hasher;

// Pool-indexed operations so shrinking moves toward earlier keys.
#[derive(Clone, Debug)]
enum OpI {
    Insert(usize),
    Erase(usize),
    Take(usize),
    Find(usize),
    Rehash(usize),
    Reserve(usize),
    MaxLoadFactor(u8),
    Clear,
    Iterate,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z]{0,4}", 1..=24).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let op = prop_oneof![
            6 => idx.clone().prop_map(OpI::Insert),
            2 => idx.clone().prop_map(OpI::Erase),
            1 => idx.clone().prop_map(OpI::Take),
            2 => idx.clone().prop_map(OpI::Find),
            1 => (0usize..64).prop_map(OpI::Rehash),
            1 => (0usize..48).prop_map(OpI::Reserve),
            1 => (1u8..=8).prop_map(OpI::MaxLoadFactor),
            1 => Just(OpI::Clear),
            1 => Just(OpI::Iterate),
        ];
        proptest::collection::vec(op, 1..80).prop_map(move |ops| (pool.clone(), ops))
    })
}

fn check_structure<S: BuildHasher>(
    sut: &ChainedHashSet<String, S>,
) -> Result<(), TestCaseError> {
    let mut total = 0;
    for (i, list) in sut.buckets().iter().enumerate() {
        list.assert_links();
        total += list.len();
        for v in list.iter() {
            prop_assert_eq!(sut.bucket(v), i, "element outside its bucket");
        }
    }
    prop_assert_eq!(total, sut.len());
    prop_assert!(sut.bucket_count() >= 1);
    Ok(())
}

fn run_state_machine<S>(
    mut sut: ChainedHashSet<String, S>,
    pool: Vec<String>,
    ops: Vec<OpI>,
) -> Result<(), TestCaseError>
where
    S: BuildHasher,
{
    let mut model: HashSet<String> = HashSet::new();
    for op in ops {
        let buckets_before = sut.bucket_count();
        match op {
            OpI::Insert(i) => {
                let k = pool[i].clone();
                let (cursor, inserted) = sut.insert(k.clone());
                prop_assert_eq!(inserted, model.insert(k.clone()));
                prop_assert_eq!(cursor.get(&sut), Some(&k));
                if inserted {
                    let bound = sut.max_load_factor().max(1.0 / sut.bucket_count() as f32);
                    prop_assert!(sut.load_factor() <= bound + 1e-6, "load factor above bound");
                }
            }
            OpI::Erase(i) => {
                let k = &pool[i];
                let successor = {
                    let c = sut.find(k.as_str());
                    sut.advance(c)
                };
                let next = sut.erase(k.as_str());
                if model.remove(k) {
                    prop_assert_eq!(next, successor);
                } else {
                    prop_assert!(next.is_end());
                }
                prop_assert!(sut.find(k.as_str()).is_end());
            }
            OpI::Take(i) => {
                let k = &pool[i];
                let taken = sut.take(k.as_str());
                prop_assert_eq!(taken.is_some(), model.remove(k));
                if let Some(t) = taken {
                    prop_assert_eq!(&t, k);
                }
            }
            OpI::Find(i) => {
                let k = &pool[i];
                let found = sut.find(k.as_str()).get(&sut);
                prop_assert_eq!(found, model.get(k));
                prop_assert_eq!(sut.contains(k.as_str()), model.contains(k));
            }
            OpI::Rehash(n) => {
                let before: BTreeSet<String> = sut.iter().cloned().collect();
                sut.rehash(n);
                prop_assert_eq!(sut.bucket_count(), n.max(buckets_before));
                let after: BTreeSet<String> = sut.iter().cloned().collect();
                prop_assert_eq!(before, after);
            }
            OpI::Reserve(n) => {
                sut.reserve(n);
                prop_assert!(sut.bucket_count() >= buckets_before);
                prop_assert!(n as f32 / sut.bucket_count() as f32 <= sut.max_load_factor() + 1e-6);
            }
            OpI::MaxLoadFactor(q) => {
                // Quarter steps from 0.25 to 2.0.
                prop_assert!(sut.set_max_load_factor(q as f32 / 4.0).is_ok());
            }
            OpI::Clear => {
                sut.clear();
                model.clear();
                prop_assert_eq!(sut.bucket_count(), buckets_before);
                prop_assert_eq!(sut.begin(), sut.end());
            }
            OpI::Iterate => {
                let seen: Vec<&String> = sut.iter().collect();
                prop_assert_eq!(seen.len(), sut.len());
                let unique: HashSet<&String> = seen.iter().copied().collect();
                prop_assert_eq!(unique.len(), seen.len(), "an element was visited twice");
                let s_keys: BTreeSet<_> = seen.into_iter().cloned().collect();
                let m_keys: BTreeSet<_> = model.iter().cloned().collect();
                prop_assert_eq!(s_keys, m_keys);
            }
        }

        // Post-conditions after each op
        prop_assert!(sut.bucket_count() >= buckets_before, "bucket array shrank");
        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
        check_structure(&sut)?;
    }
    Ok(())
}

// Property: State-machine equivalence against std::collections::HashSet.
// Invariants exercised across random operation sequences:
// - Duplicates are rejected and report the existing element's cursor.
// - `erase` returns the successor computed before removal; erase-then-find misses.
// - Rehash/reserve never shrink and preserve content.
// - Load factor stays within max(max_load_factor, 1/bucket_count) after inserts.
// - Every element sits in `bucket(e)`; bucket sizes sum to `len()`.
proptest! {
    #![proptest_config(ProptestConfig { cases: 96, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        let sut: ChainedHashSet<String> = ChainedHashSet::with_buckets(2);
        run_state_machine(sut, pool, ops)?;
    }
}

// Collision variant using a constant hasher to stress chain scanning.
#[derive(Clone, Default)]
struct ConstBuildHasher;
struct ConstHasher;
impl BuildHasher for ConstBuildHasher {
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

// Property: same invariants as above with every element in one chain.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions((pool, ops) in arb_scenario()) {
        let sut = ChainedHashSet::with_hasher(ConstBuildHasher);
        run_state_machine(sut, pool, ops)?;
    }
}

// Property: clone_from reproduces the source exactly, whatever the
// destination held before.
proptest! {
    #[test]
    fn prop_clone_from_matches_source(
        src in proptest::collection::vec(0u16..500, 0..60),
        dst in proptest::collection::vec(0u16..500, 0..60),
    ) {
        let a: ChainedHashSet<u16> = src.iter().copied().collect();
        let mut b: ChainedHashSet<u16> = dst.iter().copied().collect();
        b.clone_from(&a);
        prop_assert_eq!(&a, &b);
        prop_assert_eq!(a.bucket_count(), b.bucket_count());
        for (i, list) in b.buckets().iter().enumerate() {
            list.assert_links();
            prop_assert_eq!(list.len(), a.bucket_size(i));
        }
    }
}
