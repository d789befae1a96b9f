#![cfg(test)]

// Property tests for List kept inside the crate so they can run the
// test-only link validator after every step.

use crate::list::{List, Position};
use proptest::prelude::*;
use std::collections::VecDeque;

#[derive(Clone, Debug)]
enum Op {
    PushFront(i32),
    PushBack(i32),
    PopFront,
    PopBack,
    // Index into the list, taken modulo len + 1 so `len` means end().
    InsertAt(usize, i32),
    EraseAt(usize),
    AssignFrom(Vec<i32>),
    Clear,
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        any::<i32>().prop_map(Op::PushFront),
        any::<i32>().prop_map(Op::PushBack),
        Just(Op::PopFront),
        Just(Op::PopBack),
        (0usize..32, any::<i32>()).prop_map(|(i, v)| Op::InsertAt(i, v)),
        (0usize..32).prop_map(Op::EraseAt),
        proptest::collection::vec(any::<i32>(), 0..12).prop_map(Op::AssignFrom),
        Just(Op::Clear),
    ]
}

fn position_at<T>(l: &List<T>, index: usize) -> Position {
    let mut pos = l.begin();
    for _ in 0..index {
        pos = l.next(pos);
    }
    pos
}

// Property: State-machine equivalence against std::collections::VecDeque.
// Invariants exercised across random operation sequences:
// - Push/pop at both ends match the model; popping empty is a no-op.
// - `insert(pos)` places before `pos` and returns the new node's position.
// - `erase(pos)` returns the following position (end after the tail).
// - `assign_from` yields the source sequence.
// - Link invariants hold and forward/backward traversal agree with the model.
proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]
    #[test]
    fn prop_list_state_machine(ops in proptest::collection::vec(arb_op(), 1..80)) {
        let mut sut: List<i32> = List::new();
        let mut model: VecDeque<i32> = VecDeque::new();

        for op in ops {
            match op {
                Op::PushFront(v) => { sut.push_front(v); model.push_front(v); }
                Op::PushBack(v) => { sut.push_back(v); model.push_back(v); }
                Op::PopFront => { prop_assert_eq!(sut.pop_front(), model.pop_front()); }
                Op::PopBack => { prop_assert_eq!(sut.pop_back(), model.pop_back()); }
                Op::InsertAt(i, v) => {
                    let i = i % (model.len() + 1);
                    let at = position_at(&sut, i);
                    let p = sut.insert(at, v);
                    model.insert(i, v);
                    prop_assert_eq!(p.get(&sut), Some(&v));
                    prop_assert_eq!(sut.next(p), at);
                }
                Op::EraseAt(i) => {
                    let i = i % (model.len() + 1);
                    let at = position_at(&sut, i);
                    let next = sut.erase(at);
                    if i < model.len() {
                        model.remove(i);
                        prop_assert_eq!(next.get(&sut), model.get(i));
                    } else {
                        prop_assert!(next.is_end(), "erasing end is a no-op");
                    }
                }
                Op::AssignFrom(src) => {
                    let src_list: List<i32> = src.iter().copied().collect();
                    sut.assign_from(&src_list);
                    model = src.into_iter().collect();
                }
                Op::Clear => { sut.clear(); model.clear(); }
            }

            sut.assert_links();
            prop_assert_eq!(sut.len(), model.len());
            prop_assert_eq!(sut.is_empty(), model.is_empty());
            prop_assert_eq!(sut.front().ok(), model.front());
            prop_assert_eq!(sut.back().ok(), model.back());
            prop_assert!(sut.iter().eq(model.iter()));
            prop_assert!(sut.iter().rev().eq(model.iter().rev()));
        }
    }
}

// Property: copy assignment keeps node identity for the shared prefix.
proptest! {
    #[test]
    fn prop_assign_from_keeps_prefix_nodes(
        dst in proptest::collection::vec(any::<i32>(), 0..16),
        src in proptest::collection::vec(any::<i32>(), 0..16),
    ) {
        let mut sut: List<i32> = dst.iter().copied().collect();
        let before: Vec<Position> = (0..dst.len()).map(|i| position_at(&sut, i)).collect();
        let src_list: List<i32> = src.iter().copied().collect();
        sut.assign_from(&src_list);
        sut.assert_links();

        let shared = dst.len().min(src.len());
        for (i, p) in before.iter().enumerate() {
            if i < shared {
                prop_assert_eq!(p.get(&sut), Some(&src[i]));
            } else {
                prop_assert_eq!(p.get(&sut), None);
            }
        }
        prop_assert!(sut.iter().eq(src.iter()));
    }
}
