//! List: doubly-linked list whose nodes live in a per-list slot arena.
//!
//! Links are generational `slotmap` keys rather than pointers, so a
//! `Position` that outlives its node resolves to `None` instead of dangling,
//! and freed slots are recycled by later inserts.

use crate::error::{Error, Result};
use core::fmt;
use core::iter::FusedIterator;
use slotmap::{DefaultKey, SlotMap};

struct Node<T> {
    value: T,
    next: Option<DefaultKey>,
    prev: Option<DefaultKey>,
}

/// A position inside one `List`: either a node or the end sentinel.
///
/// Positions are detached tokens. Erasing the node invalidates the position
/// (it then resolves to `None`); positions of other nodes stay valid.
/// Resolving a position against a different list is unspecified.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Position(Option<DefaultKey>);

impl Position {
    /// The end sentinel, one past the last element.
    pub const fn end() -> Self {
        Position(None)
    }

    pub fn is_end(&self) -> bool {
        self.0.is_none()
    }

    pub fn get<'a, T>(&self, list: &'a List<T>) -> Option<&'a T> {
        list.get(*self)
    }

    pub fn get_mut<'a, T>(&self, list: &'a mut List<T>) -> Option<&'a mut T> {
        list.get_mut(*self)
    }
}

pub struct List<T> {
    nodes: SlotMap<DefaultKey, Node<T>>,
    head: Option<DefaultKey>,
    tail: Option<DefaultKey>,
}

impl<T> List<T> {
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            head: None,
            tail: None,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Position of the first element, or `end()` when empty.
    pub fn begin(&self) -> Position {
        Position(self.head)
    }

    /// Position of the last element, or `end()` when empty.
    pub fn rbegin(&self) -> Position {
        Position(self.tail)
    }

    pub fn end(&self) -> Position {
        Position::end()
    }

    // Key of a position that still refers to a node of this list.
    fn live(&self, pos: Position) -> Option<DefaultKey> {
        pos.0.filter(|&k| self.nodes.contains_key(k))
    }

    /// The position after `pos`. Stepping past the tail, from the end
    /// sentinel, or from a stale position yields `end()`.
    pub fn next(&self, pos: Position) -> Position {
        match self.live(pos) {
            Some(k) => Position(self.nodes[k].next),
            None => Position::end(),
        }
    }

    /// The position before `pos`. Stepping back from `end()` yields the
    /// tail; stepping back from the head or a stale position yields `end()`.
    pub fn prev(&self, pos: Position) -> Position {
        if pos.is_end() {
            return Position(self.tail);
        }
        match self.live(pos) {
            Some(k) => Position(self.nodes[k].prev),
            None => Position::end(),
        }
    }

    pub fn get(&self, pos: Position) -> Option<&T> {
        pos.0.and_then(|k| self.nodes.get(k)).map(|n| &n.value)
    }

    pub fn get_mut(&mut self, pos: Position) -> Option<&mut T> {
        pos.0.and_then(|k| self.nodes.get_mut(k)).map(|n| &mut n.value)
    }

    pub fn front(&self) -> Result<&T> {
        self.get(self.begin()).ok_or(Error::EmptyList)
    }

    pub fn back(&self) -> Result<&T> {
        self.get(self.rbegin()).ok_or(Error::EmptyList)
    }

    pub fn front_mut(&mut self) -> Result<&mut T> {
        let pos = self.begin();
        self.get_mut(pos).ok_or(Error::EmptyList)
    }

    pub fn back_mut(&mut self) -> Result<&mut T> {
        let pos = self.rbegin();
        self.get_mut(pos).ok_or(Error::EmptyList)
    }

    pub fn push_front(&mut self, value: T) {
        let k = self.nodes.insert(Node {
            value,
            next: self.head,
            prev: None,
        });
        match self.head {
            Some(h) => self.nodes[h].prev = Some(k),
            None => self.tail = Some(k),
        }
        self.head = Some(k);
    }

    pub fn push_back(&mut self, value: T) {
        let k = self.nodes.insert(Node {
            value,
            next: None,
            prev: self.tail,
        });
        match self.tail {
            Some(t) => self.nodes[t].next = Some(k),
            None => self.head = Some(k),
        }
        self.tail = Some(k);
    }

    /// Removes and returns the first element; `None` (and no change) when
    /// the list is empty.
    pub fn pop_front(&mut self) -> Option<T> {
        let k = self.head?;
        self.unlink(k).map(|(value, _)| value)
    }

    /// Removes and returns the last element; `None` (and no change) when
    /// the list is empty.
    pub fn pop_back(&mut self) -> Option<T> {
        let k = self.tail?;
        self.unlink(k).map(|(value, _)| value)
    }

    /// Inserts `value` before `pos` and returns the new node's position.
    /// Inserting at `end()` appends. A stale position is treated as `end()`.
    pub fn insert(&mut self, pos: Position, value: T) -> Position {
        let Some(at) = self.live(pos) else {
            self.push_back(value);
            return Position(self.tail);
        };
        let prev = self.nodes[at].prev;
        let k = self.nodes.insert(Node {
            value,
            next: Some(at),
            prev,
        });
        self.nodes[at].prev = Some(k);
        match prev {
            Some(p) => self.nodes[p].next = Some(k),
            None => self.head = Some(k),
        }
        Position(Some(k))
    }

    /// Unlinks the node at `pos` and returns the position that followed it
    /// (`end()` if it was the tail). Erasing `end()` or a stale position is
    /// a no-op returning `end()`.
    pub fn erase(&mut self, pos: Position) -> Position {
        match self.live(pos).and_then(|k| self.unlink(k)) {
            Some((_value, next)) => Position(next),
            None => Position::end(),
        }
    }

    /// Like `erase`, but hands back the removed element.
    pub fn remove(&mut self, pos: Position) -> Option<T> {
        let k = self.live(pos)?;
        self.unlink(k).map(|(value, _)| value)
    }

    fn unlink(&mut self, k: DefaultKey) -> Option<(T, Option<DefaultKey>)> {
        let node = self.nodes.remove(k)?;
        match node.prev {
            Some(p) => self.nodes[p].next = node.next,
            None => self.head = node.next,
        }
        match node.next {
            Some(n) => self.nodes[n].prev = node.prev,
            None => self.tail = node.prev,
        }
        Some((node.value, node.next))
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.head = None;
        self.tail = None;
    }

    pub fn swap(&mut self, other: &mut Self) {
        core::mem::swap(self, other);
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            front: self.head,
            back: self.tail,
            remaining: self.len(),
        }
    }

    // Drops `first` and every node after it, making its predecessor the tail.
    fn truncate_from(&mut self, first: DefaultKey) {
        let new_tail = self.nodes[first].prev;
        let mut cur = Some(first);
        while let Some(k) = cur {
            cur = self.nodes.remove(k).and_then(|n| n.next);
        }
        match new_tail {
            Some(t) => self.nodes[t].next = None,
            None => self.head = None,
        }
        self.tail = new_tail;
    }

    /// Test-only check of the link invariants: head/tail absent iff empty,
    /// `next.prev == self` and `prev.next == self` for every node, and a
    /// forward walk reaching the tail after exactly `len()` steps.
    #[cfg(test)]
    pub(crate) fn assert_links(&self) {
        if self.is_empty() {
            assert!(self.head.is_none() && self.tail.is_none());
            return;
        }
        let head = self.head.expect("non-empty list has a head");
        assert!(self.nodes[head].prev.is_none(), "head has a predecessor");
        let mut steps = 1;
        let mut cur = head;
        while let Some(next) = self.nodes[cur].next {
            assert_eq!(self.nodes[next].prev, Some(cur), "broken back link");
            cur = next;
            steps += 1;
            assert!(steps <= self.len(), "forward walk does not terminate");
        }
        assert_eq!(Some(cur), self.tail, "forward walk ends off the tail");
        assert_eq!(steps, self.len());
    }
}

impl<T: Clone> List<T> {
    /// Copy-assigns `src` into `self`, overwriting existing nodes in place
    /// for the common prefix, then appending the rest of `src` or dropping
    /// the surplus nodes of `self`. Positions into the kept prefix remain
    /// valid.
    pub fn assign_from(&mut self, src: &List<T>) {
        let mut dst = self.head;
        let mut from = src.head;
        while let (Some(d), Some(s)) = (dst, from) {
            let sn = &src.nodes[s];
            let dn = &mut self.nodes[d];
            dn.value.clone_from(&sn.value);
            dst = dn.next;
            from = sn.next;
        }
        match (dst, from) {
            (None, Some(s)) => {
                let mut cur = Some(s);
                while let Some(k) = cur {
                    let sn = &src.nodes[k];
                    self.push_back(sn.value.clone());
                    cur = sn.next;
                }
            }
            (Some(d), None) => self.truncate_from(d),
            _ => {}
        }
    }
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for List<T> {
    fn clone(&self) -> Self {
        let mut list = List::new();
        list.assign_from(self);
        list
    }

    fn clone_from(&mut self, source: &Self) {
        self.assign_from(source);
    }
}

impl<T: fmt::Debug> fmt::Debug for List<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for List<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for List<T> {}

impl<T> FromIterator<T> for List<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = List::new();
        list.extend(iter);
        list
    }
}

impl<T> Extend<T> for List<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push_back(value);
        }
    }
}

impl<'a, T: Copy + 'a> Extend<&'a T> for List<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T, const N: usize> From<[T; N]> for List<T> {
    fn from(values: [T; N]) -> Self {
        values.into_iter().collect()
    }
}

/// Front-to-back (or back-to-front) iterator over a `List`.
pub struct Iter<'a, T> {
    list: &'a List<T>,
    front: Option<DefaultKey>,
    back: Option<DefaultKey>,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    /// Position of the element the next call to `next()` yields.
    pub fn position(&self) -> Position {
        if self.remaining == 0 {
            Position::end()
        } else {
            Position(self.front)
        }
    }
}

impl<'a, T> Clone for Iter<'a, T> {
    fn clone(&self) -> Self {
        Iter { ..*self }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let list: &'a List<T> = self.list;
        let node = &list.nodes[self.front?];
        self.front = node.next;
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let list: &'a List<T> = self.list;
        let node = &list.nodes[self.back?];
        self.back = node.prev;
        self.remaining -= 1;
        Some(&node.value)
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}

impl<'a, T> FusedIterator for Iter<'a, T> {}

/// Owning iterator; pops from either end.
pub struct IntoIter<T> {
    list: List<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;
    fn next(&mut self) -> Option<T> {
        self.list.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len(), Some(self.list.len()))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        self.list.pop_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> IntoIterator for List<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;
    fn into_iter(self) -> IntoIter<T> {
        IntoIter { list: self }
    }
}

impl<'a, T> IntoIterator for &'a List<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;
    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect<T: Clone>(l: &List<T>) -> Vec<T> {
        l.iter().cloned().collect()
    }

    /// Invariant: pushes at both ends keep head/tail and links consistent.
    #[test]
    fn push_both_ends() {
        let mut l = List::new();
        l.push_back(2);
        l.push_front(1);
        l.push_back(3);
        l.assert_links();
        assert_eq!(collect(&l), vec![1, 2, 3]);
        assert_eq!(l.len(), 3);
        assert_eq!(l.front(), Ok(&1));
        assert_eq!(l.back(), Ok(&3));
    }

    /// Invariant: popping an empty list is a no-op; popping the last node
    /// resets head and tail.
    #[test]
    fn pop_until_empty() {
        let mut l: List<i32> = List::from([1, 2, 3]);
        assert_eq!(l.pop_front(), Some(1));
        assert_eq!(l.pop_back(), Some(3));
        l.assert_links();
        assert_eq!(l.pop_back(), Some(2));
        assert!(l.is_empty());
        l.assert_links();
        assert_eq!(l.pop_front(), None);
        assert_eq!(l.pop_back(), None);
        assert_eq!(l.len(), 0);
    }

    #[test]
    fn front_back_on_empty_fail() {
        let mut l: List<i32> = List::new();
        assert_eq!(l.front(), Err(Error::EmptyList));
        assert_eq!(l.back(), Err(Error::EmptyList));
        assert_eq!(l.front_mut(), Err(Error::EmptyList));
        assert_eq!(l.back_mut(), Err(Error::EmptyList));
    }

    #[test]
    fn front_back_mut_update_in_place() {
        let mut l = List::from([1, 2]);
        *l.front_mut().unwrap() = 10;
        *l.back_mut().unwrap() = 20;
        assert_eq!(collect(&l), vec![10, 20]);
    }

    /// Invariant: insert goes before the position; at end it appends; into
    /// an empty list it becomes both head and tail.
    #[test]
    fn insert_positions() {
        let mut l = List::new();
        let p2 = l.insert(l.end(), 2);
        assert_eq!(l.begin(), p2);
        assert_eq!(l.rbegin(), p2);
        let p1 = l.insert(p2, 1);
        assert_eq!(l.begin(), p1);
        let p4 = l.insert(l.end(), 4);
        let p3 = l.insert(p4, 3);
        l.assert_links();
        assert_eq!(collect(&l), vec![1, 2, 3, 4]);
        assert_eq!(p3.get(&l), Some(&3));
        assert_eq!(l.next(p2), p3);
        assert_eq!(l.prev(p3), p2);
    }

    /// Invariant: erase returns the following position (end for the tail)
    /// and relinks neighbours; erasing end is a no-op.
    #[test]
    fn erase_positions() {
        let mut l = List::from([1, 2, 3, 4]);
        let p2 = l.next(l.begin());
        let p3 = l.erase(p2);
        assert_eq!(p3.get(&l), Some(&3));
        l.assert_links();

        let tail = l.rbegin();
        assert!(l.erase(tail).is_end());
        assert_eq!(l.back(), Ok(&3));

        let head = l.begin();
        let after = l.erase(head);
        assert_eq!(after, l.begin());
        assert_eq!(collect(&l), vec![3]);

        assert!(l.erase(Position::end()).is_end());
        assert_eq!(l.len(), 1);
        l.assert_links();
    }

    /// Invariant: an erased node's position is stale: it resolves to `None`,
    /// erasing it again is a no-op, and it does not alias a recycled slot.
    #[test]
    fn stale_position_does_not_alias() {
        let mut l = List::from(["a", "b"]);
        let pa = l.begin();
        assert_eq!(l.remove(pa), Some("a"));
        let pc = l.insert(l.end(), "c");
        assert_ne!(pa, pc);
        assert_eq!(pa.get(&l), None);
        assert!(l.erase(pa).is_end());
        assert_eq!(l.len(), 2);
        assert!(l.next(pa).is_end());
    }

    #[test]
    fn backward_traversal() {
        let l = List::from([1, 2, 3]);
        let mut out = Vec::new();
        let mut p = l.prev(l.end());
        while !p.is_end() {
            out.push(*p.get(&l).unwrap());
            p = l.prev(p);
        }
        assert_eq!(out, vec![3, 2, 1]);
        assert_eq!(l.iter().rev().copied().collect::<Vec<_>>(), vec![3, 2, 1]);
    }

    #[test]
    fn iter_meets_in_the_middle() {
        let l = List::from([1, 2, 3, 4, 5]);
        let mut it = l.iter();
        assert_eq!(it.next(), Some(&1));
        assert_eq!(it.next_back(), Some(&5));
        assert_eq!(it.len(), 3);
        assert_eq!(it.position().get(&l), Some(&2));
        assert_eq!(it.by_ref().collect::<Vec<_>>(), vec![&2, &3, &4]);
        assert_eq!(it.next_back(), None);
        assert!(it.position().is_end());
    }

    #[test]
    fn clear_resets_and_list_is_reusable() {
        let mut l = List::from([1, 2, 3]);
        let p = l.begin();
        l.clear();
        assert!(l.is_empty());
        l.assert_links();
        assert_eq!(p.get(&l), None);
        l.push_back(9);
        assert_eq!(collect(&l), vec![9]);
    }

    /// Invariant: copy assignment onto a longer list keeps the prefix nodes
    /// (their positions stay valid and see the new values) and truncates the
    /// rest, relinking the new tail.
    #[test]
    fn assign_from_shorter_source_truncates() {
        let mut dst = List::from([10, 20, 30, 40]);
        let first = dst.begin();
        let second = dst.next(first);
        let third = dst.next(second);
        let src = List::from([1, 2]);
        dst.assign_from(&src);
        dst.assert_links();
        assert_eq!(collect(&dst), vec![1, 2]);
        assert_eq!(first.get(&dst), Some(&1));
        assert_eq!(second.get(&dst), Some(&2));
        assert_eq!(dst.rbegin(), second);
        assert_eq!(third.get(&dst), None);
    }

    /// Invariant: copy assignment onto a shorter list keeps its nodes and
    /// appends the remainder of the source.
    #[test]
    fn assign_from_longer_source_appends() {
        let mut dst = List::from([7]);
        let first = dst.begin();
        let src = List::from([1, 2, 3]);
        dst.assign_from(&src);
        dst.assert_links();
        assert_eq!(collect(&dst), vec![1, 2, 3]);
        assert_eq!(first.get(&dst), Some(&1));
        assert_eq!(src, dst);
    }

    #[test]
    fn assign_from_empty_source_clears() {
        let mut dst = List::from([1, 2, 3]);
        dst.assign_from(&List::new());
        assert!(dst.is_empty());
        dst.assert_links();

        let mut empty: List<i32> = List::new();
        empty.clone_from(&List::from([5]));
        assert_eq!(collect(&empty), vec![5]);
    }

    #[test]
    fn clone_is_deep() {
        let a = List::from([String::from("x"), String::from("y")]);
        let mut b = a.clone();
        b.push_back("z".to_string());
        assert_eq!(a.len(), 2);
        assert_eq!(b.len(), 3);
        assert_eq!(format!("{:?}", a), r#"["x", "y"]"#);
    }

    #[test]
    fn swap_exchanges_contents() {
        let mut a = List::from([1, 2]);
        let mut b = List::from([3]);
        a.swap(&mut b);
        assert_eq!(collect(&a), vec![3]);
        assert_eq!(collect(&b), vec![1, 2]);
    }

    #[test]
    fn owned_iteration_from_both_ends() {
        let l = List::from([1, 2, 3, 4]);
        let mut it = l.into_iter();
        assert_eq!(it.next_back(), Some(4));
        assert_eq!(it.len(), 3);
        assert_eq!(it.collect::<Vec<_>>(), vec![1, 2, 3]);

        let mut l: List<i32> = (1..=2).collect();
        l.extend(&[3, 4]);
        assert_eq!((&l).into_iter().count(), 4);
    }
}
