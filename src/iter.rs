//! Iteration over a `ChainedHashSet`: the two-level cursor that threads
//! through the bucket array, the borrowing and owning iterators built on it,
//! and the single-bucket `LocalIter`.

use crate::chained_hash_set::ChainedHashSet;
use crate::list::{self, List, Position};
use core::iter::FusedIterator;

/// A detached position in a set: either past the last element, or an
/// element identified by its bucket index and its position in that bucket.
///
/// Cursors do not borrow the set. Erasing the element under a cursor makes
/// it resolve to `None`; any operation that changes `bucket_count()` leaves
/// every outstanding cursor unspecified (it may resolve to `None` or to some
/// other element, never to freed memory).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Cursor {
    Exhausted,
    At { bucket: usize, node: Position },
}

impl Cursor {
    pub fn is_end(&self) -> bool {
        matches!(self, Cursor::Exhausted)
    }

    pub fn get<'a, T, S>(&self, set: &'a ChainedHashSet<T, S>) -> Option<&'a T> {
        resolve(set.buckets(), *self)
    }
}

pub(crate) fn resolve<T>(buckets: &[List<T>], cursor: Cursor) -> Option<&T> {
    match cursor {
        Cursor::Exhausted => None,
        Cursor::At { bucket, node } => buckets.get(bucket)?.get(node),
    }
}

/// First element in the first non-empty bucket at or after `from`.
pub(crate) fn seek<T>(buckets: &[List<T>], from: usize) -> Cursor {
    buckets
        .iter()
        .enumerate()
        .skip(from)
        .find(|(_, list)| !list.is_empty())
        .map(|(bucket, list)| Cursor::At {
            bucket,
            node: list.begin(),
        })
        .unwrap_or(Cursor::Exhausted)
}

/// The cursor after `cursor`: the next node in the same bucket, else the
/// head of the next non-empty bucket, else `Exhausted`. Idempotent at the end.
pub(crate) fn advance<T>(buckets: &[List<T>], cursor: Cursor) -> Cursor {
    let Cursor::At { bucket, node } = cursor else {
        return Cursor::Exhausted;
    };
    let Some(list) = buckets.get(bucket) else {
        return Cursor::Exhausted;
    };
    let next = list.next(node);
    if !next.is_end() {
        return Cursor::At { bucket, node: next };
    }
    seek(buckets, bucket + 1)
}

/// Iterator over the elements of a `ChainedHashSet`, bucket by bucket.
pub struct Iter<'a, T> {
    buckets: &'a [List<T>],
    cursor: Cursor,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(buckets: &'a [List<T>], len: usize) -> Self {
        Iter {
            buckets,
            cursor: seek(buckets, 0),
            remaining: len,
        }
    }

    /// Cursor of the element the next call to `next()` yields.
    pub fn cursor(&self) -> Cursor {
        self.cursor
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
        let buckets: &'a [List<T>] = self.buckets;
        let value = resolve(buckets, self.cursor)?;
        self.cursor = advance(buckets, self.cursor);
        self.remaining = self.remaining.saturating_sub(1);
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}

impl<'a, T> FusedIterator for Iter<'a, T> {}

/// Iterator over a single bucket's chain.
pub struct LocalIter<'a, T> {
    inner: list::Iter<'a, T>,
}

impl<'a, T> LocalIter<'a, T> {
    pub(crate) fn new(inner: list::Iter<'a, T>) -> Self {
        LocalIter { inner }
    }

    /// Position, within the bucket, of the element `next()` yields.
    pub fn position(&self) -> Position {
        self.inner.position()
    }
}

impl<'a, T> Clone for LocalIter<'a, T> {
    fn clone(&self) -> Self {
        LocalIter {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, T> Iterator for LocalIter<'a, T> {
    type Item = &'a T;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, T> ExactSizeIterator for LocalIter<'a, T> {}

impl<'a, T> FusedIterator for LocalIter<'a, T> {}

/// Owning iterator; drains the buckets in order.
pub struct IntoIter<T> {
    buckets: std::vec::IntoIter<List<T>>,
    current: Option<list::IntoIter<T>>,
    remaining: usize,
}

impl<T> IntoIter<T> {
    pub(crate) fn new(buckets: Vec<List<T>>, len: usize) -> Self {
        IntoIter {
            buckets: buckets.into_iter(),
            current: None,
            remaining: len,
        }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;
    fn next(&mut self) -> Option<T> {
        loop {
            if let Some(value) = self.current.as_mut().and_then(|it| it.next()) {
                self.remaining = self.remaining.saturating_sub(1);
                return Some(value);
            }
            self.current = Some(self.buckets.next()?.into_iter());
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}
