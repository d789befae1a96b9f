//! ChainedHashSet: separate-chaining hash set over a growable array of
//! `List` buckets.

use crate::config::{validate_max_load_factor, SetConfig, DEFAULT_BUCKET_COUNT};
use crate::error::Result;
use crate::iter::{self, Cursor, IntoIter, Iter, LocalIter};
use crate::list::{List, Position};
use core::fmt;
use core::hash::{BuildHasher, Hash};
use hashbrown::Equivalent;
use std::collections::hash_map::RandomState;
use tracing::{debug, trace, warn};

pub struct ChainedHashSet<T, S = RandomState> {
    buckets: Vec<List<T>>,
    len: usize,
    max_load_factor: f32,
    hasher: S,
}

fn empty_buckets<T>(n: usize) -> Vec<List<T>> {
    (0..n).map(|_| List::new()).collect()
}

#[inline]
fn bucket_index(hash: u64, bucket_count: usize) -> usize {
    (hash % bucket_count as u64) as usize
}

impl<T> ChainedHashSet<T>
where
    T: Eq + Hash,
{
    /// An empty set with 8 buckets and a max load factor of 1.0.
    pub fn new() -> Self {
        Self::with_hasher(Default::default())
    }

    /// An empty set with `buckets` buckets (at least one).
    pub fn with_buckets(buckets: usize) -> Self {
        Self::with_buckets_and_hasher(buckets, Default::default())
    }
}

impl<T, S> ChainedHashSet<T, S> {
    pub fn with_hasher(hasher: S) -> Self {
        Self::with_buckets_and_hasher(DEFAULT_BUCKET_COUNT, hasher)
    }

    pub fn with_buckets_and_hasher(buckets: usize, hasher: S) -> Self {
        let config = SetConfig::new().with_initial_buckets(buckets);
        Self {
            buckets: empty_buckets(config.bucket_count()),
            len: 0,
            max_load_factor: config.max_load_factor,
            hasher,
        }
    }

    pub fn with_config(config: SetConfig, hasher: S) -> Result<Self> {
        config.validate()?;
        debug!(
            buckets = config.bucket_count(),
            max_load_factor = config.max_load_factor,
            "building set from config"
        );
        Ok(Self {
            buckets: empty_buckets(config.bucket_count()),
            len: 0,
            max_load_factor: config.max_load_factor,
            hasher,
        })
    }

    pub(crate) fn buckets(&self) -> &[List<T>] {
        &self.buckets
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Number of elements chained in bucket `i`.
    ///
    /// # Panics
    /// If `i >= bucket_count()`.
    pub fn bucket_size(&self, i: usize) -> usize {
        self.buckets[i].len()
    }

    /// Elements per bucket, as a float.
    pub fn load_factor(&self) -> f32 {
        match self.bucket_count() {
            0 => 0.0,
            n => (self.len as f64 / n as f64) as f32,
        }
    }

    pub fn max_load_factor(&self) -> f32 {
        self.max_load_factor
    }

    /// Sets the ratio of elements to buckets above which inserts grow the
    /// bucket array. Takes effect on the next insert; no rehash happens here.
    pub fn set_max_load_factor(&mut self, m: f32) -> Result<()> {
        validate_max_load_factor(m)?;
        self.max_load_factor = m;
        Ok(())
    }

    pub fn hasher(&self) -> &S {
        &self.hasher
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.buckets, self.len)
    }

    /// Iterator over the chain of bucket `i` only.
    ///
    /// # Panics
    /// If `i >= bucket_count()`.
    pub fn bucket_iter(&self, i: usize) -> LocalIter<'_, T> {
        LocalIter::new(self.buckets[i].iter())
    }

    /// Cursor at the first element, or `end()` when the set is empty.
    pub fn begin(&self) -> Cursor {
        iter::seek(&self.buckets, 0)
    }

    pub fn end(&self) -> Cursor {
        Cursor::Exhausted
    }

    /// The cursor following `cursor` in iteration order.
    pub fn advance(&self, cursor: Cursor) -> Cursor {
        iter::advance(&self.buckets, cursor)
    }

    /// Empties every bucket; the bucket count is left unchanged.
    pub fn clear(&mut self) {
        for list in &mut self.buckets {
            list.clear();
        }
        self.len = 0;
    }

    /// Exchanges the whole state of two sets, bucket arrays included.
    pub fn swap(&mut self, other: &mut Self) {
        core::mem::swap(self, other);
    }

    // Buckets needed to hold `n` elements without exceeding the max load factor.
    fn min_buckets_required(&self, n: usize) -> usize {
        (n as f64 / self.max_load_factor as f64).ceil() as usize
    }
}

impl<T, S> ChainedHashSet<T, S>
where
    T: Eq + Hash,
    S: BuildHasher,
{
    /// Bucket that holds (or would hold) `q`: `hash(q) mod bucket_count()`.
    pub fn bucket<Q>(&self, q: &Q) -> usize
    where
        Q: ?Sized + Hash,
    {
        let n = self.bucket_count();
        if n == 0 {
            warn!("bucket lookup on a set without buckets");
            return 0;
        }
        bucket_index(self.hasher.hash_one(q), n)
    }

    // Linear scan of one chain.
    fn locate<Q>(&self, bucket: usize, q: &Q) -> Option<Position>
    where
        Q: ?Sized + Equivalent<T>,
    {
        let list = self.buckets.get(bucket)?;
        let mut pos = list.begin();
        while let Some(value) = list.get(pos) {
            if q.equivalent(value) {
                return Some(pos);
            }
            pos = list.next(pos);
        }
        None
    }

    pub fn find<Q>(&self, q: &Q) -> Cursor
    where
        Q: ?Sized + Hash + Equivalent<T>,
    {
        let bucket = self.bucket(q);
        match self.locate(bucket, q) {
            Some(node) => Cursor::At { bucket, node },
            None => Cursor::Exhausted,
        }
    }

    pub fn contains<Q>(&self, q: &Q) -> bool
    where
        Q: ?Sized + Hash + Equivalent<T>,
    {
        !self.find(q).is_end()
    }

    pub fn get<Q>(&self, q: &Q) -> Option<&T>
    where
        Q: ?Sized + Hash + Equivalent<T>,
    {
        self.find(q).get(self)
    }

    /// Inserts `value` unless an equal element is present. Returns the
    /// cursor of the element now in the set and whether `value` was added;
    /// an existing element is never overwritten.
    pub fn insert(&mut self, value: T) -> (Cursor, bool) {
        let mut bucket = self.bucket(&value);
        if let Some(node) = self.locate(bucket, &value) {
            return (Cursor::At { bucket, node }, false);
        }

        let needed = self.min_buckets_required(self.len + 1);
        if needed > self.bucket_count() {
            trace!(
                len = self.len,
                buckets = self.bucket_count(),
                needed,
                "insert exceeds max load factor"
            );
            self.reserve((self.len * 2).max(self.len + 1));
            bucket = self.bucket(&value);
        }

        let list = &mut self.buckets[bucket];
        list.push_back(value);
        self.len += 1;
        (
            Cursor::At {
                bucket,
                node: list.rbegin(),
            },
            true,
        )
    }

    /// Inserts every element of `values` in order, skipping duplicates.
    pub fn insert_all<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = T>,
    {
        for value in values {
            self.insert(value);
        }
    }

    /// Removes the element equal to `q` and returns the cursor of the
    /// element that followed it, or `end()` if `q` was absent.
    pub fn erase<Q>(&mut self, q: &Q) -> Cursor
    where
        Q: ?Sized + Hash + Equivalent<T>,
    {
        let cursor = self.find(q);
        let Cursor::At { bucket, node } = cursor else {
            return Cursor::Exhausted;
        };
        let next = iter::advance(&self.buckets, cursor);
        self.buckets[bucket].erase(node);
        self.len -= 1;
        next
    }

    /// Removes and returns the element equal to `q`.
    pub fn take<Q>(&mut self, q: &Q) -> Option<T>
    where
        Q: ?Sized + Hash + Equivalent<T>,
    {
        let Cursor::At { bucket, node } = self.find(q) else {
            return None;
        };
        let value = self.buckets[bucket].remove(node)?;
        self.len -= 1;
        Some(value)
    }

    pub fn remove<Q>(&mut self, q: &Q) -> bool
    where
        Q: ?Sized + Hash + Equivalent<T>,
    {
        self.take(q).is_some()
    }

    /// Grows the bucket array to `buckets` and moves every element into the
    /// bucket selected under the new size. Never shrinks: a request at or
    /// below `bucket_count()` does nothing.
    pub fn rehash(&mut self, buckets: usize) {
        let current = self.bucket_count();
        if buckets <= current {
            trace!(requested = buckets, current, "rehash not needed");
            return;
        }
        debug!(
            from = current,
            to = buckets,
            len = self.len,
            "growing bucket array"
        );
        let mut fresh = empty_buckets(buckets);
        for list in &mut self.buckets {
            while let Some(value) = list.pop_front() {
                let i = bucket_index(self.hasher.hash_one(&value), buckets);
                fresh[i].push_back(value);
            }
        }
        self.buckets = fresh;
    }

    /// Makes room for `n` elements without exceeding the max load factor.
    pub fn reserve(&mut self, n: usize) {
        self.rehash(self.min_buckets_required(n));
    }
}

impl<T, S: Default> Default for ChainedHashSet<T, S> {
    /// The default state: 8 empty buckets and a max load factor of 1.0.
    /// `std::mem::take` leaves a moved-from set in exactly this state.
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<T: Clone, S: Clone> Clone for ChainedHashSet<T, S> {
    fn clone(&self) -> Self {
        Self {
            buckets: self.buckets.clone(),
            len: self.len,
            max_load_factor: self.max_load_factor,
            hasher: self.hasher.clone(),
        }
    }

    // Reuses the destination's list nodes bucket by bucket.
    fn clone_from(&mut self, source: &Self) {
        self.buckets.clone_from(&source.buckets);
        self.len = source.len;
        self.max_load_factor = source.max_load_factor;
        self.hasher.clone_from(&source.hasher);
    }
}

impl<T: fmt::Debug, S> fmt::Debug for ChainedHashSet<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T, S> PartialEq for ChainedHashSet<T, S>
where
    T: Eq + Hash,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|v| other.contains(v))
    }
}

impl<T, S> Eq for ChainedHashSet<T, S>
where
    T: Eq + Hash,
    S: BuildHasher,
{
}

impl<T, S> FromIterator<T> for ChainedHashSet<T, S>
where
    T: Eq + Hash,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut set = Self::with_hasher(S::default());
        set.reserve(iter.size_hint().0);
        set.insert_all(iter);
        set
    }
}

impl<T, S> Extend<T> for ChainedHashSet<T, S>
where
    T: Eq + Hash,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.insert_all(iter);
    }
}

impl<'a, T, S> Extend<&'a T> for ChainedHashSet<T, S>
where
    T: Eq + Hash + Copy + 'a,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.insert_all(iter.into_iter().copied());
    }
}

impl<T, const N: usize> From<[T; N]> for ChainedHashSet<T>
where
    T: Eq + Hash,
{
    fn from(values: [T; N]) -> Self {
        values.into_iter().collect()
    }
}

impl<'a, T, S> IntoIterator for &'a ChainedHashSet<T, S> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;
    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<T, S> IntoIterator for ChainedHashSet<T, S> {
    type Item = T;
    type IntoIter = IntoIter<T>;
    fn into_iter(self) -> IntoIter<T> {
        IntoIter::new(self.buckets, self.len)
    }
}
