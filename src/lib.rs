//! chained-hashset: a single-threaded hash set built on separate chaining,
//! with an arena-backed doubly-linked list as bucket storage.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: an unordered set with unique membership, amortized O(1)
//!   insert/find/erase, and growth that keeps the load factor bounded,
//!   presented to callers as one flat sequence over all buckets.
//! - Layers:
//!   - List<T>: doubly-linked list whose nodes live in a `SlotMap`;
//!     links are generational keys, so node positions are safe tokens.
//!   - ChainedHashSet<T, S>: owns a `Vec<List<T>>` bucket array, the
//!     element count and the max load factor; selects buckets with
//!     `hash mod bucket_count`.
//!   - Cursor / Iter / LocalIter: two-level iteration over the bucket
//!     array and the chain inside each bucket; `LocalIter` walks one
//!     bucket only.
//!
//! Constraints
//! - Single-threaded; no internal synchronization.
//! - Ownership is a strict tree: set -> bucket array -> list -> nodes.
//! - Set semantics: an insert of an element equal to a live one is
//!   rejected and reported through the returned flag, never overwritten.
//! - The bucket array only grows; `rehash` below the current count and
//!   `clear` keep the bucket count.
//!
//! Growth policy
//! - Before an insert that would need more than `bucket_count()` buckets
//!   at `max_load_factor`, the set reserves room for twice its current
//!   element count. `reserve(n)` asks for `ceil(n / max_load_factor)`
//!   buckets. After any insert, `load_factor() <= max_load_factor()`.
//! - The load factor is always computed in floating point.
//!
//! Cursor invalidation
//! - Erasing an element invalidates cursors at that element only: they
//!   resolve to `None` afterwards.
//! - Anything that changes `bucket_count()` invalidates every cursor.
//!   Stale cursors stay memory-safe; what they resolve to is unspecified.
//! - Borrowing iterators cannot observe either case; the borrow checker
//!   rules out mutation while they are alive.
//!
//! Notes and non-goals
//! - No open addressing, no custom allocators, no serialization.
//! - Hashing goes through any `BuildHasher` (default `RandomState`);
//!   lookups accept any `Q: Hash + Equivalent<T>`, so `&str` finds a
//!   `String`.

mod chained_hash_set;
mod chained_hash_set_proptest;
pub mod config;
pub mod error;
pub mod iter;
pub mod list;
mod list_proptest;

// Public surface
pub use chained_hash_set::ChainedHashSet;
pub use config::{SetConfig, DEFAULT_BUCKET_COUNT, DEFAULT_MAX_LOAD_FACTOR};
pub use error::{Error, Result};
pub use hashbrown::Equivalent;
pub use iter::Cursor;
pub use list::List;
