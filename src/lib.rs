//! chained-table: a fixed-slot, separate-chaining hash table that stores
//! owned records and never resizes.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a container where the slot count is a contract, not a hint.
//!   The caller picks it once; every other behavior (chain growth, lookup
//!   cost, enumeration order) follows mechanically from that choice.
//! - Layers:
//!   - fallible::try_box: fallible boxed allocation. The crate's only
//!     `unsafe`, kept in one small function so allocation failure can be
//!     surfaced as an error instead of a process abort.
//!   - Bucket<R>: one slot's chain of owned nodes. Prepend, head-to-tail
//!     scan, and iterative teardown live here.
//!   - ChainedTable<R, S>: public API. Routes every operation through
//!     `hash(record) mod slot_count` and delegates to the selected bucket.
//!
//! Constraints
//! - Fixed capacity: the slot array is allocated at construction and never
//!   grows or rehashes. Load factor is unbounded and lookup degrades to
//!   O(chain length); keeping the load reasonable is the caller's job.
//! - Records are stored by move. The table owns every record and every
//!   chain node transitively; teardown is `Drop`, and chains are unlinked
//!   iteratively so their length cannot overflow the stack.
//! - Duplicate keys coexist. Insert never deduplicates; chains are
//!   reverse-chronological, so lookups find the most recent equal record.
//! - Allocation failure is a recoverable `TableError::OutOfMemory`, with
//!   the table left exactly as it was.
//! - Single-threaded use in the presence of mutation; `&self` methods are
//!   safe to share, and the borrow checker rules out concurrent mutation
//!   within one thread.
//!
//! Hashing and equality
//! - Hashing is supplied via `BuildHasher` (defaulting to `RandomState`),
//!   equality via `Eq` on the query type. Borrowed lookups use
//!   `R: Borrow<Q>`; as with the standard collections, the borrowed and
//!   owned forms must hash and compare identically, and the table never
//!   checks that they do. An inconsistent pair makes equal records land in
//!   different chains and lookups miss.
//!
//! Notes and non-goals
//! - No per-entry removal, no persistence, no internal synchronization.
//! - No iteration-order guarantee beyond: slots in ascending index order,
//!   each chain most-recent-first.
//! - `get` returns a borrow into the table, so a found record can be read
//!   or (via `get_mut`) updated in place; the borrow's validity is tied to
//!   the table's lifetime by the type system.

mod bucket;
mod fallible;
mod table;
mod table_proptest;

// Public surface
pub use table::{ChainedTable, Iter, TableError};
