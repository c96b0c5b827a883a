//! ChainedTable: the public fixed-slot table over owned records.

use crate::bucket::{Bucket, BucketIter};
use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};
use core::iter::FusedIterator;
use std::collections::hash_map::RandomState;
use thiserror::Error;

/// Failures surfaced by construction and insertion.
///
/// Lookup misses are not errors; `get`/`get_mut` return `None`.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TableError {
    /// A table must have at least one slot.
    #[error("slot count must be at least 1")]
    ZeroSlots,
    /// The allocator refused a request; the table is unchanged.
    #[error("allocation failed")]
    OutOfMemory,
}

/// A hash table with a slot count fixed at construction.
///
/// Each slot holds an independent chain of owned records; an insert copies
/// nothing and moves the record into the chain head of the slot selected by
/// `hash(record) mod slot_count`. The table never resizes: with `n` stored
/// records and `m` slots the load factor `n / m` is unbounded, and lookups
/// cost O(chain length) of the selected slot.
pub struct ChainedTable<R, S = RandomState> {
    hasher: S,
    slots: Box<[Bucket<R>]>,
    len: usize,
}

impl<R: Hash> ChainedTable<R> {
    /// Create a table with `slot_count` empty chains and a random hasher.
    pub fn with_slots(slot_count: usize) -> Result<Self, TableError> {
        Self::with_slots_and_hasher(slot_count, RandomState::new())
    }
}

impl<R, S> ChainedTable<R, S>
where
    R: Hash,
    S: BuildHasher,
{
    /// Create a table with `slot_count` empty chains and the given hasher.
    ///
    /// Fails with [`TableError::ZeroSlots`] for an empty slot array and
    /// [`TableError::OutOfMemory`] if the slot array cannot be allocated.
    pub fn with_slots_and_hasher(slot_count: usize, hasher: S) -> Result<Self, TableError> {
        if slot_count == 0 {
            return Err(TableError::ZeroSlots);
        }
        let mut slots = Vec::new();
        slots
            .try_reserve_exact(slot_count)
            .map_err(|_| TableError::OutOfMemory)?;
        for _ in 0..slot_count {
            slots.push(Bucket::new());
        }
        Ok(Self {
            hasher,
            slots: slots.into_boxed_slice(),
            len: 0,
        })
    }

    fn slot_of<Q>(&self, query: &Q) -> usize
    where
        Q: ?Sized + Hash,
    {
        (self.hasher.hash_one(query) % self.slots.len() as u64) as usize
    }

    /// Move `record` into the table, prepending it to its slot's chain.
    ///
    /// Always O(1). Duplicates are permitted and never collapsed; a later
    /// insert of an equal record shadows earlier ones for `get`/`get_mut`,
    /// which scan most-recent-first. On [`TableError::OutOfMemory`] the
    /// table is unchanged and `record` is dropped.
    pub fn insert(&mut self, record: R) -> Result<(), TableError> {
        let slot = self.slot_of(&record);
        match self.slots[slot].push_front(record) {
            Ok(()) => {
                self.len += 1;
                Ok(())
            }
            Err(_record) => Err(TableError::OutOfMemory),
        }
    }

    /// Look up the most recently inserted record equal to `query`.
    ///
    /// The query may be any borrowed form of the record (for example `&str`
    /// for a `String`-keyed record); it must hash and compare the same way
    /// the record does, which the table cannot check. Scans the selected
    /// chain head to tail and returns the first match, or `None`.
    pub fn get<Q>(&self, query: &Q) -> Option<&R>
    where
        R: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let slot = self.slot_of(query);
        self.slots[slot].find(query)
    }

    /// Like [`get`](Self::get), but the returned borrow allows updating the
    /// record in place; the update is visible to later lookups and to
    /// enumeration.
    ///
    /// Mutating fields that participate in `Hash`/`Eq` strands the record:
    /// it stays in the chain chosen by its old hash and stops matching its
    /// old queries.
    pub fn get_mut<Q>(&mut self, query: &Q) -> Option<&mut R>
    where
        R: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let slot = self.slot_of(query);
        self.slots[slot].find_mut(query)
    }
}

impl<R, S> ChainedTable<R, S> {
    /// Number of stored records, duplicates included.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of slots, fixed for the table's lifetime.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Stored records divided by slots. Unbounded, since the table never
    /// resizes; chains average this many records.
    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.slots.len() as f64
    }

    pub fn hasher(&self) -> &S {
        &self.hasher
    }

    /// Iterate every stored record exactly once: slots in ascending index
    /// order, each chain most-recent-first. Read-only.
    pub fn iter(&self) -> Iter<'_, R> {
        Iter {
            slots: self.slots.iter(),
            chain: BucketIter::empty(),
            remaining: self.len,
        }
    }

    /// Call `visit` once per stored record, in [`iter`](Self::iter) order.
    pub fn dump<F>(&self, mut visit: F)
    where
        F: FnMut(&R),
    {
        for record in self.iter() {
            visit(record);
        }
    }
}

impl<'a, R, S> IntoIterator for &'a ChainedTable<R, S> {
    type Item = &'a R;
    type IntoIter = Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over all records: slots ascending, chains head to tail.
pub struct Iter<'a, R> {
    slots: core::slice::Iter<'a, Bucket<R>>,
    chain: BucketIter<'a, R>,
    remaining: usize,
}

impl<'a, R> Iterator for Iter<'a, R> {
    type Item = &'a R;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(record) = self.chain.next() {
                self.remaining -= 1;
                return Some(record);
            }
            self.chain = self.slots.next()?.iter();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, R> ExactSizeIterator for Iter<'a, R> {}
impl<'a, R> FusedIterator for Iter<'a, R> {}
