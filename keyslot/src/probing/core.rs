//! Declares core types for [`ProbingTable`].
use crate::hashing::KeyHasher;
use crate::probing::{double_hash_step, ProbeSequence, ProbeStrategy};
use bitvec::prelude::*;
use keyslot_core::{Hasher, Key, Statistics};
use std::cell::Cell;
use std::fmt::{Display, Formatter};

/// State of a single slot of a [`ProbingTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// Never occupied since the storage was allocated.
    Empty,
    Occupied(Key),
    /// Previously occupied. Does not end a probe walk, but can be reused by an insert.
    Tombstone,
}

/// Open-addressing hash table with tombstone deletion.
///
/// # Guarantees
///
/// - At most one live entry per key.
/// - No operation probes more than `capacity` slots.
///
/// # Examples
///
/// ```rust
/// use keyslot::probing::{ProbeStrategy, ProbingTable};
/// use keyslot_core::HashTable;
///
/// let mut table = ProbingTable::new(5, ProbeStrategy::Linear, 'i').unwrap();
/// for key in [0, 5, 10, 1] {
///     assert!(table.insert(key).unwrap());
/// }
///
/// assert_eq!(table.size(), 4);
/// assert_eq!(table.find(10), Some(10));
/// assert!(table.delete(5));
/// // The tombstone left by 5 doesn't hide 10.
/// assert_eq!(table.find(10), Some(10));
/// ```
#[derive(Debug)]
pub struct ProbingTable<H: Hasher = KeyHasher> {
    pub(crate) hasher: H,
    pub(crate) strategy: ProbeStrategy,
    pub(crate) keys: Box<[Option<Key>]>,
    /// Set for slots whose key was deleted. A set bit implies an empty `keys` entry.
    pub(crate) tombstones: BitVec,
    pub(crate) stats: Statistics,
    pub(crate) verbose: u8,
    pub(crate) last_probes: Cell<usize>,
}

impl<H: Hasher> ProbingTable<H> {
    #[inline]
    pub fn slot(&self, idx: usize) -> Slot {
        match self.keys[idx] {
            Some(key) => Slot::Occupied(key),
            None if self.tombstones[idx] => Slot::Tombstone,
            None => Slot::Empty,
        }
    }

    /// Iterate over all slots in index order.
    pub fn slots(&self) -> impl Iterator<Item = Slot> + '_ {
        (0..self.keys.len()).map(|idx| self.slot(idx))
    }

    /// Iterate over the live keys in slot order.
    pub fn keys(&self) -> impl Iterator<Item = Key> + '_ {
        self.keys.iter().filter_map(|key| *key)
    }

    pub fn strategy(&self) -> ProbeStrategy {
        self.strategy
    }

    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    pub fn stats(&self) -> &Statistics {
        &self.stats
    }

    /// Get the number of slots examined by the latest insert, delete or find.
    pub fn last_probe_count(&self) -> usize {
        self.last_probes.get()
    }

    /// Get the slot indices visited for `key`, in probe order.
    pub fn probe_sequence(&self, key: Key) -> ProbeSequence {
        let capacity = self.hasher.num_buckets();
        let step = match self.strategy {
            ProbeStrategy::DoubleHashing => double_hash_step(key, capacity),
            ProbeStrategy::Linear | ProbeStrategy::Quadratic => 1,
        };
        ProbeSequence::new(self.strategy, self.hasher.hash(key), step, capacity)
    }
}

impl<H: Hasher + Display> Display for ProbingTable<H> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "--- ProbingHashTable ({}, {}) ---",
            self.strategy, self.hasher
        )?;
        for (idx, slot) in self.slots().enumerate() {
            match slot {
                Slot::Empty => writeln!(f, "{:3}: ·", idx)?,
                Slot::Tombstone => writeln!(f, "{:3}: ⊘", idx)?,
                Slot::Occupied(key) => writeln!(f, "{:3}: {}", idx, key)?,
            }
        }
        write!(f, "{}", self.stats)
    }
}
