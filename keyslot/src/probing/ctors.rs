//! Implements constructors for [`ProbingTable`].
use crate::hashing::common::num_buckets_for_capacity;
use crate::hashing::KeyHasher;
use crate::probing::{ProbeStrategy, ProbingTable};
use bitvec::prelude::*;
use keyslot_core::{HashTable, Hasher, KeySlotError, Statistics};
use std::cell::Cell;

impl ProbingTable<KeyHasher> {
    /// Creates a new [`ProbingTable`].
    ///
    /// # Parameters
    ///
    /// - `capacity`: Number of slots.
    /// - `strategy`: Collision-resolution strategy.
    /// - `code`: Hash function code, see [`crate::hashing::HashFunction::from_code`].
    pub fn new(capacity: usize, strategy: ProbeStrategy, code: char) -> Result<Self, KeySlotError> {
        let num_buckets = num_buckets_for_capacity(capacity)?;
        Ok(Self::with_hasher(
            KeyHasher::from_code(code, num_buckets),
            strategy,
        ))
    }
}

impl<H: Hasher> ProbingTable<H> {
    /// Creates a new [`ProbingTable`] with one slot per bucket of `hasher`.
    pub fn with_hasher(hasher: H, strategy: ProbeStrategy) -> Self {
        let capacity = hasher.num_buckets() as usize;
        debug_assert!(capacity > 0, r#""capacity" must be greater than 0"#);

        Self {
            hasher,
            strategy,
            keys: vec![None; capacity].into_boxed_slice(),
            tombstones: bitvec![0; capacity],
            stats: Statistics::default(),
            verbose: 0,
            last_probes: Cell::new(0),
        }
    }
}

impl<H: Hasher> ProbingTable<H>
where
    ProbingTable<H>: HashTable,
{
    /// Builds a table of `2 · capacity + 1` slots holding the same live keys.
    ///
    /// Counters start from zero and only reflect the reinsertion.
    pub(crate) fn grown(&self) -> Result<Self, KeySlotError> {
        let capacity = self.keys.len() * 2 + 1;
        let num_buckets = num_buckets_for_capacity(capacity)?;

        let mut grown = Self::with_hasher(self.hasher.rebuild(num_buckets), self.strategy);
        grown.verbose = self.verbose;

        for key in self.keys() {
            match grown.insert(key) {
                Ok(true) => {}
                Ok(false) | Err(_) => return Err(KeySlotError::GrowFailed { key, capacity }),
            }
        }
        Ok(grown)
    }
}
