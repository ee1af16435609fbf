//! Baseline linear-probing table without tombstones.
use crate::hashing::common::num_buckets_for_capacity;
use crate::hashing::KeyHasher;
use keyslot_core::{HashTable, Hasher, Key, KeySlotError, Statistics};
use log::{info, warn};
use std::fmt::{Display, Formatter};

/// Linear-probing table whose deletes simply clear the slot.
///
/// Since an empty slot may be a former occupant, no walk can stop early: every lookup scans all
/// `capacity` slots.
#[derive(Debug)]
pub struct SimpleTable<H: Hasher = KeyHasher> {
    hasher: H,
    keys: Box<[Option<Key>]>,
    stats: Statistics,
    verbose: u8,
}

impl SimpleTable<KeyHasher> {
    /// Creates a new [`SimpleTable`] of `capacity` slots hashed by the function `code` selects.
    pub fn new(capacity: usize, code: char) -> Result<Self, KeySlotError> {
        let num_buckets = num_buckets_for_capacity(capacity)?;
        Ok(Self::with_hasher(KeyHasher::from_code(code, num_buckets)))
    }
}

impl<H: Hasher> SimpleTable<H> {
    pub fn with_hasher(hasher: H) -> Self {
        let capacity = hasher.num_buckets() as usize;
        Self {
            hasher,
            keys: vec![None; capacity].into_boxed_slice(),
            stats: Statistics::default(),
            verbose: 0,
        }
    }

    /// Get the key stored in slot `idx`.
    pub fn slot(&self, idx: usize) -> Option<Key> {
        self.keys[idx]
    }

    pub fn stats(&self) -> &Statistics {
        &self.stats
    }

    /// Iterate over all slot indices starting at the home slot of `key`.
    fn walk(&self, key: Key) -> impl Iterator<Item = usize> {
        let capacity = self.keys.len();
        let home = self.hasher.hash(key) as usize;
        (0..capacity).map(move |i| (home + i) % capacity)
    }

    fn position(&self, key: Key) -> Option<usize> {
        self.walk(key).find(|&idx| self.keys[idx] == Some(key))
    }
}

impl<H: Hasher + Display> HashTable for SimpleTable<H> {
    fn insert(&mut self, key: Key) -> Result<bool, KeySlotError> {
        let mut vacant = None;
        let mut collisions = 0;

        for (attempt, idx) in self.walk(key).enumerate() {
            match self.keys[idx] {
                Some(existing) if existing == key => {
                    self.stats.duplicates += 1;
                    if self.verbose > 0 {
                        info!("Duplicate [{:3}] : {:4}", idx, key);
                    }
                    return Ok(false);
                }
                Some(_) if vacant.is_none() => {
                    collisions += 1;
                    if self.verbose > 1 {
                        info!(
                            "Collision[{:3}] : {:4} : attempt = {:4}",
                            idx, key, attempt
                        );
                    }
                }
                Some(_) => {}
                None => {
                    if vacant.is_none() {
                        vacant = Some(idx);
                    }
                }
            }
        }

        self.stats.collisions += collisions;
        let Some(idx) = vacant else {
            let capacity = self.keys.len();
            warn!("Hash table full: no slot left for {} ({} slots)", key, capacity);
            return Err(KeySlotError::TableFull { capacity });
        };

        self.keys[idx] = Some(key);
        self.stats.insertions += 1;
        if self.verbose > 0 {
            info!("Insertion[{:3}] = {:4}", idx, key);
        }
        Ok(true)
    }

    fn delete(&mut self, key: Key) -> bool {
        let slot = self.position(key);
        if let Some(idx) = slot {
            self.keys[idx] = None;
            self.stats.deletions += 1;
        }
        if self.verbose > 0 {
            info!(
                "Delete {:<5} : {}",
                key,
                if slot.is_some() { "OK" } else { "not found" }
            );
        }
        slot.is_some()
    }

    fn find(&self, key: Key) -> Option<Key> {
        let found = self.position(key).map(|_| key);
        if self.verbose > 1 {
            info!(
                "Search {:<5} : {}",
                key,
                if found.is_some() { "found" } else { "not found" }
            );
        }
        found
    }

    fn capacity(&self) -> usize {
        self.keys.len()
    }

    fn set_verbose(&mut self, level: u8) {
        self.verbose = level;
    }

    fn verbose(&self) -> u8 {
        self.verbose
    }

    fn collisions(&self) -> usize {
        self.stats.collisions
    }

    fn insertions(&self) -> usize {
        self.stats.insertions
    }

    fn duplicates(&self) -> usize {
        self.stats.duplicates
    }

    fn deletions(&self) -> usize {
        self.stats.deletions
    }

    fn occupancy(&self) -> Vec<usize> {
        self.keys.iter().map(|key| key.is_some() as usize).collect()
    }
}

impl<H: Hasher + Display> Display for SimpleTable<H> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "--- SimpleHashTable ({}) ---", self.hasher)?;
        for (idx, key) in self.keys.iter().enumerate() {
            match key {
                Some(key) => writeln!(f, "Slot {}: {}", idx, key)?,
                None => writeln!(f, "Slot {}: empty", idx)?,
            }
        }
        write!(f, "{}", self.stats)
    }
}
