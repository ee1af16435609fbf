//! Separate chaining: every bucket keeps its own collection of keys.
use crate::hashing::common::num_buckets_for_capacity;
use crate::hashing::KeyHasher;
use keyslot_core::{HashTable, Hasher, Key, KeySlotError, Statistics};
use log::info;
use std::collections::VecDeque;
use std::fmt::{Display, Formatter};

/// Hash table resolving collisions by separate chaining.
///
/// Deletion simply removes the key from its bucket, so no tombstones are needed. The table never
/// fills up.
///
/// # Examples
///
/// ```rust
/// use keyslot::chaining::ChainingTable;
/// use keyslot_core::HashTable;
///
/// let mut table = ChainingTable::new(10, 'i').unwrap();
/// assert_eq!(table.insert(7), Ok(true));
/// assert_eq!(table.insert(7), Ok(false));
/// assert_eq!(table.duplicates(), 1);
/// assert_eq!(table.size(), 1);
/// ```
#[derive(Debug)]
pub struct ChainingTable<H: Hasher = KeyHasher> {
    hasher: H,
    buckets: Box<[VecDeque<Key>]>,
    stats: Statistics,
    verbose: u8,
}

impl ChainingTable<KeyHasher> {
    /// Creates a new [`ChainingTable`] with `capacity` buckets hashed by the function `code`
    /// selects.
    pub fn new(capacity: usize, code: char) -> Result<Self, KeySlotError> {
        let num_buckets = num_buckets_for_capacity(capacity)?;
        Ok(Self::with_hasher(KeyHasher::from_code(code, num_buckets)))
    }
}

impl<H: Hasher> ChainingTable<H> {
    /// Creates a new [`ChainingTable`] with one bucket per bucket of `hasher`.
    pub fn with_hasher(hasher: H) -> Self {
        let capacity = hasher.num_buckets() as usize;
        Self {
            hasher,
            buckets: vec![VecDeque::new(); capacity].into_boxed_slice(),
            stats: Statistics::default(),
            verbose: 0,
        }
    }

    /// Get the keys of bucket `idx`, most recently inserted first.
    pub fn bucket(&self, idx: usize) -> &VecDeque<Key> {
        &self.buckets[idx]
    }

    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    pub fn stats(&self) -> &Statistics {
        &self.stats
    }

    #[inline]
    fn bucket_of(&self, key: Key) -> usize {
        self.hasher.hash(key) as usize
    }
}

impl<H: Hasher + Display> HashTable for ChainingTable<H> {
    fn insert(&mut self, key: Key) -> Result<bool, KeySlotError> {
        let idx = self.bucket_of(key);
        let bucket = &mut self.buckets[idx];

        if bucket.contains(&key) {
            self.stats.duplicates += 1;
            if self.verbose > 0 {
                info!("Duplicate {:<5} in slot {:<3}", key, idx);
            }
            return Ok(false);
        }

        if !bucket.is_empty() {
            self.stats.collisions += 1;
        }
        bucket.push_front(key);
        self.stats.insertions += 1;

        if self.verbose > 0 {
            info!(
                "Insert {:<5} -> slot {:<3}  (bucket size {})",
                key,
                idx,
                bucket.len()
            );
        }
        Ok(true)
    }

    fn delete(&mut self, key: Key) -> bool {
        let idx = self.bucket_of(key);
        let bucket = &mut self.buckets[idx];

        let removed = match bucket.iter().position(|&existing| existing == key) {
            Some(pos) => bucket.remove(pos).is_some(),
            None => false,
        };
        if removed {
            self.stats.deletions += 1;
        }
        if self.verbose > 0 {
            info!(
                "Delete {:<5} : {}",
                key,
                if removed { "OK" } else { "not found" }
            );
        }
        removed
    }

    fn find(&self, key: Key) -> Option<Key> {
        let found = self.buckets[self.bucket_of(key)].contains(&key);
        if self.verbose > 1 {
            info!(
                "Search {:<5} : {}",
                key,
                if found { "found" } else { "not found" }
            );
        }
        found.then_some(key)
    }

    fn capacity(&self) -> usize {
        self.buckets.len()
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

    fn deletions(&self) -> usize {
        self.stats.deletions
    }

    fn duplicates(&self) -> usize {
        self.stats.duplicates
    }

    fn occupancy(&self) -> Vec<usize> {
        self.buckets.iter().map(VecDeque::len).collect()
    }
}

impl<H: Hasher + Display> Display for ChainingTable<H> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "--- SeparateChainingHashTable ({}) ---", self.hasher)?;
        for (idx, bucket) in self.buckets.iter().enumerate() {
            if bucket.is_empty() {
                writeln!(f, "Slot {:2}: empty", idx)?;
            } else {
                writeln!(f, "Slot {:2}: {:?}", idx, bucket)?;
            }
        }
        write!(f, "{}", self.stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keyslot_testing::{generate_table_tests, FixedHasher};

    #[test]
    fn test_duplicate_insert() {
        let mut table = ChainingTable::new(10, 'i').unwrap();
        assert_eq!(table.insert(7), Ok(true));
        assert_eq!(table.insertions(), 1);

        assert_eq!(table.insert(7), Ok(false));
        assert_eq!(table.duplicates(), 1);
        assert_eq!(table.insertions(), 1);
        assert_eq!(table.size(), 1);
    }

    #[test]
    fn test_one_collision_per_insert_into_occupied_bucket() {
        let mut table = ChainingTable::with_hasher(FixedHasher::new(3, 10));
        for key in 0..6 {
            assert_eq!(table.insert(key), Ok(true));
        }
        assert_eq!(table.insert(4), Ok(false));

        assert_eq!(table.collisions(), 5);
        assert_eq!(table.insertions(), 6);
        assert_eq!(table.duplicates(), 1);
        assert_eq!(table.occupancy()[3], 6);
    }

    #[test]
    fn test_same_bucket_by_division() {
        let mut table = ChainingTable::new(10, 'i').unwrap();
        for key in [4, 14, 24, -6] {
            table.insert(key).unwrap();
        }
        assert_eq!(table.collisions(), 3);
        assert_eq!(table.bucket(4), &VecDeque::from([-6, 24, 14, 4]));
    }

    #[test]
    fn test_delete_from_chain() {
        let mut table = ChainingTable::new(5, 'i').unwrap();
        for key in [1, 6, 11] {
            table.insert(key).unwrap();
        }

        assert!(table.delete(6));
        assert!(!table.delete(6));
        assert_eq!(table.find(1), Some(1));
        assert_eq!(table.find(11), Some(11));
        assert_eq!(table.find(6), None);
        assert_eq!(table.deletions(), 1);
        assert_eq!(table.size(), 2);
    }

    #[test]
    fn test_never_fills_up() {
        let mut table = ChainingTable::new(2, 'i').unwrap();
        for key in 0..100 {
            assert_eq!(table.insert(key), Ok(true));
        }
        assert_eq!(table.size(), 100);
        assert_eq!(table.grow(), Err(KeySlotError::GrowUnsupported));
    }

    #[test]
    fn test_print() {
        let mut table = ChainingTable::new(3, 'i').unwrap();
        table.insert(1).unwrap();
        table.insert(4).unwrap();

        let out = table.to_string();
        assert!(out.starts_with("--- SeparateChainingHashTable (division) ---\n"));
        assert!(out.contains("Slot  0: empty\n"));
        assert!(out.contains("Slot  1: [4, 1]\n"));
        assert!(out.contains("collision%  : 50.00"));
    }

    generate_table_tests!(chaining_division, |capacity| {
        ChainingTable::new(capacity, 'i').unwrap()
    });
    generate_table_tests!(chaining_mid_square, |capacity| {
        ChainingTable::new(capacity, 's').unwrap()
    });
    generate_table_tests!(chaining_random, |capacity| {
        ChainingTable::new(capacity, 'r').unwrap()
    });
    generate_table_tests!(chaining_folding_four, |capacity| {
        ChainingTable::new(capacity, '4').unwrap()
    });
}
