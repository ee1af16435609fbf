//! Implements [`HashTable`] for [`ProbingTable`].
use crate::probing::{ProbingTable, Slot};
use keyslot_core::{HashTable, Hasher, Key, KeySlotError};
use log::{info, warn};
use std::fmt::Display;

/// Where an insert ends up.
enum Landing {
    Vacant(usize),
    Duplicate(usize),
    Full,
}

impl<H: Hasher> ProbingTable<H> {
    /// Walks the probe sequence of `key` looking for a place to put it.
    ///
    /// Doesn't stop at the first tombstone: the key may still live further down the walk, so the
    /// search goes on until a genuinely empty slot. Returns the landing together with the number
    /// of occupied slots passed before it.
    fn find_landing(&self, key: Key) -> (Landing, usize) {
        let mut first_tombstone = None;
        let mut collisions = 0;
        let mut probes = 0;

        let mut landing = None;
        for idx in self.probe_sequence(key) {
            probes += 1;
            match self.slot(idx) {
                Slot::Occupied(existing) if existing == key => {
                    landing = Some(Landing::Duplicate(idx));
                    break;
                }
                Slot::Occupied(existing) => {
                    if first_tombstone.is_none() {
                        collisions += 1;
                        if self.verbose > 1 {
                            info!(
                                "Collision[{:3}] : {:4} : attempt = {:4} (holds {})",
                                idx,
                                key,
                                probes - 1,
                                existing
                            );
                        }
                    }
                }
                Slot::Tombstone => {
                    if first_tombstone.is_none() {
                        first_tombstone = Some(idx);
                    }
                }
                Slot::Empty => {
                    landing = Some(Landing::Vacant(first_tombstone.unwrap_or(idx)));
                    break;
                }
            }
        }
        self.last_probes.set(probes);

        let landing = landing.unwrap_or(match first_tombstone {
            Some(idx) => Landing::Vacant(idx),
            None => Landing::Full,
        });
        (landing, collisions)
    }

    /// Finds the slot holding `key`.
    ///
    /// Stops at the first genuinely empty slot, skipping tombstones.
    fn locate(&self, key: Key) -> Option<usize> {
        let mut probes = 0;
        let mut found = None;
        for idx in self.probe_sequence(key) {
            probes += 1;
            match self.slot(idx) {
                Slot::Empty => break,
                Slot::Occupied(existing) if existing == key => {
                    found = Some(idx);
                    break;
                }
                Slot::Occupied(_) | Slot::Tombstone => {}
            }
        }
        self.last_probes.set(probes);
        found
    }
}

impl<H: Hasher + Display> HashTable for ProbingTable<H> {
    fn insert(&mut self, key: Key) -> Result<bool, KeySlotError> {
        let (landing, collisions) = self.find_landing(key);

        match landing {
            Landing::Vacant(idx) => {
                self.stats.collisions += collisions;
                self.keys[idx] = Some(key);
                self.tombstones.set(idx, false);
                self.stats.insertions += 1;
                if self.verbose > 0 {
                    info!("Insertion[{:3}] = {:4}", idx, key);
                }
                Ok(true)
            }
            Landing::Duplicate(idx) => {
                self.stats.duplicates += 1;
                if self.verbose > 0 {
                    info!("Duplicate [{:3}] : {:4}", idx, key);
                }
                Ok(false)
            }
            Landing::Full => {
                self.stats.collisions += collisions;
                let capacity = self.capacity();
                warn!("Hash table full: no slot left for {} ({} slots)", key, capacity);
                Err(KeySlotError::TableFull { capacity })
            }
        }
    }

    fn delete(&mut self, key: Key) -> bool {
        let slot = self.locate(key);
        if let Some(idx) = slot {
            self.keys[idx] = None;
            self.tombstones.set(idx, true);
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
        let found = self.locate(key).map(|_| key);
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

    fn deletions(&self) -> usize {
        self.stats.deletions
    }

    fn duplicates(&self) -> usize {
        self.stats.duplicates
    }

    fn occupancy(&self) -> Vec<usize> {
        self.keys.iter().map(|key| key.is_some() as usize).collect()
    }

    fn grow(&mut self) -> Result<(), KeySlotError> {
        let grown = self.grown()?;
        info!(
            "Grew table from {} to {} slots",
            self.capacity(),
            grown.capacity()
        );
        *self = grown;
        Ok(())
    }
}
