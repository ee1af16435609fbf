//! Core trait and type declarations for the whole project.
use crate::error::KeySlotError;
use std::fmt::{Display, Formatter};
use std::io;

/// Key type stored by every table.
pub type Key = i32;

/// Maps a key onto a bucket index.
///
/// Unlike [`std::hash::Hasher`] it is bound to a fixed number of buckets and to a single key
/// type, so an instance carries everything needed to place a key into a table.
pub trait Hasher {
    /// Create a hasher of the same kind for `num_buckets` buckets.
    ///
    /// Any state accumulated by `self` must not leak into the new hasher, since it may describe
    /// bucket assignments that are invalid for a different number of buckets.
    fn rebuild(&self, num_buckets: u32) -> Self
    where
        Self: Sized;

    /// Get the number of buckets (exclusive upper bound of the hash value).
    fn num_buckets(&self) -> u32;

    /// Hash the given `key` into `[0, num_buckets)`.
    fn hash(&self, key: Key) -> u32;
}

/// Running counters of a single table instance.
///
/// All counters only ever grow. Growing a table starts a fresh set.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Statistics {
    pub insertions: usize,
    pub collisions: usize,
    pub deletions: usize,
    pub duplicates: usize,
}

impl Statistics {
    /// Number of live keys.
    #[inline]
    pub fn size(&self) -> usize {
        debug_assert!(
            self.deletions <= self.insertions,
            r#""deletions" can't exceed "insertions""#
        );
        self.insertions - self.deletions
    }

    #[inline]
    pub fn average_probes(&self) -> f64 {
        average_probes(self.collisions, self.insertions)
    }

    #[inline]
    pub fn collision_rate(&self) -> f64 {
        collision_rate(self.collisions, self.insertions)
    }
}

impl Display for Statistics {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "insertions  : {}", self.insertions)?;
        writeln!(f, "collisions  : {}", self.collisions)?;
        writeln!(f, "deletions   : {}", self.deletions)?;
        writeln!(f, "duplicates  : {}", self.duplicates)?;
        write!(f, "collision%  : {:.2}", self.collision_rate())
    }
}

/// Average number of probes per successful insert: `1 + collisions / insertions`.
///
/// An empty history costs exactly one probe.
pub fn average_probes(collisions: usize, insertions: usize) -> f64 {
    if insertions == 0 {
        1.0
    } else {
        1.0 + collisions as f64 / insertions as f64
    }
}

/// Collisions per successful insert as a percentage.
pub fn collision_rate(collisions: usize, insertions: usize) -> f64 {
    if insertions == 0 {
        0.0
    } else {
        100.0 * collisions as f64 / insertions as f64
    }
}

/// A mutable hash table of integer keys.
///
/// The [`Display`] rendering is the dump written by [`HashTable::print`].
pub trait HashTable: Display {
    /// Insert `key`.
    ///
    /// Returns `Ok(false)` if the key is already present, which is counted as a duplicate.
    ///
    /// # Errors
    ///
    /// - [`KeySlotError::TableFull`] if an open-addressing table ran out of probe positions.
    fn insert(&mut self, key: Key) -> Result<bool, KeySlotError>;

    /// Delete `key`, returning whether it was present.
    fn delete(&mut self, key: Key) -> bool;

    /// Look up `key`.
    fn find(&self, key: Key) -> Option<Key>;

    /// Get the number of slots (open addressing) or buckets (chaining).
    fn capacity(&self) -> usize;

    /// Set the trace verbosity.
    ///
    /// `0` is silent, `1` traces inserts and deletes, `2` also traces searches and collisions.
    /// Never affects results or counters.
    fn set_verbose(&mut self, level: u8);

    fn verbose(&self) -> u8;

    fn collisions(&self) -> usize;

    fn insertions(&self) -> usize;

    fn deletions(&self) -> usize;

    /// Get the number of refused duplicate inserts.
    ///
    /// Defaults to `0` for variants that do not track duplicates.
    fn duplicates(&self) -> usize {
        0
    }

    /// Get the number of live keys.
    fn size(&self) -> usize {
        self.insertions() - self.deletions()
    }

    fn is_empty(&self) -> bool {
        self.size() == 0
    }

    fn load_factor(&self) -> f64 {
        self.size() as f64 / self.capacity() as f64
    }

    fn average_probes(&self) -> f64 {
        average_probes(self.collisions(), self.insertions())
    }

    fn collision_rate(&self) -> f64 {
        collision_rate(self.collisions(), self.insertions())
    }

    /// Get the number of live keys held by each slot or bucket, in index order.
    fn occupancy(&self) -> Vec<usize>;

    /// Write the table dump followed by a newline to `out`.
    fn print(&self, out: &mut dyn io::Write) -> io::Result<()> {
        writeln!(out, "{self}")
    }

    /// Rebuild the table with a larger capacity, resetting the counters.
    ///
    /// # Errors
    ///
    /// - [`KeySlotError::GrowUnsupported`] unless the variant overrides it.
    fn grow(&mut self) -> Result<(), KeySlotError> {
        Err(KeySlotError::GrowUnsupported)
    }
}
