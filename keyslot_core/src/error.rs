//! Error definitions.
use crate::Key;
use thiserror::Error;

/// Project-wise error type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeySlotError {
    /// An open-addressing insert walked the whole probe sequence without finding an empty slot
    /// or a tombstone.
    #[error("Hash table full (capacity {capacity}).")]
    TableFull { capacity: usize },

    /// A table can't be built with zero slots.
    #[error("Table capacity must be positive, got {0}.")]
    InvalidCapacity(usize),

    /// The table variant has no grow operation.
    #[error("This table variant does not support growing.")]
    GrowUnsupported,

    /// Reinserting a live key into the grown table failed. The original table is untouched.
    #[error("Unable to reinsert key {key} into a table of capacity {capacity}.")]
    GrowFailed { key: Key, capacity: usize },
}
