//! Degenerate hashers for driving tables into worst cases.
use keyslot_core::{Hasher, Key};
use std::fmt::{Display, Formatter};

/// Sends every key into the same bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedHasher {
    bucket: u32,
    num_buckets: u32,
}

impl FixedHasher {
    /// Creates a new [`FixedHasher`] mapping all keys to `bucket` out of `num_buckets`.
    pub fn new(bucket: u32, num_buckets: u32) -> Self {
        debug_assert!(
            bucket < num_buckets,
            r#""bucket" must be < "num_buckets""#
        );
        Self {
            bucket,
            num_buckets,
        }
    }
}

impl Hasher for FixedHasher {
    fn rebuild(&self, num_buckets: u32) -> Self {
        Self::new(self.bucket % num_buckets, num_buckets)
    }

    fn num_buckets(&self) -> u32 {
        self.num_buckets
    }

    fn hash(&self, _key: Key) -> u32 {
        self.bucket
    }
}

impl Display for FixedHasher {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "fixed({})", self.bucket)
    }
}
