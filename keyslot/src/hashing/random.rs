//! Random-but-consistent bucket assignment.
use keyslot_core::Key;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use std::cell::RefCell;
use std::collections::HashMap;

/// Seed of the generator behind [`RandomAssignment`] when none is given.
pub const DEFAULT_RANDOM_SEED: u64 = 123_456_789;

#[derive(Debug)]
struct Memo {
    rng: Xoshiro256PlusPlus,
    buckets: HashMap<Key, u32>,
}

/// Draws a uniformly random bucket the first time a key is seen and keeps returning it after.
///
/// The memo is keyed by the raw key and lives as long as the instance, which is bound to a single
/// number of buckets. A table that changes its capacity must build a new instance.
///
/// Interior mutability keeps lookups `&self`. The type is therefore not [`Sync`].
#[derive(Debug)]
pub struct RandomAssignment {
    num_buckets: u32,
    memo: RefCell<Memo>,
}

impl RandomAssignment {
    pub fn new(seed: u64, num_buckets: u32) -> Self {
        debug_assert!(num_buckets > 0, r#""num_buckets" must be greater than 0"#);

        Self {
            num_buckets,
            memo: RefCell::new(Memo {
                rng: Xoshiro256PlusPlus::seed_from_u64(seed),
                buckets: HashMap::new(),
            }),
        }
    }

    pub fn num_buckets(&self) -> u32 {
        self.num_buckets
    }

    /// Get the bucket of `key`, drawing it on first use.
    pub fn bucket(&self, key: Key) -> u32 {
        let num_buckets = self.num_buckets;
        let mut memo = self.memo.borrow_mut();
        let Memo { rng, buckets } = &mut *memo;
        *buckets
            .entry(key)
            .or_insert_with(|| rng.random_range(0..num_buckets))
    }

    /// Get the number of memoized keys.
    pub fn num_assigned(&self) -> usize {
        self.memo.borrow().buckets.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assignment_is_consistent() {
        let assignment = RandomAssignment::new(DEFAULT_RANDOM_SEED, 17);
        let first: Vec<u32> = (-50..50).map(|key| assignment.bucket(key)).collect();
        let second: Vec<u32> = (-50..50).map(|key| assignment.bucket(key)).collect();

        assert_eq!(first, second);
        assert_eq!(assignment.num_assigned(), 100);
        assert!(first.iter().all(|&bucket| bucket < 17));
    }

    #[test]
    fn test_assignment_is_deterministic_per_seed() {
        let a = RandomAssignment::new(1, 1000);
        let b = RandomAssignment::new(1, 1000);
        for key in [5, 3, 99, -7, 5] {
            assert_eq!(a.bucket(key), b.bucket(key));
        }
    }

    #[test]
    fn test_single_bucket() {
        let assignment = RandomAssignment::new(DEFAULT_RANDOM_SEED, 1);
        assert_eq!(assignment.bucket(i32::MIN), 0);
        assert_eq!(assignment.bucket(i32::MAX), 0);
    }
}
