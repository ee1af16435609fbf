//! Probe sequences of open addressing.
use crate::hashing::common::gcd;
use crate::hashing::second_hash;
use keyslot_core::Key;
use std::fmt::{Display, Formatter};
use std::iter::FusedIterator;

/// Collision-resolution strategy of a [`crate::probing::ProbingTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProbeStrategy {
    /// `(h + i) mod m`
    Linear,
    /// `(h + i²) mod m`
    Quadratic,
    /// `(h + i · dh) mod m`, where `dh` is a key-dependent step.
    DoubleHashing,
}

impl ProbeStrategy {
    pub const ALL: [ProbeStrategy; 3] = [
        ProbeStrategy::Linear,
        ProbeStrategy::Quadratic,
        ProbeStrategy::DoubleHashing,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            ProbeStrategy::Linear => "LINEAR",
            ProbeStrategy::Quadratic => "QUADRATIC",
            ProbeStrategy::DoubleHashing => "DOUBLE_HASHING",
        }
    }
}

impl Display for ProbeStrategy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Step size of double hashing for `key`.
///
/// Starts from [`second_hash`] and walks down to the nearest value coprime with `capacity`, so
/// that `m` consecutive probes visit every slot exactly once.
pub fn double_hash_step(key: Key, capacity: u32) -> u32 {
    let mut step = second_hash(key, capacity);
    while gcd(step as u64, capacity as u64) != 1 {
        step -= 1;
    }
    step
}

/// Iterator over the slot indices visited for one key.
///
/// Yields exactly `capacity` indices, one per probe attempt.
#[derive(Debug, Clone)]
pub struct ProbeSequence {
    strategy: ProbeStrategy,
    home: u64,
    step: u64,
    capacity: u64,
    attempt: u64,
}

impl ProbeSequence {
    /// Create a probe sequence.
    ///
    /// # Parameters
    ///
    /// - `strategy`: Collision-resolution strategy.
    /// - `home`: Primary hash of the key, must be `< capacity`.
    /// - `step`: Step size, only used by double hashing.
    /// - `capacity`: Number of slots in the table.
    pub fn new(strategy: ProbeStrategy, home: u32, step: u32, capacity: u32) -> Self {
        debug_assert!(capacity > 0, r#""capacity" must be greater than 0"#);
        debug_assert!(home < capacity, r#""home" must be < "capacity""#);

        Self {
            strategy,
            home: home as u64,
            step: step as u64,
            capacity: capacity as u64,
            attempt: 0,
        }
    }
}

impl Iterator for ProbeSequence {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.attempt >= self.capacity {
            return None;
        }
        let i = self.attempt;
        self.attempt += 1;

        let offset = match self.strategy {
            ProbeStrategy::Linear => i,
            ProbeStrategy::Quadratic => (i * i) % self.capacity,
            ProbeStrategy::DoubleHashing => (i * self.step) % self.capacity,
        };
        Some(((self.home + offset) % self.capacity) as usize)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.capacity - self.attempt) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ProbeSequence {}

impl FusedIterator for ProbeSequence {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_linear_sequence() {
        let sequence: Vec<usize> = ProbeSequence::new(ProbeStrategy::Linear, 3, 1, 5).collect();
        assert_eq!(sequence, vec![3, 4, 0, 1, 2]);
    }

    #[test]
    fn test_quadratic_sequence() {
        let sequence: Vec<usize> =
            ProbeSequence::new(ProbeStrategy::Quadratic, 1, 1, 7).collect();
        // Offsets 0, 1, 4, 9, 16, 25, 36 modulo 7.
        assert_eq!(sequence, vec![1, 2, 5, 3, 3, 5, 2]);
    }

    #[test]
    fn test_double_hashing_sequence() {
        let sequence: Vec<usize> =
            ProbeSequence::new(ProbeStrategy::DoubleHashing, 2, 3, 7).collect();
        assert_eq!(sequence, vec![2, 5, 1, 4, 0, 3, 6]);
    }

    #[test]
    fn test_sequence_length_is_capacity() {
        for strategy in ProbeStrategy::ALL {
            for capacity in [1, 2, 10, 101] {
                let sequence = ProbeSequence::new(strategy, capacity - 1, 1, capacity);
                assert_eq!(sequence.len(), capacity as usize);
                assert_eq!(sequence.count(), capacity as usize);
            }
        }
    }

    #[test]
    fn test_large_capacity_does_not_overflow() {
        let capacity = u32::MAX;
        let mut sequence = ProbeSequence::new(ProbeStrategy::Quadratic, capacity - 1, 1, capacity);
        assert_eq!(sequence.next(), Some((capacity - 1) as usize));
        assert_eq!(sequence.next(), Some(0));
    }

    #[test]
    fn test_double_hash_step_visits_every_slot() {
        for capacity in [1_u32, 2, 3, 4, 10, 12, 64, 100, 101] {
            for key in -200..200 {
                let step = double_hash_step(key, capacity);
                assert!(step >= 1);

                let home = crate::hashing::division(key, capacity);
                let visited: HashSet<usize> =
                    ProbeSequence::new(ProbeStrategy::DoubleHashing, home, step, capacity)
                        .collect();
                assert_eq!(visited.len(), capacity as usize, "key {}", key);
            }
        }
    }
}
