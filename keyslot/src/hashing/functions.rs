//! Classic textbook hash functions for integer keys.
//!
//! Every function maps a key onto `[0, num_buckets)` and requires `num_buckets > 0`.
//!
//! See [Knuth (1998)] section 6.4 for division, multiplication and Fibonacci hashing, and
//! [Cormen et al. (2009)] section 11.3 for the mid-square and folding variants.
//!
//! [Knuth (1998)]: https://dl.acm.org/doi/10.5555/280635
//! [Cormen et al. (2009)]: https://mitpress.mit.edu/9780262533058/

use crate::hashing::common::{
    extract_middle_bits_64, floor_fraction, floor_mod, num_bits_for_value, scale_fraction,
};
use keyslot_core::Key;

/// The golden ratio `(1 + √5) / 2`.
pub const PHI: f64 = 1.618_033_988_749_895;

/// Knuth's multiplicative constant `(√5 − 1) / 2`.
pub const KNUTH_A: f64 = PHI - 1.0;

/// Hashes `key` with the division method: `key mod num_buckets`.
///
/// Negative keys are wrapped into range with a floor-modulo.
#[inline]
pub const fn division(key: Key, num_buckets: u32) -> u32 {
    floor_mod(key as i64, num_buckets)
}

/// Hashes `key` with Knuth's multiplicative method: `⌊m · frac(key · A)⌋`.
#[inline]
pub fn multiplication(key: Key, num_buckets: u32) -> u32 {
    let product = key as f64 * KNUTH_A;
    scale_fraction(floor_fraction(product), num_buckets)
}

/// Sums the base-`group` digit groups of `|key|`.
#[inline]
const fn fold(key: Key, group: u32) -> u32 {
    let mut n = key.unsigned_abs();
    let mut sum = 0;
    while n > 0 {
        sum += n % group;
        n /= group;
    }
    sum
}

/// Hashes `key` by folding its decimal digits in 3-digit blocks.
#[inline]
pub const fn folding(key: Key, num_buckets: u32) -> u32 {
    fold(key, 1_000) % num_buckets
}

/// Hashes `key` by folding its decimal digits in 4-digit blocks.
#[inline]
pub const fn folding_four(key: Key, num_buckets: u32) -> u32 {
    fold(key, 10_000) % num_buckets
}

/// Hashes `key` by taking the middle bits of `key²`.
///
/// Takes as many bits as needed to represent `num_buckets - 1`.
#[inline]
pub const fn mid_square(key: Key, num_buckets: u32) -> u32 {
    let square = (key as i64 * key as i64) as u64;
    let num_bits = num_bits_for_value(num_buckets - 1);
    (extract_middle_bits_64(square, num_bits) % num_buckets as u64) as u32
}

/// Hashes `key` with golden-ratio (Fibonacci) hashing: `⌊m · ((key · (φ − 1)) mod 1)⌋`.
#[inline]
pub fn fibonacci(key: Key, num_buckets: u32) -> u32 {
    let product = key as f64 * (PHI - 1.0);
    scale_fraction(floor_fraction(product), num_buckets)
}

/// Hashes `key` with an XOR-shift bit mixer folded into range by a floor-modulo.
#[inline]
pub const fn custom(key: Key, num_buckets: u32) -> u32 {
    let mut h = key as u32;
    h ^= (h >> 20) ^ (h >> 12);
    h ^= (h >> 7) ^ (h >> 4);
    floor_mod(h as i32 as i64, num_buckets)
}

/// The step size of double hashing: `1 + (mid_square(key, m − 2) mod (m − 1))`.
///
/// Never returns 0. For tables with at most 2 slots the step is always 1.
#[inline]
pub const fn second_hash(key: Key, num_buckets: u32) -> u32 {
    if num_buckets <= 2 {
        return 1;
    }
    1 + mid_square(key, num_buckets - 2) % (num_buckets - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use keyslot_testing::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn assert_in_range(hash: fn(Key, u32) -> u32) {
        for num_buckets in [1, 2, 3, 5, 10, 101, 1024, 65_537] {
            for key in [0, 1, -1, 7, -7, 123_456, -987_654, i32::MAX, i32::MIN] {
                let bucket = hash(key, num_buckets);
                assert!(
                    bucket < num_buckets,
                    "key {} hashed to {} with {} buckets",
                    key,
                    bucket,
                    num_buckets
                );
            }
        }
    }

    #[test]
    fn test_all_functions_stay_in_range() {
        assert_in_range(division);
        assert_in_range(multiplication);
        assert_in_range(folding);
        assert_in_range(folding_four);
        assert_in_range(mid_square);
        assert_in_range(fibonacci);
        assert_in_range(custom);
    }

    #[test]
    fn test_division() {
        assert_eq!(division(17, 5), 2);
        assert_eq!(division(-1, 5), 4);
        assert_eq!(division(10, 5), 0);
    }

    #[test]
    fn test_multiplication() {
        // 1 · A = 0.618..., so 10 buckets give 6.
        assert_eq!(multiplication(1, 10), 6);
        assert_eq!(multiplication(0, 10), 0);
    }

    #[test]
    fn test_folding() {
        // 123 + 456 = 579
        assert_eq!(folding(123_456, 1000), 579);
        assert_eq!(folding(-123_456, 1000), 579);
        // 12 + 3456 = 3468
        assert_eq!(folding_four(123_456, 10_000), 3468);
        assert_eq!(folding(0, 7), 0);
        assert_eq!(folding(i32::MIN, 10_000), 2 + 147 + 483 + 648);
    }

    #[test]
    fn test_mid_square() {
        // A single bucket needs no bits at all.
        assert_eq!(mid_square(12_345, 1), 0);
        // 1000² = 1_000_000 has no bits set at and above bit 28.
        assert_eq!(mid_square(1000, 256), 0);
        // 2^20 squared is 2^40, its bits [28, 36) hold 0.
        assert_eq!(mid_square(1 << 20, 256), 0);
        // 2^16 squared is 2^32, which is bit 4 of the window starting at bit 28.
        assert_eq!(mid_square(1 << 16, 256), 16);
    }

    #[test]
    fn test_fibonacci_matches_multiplication_constant() {
        // φ − 1 equals Knuth's A, so both methods agree.
        for key in [-1000, -3, 0, 1, 42, 99_999] {
            assert_eq!(fibonacci(key, 101), multiplication(key, 101));
        }
    }

    #[test]
    fn test_custom_mixes_bits() {
        assert_eq!(custom(0, 13), 0);
        assert_ne!(custom(1 << 20, 1 << 20), 0);
    }

    #[test]
    fn test_second_hash_is_never_zero() {
        let mut rng = ChaCha20Rng::seed_from_u64(7);
        let keys = <Key as Generate<ChaCha20Rng>>::generate_many(
            &mut rng,
            &NumParams::default(),
            1000,
        );
        for num_buckets in [1, 2, 3, 4, 5, 10, 11, 101, 1 << 16] {
            for &key in keys.iter() {
                let step = second_hash(key, num_buckets);
                assert!(step >= 1, "zero step for key {}", key);
                if num_buckets > 1 {
                    assert!(step < num_buckets, "step {} too large", step);
                }
            }
        }
    }

    #[test]
    fn test_uniform_functions_distribute_uniform_keys() {
        let mut rng = ChaCha20Rng::seed_from_u64(42);
        let keys = <Key as Generate<ChaCha20Rng>>::generate_many(
            &mut rng,
            &NumParams::new(0, 1_000_000),
            10_000,
        );

        let functions: [fn(Key, u32) -> u32; 4] = [division, multiplication, fibonacci, custom];
        for hash in functions {
            let stat = bucket_uniformity(keys.iter().map(|&key| hash(key, 101)), 101);
            assert!(stat.p_value > 0.0001, "{:?}", stat);
        }
    }

    #[test]
    fn test_mid_square_is_biased_for_non_power_of_two() {
        let mut rng = ChaCha20Rng::seed_from_u64(42);
        let keys = <Key as Generate<ChaCha20Rng>>::generate_many(
            &mut rng,
            &NumParams::new(0, 1_000_000),
            10_000,
        );

        // 7 middle bits are reduced modulo 101, so the first 27 buckets get twice the share.
        let stat = bucket_uniformity(keys.iter().map(|&key| mid_square(key, 101)), 101);
        assert!(stat.p_value < 0.0001, "{:?}", stat);
    }
}
