use keyslot_core::KeySlotError;

/// Calculate the number of bits required to represent `value`.
///
/// `0` needs no bits at all.
#[inline]
pub const fn num_bits_for_value(value: u32) -> u32 {
    u32::BITS - value.leading_zeros()
}

/// Convert a table capacity into a number of buckets.
///
/// # Errors
///
/// - [`KeySlotError::InvalidCapacity`] if the capacity is 0 or doesn't fit into `u32`.
pub fn num_buckets_for_capacity(capacity: usize) -> Result<u32, KeySlotError> {
    match u32::try_from(capacity) {
        Ok(num_buckets) if num_buckets > 0 => Ok(num_buckets),
        _ => Err(KeySlotError::InvalidCapacity(capacity)),
    }
}

/// Extract `num_bits` bits from the middle of a 64-bit value.
#[inline]
pub const fn extract_middle_bits_64(value: u64, num_bits: u32) -> u64 {
    debug_assert!(num_bits <= 32, r#""num_bits" must be <= 32"#);

    let shift = (u64::BITS - num_bits) / 2;
    let mask = (1_u64 << num_bits) - 1;
    (value >> shift) & mask
}

/// Modulo that lands negative values in `[0, modulus)` too.
#[inline]
pub const fn floor_mod(value: i64, modulus: u32) -> u32 {
    debug_assert!(modulus > 0, r#""modulus" must be > 0"#);

    value.rem_euclid(modulus as i64) as u32
}

/// Scales a fraction in `[0, 1)` onto `[0, num_buckets)`.
///
/// Guards against the product rounding up to `num_buckets` for fractions close to 1.
#[inline]
pub fn scale_fraction(fraction: f64, num_buckets: u32) -> u32 {
    debug_assert!(
        (0.0..1.0).contains(&fraction),
        r#""fraction" must be in [0, 1)"#
    );

    ((num_buckets as f64 * fraction) as u32).min(num_buckets - 1)
}

/// Fractional part that stays in `[0, 1)` for negative inputs as well.
#[inline]
pub fn floor_fraction(value: f64) -> f64 {
    value - value.floor()
}

/// Greatest common divisor.
#[inline]
pub const fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}
