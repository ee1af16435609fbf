//! Synthetic key sets with different shapes.
use keyslot_core::Key;
use rand::Rng;
use std::fmt::{Display, Formatter};

/// Shape of a generated key set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyPattern {
    Uniform,
    /// Lower half of the range.
    LeftSkewed,
    /// Upper half of the range.
    RightSkewed,
    /// A window of a tenth of the range at a random position.
    Clustered,
    /// Half the keys left-skewed, the rest right-skewed.
    Bimodal,
}

impl KeyPattern {
    pub const ALL: [KeyPattern; 5] = [
        KeyPattern::Uniform,
        KeyPattern::LeftSkewed,
        KeyPattern::RightSkewed,
        KeyPattern::Clustered,
        KeyPattern::Bimodal,
    ];

    /// Resolves a pattern name, case-insensitively. Unknown names fall back to uniform.
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "left-skewed" => KeyPattern::LeftSkewed,
            "right-skewed" => KeyPattern::RightSkewed,
            "clustered" => KeyPattern::Clustered,
            "bimodal" => KeyPattern::Bimodal,
            _ => KeyPattern::Uniform,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            KeyPattern::Uniform => "Uniform",
            KeyPattern::LeftSkewed => "Left-skewed",
            KeyPattern::RightSkewed => "Right-skewed",
            KeyPattern::Clustered => "Clustered",
            KeyPattern::Bimodal => "Bimodal",
        }
    }
}

impl Display for KeyPattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Draws `n` keys from `[min, max]` following `pattern`.
///
/// Keys may repeat. Swapped bounds are put back in order.
///
/// # Examples
///
/// ```rust
/// use keyslot::keygen::{generate_keys, KeyPattern};
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha20Rng;
///
/// let mut rng = ChaCha20Rng::seed_from_u64(42);
/// let keys = generate_keys(&mut rng, KeyPattern::LeftSkewed, 100, 0, 1000);
/// assert_eq!(keys.len(), 100);
/// assert!(keys.iter().all(|key| (0..=500).contains(key)));
/// ```
pub fn generate_keys<R: Rng>(
    rng: &mut R,
    pattern: KeyPattern,
    n: usize,
    min: Key,
    max: Key,
) -> Vec<Key> {
    let (min, max) = if min <= max { (min, max) } else { (max, min) };
    // The middle of the range never overflows in 64 bits.
    let mid = (min as i64 + (max as i64 - min as i64) / 2) as Key;

    match pattern {
        KeyPattern::Uniform => uniform(rng, n, min, max),
        KeyPattern::LeftSkewed => uniform(rng, n, min, mid),
        KeyPattern::RightSkewed => uniform(rng, n, mid, max),
        KeyPattern::Clustered => {
            let span = ((max as i64 - min as i64) / 10).max(1);
            let last_base = (max as i64 - span).max(min as i64);
            let base = rng.random_range(min as i64..=last_base);
            let top = (base + span).min(max as i64);
            uniform(rng, n, base as Key, top as Key)
        }
        KeyPattern::Bimodal => {
            let mut keys = uniform(rng, n / 2, min, mid);
            keys.extend(uniform(rng, n - n / 2, mid, max));
            keys
        }
    }
}

fn uniform<R: Rng>(rng: &mut R, n: usize, low: Key, high: Key) -> Vec<Key> {
    (0..n).map(|_| rng.random_range(low..=high)).collect()
}
