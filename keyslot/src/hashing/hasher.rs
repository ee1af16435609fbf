//! Implements [`Hasher`] on top of the hash function library.
use crate::hashing::functions::*;
use crate::hashing::random::{RandomAssignment, DEFAULT_RANDOM_SEED};
use keyslot_core::{Hasher, Key};
use std::fmt::{Display, Formatter};

/// Hash functions a table can be built with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashFunction {
    Division,
    Multiplication,
    MidSquare,
    Folding,
    FoldingFour,
    Fibonacci,
    Random,
    Custom,
}

impl HashFunction {
    pub const ALL: [HashFunction; 8] = [
        HashFunction::Division,
        HashFunction::Multiplication,
        HashFunction::MidSquare,
        HashFunction::Folding,
        HashFunction::FoldingFour,
        HashFunction::Fibonacci,
        HashFunction::Random,
        HashFunction::Custom,
    ];

    /// Resolve a single-character code.
    ///
    /// `d` is an alias of [`HashFunction::Custom`]. Unknown codes fall back to
    /// [`HashFunction::Division`].
    pub const fn from_code(code: char) -> Self {
        match code {
            'i' => HashFunction::Division,
            'm' => HashFunction::Multiplication,
            's' => HashFunction::MidSquare,
            'o' => HashFunction::Folding,
            '4' => HashFunction::FoldingFour,
            'f' => HashFunction::Fibonacci,
            'r' => HashFunction::Random,
            'c' | 'd' => HashFunction::Custom,
            _ => HashFunction::Division,
        }
    }

    /// Get the canonical code of the function.
    pub const fn code(self) -> char {
        match self {
            HashFunction::Division => 'i',
            HashFunction::Multiplication => 'm',
            HashFunction::MidSquare => 's',
            HashFunction::Folding => 'o',
            HashFunction::FoldingFour => '4',
            HashFunction::Fibonacci => 'f',
            HashFunction::Random => 'r',
            HashFunction::Custom => 'c',
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            HashFunction::Division => "division",
            HashFunction::Multiplication => "multiplication",
            HashFunction::MidSquare => "mid-square",
            HashFunction::Folding => "folding",
            HashFunction::FoldingFour => "folding-four",
            HashFunction::Fibonacci => "fibonacci",
            HashFunction::Random => "random",
            HashFunction::Custom => "custom",
        }
    }

    /// Get the plain function behind a stateless variant.
    pub fn pure(self) -> Option<fn(Key, u32) -> u32> {
        match self {
            HashFunction::Division => Some(division),
            HashFunction::Multiplication => Some(multiplication),
            HashFunction::MidSquare => Some(mid_square),
            HashFunction::Folding => Some(folding),
            HashFunction::FoldingFour => Some(folding_four),
            HashFunction::Fibonacci => Some(fibonacci),
            HashFunction::Custom => Some(custom),
            HashFunction::Random => None,
        }
    }
}

impl Display for HashFunction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug)]
enum Dispatch {
    Pure(fn(Key, u32) -> u32),
    Random(RandomAssignment),
}

/// Hasher for table keys, bound to one [`HashFunction`] and a fixed number of buckets.
///
/// The function is resolved once on construction.
#[derive(Debug)]
pub struct KeyHasher {
    function: HashFunction,
    num_buckets: u32,
    dispatch: Dispatch,
}

impl KeyHasher {
    pub fn new(function: HashFunction, num_buckets: u32) -> Self {
        debug_assert!(num_buckets > 0, r#""num_buckets" must be greater than 0"#);

        let dispatch = match function.pure() {
            Some(hash) => Dispatch::Pure(hash),
            None => Dispatch::Random(RandomAssignment::new(DEFAULT_RANDOM_SEED, num_buckets)),
        };
        Self {
            function,
            num_buckets,
            dispatch,
        }
    }

    pub fn from_code(code: char, num_buckets: u32) -> Self {
        Self::new(HashFunction::from_code(code), num_buckets)
    }

    pub fn function(&self) -> HashFunction {
        self.function
    }
}

impl Hasher for KeyHasher {
    fn rebuild(&self, num_buckets: u32) -> Self {
        Self::new(self.function, num_buckets)
    }

    fn num_buckets(&self) -> u32 {
        self.num_buckets
    }

    #[inline]
    fn hash(&self, key: Key) -> u32 {
        match &self.dispatch {
            Dispatch::Pure(hash) => hash(key, self.num_buckets),
            Dispatch::Random(assignment) => assignment.bucket(key),
        }
    }
}

impl Display for KeyHasher {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.function)
    }
}
