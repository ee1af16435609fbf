//! Hash functions mapping integer keys onto bucket indices.
pub mod common;
pub mod functions;
pub use functions::*;
pub mod hasher;
pub use hasher::*;
pub mod random;
pub use random::*;
