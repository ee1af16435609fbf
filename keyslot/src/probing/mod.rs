//! Open addressing with linear, quadratic and double-hash probing.
//!
//! Deleted keys leave tombstones behind, so the probe walk of the keys placed after them stays
//! intact.
mod core;
pub use self::core::*;
mod ctors;
mod hash_table;
mod probe;
pub use probe::*;
