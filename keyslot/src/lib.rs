//! Integer-keyed hash tables with pluggable hash functions and collision resolution.
//!
//! Every table implements [`keyslot_core::HashTable`]:
//!
//! - [`chaining::ChainingTable`] keeps a bucket of keys per slot.
//! - [`probing::ProbingTable`] uses open addressing with linear, quadratic or double-hash probing
//!   and tombstone deletion.
//! - [`simple::SimpleTable`] is a baseline linear-probing table without tombstones.
//!
//! [`factory::new_table`] builds any of them from a style and a hash function code.
pub mod chaining;
pub mod config;
pub mod driver;
pub mod experiment;
pub mod factory;
pub mod hashing;
pub mod keygen;
pub mod logger;
pub mod probing;
pub mod simple;
