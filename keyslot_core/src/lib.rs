pub mod core;
pub use crate::core::*;
pub mod error;
pub use crate::error::*;
