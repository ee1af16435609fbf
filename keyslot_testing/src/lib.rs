pub mod stat;
pub use stat::*;

pub mod generate;
pub use generate::*;

pub mod hasher;
pub use hasher::*;

pub mod table;
pub use table::*;

#[doc(hidden)]
pub use compose_idents::compose_idents;
