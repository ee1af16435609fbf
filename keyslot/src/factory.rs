//! Builds tables from their textual configuration.
use crate::chaining::ChainingTable;
use crate::probing::{ProbeStrategy, ProbingTable};
use crate::simple::SimpleTable;
use keyslot_core::{HashTable, KeySlotError};
use std::fmt::{Display, Formatter};

/// Collision-resolution style of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableStyle {
    Chaining,
    Linear,
    Quadratic,
    DoubleHashing,
    /// Baseline linear probing without tombstones.
    Simple,
}

impl TableStyle {
    pub const ALL: [TableStyle; 5] = [
        TableStyle::Chaining,
        TableStyle::Linear,
        TableStyle::Quadratic,
        TableStyle::DoubleHashing,
        TableStyle::Simple,
    ];

    /// Resolves a style name.
    ///
    /// Names are case-insensitive. Anything unrecognized selects [`TableStyle::Simple`].
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "chain" | "chaining" => TableStyle::Chaining,
            "linear" => TableStyle::Linear,
            "quad" | "quadratic" => TableStyle::Quadratic,
            "double" | "double-hashing" => TableStyle::DoubleHashing,
            _ => TableStyle::Simple,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TableStyle::Chaining => "chain",
            TableStyle::Linear => "linear",
            TableStyle::Quadratic => "quad",
            TableStyle::DoubleHashing => "double",
            TableStyle::Simple => "simple",
        }
    }

    /// Get the probe strategy of open-addressing styles.
    pub fn strategy(&self) -> Option<ProbeStrategy> {
        match self {
            TableStyle::Linear => Some(ProbeStrategy::Linear),
            TableStyle::Quadratic => Some(ProbeStrategy::Quadratic),
            TableStyle::DoubleHashing => Some(ProbeStrategy::DoubleHashing),
            TableStyle::Chaining | TableStyle::Simple => None,
        }
    }
}

impl From<ProbeStrategy> for TableStyle {
    fn from(strategy: ProbeStrategy) -> Self {
        match strategy {
            ProbeStrategy::Linear => TableStyle::Linear,
            ProbeStrategy::Quadratic => TableStyle::Quadratic,
            ProbeStrategy::DoubleHashing => TableStyle::DoubleHashing,
        }
    }
}

impl Display for TableStyle {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Creates a table of `capacity` slots or buckets.
///
/// # Parameters
///
/// - `capacity`: Number of slots or buckets, must be > 0.
/// - `style`: Collision-resolution style.
/// - `code`: Hash function code, see [`crate::hashing::HashFunction::from_code`].
///
/// # Errors
///
/// - [`KeySlotError::InvalidCapacity`] if `capacity` is 0 or too large.
pub fn new_table(
    capacity: usize,
    style: TableStyle,
    code: char,
) -> Result<Box<dyn HashTable>, KeySlotError> {
    let table: Box<dyn HashTable> = match style.strategy() {
        Some(strategy) => Box::new(ProbingTable::new(capacity, strategy, code)?),
        None if style == TableStyle::Chaining => Box::new(ChainingTable::new(capacity, code)?),
        None => Box::new(SimpleTable::new(capacity, code)?),
    };
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name() {
        assert_eq!(TableStyle::from_name("chain"), TableStyle::Chaining);
        assert_eq!(TableStyle::from_name("Chaining"), TableStyle::Chaining);
        assert_eq!(TableStyle::from_name("linear"), TableStyle::Linear);
        assert_eq!(TableStyle::from_name("quad"), TableStyle::Quadratic);
        assert_eq!(TableStyle::from_name("double-hashing"), TableStyle::DoubleHashing);
        assert_eq!(TableStyle::from_name("cuckoo"), TableStyle::Simple);
        assert_eq!(TableStyle::from_name(""), TableStyle::Simple);
    }

    #[test]
    fn test_names_round_trip() {
        for style in TableStyle::ALL {
            assert_eq!(TableStyle::from_name(style.name()), style);
        }
    }

    #[test]
    fn test_zero_capacity_is_rejected() {
        for style in TableStyle::ALL {
            assert_eq!(
                new_table(0, style, 'i').err(),
                Some(KeySlotError::InvalidCapacity(0))
            );
        }
    }

    #[test]
    fn test_tables_share_the_contract() {
        for style in TableStyle::ALL {
            let mut table = new_table(10, style, 'z').unwrap();
            assert_eq!(table.capacity(), 10);
            assert_eq!(table.insert(7), Ok(true));
            assert_eq!(table.insert(7), Ok(false));
            assert_eq!(table.find(7), Some(7));
            assert_eq!(table.size(), 1);
            assert!(table.delete(7));
            assert!(table.is_empty());
        }
    }

    #[test]
    fn test_scenario_chaining_duplicate() {
        let mut table = new_table(10, TableStyle::Chaining, 'i').unwrap();
        assert_eq!(table.insert(7), Ok(true));
        assert_eq!(table.insert(7), Ok(false));
        assert_eq!(table.duplicates(), 1);
        assert_eq!(table.size(), 1);
    }

    #[test]
    fn test_only_probing_tables_grow() {
        for style in TableStyle::ALL {
            let mut table = new_table(3, style, 'i').unwrap();
            let grown = table.grow();
            if style.strategy().is_some() {
                assert_eq!(grown, Ok(()));
                assert_eq!(table.capacity(), 7);
            } else {
                assert_eq!(grown, Err(KeySlotError::GrowUnsupported));
            }
        }
    }
}
