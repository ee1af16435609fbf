//! Collision experiments across hash functions, key patterns and probe strategies.
use crate::hashing::HashFunction;
use crate::keygen::{generate_keys, KeyPattern};
use crate::probing::{ProbeStrategy, ProbingTable};
use keyslot_core::{HashTable, Key, KeySlotError};
use log::debug;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use std::fmt::{Display, Formatter};
use std::io;

/// Header line of the TSV rendering.
pub const TSV_HEADER: &str = "Hash\tPattern\tProbe\tCollisions\tDuplicates\tAvgProbes";

/// Hash functions compared by default.
pub const DEFAULT_FUNCTIONS: [HashFunction; 5] = [
    HashFunction::Division,
    HashFunction::Multiplication,
    HashFunction::Random,
    HashFunction::MidSquare,
    HashFunction::Folding,
];

#[derive(Debug, Clone, PartialEq)]
pub struct ExperimentParams {
    pub capacity: usize,
    pub num_keys: usize,
    pub seed: u64,
    pub min: Key,
    pub max: Key,
    /// Share of the generated keys that is inserted, in percent. The rest drives the delete
    /// phase.
    pub insert_percent: u8,
    pub functions: Vec<HashFunction>,
    pub patterns: Vec<KeyPattern>,
    pub strategies: Vec<ProbeStrategy>,
}

impl Default for ExperimentParams {
    fn default() -> Self {
        Self {
            capacity: 101,
            num_keys: 500,
            seed: 42,
            min: 0,
            max: 49_999,
            insert_percent: 100,
            functions: DEFAULT_FUNCTIONS.to_vec(),
            patterns: KeyPattern::ALL.to_vec(),
            strategies: ProbeStrategy::ALL.to_vec(),
        }
    }
}

/// Outcome of filling one table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExperimentRow {
    pub function: HashFunction,
    pub pattern: KeyPattern,
    pub strategy: ProbeStrategy,
    /// Keys placed before the table ran full or the keys ran out.
    pub inserted: usize,
    /// Keys removed by the delete phase.
    pub deleted: usize,
    /// Whether the insert phase stopped at a full table. The delete phase is skipped then.
    pub full: bool,
    /// Live keys per slot once both phases ran.
    pub load_factor: f64,
    pub collisions: usize,
    pub duplicates: usize,
    pub average_probes: f64,
}

impl Display for ExperimentRow {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}\t{:.3}",
            self.function.code(),
            self.pattern,
            self.strategy,
            self.collisions,
            self.duplicates,
            self.average_probes
        )
    }
}

/// Number of keys out of `num_keys` that the insert phase uses, rounded half up.
fn insert_count(num_keys: usize, insert_percent: u8) -> usize {
    let percent = usize::from(insert_percent.min(100));
    (num_keys * percent + 50) / 100
}

/// Inserts `keys` in order until the table runs full.
///
/// Returns whether the table ran full.
fn fill<T: HashTable>(table: &mut T, keys: &[Key]) -> Result<bool, KeySlotError> {
    for &key in keys {
        match table.insert(key) {
            Ok(_) => {}
            Err(KeySlotError::TableFull { .. }) => return Ok(true),
            Err(err) => return Err(err),
        }
    }
    Ok(false)
}

/// Deletes the first `count` of `keys`, but never more keys than the table holds.
///
/// Returns the number of keys actually removed.
fn drain<T: HashTable>(table: &mut T, keys: &[Key], count: usize) -> usize {
    let count = count.min(table.size());
    keys.iter()
        .take(count)
        .filter(|&&key| table.delete(key))
        .count()
}

/// Runs every combination of `params`.
///
/// Each pattern draws its keys once from a generator seeded with `params.seed`, so all hash
/// functions and strategies see the same keys. The first `insert_percent` of them are inserted.
/// Then as many keys as were left over are deleted, taken from the front of the same key set.
/// A table that ran full skips the delete phase.
///
/// # Errors
///
/// - [`KeySlotError::InvalidCapacity`] if `params.capacity` is 0.
pub fn run_experiment(params: &ExperimentParams) -> Result<Vec<ExperimentRow>, KeySlotError> {
    let mut rng = ChaCha20Rng::seed_from_u64(params.seed);
    let key_sets: Vec<(KeyPattern, Vec<Key>)> = params
        .patterns
        .iter()
        .map(|&pattern| {
            let keys = generate_keys(&mut rng, pattern, params.num_keys, params.min, params.max);
            (pattern, keys)
        })
        .collect();

    let num_inserts = insert_count(params.num_keys, params.insert_percent);
    let num_deletes = params.num_keys - num_inserts;

    let mut rows = Vec::new();
    for &function in &params.functions {
        for (pattern, keys) in &key_sets {
            for &strategy in &params.strategies {
                let mut table = ProbingTable::new(params.capacity, strategy, function.code())?;
                let inserts = &keys[..num_inserts.min(keys.len())];
                let full = fill(&mut table, inserts)?;
                let inserted = table.size();
                let deleted = if full {
                    0
                } else {
                    drain(&mut table, keys, num_deletes)
                };

                let row = ExperimentRow {
                    function,
                    pattern: *pattern,
                    strategy,
                    inserted,
                    deleted,
                    full,
                    load_factor: table.load_factor(),
                    collisions: table.collisions(),
                    duplicates: table.duplicates(),
                    average_probes: table.average_probes(),
                };
                debug!("{}", row);
                rows.push(row);
            }
        }
    }
    Ok(rows)
}

/// Writes `rows` as TSV preceded by [`TSV_HEADER`].
pub fn write_tsv<W: io::Write>(rows: &[ExperimentRow], out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", TSV_HEADER)?;
    for row in rows {
        writeln!(out, "{}", row)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_combinations_are_run() {
        let params = ExperimentParams {
            num_keys: 50,
            ..ExperimentParams::default()
        };
        let rows = run_experiment(&params).unwrap();
        assert_eq!(rows.len(), 5 * 5 * 3);

        for row in &rows {
            assert!(row.inserted <= params.capacity);
            assert!(row.average_probes >= 1.0);
            assert_eq!(
                row.average_probes,
                keyslot_core::average_probes(row.collisions, row.inserted)
            );
        }
    }

    #[test]
    fn test_overfilled_table_stops_at_full() {
        let params = ExperimentParams {
            capacity: 11,
            num_keys: 200,
            functions: vec![HashFunction::Division],
            patterns: vec![KeyPattern::Uniform],
            strategies: vec![ProbeStrategy::Linear],
            ..ExperimentParams::default()
        };
        let rows = run_experiment(&params).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].inserted, 11);
        assert!(rows[0].full);
        assert_eq!(rows[0].load_factor, 1.0);
    }

    #[test]
    fn test_insert_count_rounds_half_up() {
        assert_eq!(insert_count(100, 100), 100);
        assert_eq!(insert_count(100, 0), 0);
        assert_eq!(insert_count(5, 50), 3);
        assert_eq!(insert_count(7, 30), 2);
    }

    #[test]
    fn test_delete_phase_leaves_tombstones() {
        let params = ExperimentParams {
            capacity: 101,
            num_keys: 50,
            insert_percent: 80,
            functions: vec![HashFunction::Division],
            patterns: vec![KeyPattern::Uniform],
            strategies: vec![ProbeStrategy::Linear],
            ..ExperimentParams::default()
        };
        let rows = run_experiment(&params).unwrap();
        let row = rows[0];

        assert!(!row.full);
        assert!(row.inserted <= 40);
        // Every deleted key was among the inserted ones.
        assert!(row.deleted <= 10);
        assert!(row.deleted > 0);
        assert_eq!(
            row.load_factor,
            (row.inserted - row.deleted) as f64 / params.capacity as f64
        );
        assert_eq!(
            row.average_probes,
            keyslot_core::average_probes(row.collisions, row.inserted)
        );
    }

    #[test]
    fn test_full_table_skips_delete_phase() {
        let params = ExperimentParams {
            capacity: 5,
            num_keys: 40,
            insert_percent: 50,
            functions: vec![HashFunction::Division],
            patterns: vec![KeyPattern::Uniform],
            strategies: vec![ProbeStrategy::DoubleHashing],
            ..ExperimentParams::default()
        };
        let row = run_experiment(&params).unwrap()[0];
        assert!(row.full);
        assert_eq!(row.deleted, 0);
        assert_eq!(row.inserted, 5);
    }

    #[test]
    fn test_reproducible() {
        let params = ExperimentParams {
            num_keys: 80,
            ..ExperimentParams::default()
        };
        assert_eq!(
            run_experiment(&params).unwrap(),
            run_experiment(&params).unwrap()
        );
    }

    #[test]
    fn test_zero_capacity() {
        let params = ExperimentParams {
            capacity: 0,
            ..ExperimentParams::default()
        };
        assert_eq!(
            run_experiment(&params),
            Err(KeySlotError::InvalidCapacity(0))
        );
    }

    #[test]
    fn test_write_tsv() {
        let row = ExperimentRow {
            function: HashFunction::MidSquare,
            pattern: KeyPattern::Clustered,
            strategy: ProbeStrategy::DoubleHashing,
            inserted: 10,
            deleted: 0,
            full: false,
            load_factor: 10.0 / 13.0,
            collisions: 4,
            duplicates: 2,
            average_probes: 1.4,
        };
        let mut out = Vec::new();
        write_tsv(&[row], &mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Hash\tPattern\tProbe\tCollisions\tDuplicates\tAvgProbes\n\
             s\tClustered\tDOUBLE_HASHING\t4\t2\t1.400\n"
        );
    }
}
