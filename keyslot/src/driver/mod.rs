//! Feeds command files to a table.
mod command;
pub use command::*;

use crate::config::RunConfig;
use keyslot_core::{HashTable, Key, KeySlotError};
use log::{debug, info, warn};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DriverError {
    #[error("Error reading command file {path}: {source}")]
    Open { path: PathBuf, source: io::Error },
    #[error("Failed to read commands: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Table(#[from] KeySlotError),
}

/// Counts of what happened to the lines of a command stream.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Commands handed to the table.
    pub executed: usize,
    /// Lines that failed to parse.
    pub skipped: usize,
    /// Inserts refused because the table was full.
    pub refused: usize,
    /// Number of times the table was grown.
    pub grown: usize,
}

/// Executes commands read line by line from `input` against `table`.
///
/// Malformed lines are logged and skipped. Dumps requested by `print` go to `out`.
///
/// # Parameters
///
/// - `grow_on_full`: On a full table, grow it and retry the insert once instead of refusing.
///
/// # Errors
///
/// - [`DriverError::Io`] if reading `input` or writing `out` fails.
pub fn run<R: BufRead, W: Write>(
    table: &mut dyn HashTable,
    input: R,
    out: &mut W,
    grow_on_full: bool,
) -> Result<RunSummary, DriverError> {
    let mut summary = RunSummary::default();
    let verbose = table.verbose();

    for (line_no, line) in input.lines().enumerate() {
        let line = line?;
        let command = match parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                warn!("Line {}: {}", line_no + 1, err);
                summary.skipped += 1;
                continue;
            }
        };

        if verbose > 5 {
            debug!("Processing command: {}", command);
        }
        summary.executed += 1;

        match command {
            Command::Insert(key) => {
                let inserted = match insert(table, key, grow_on_full, &mut summary) {
                    Ok(inserted) => inserted,
                    Err(err) => {
                        warn!("Insert {} refused: {}", key, err);
                        summary.refused += 1;
                        false
                    }
                };
                if verbose > 1 {
                    info!("Insert {}{}", key, if inserted { "" } else { " failed" });
                }
            }
            Command::Delete(key) => {
                let deleted = table.delete(key);
                if verbose > 1 {
                    info!("Delete {}{}", key, if deleted { "" } else { " failed" });
                }
            }
            Command::Search(key) => {
                let found = table.find(key).is_some();
                if verbose > 1 {
                    info!("Search {}{}", key, if found { " found" } else { " failed" });
                }
            }
            Command::Print => table.print(&mut *out)?,
        }
    }
    Ok(summary)
}

fn insert(
    table: &mut dyn HashTable,
    key: Key,
    grow_on_full: bool,
    summary: &mut RunSummary,
) -> Result<bool, KeySlotError> {
    match table.insert(key) {
        Err(KeySlotError::TableFull { .. }) if grow_on_full => {
            table.grow()?;
            summary.grown += 1;
            info!("Grew table to {} slots", table.capacity());
            table.insert(key)
        }
        result => result,
    }
}

/// Builds the table `config` describes and runs its command file against it.
///
/// Returns the table so the caller can report on it.
///
/// # Errors
///
/// - [`DriverError::Open`] if the command file can't be opened.
/// - [`DriverError::Table`] if the table can't be built.
/// - [`DriverError::Io`] on read or write failures.
pub fn run_config<W: Write>(
    config: &RunConfig,
    out: &mut W,
) -> Result<(Box<dyn HashTable>, RunSummary), DriverError> {
    let file = File::open(&config.commands_file).map_err(|source| DriverError::Open {
        path: config.commands_file.clone(),
        source,
    })?;
    let mut table = config.build_table()?;
    let summary = run(
        table.as_mut(),
        BufReader::new(file),
        out,
        config.grow_on_full,
    )?;
    Ok((table, summary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::{new_table, TableStyle};
    use std::io::Cursor;

    fn run_str(
        table: &mut dyn HashTable,
        commands: &str,
        grow_on_full: bool,
    ) -> (RunSummary, String) {
        let mut out = Vec::new();
        let summary = run(table, Cursor::new(commands), &mut out, grow_on_full).unwrap();
        (summary, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_run_commands() {
        let mut table = new_table(10, TableStyle::Chaining, 'i').unwrap();
        let commands = "insert 7\ninsert 17\n\ninsert 7\nsearch 17\ndelete 7\nprint\n";
        let (summary, out) = run_str(table.as_mut(), commands, false);

        assert_eq!(
            summary,
            RunSummary {
                executed: 6,
                ..RunSummary::default()
            }
        );
        assert_eq!(table.size(), 1);
        assert_eq!(table.duplicates(), 1);
        assert_eq!(table.deletions(), 1);
        assert!(out.contains("Slot  7: [17]\n"));
    }

    #[test]
    fn test_bad_lines_are_skipped() {
        let mut table = new_table(10, TableStyle::Linear, 'i').unwrap();
        let commands = "insert x\nupsert 3\ndelete\ninsert 3\n";
        let (summary, out) = run_str(table.as_mut(), commands, false);

        assert_eq!(summary.skipped, 3);
        assert_eq!(summary.executed, 1);
        assert_eq!(table.find(3), Some(3));
        assert!(out.is_empty());
    }

    #[test]
    fn test_full_table_refuses() {
        let mut table = new_table(2, TableStyle::Quadratic, 'i').unwrap();
        let (summary, _) = run_str(table.as_mut(), "insert 7\ninsert 9\ninsert 11\n", false);

        assert_eq!(summary.refused, 1);
        assert_eq!(summary.grown, 0);
        assert_eq!(table.size(), 2);
    }

    #[test]
    fn test_full_table_grows() {
        let mut table = new_table(2, TableStyle::Linear, 'i').unwrap();
        let (summary, _) = run_str(table.as_mut(), "insert 7\ninsert 9\ninsert 11\n", true);

        assert_eq!(summary.refused, 0);
        assert_eq!(summary.grown, 1);
        assert_eq!(table.capacity(), 5);
        assert_eq!(table.size(), 3);
        for key in [7, 9, 11] {
            assert_eq!(table.find(key), Some(key));
        }
    }

    #[test]
    fn test_grow_unsupported_refuses() {
        let mut table = new_table(1, TableStyle::Simple, 'i').unwrap();
        let (summary, _) = run_str(table.as_mut(), "insert 1\ninsert 2\n", true);

        assert_eq!(summary.refused, 1);
        assert_eq!(summary.grown, 0);
        assert_eq!(table.size(), 1);
    }

    #[test]
    fn test_missing_command_file() {
        let config = RunConfig {
            commands_file: PathBuf::from("does/not/exist.txt"),
            ..RunConfig::default()
        };
        let err = run_config(&config, &mut io::sink()).err().unwrap();
        assert!(matches!(err, DriverError::Open { .. }));
    }
}
