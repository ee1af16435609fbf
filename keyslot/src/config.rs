//! Settings of a command-file run.
use crate::factory::{new_table, TableStyle};
use crate::hashing::HashFunction;
use keyslot_core::{HashTable, KeySlotError};
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Directory command files are resolved under when the data prefix is requested.
pub const DATA_DIR: &str = "data";

pub const DEFAULT_COMMANDS_FILE: &str = "commands.txt";
pub const DEFAULT_HASH_CODE: char = 'd';
pub const DEFAULT_CAPACITY: usize = 10;

/// Everything needed to build a table and feed it a command file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub commands_file: PathBuf,
    pub code: char,
    pub capacity: usize,
    pub style: TableStyle,
    pub verbose: u8,
    /// Grow an open-addressing table and retry once when an insert finds it full.
    pub grow_on_full: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            commands_file: PathBuf::from(DEFAULT_COMMANDS_FILE),
            code: DEFAULT_HASH_CODE,
            capacity: DEFAULT_CAPACITY,
            style: TableStyle::Chaining,
            verbose: 0,
            grow_on_full: false,
        }
    }
}

impl RunConfig {
    /// Moves the commands file under [`DATA_DIR`].
    pub fn with_data_prefix(mut self) -> Self {
        self.commands_file = Path::new(DATA_DIR).join(&self.commands_file);
        self
    }

    /// Get the hash function the configured code selects.
    pub fn hash_function(&self) -> HashFunction {
        HashFunction::from_code(self.code)
    }

    /// Builds the configured table with its verbosity already set.
    ///
    /// # Errors
    ///
    /// - [`KeySlotError::InvalidCapacity`] if the capacity is 0.
    pub fn build_table(&self) -> Result<Box<dyn HashTable>, KeySlotError> {
        let mut table = new_table(self.capacity, self.style, self.code)?;
        table.set_verbose(self.verbose);
        Ok(table)
    }
}

/// Renders the settings summary printed after a run.
impl Display for RunConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Settings:")?;
        writeln!(
            f,
            "\tCommand file name:       {}",
            self.commands_file.display()
        )?;
        writeln!(f, "\tHash function:           {}", self.hash_function())?;
        writeln!(f, "\tHash size:               {}", self.capacity)?;
        writeln!(f, "\tTable style:             {}", self.style)?;
        write!(f, "\tVerbose level:           {}", self.verbose)
    }
}
