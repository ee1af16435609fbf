use anyhow::{ensure, Context};
use clap::{Args, Parser, Subcommand};
use keyslot::config::{RunConfig, DEFAULT_CAPACITY, DEFAULT_COMMANDS_FILE, DEFAULT_HASH_CODE};
use keyslot::driver::run_config;
use keyslot::experiment::{run_experiment, write_tsv, ExperimentParams};
use keyslot::factory::TableStyle;
use keyslot_core::Key;
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "keyslot",
    about = "Hash tables with pluggable hash functions and collision resolution",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run a command file against a table.
    Run(RunArgs),
    /// Compare collisions of probing tables across hash functions and key patterns.
    Experiment(ExperimentArgs),
}

#[derive(Args)]
pub struct RunArgs {
    /// File with one `insert|delete|search <key>` or `print` per line.
    #[arg(short, long, default_value = DEFAULT_COMMANDS_FILE)]
    pub commands: PathBuf,
    /// Hash function code: i, m, s, o, 4, f, r, c or d.
    #[arg(short = 'f', long = "hash", default_value_t = DEFAULT_HASH_CODE)]
    pub hash: char,
    /// Number of slots or buckets.
    #[arg(short, long, default_value_t = DEFAULT_CAPACITY)]
    pub size: usize,
    /// Table style: chain, linear, quad or double. Anything else selects the baseline table.
    #[arg(short = 't', long, default_value = "chain")]
    pub style: String,
    /// Trace level: 1 traces inserts and deletes, 2 also searches and collisions.
    #[arg(short, long, default_value_t = 0)]
    pub verbose: u8,
    /// Look the commands file up under the `data/` directory.
    #[arg(short, long)]
    pub prefix: bool,
    /// Grow a full open-addressing table instead of refusing the insert.
    #[arg(long)]
    pub grow_on_full: bool,
}

impl From<RunArgs> for RunConfig {
    fn from(args: RunArgs) -> Self {
        let config = RunConfig {
            commands_file: args.commands,
            code: args.hash,
            capacity: args.size,
            style: TableStyle::from_name(&args.style),
            verbose: args.verbose,
            grow_on_full: args.grow_on_full,
        };
        if args.prefix {
            config.with_data_prefix()
        } else {
            config
        }
    }
}

#[derive(Args)]
pub struct ExperimentArgs {
    /// Number of slots of every table.
    #[arg(short, long, default_value_t = 101)]
    pub size: usize,
    /// Number of keys generated per pattern.
    #[arg(short = 'n', long, default_value_t = 500)]
    pub keys: usize,
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
    /// Smallest generated key.
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    pub min: Key,
    /// Largest generated key.
    #[arg(long, default_value_t = 49_999, allow_hyphen_values = true)]
    pub max: Key,
    /// Percentage of the keys that is inserted. The rest is deleted afterwards.
    #[arg(
        long,
        default_value_t = 100,
        value_parser = clap::value_parser!(u8).range(0..=100)
    )]
    pub insert_pct: u8,
}

impl From<ExperimentArgs> for ExperimentParams {
    fn from(args: ExperimentArgs) -> Self {
        ExperimentParams {
            capacity: args.size,
            num_keys: args.keys,
            seed: args.seed,
            min: args.min,
            max: args.max,
            insert_percent: args.insert_pct,
            ..ExperimentParams::default()
        }
    }
}

pub fn execute_command<W: Write>(command: Command, out: &mut W) -> anyhow::Result<()> {
    match command {
        Command::Run(args) => {
            let config = RunConfig::from(args);
            ensure!(config.capacity > 0, "Hash size must be greater than 0");

            let (table, summary) = run_config(&config, &mut *out)
                .with_context(|| format!("Failed to run {}", config.commands_file.display()))?;
            writeln!(out)?;
            writeln!(out, "{}", config)?;
            writeln!(
                out,
                "\tCommands:                {} run, {} skipped, {} refused",
                summary.executed, summary.skipped, summary.refused
            )?;
            writeln!(
                out,
                "\tFinal size:              {} of {} (load {:.2})",
                table.size(),
                table.capacity(),
                table.load_factor()
            )?;
        }
        Command::Experiment(args) => {
            ensure!(args.min <= args.max, "--min must not exceed --max");
            let params = ExperimentParams::from(args);
            let rows = run_experiment(&params)?;
            write_tsv(&rows, out)?;
        }
    }
    Ok(())
}
