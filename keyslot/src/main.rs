mod cli;

use clap::Parser;
use cli::{execute_command, Cli};
use keyslot::logger::initialize_logger;

fn main() -> anyhow::Result<()> {
    initialize_logger();
    let cli = Cli::parse();
    let stdout = std::io::stdout();
    execute_command(cli.command, &mut stdout.lock())
}
