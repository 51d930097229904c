use anyhow::Result;
use colored::Colorize;

use event_data_sync::cli::{Cli, Command};
use event_data_sync::{handle_rank, handle_sync, interpret};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("{} {e:#}", "Error:".red().bold());
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let cli = interpret();
    execute_command(&cli)
}

fn execute_command(cli: &Cli) -> Result<()> {
    let data_dir = cli.data_dir.as_deref();
    match cli.command {
        Command::Sync => handle_sync(data_dir),
        Command::Rank => handle_rank(data_dir),
    }
}
