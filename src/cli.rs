use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Event website data sync")]
pub struct Cli {
    /// Directory holding the JSON snapshots (overrides SYNC_DATA_DIR)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Fetch teams, rounds, rolling events, leaderboard and scores from the public API
    Sync,
    /// Recompute per-round ranks in team-scores.json from the stored scores
    Rank,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_subcommands() {
        let cli = Cli::try_parse_from(["event-sync", "sync"]).unwrap();
        assert_eq!(cli.command, Command::Sync);
        assert!(cli.data_dir.is_none());

        let cli = Cli::try_parse_from(["event-sync", "rank", "--data-dir", "/tmp/data"]).unwrap();
        assert_eq!(cli.command, Command::Rank);
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/data")));
    }

    #[test]
    fn test_subcommand_is_required() {
        assert!(Cli::try_parse_from(["event-sync"]).is_err());
    }
}
