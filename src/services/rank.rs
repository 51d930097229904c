use anyhow::{Context, Result};
use colored::Colorize;
use log::info;

use crate::ranking::{self, RankSummary};
use crate::storage::{SnapshotStore, TEAM_SCORES_FILE, WrittenFile};

#[derive(Debug)]
pub struct RankReport {
    pub summary: RankSummary,
    pub written: WrittenFile,
}

impl RankReport {
    pub fn print_summary(&self) {
        println!(
            "{} {} ({} scores across {} rounds)",
            "Updated round ranks in".green().bold(),
            self.written.path.display(),
            self.summary.scores_ranked,
            self.summary.rounds_ranked
        );
    }
}

/// Recomputes `round_rank` in `team-scores.json` from the stored scores
pub struct RankService {
    store: SnapshotStore,
}

impl RankService {
    pub fn new(store: SnapshotStore) -> Self {
        Self { store }
    }

    pub fn run(&self) -> Result<RankReport> {
        info!("=== Recalculating Round Ranks ===");

        let mut snapshot = self
            .store
            .load_team_scores()
            .with_context(|| format!("Failed to load {}", TEAM_SCORES_FILE))?;
        info!("  → Loaded scores for {} teams", snapshot.team_scores.len());

        let summary = ranking::recalculate_round_ranks(&mut snapshot.team_scores);
        info!(
            "  → Ranked {} scores across {} rounds",
            summary.scores_ranked, summary.rounds_ranked
        );

        let written = self
            .store
            .save_team_scores(&snapshot)
            .with_context(|| format!("Failed to write {}", TEAM_SCORES_FILE))?;

        info!("=== Ranks Updated ===");
        Ok(RankReport { summary, written })
    }
}
