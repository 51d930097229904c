use anyhow::{Context, Result};
use colored::Colorize;
use futures::future::join_all;
use log::{info, warn};
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, PoisonError};

use crate::api::PublicApi;
use crate::domain::{
    self, EventDataSnapshot, RawRecord, ScoreProgress, Team, TeamBreakdown, TeamScore,
    TeamScoreBook, TeamsSnapshot,
};
use crate::storage::{SnapshotStore, WrittenFile};

type TeamQueue = Mutex<VecDeque<String>>;

/// Everything a successful sync wrote
#[derive(Debug, Default)]
pub struct SyncReport {
    pub written: Vec<WrittenFile>,
    /// Teams whose score fetch failed and were stored with no scores
    pub failed_teams: Vec<String>,
}

impl SyncReport {
    pub fn print_summary(&self) {
        println!("{}", "Sync complete.".green().bold());
        for file in &self.written {
            println!("  {} {} ({} bytes)", "wrote".green(), file.path.display(), file.bytes);
        }
        if !self.failed_teams.is_empty() {
            println!(
                "  {} no scores for: {}",
                "warning".yellow(),
                self.failed_teams.join(", ")
            );
        }
    }
}

/// The four top-level collections, fetched together
struct Collections {
    teams: Vec<Team>,
    rounds: Vec<RawRecord>,
    rolling_events: Vec<RawRecord>,
    leaderboard: Value,
}

pub struct SyncService<A: PublicApi> {
    api: A,
    store: SnapshotStore,
    concurrency: usize,
}

impl<A: PublicApi> SyncService<A> {
    pub fn new(api: A, store: SnapshotStore, concurrency: usize) -> Self {
        Self {
            api,
            store,
            concurrency: concurrency.max(1),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub async fn run(&self) -> Result<SyncReport> {
        info!("=== Syncing from {} ===", self.api.source());
        info!("Snapshots go to {}", self.store.data_dir().display());

        // Step 1: All top-level collections, or nothing
        let collections = self.fetch_collections().await?;
        self.log_fetched(&collections);

        // Step 2: Snapshots that need no further requests
        let mut report = SyncReport::default();
        report.written.push(self.write_teams(&collections.teams)?);
        report.written.push(self.write_leaderboard(&collections.leaderboard)?);
        report
            .written
            .push(self.write_event_data(&collections.rounds, &collections.rolling_events)?);

        // Step 3: Per-team scores
        let (book, failed_teams) = self.fetch_all_team_scores(&collections.teams).await;
        report.failed_teams = failed_teams;
        report.written.push(self.write_team_scores(book)?);

        info!("=== Sync Complete ===");
        Ok(report)
    }

    async fn fetch_collections(&self) -> Result<Collections> {
        let (teams, rounds, rolling_events, leaderboard) = tokio::try_join!(
            self.api.fetch_teams(),
            self.api.fetch_rounds(),
            self.api.fetch_rolling_events(),
            self.api.fetch_leaderboard(),
        )
        .context("Failed to fetch top-level collections")?;

        Ok(Collections {
            teams,
            rounds,
            rolling_events,
            leaderboard,
        })
    }

    fn log_fetched(&self, collections: &Collections) {
        info!(
            "Fetched: teams={}, rounds={}, rolling_events={}, leaderboard={}",
            collections.teams.len(),
            collections.rounds.len(),
            collections.rolling_events.len(),
            domain::leaderboard_len(&collections.leaderboard)
        );

        info!("  → Teams: {}", TeamBreakdown::from_teams(&collections.teams));
    }

    fn write_teams(&self, teams: &[Team]) -> Result<WrittenFile> {
        let snapshot = TeamsSnapshot {
            teams: teams.to_vec(),
        };
        Ok(self.store.save_teams(&snapshot)?)
    }

    fn write_leaderboard(&self, leaderboard: &Value) -> Result<WrittenFile> {
        Ok(self.store.save_leaderboard(leaderboard)?)
    }

    /// Replace rounds and rolling events; carry the site's `event` object over.
    fn write_event_data(
        &self,
        rounds: &[RawRecord],
        rolling_events: &[RawRecord],
    ) -> Result<WrittenFile> {
        let snapshot = EventDataSnapshot {
            event: self.store.load_event_metadata(),
            rounds: rounds.iter().map(domain::map_round).collect(),
            rolling_events: rolling_events.iter().map(domain::map_rolling_event).collect(),
        };
        info!(
            "  → {} rounds ({} wildcard), {} rolling events",
            snapshot.rounds.len(),
            snapshot.rounds.iter().filter(|r| r.is_wildcard()).count(),
            snapshot.rolling_events.len()
        );
        Ok(self.store.save_event_data(&snapshot)?)
    }

    fn write_team_scores(&self, book: TeamScoreBook) -> Result<WrittenFile> {
        Ok(self.store.save_team_scores(&book.into_snapshot())?)
    }

    /// Drain a shared queue of team ids with a fixed number of workers.
    async fn fetch_all_team_scores(&self, teams: &[Team]) -> (TeamScoreBook, Vec<String>) {
        info!("Fetching scores for {} teams ({} workers)...", teams.len(), self.concurrency);

        let queue: TeamQueue = Mutex::new(teams.iter().map(|t| t.team_id().to_string()).collect());
        let progress = ScoreProgress::new(teams.len());

        let workers = (0..self.concurrency).map(|_| self.drain_queue(&queue, &progress));
        let batches = join_all(workers).await;
        progress.finish();

        // Completion order is arbitrary; lay the map out in roster order.
        let mut outcomes: HashMap<String, Option<Vec<TeamScore>>> =
            batches.into_iter().flatten().collect();
        let mut book = TeamScoreBook::new();
        let mut failed = Vec::new();
        for team in teams {
            let Some(outcome) = outcomes.remove(team.team_id()) else {
                continue;
            };
            match outcome {
                Some(scores) => book.insert(team.team_id().to_string(), scores),
                None => {
                    book.insert(team.team_id().to_string(), Vec::new());
                    failed.push(team.team_id().to_string());
                }
            }
        }

        info!(
            "  → Scores for {} teams ({} fetched, {} failed)",
            book.len(),
            progress.fetched(),
            progress.failed()
        );
        (book, failed)
    }

    /// One worker: pop ids until the queue is empty. `None` marks a failed fetch.
    async fn drain_queue(
        &self,
        queue: &TeamQueue,
        progress: &ScoreProgress,
    ) -> Vec<(String, Option<Vec<TeamScore>>)> {
        let mut fetched = Vec::new();

        while let Some(team_id) = next_team(queue) {
            let outcome = match self.api.fetch_team_scores(&team_id).await {
                Ok(scores) => {
                    progress.record_fetched();
                    Some(scores)
                }
                Err(e) => {
                    warn!("Failed to fetch scores for {}: {}", team_id, e);
                    progress.record_failed();
                    None
                }
            };
            fetched.push((team_id, outcome));
        }

        fetched
    }
}

/// Pop one id; the lock is released before the caller awaits anything.
fn next_team(queue: &TeamQueue) -> Option<String> {
    let mut guard = queue.lock().unwrap_or_else(PoisonError::into_inner);
    guard.pop_front()
}
