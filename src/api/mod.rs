mod paging;
pub mod parsers;
mod public_client;

pub use paging::Paging;
pub use public_client::PublicApiClient;

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::{RawRecord, Team, TeamScore};
use crate::errors::SyncResult;

/// Read-only view of the event's public API
#[async_trait]
pub trait PublicApi: Send + Sync {
    /// Where the data comes from, for logging
    fn source(&self) -> &str;

    async fn fetch_teams(&self) -> SyncResult<Vec<Team>>;

    async fn fetch_rounds(&self) -> SyncResult<Vec<RawRecord>>;

    async fn fetch_rolling_events(&self) -> SyncResult<Vec<RawRecord>>;

    /// The leaderboard payload, kept verbatim
    async fn fetch_leaderboard(&self) -> SyncResult<Value>;

    /// One team's scores with `round_rank` seeded from the API's `rank`
    async fn fetch_team_scores(&self, team_id: &str) -> SyncResult<Vec<TeamScore>>;
}
