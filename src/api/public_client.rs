use anyhow::Result;
use async_trait::async_trait;
use log::{debug, info};
use serde_json::Value;

use super::parsers::extract_list;
use super::{Paging, PublicApi};
use crate::config::ApiSettings;
use crate::domain::{RawRecord, Team, TeamScore};
use crate::errors::SyncResult;
use crate::http::JsonClient;

const LEADERBOARD_LIMIT: usize = 100;

/// Client for the `/api/public` endpoints
pub struct PublicApiClient {
    client: JsonClient,
    base_url: String,
}

impl PublicApiClient {
    pub fn new(settings: &ApiSettings) -> Result<Self> {
        let client = JsonClient::new(settings.user_agent, settings.timeout_secs)?;
        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// GET a list endpoint and return the records under `key`
    pub async fn fetch_collection<T>(
        &self,
        endpoint: &str,
        paging: Paging,
        key: &str,
    ) -> SyncResult<Vec<T>>
    where
        T: serde::de::DeserializeOwned,
    {
        let url = self.build_url(endpoint, paging);
        debug!("GET {}", url);
        let data = self.client.get_json(&url).await?;
        let records: Vec<T> = extract_list(data, key)?;
        info!("Fetched {} {}", records.len(), key);
        Ok(records)
    }

    // --- Helper Methods ---

    fn build_url(&self, endpoint: &str, paging: Paging) -> String {
        paging.apply(&format!("{}{}", self.base_url, endpoint))
    }

    fn team_scores_endpoint(team_id: &str) -> String {
        format!("/teams/{}/scores", urlencoding::encode(team_id))
    }
}

#[async_trait]
impl PublicApi for PublicApiClient {
    fn source(&self) -> &str {
        &self.base_url
    }

    async fn fetch_teams(&self) -> SyncResult<Vec<Team>> {
        self.fetch_collection("/teams", Paging::all(), "teams").await
    }

    async fn fetch_rounds(&self) -> SyncResult<Vec<RawRecord>> {
        self.fetch_collection("/rounds", Paging::all(), "rounds").await
    }

    async fn fetch_rolling_events(&self) -> SyncResult<Vec<RawRecord>> {
        self.fetch_collection("/rolling-events", Paging::all(), "rolling_events")
            .await
    }

    async fn fetch_leaderboard(&self) -> SyncResult<Value> {
        let url = self.build_url("/leaderboard", Paging::new().with_limit(LEADERBOARD_LIMIT));
        debug!("GET {}", url);
        self.client.get_json(&url).await
    }

    async fn fetch_team_scores(&self, team_id: &str) -> SyncResult<Vec<TeamScore>> {
        let url = self.build_url(&Self::team_scores_endpoint(team_id), Paging::new());
        let data = self.client.get_json(&url).await?;
        let scores: Vec<TeamScore> = extract_list(data, "scores")?;
        Ok(scores.into_iter().map(TeamScore::with_remote_rank).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> PublicApiClient {
        let settings = ApiSettings {
            base_url: "http://localhost:8000/api/public/".to_string(),
            ..ApiSettings::default()
        };
        PublicApiClient::new(&settings).unwrap()
    }

    #[test]
    fn test_build_url() {
        let api = client();
        assert_eq!(api.source(), "http://localhost:8000/api/public");
        assert_eq!(
            api.build_url("/rounds", Paging::all()),
            "http://localhost:8000/api/public/rounds?skip=0&limit=1000"
        );
        assert_eq!(
            api.build_url("/leaderboard", Paging::new().with_limit(LEADERBOARD_LIMIT)),
            "http://localhost:8000/api/public/leaderboard?limit=100"
        );
    }

    #[test]
    fn test_team_scores_endpoint_is_encoded() {
        assert_eq!(PublicApiClient::team_scores_endpoint("CRES001"), "/teams/CRES001/scores");
        assert_eq!(PublicApiClient::team_scores_endpoint("A B/1"), "/teams/A%20B%2F1/scores");
    }
}
