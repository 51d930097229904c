use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// An API record kept exactly as received
pub type RawRecord = Map<String, Value>;

// --- Teams ---

/// Team as served by `/teams`. Only `team_id` is interpreted; the record is
/// written back exactly as received, key order included.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "RawRecord", into = "RawRecord")]
pub struct Team {
    team_id: String,
    fields: RawRecord,
}

impl Team {
    pub fn team_id(&self) -> &str {
        &self.team_id
    }

    pub fn status(&self) -> TeamStatus {
        self.fields
            .get("status")
            .and_then(Value::as_str)
            .map(TeamStatus::from_raw)
            .unwrap_or(TeamStatus::Other)
    }
}

impl TryFrom<RawRecord> for Team {
    type Error = String;

    fn try_from(fields: RawRecord) -> Result<Self, Self::Error> {
        let team_id = fields
            .get("team_id")
            .and_then(Value::as_str)
            .ok_or_else(|| "team record without a string `team_id`".to_string())?
            .to_string();
        Ok(Self { team_id, fields })
    }
}

impl From<Team> for RawRecord {
    fn from(team: Team) -> Self {
        team.fields
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeamStatus {
    Active,
    Eliminated,
    Completed,
    Other,
}

impl TeamStatus {
    pub fn from_raw(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "active" => TeamStatus::Active,
            "eliminated" => TeamStatus::Eliminated,
            "completed" => TeamStatus::Completed,
            _ => TeamStatus::Other,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            TeamStatus::Active => "active",
            TeamStatus::Eliminated => "eliminated",
            TeamStatus::Completed => "completed",
            TeamStatus::Other => "other",
        }
    }
}

/// Team counts per lifecycle status
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamBreakdown {
    pub active: usize,
    pub eliminated: usize,
    pub completed: usize,
    pub other: usize,
}

impl TeamBreakdown {
    pub fn from_teams(teams: &[Team]) -> Self {
        let mut breakdown = Self::default();
        for team in teams {
            match team.status() {
                TeamStatus::Active => breakdown.active += 1,
                TeamStatus::Eliminated => breakdown.eliminated += 1,
                TeamStatus::Completed => breakdown.completed += 1,
                TeamStatus::Other => breakdown.other += 1,
            }
        }
        breakdown
    }
}

impl fmt::Display for TeamBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts = [
            (self.active, TeamStatus::Active),
            (self.eliminated, TeamStatus::Eliminated),
            (self.completed, TeamStatus::Completed),
            (self.other, TeamStatus::Other),
        ];
        let parts: Vec<String> = counts
            .iter()
            .map(|(count, status)| format!("{} {}", count, status.as_str()))
            .collect();
        write!(f, "{}", parts.join(", "))
    }
}

// --- Scores ---

/// One team's result in one round, kept as the raw record.
///
/// `round_rank` is the only key this crate ever writes. Writing it in place
/// keeps its position; a new one is appended.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct TeamScore {
    pub fields: RawRecord,
}

impl TeamScore {
    pub fn round_rank(&self) -> Option<&Value> {
        self.fields.get(ROUND_RANK)
    }

    /// Bucket key for the round; numeric and textual ids with the same text collide.
    pub fn round_key(&self) -> Option<String> {
        match self.fields.get("round_id")? {
            Value::String(id) => Some(id.clone()),
            Value::Number(id) => Some(id.to_string()),
            _ => None,
        }
    }

    pub fn score(&self) -> Option<f64> {
        self.fields.get("score").and_then(Value::as_f64)
    }

    /// Seed `round_rank` from the rank the API computed. Without a remote
    /// `rank` there is no `round_rank` either.
    pub fn with_remote_rank(mut self) -> Self {
        match self.fields.get("rank").cloned() {
            Some(rank) => {
                self.fields.insert(ROUND_RANK.to_string(), rank);
            }
            None => {
                self.fields.shift_remove(ROUND_RANK);
            }
        }
        self
    }

    pub fn set_round_rank(&mut self, rank: usize) {
        self.fields.insert(ROUND_RANK.to_string(), Value::from(rank));
    }
}

const ROUND_RANK: &str = "round_rank";

// --- Rounds and rolling events (local schema) ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Round {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub round_number: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub club: Option<Value>,
    #[serde(rename = "type")]
    pub round_type: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Value>,
    pub extended_description: Value,
    pub form_link: Value,
    pub contact: Value,
    pub venue: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub round_code: Option<Value>,
    pub is_evaluated: Value,
    pub is_frozen: Value,
    pub is_wildcard: Value,
    pub criteria: Value,
    pub max_score: Value,
    pub min_score: Value,
    pub avg_score: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Value>,
}

impl Round {
    pub fn is_wildcard(&self) -> bool {
        self.is_wildcard.as_bool().unwrap_or(false)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RollingEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    pub event_id: Value,
    pub event_code: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<Value>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub event_type: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub club: Option<Value>,
    pub date: Value,
    pub start_date: Value,
    pub end_date: Value,
    pub venue: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Value>,
    pub extended_description: Value,
    pub form_link: Value,
    pub contact: Value,
    pub status: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Value>,
}

// --- Snapshot files ---

/// `teams.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TeamsSnapshot {
    pub teams: Vec<Team>,
}

/// `eventData.json`. `event` is owned by the site, not by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EventDataSnapshot {
    pub event: Value,
    pub rounds: Vec<Round>,
    pub rolling_events: Vec<RollingEvent>,
}

/// `team-scores.json`, teams in file (or roster) order
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TeamScoresSnapshot {
    pub team_scores: IndexMap<String, Vec<TeamScore>>,
}

/// Number of entries in a `/leaderboard` payload.
pub fn leaderboard_len(payload: &Value) -> usize {
    payload
        .get("leaderboard")
        .and_then(Value::as_array)
        .map_or(0, Vec::len)
}
