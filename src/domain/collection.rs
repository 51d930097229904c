use super::models::{TeamScore, TeamScoresSnapshot};
use indexmap::IndexMap;

/// Score lists indexed by team id, in insertion order.
///
/// Each team id is filled in by exactly one worker, so inserts never race on
/// the same key; the map is only assembled after all workers finished.
pub struct TeamScoreBook {
    scores: IndexMap<String, Vec<TeamScore>>,
}

impl TeamScoreBook {
    pub fn new() -> Self {
        Self {
            scores: IndexMap::new(),
        }
    }

    pub fn insert(&mut self, team_id: String, scores: Vec<TeamScore>) {
        self.scores.insert(team_id, scores);
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn get(&self, team_id: &str) -> Option<&[TeamScore]> {
        self.scores.get(team_id).map(Vec::as_slice)
    }

    pub fn into_snapshot(self) -> TeamScoresSnapshot {
        TeamScoresSnapshot {
            team_scores: self.scores,
        }
    }
}

impl Default for TeamScoreBook {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_snapshot_keeps_insertion_order() {
        let mut book = TeamScoreBook::new();
        assert!(book.is_empty());

        let score: TeamScore = serde_json::from_value(json!({"round_id": 1, "score": 3})).unwrap();
        book.insert("B".to_string(), vec![score]);
        book.insert("A".to_string(), Vec::new());

        assert_eq!(book.len(), 2);
        assert_eq!(book.get("B").map(<[TeamScore]>::len), Some(1));
        assert_eq!(book.get("C"), None);

        let snapshot = book.into_snapshot();
        let keys: Vec<&String> = snapshot.team_scores.keys().collect();
        assert_eq!(keys, ["B", "A"]);
    }
}
