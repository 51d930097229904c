use indexmap::IndexMap;
use log::debug;
use std::collections::BTreeMap;

use super::competition::competition_ranks;
use crate::domain::TeamScore;

/// What a recalculation touched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RankSummary {
    /// Rounds with at least one positive score
    pub rounds_ranked: usize,
    /// Score records that received a rank
    pub scores_ranked: usize,
}

type TeamScores = IndexMap<String, Vec<TeamScore>>;

/// A qualifying score and where it lives in the team map
struct Entry<'a> {
    team_id: &'a str,
    index: usize,
    score: f64,
}

/// Recompute `round_rank` for every positive score, round by round.
///
/// Records with a missing or non-positive score, or without a `round_id`,
/// keep whatever `round_rank` they already had.
pub fn recalculate_round_ranks(team_scores: &mut TeamScores) -> RankSummary {
    let assignments = compute_assignments(team_scores);
    let mut summary = RankSummary::default();

    for (round, ranked) in assignments {
        debug!("Round {}: ranking {} scores", round, ranked.len());
        summary.rounds_ranked += 1;
        summary.scores_ranked += ranked.len();

        for (team_id, index, rank) in ranked {
            if let Some(score) = team_scores.get_mut(&team_id).and_then(|s| s.get_mut(index)) {
                score.set_round_rank(rank);
            }
        }
    }

    summary
}

/// Per round, the (team id, index, rank) triples to write back.
fn compute_assignments(
    team_scores: &TeamScores,
) -> BTreeMap<String, Vec<(String, usize, usize)>> {
    let buckets = bucket_by_round(team_scores);

    buckets
        .into_iter()
        .map(|(round, mut entries)| {
            entries.sort_by(|a, b| b.score.total_cmp(&a.score));
            let scores: Vec<f64> = entries.iter().map(|e| e.score).collect();
            let ranked = entries
                .iter()
                .zip(competition_ranks(&scores))
                .map(|(e, rank)| (e.team_id.to_string(), e.index, rank))
                .collect();
            (round, ranked)
        })
        .collect()
}

fn bucket_by_round(team_scores: &TeamScores) -> BTreeMap<String, Vec<Entry<'_>>> {
    let mut buckets: BTreeMap<String, Vec<Entry<'_>>> = BTreeMap::new();

    for (team_id, scores) in team_scores {
        for (index, record) in scores.iter().enumerate() {
            // Records that name no round are left unranked rather than
            // pooled into one catch-all round.
            let (Some(round), Some(score)) = (record.round_key(), record.score()) else {
                continue;
            };
            if score > 0.0 {
                buckets.entry(round).or_default().push(Entry {
                    team_id: team_id.as_str(),
                    index,
                    score,
                });
            }
        }
    }

    buckets
}
