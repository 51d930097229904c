mod snapshot;

pub use snapshot::{
    EVENT_DATA_FILE, LEADERBOARD_FILE, SnapshotStore, TEAM_SCORES_FILE, TEAMS_FILE, WrittenFile,
};
