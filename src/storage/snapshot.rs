use log::{debug, info, warn};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::{EventDataSnapshot, TeamScoresSnapshot, TeamsSnapshot};
use crate::errors::{SyncError, SyncResult};

pub const TEAMS_FILE: &str = "teams.json";
pub const LEADERBOARD_FILE: &str = "leaderboard.json";
pub const EVENT_DATA_FILE: &str = "eventData.json";
pub const TEAM_SCORES_FILE: &str = "team-scores.json";

/// A snapshot that was just replaced on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFile {
    pub path: PathBuf,
    pub bytes: usize,
}

/// The JSON snapshots the website reads, all kept in one directory
pub struct SnapshotStore {
    data_dir: PathBuf,
}

impl SnapshotStore {
    /// Open the store, creating the data directory when it is missing
    pub fn create<P: AsRef<Path>>(data_dir: P) -> SyncResult<Self> {
        let data_dir = data_dir.as_ref().to_path_buf();
        fs::create_dir_all(&data_dir).map_err(|e| SyncError::file_system(&data_dir, e))?;
        Ok(Self { data_dir })
    }

    /// Open the store without touching the filesystem
    pub fn open<P: AsRef<Path>>(data_dir: P) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn path_of(&self, file: &str) -> PathBuf {
        self.data_dir.join(file)
    }

    // --- Snapshot Methods ---

    pub fn save_teams(&self, snapshot: &TeamsSnapshot) -> SyncResult<WrittenFile> {
        self.write_json(TEAMS_FILE, snapshot)
    }

    pub fn save_leaderboard(&self, payload: &Value) -> SyncResult<WrittenFile> {
        self.write_json(LEADERBOARD_FILE, payload)
    }

    pub fn save_event_data(&self, snapshot: &EventDataSnapshot) -> SyncResult<WrittenFile> {
        self.write_json(EVENT_DATA_FILE, snapshot)
    }

    pub fn save_team_scores(&self, snapshot: &TeamScoresSnapshot) -> SyncResult<WrittenFile> {
        self.write_json(TEAM_SCORES_FILE, snapshot)
    }

    pub fn load_team_scores(&self) -> SyncResult<TeamScoresSnapshot> {
        self.read_json(TEAM_SCORES_FILE)
    }

    /// The site-maintained `event` object from the current `eventData.json`.
    ///
    /// Anything short of a readable file with a set `event` yields `{}`. An
    /// `event` of `null`, `false`, `0` or `""` counts as unset.
    pub fn load_event_metadata(&self) -> Value {
        let empty = || Value::Object(Map::new());

        match self.read_json::<Value>(EVENT_DATA_FILE) {
            Ok(current) => match current.get("event") {
                Some(event) if !is_unset(event) => event.clone(),
                _ => empty(),
            },
            Err(e) if e.is_not_found() => {
                debug!("No existing {}, starting with empty event metadata", EVENT_DATA_FILE);
                empty()
            }
            Err(e) => {
                warn!("Ignoring unreadable {}: {}", EVENT_DATA_FILE, e);
                empty()
            }
        }
    }

    // --- Helper Methods ---

    /// Pretty-print `data` into `file`, replacing it atomically.
    pub fn write_json<T: Serialize>(&self, file: &str, data: &T) -> SyncResult<WrittenFile> {
        let path = self.path_of(file);
        let json = serde_json::to_string_pretty(data)
            .map_err(|e| SyncError::decode(format!("{} for writing", file), e))?;

        replace_file(&path, json.as_bytes())?;
        info!("Wrote {} ({} bytes)", path.display(), json.len());

        Ok(WrittenFile {
            path,
            bytes: json.len(),
        })
    }

    pub fn read_json<T: DeserializeOwned>(&self, file: &str) -> SyncResult<T> {
        let path = self.path_of(file);
        let json = fs::read_to_string(&path).map_err(|e| SyncError::file_system(&path, e))?;
        serde_json::from_str(&json).map_err(|e| SyncError::decode(path.display().to_string(), e))
    }
}

/// Write to a sibling temp file, then rename it over `path`.
fn replace_file(path: &Path, contents: &[u8]) -> SyncResult<()> {
    let temp_path = temp_path_for(path);

    if let Err(e) = fs::write(&temp_path, contents) {
        let _ = fs::remove_file(&temp_path);
        return Err(SyncError::file_system(&temp_path, e));
    }

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        SyncError::file_system(path, e)
    })
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

fn is_unset(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}
