use log::warn;
use std::path::{Path, PathBuf};
use std::str::FromStr;

const ENV_BASE_URL: &str = "SYNC_API_BASE_URL";
const ENV_TIMEOUT_SECS: &str = "SYNC_TIMEOUT_SECS";
const ENV_CONCURRENCY: &str = "SYNC_CONCURRENCY";
const ENV_DATA_DIR: &str = "SYNC_DATA_DIR";

#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub user_agent: &'static str,
    pub timeout_secs: u64,
    /// Number of workers draining the team score queue
    pub concurrency: usize,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://13.233.80.196:8000/api/public".to_string(),
            user_agent: "EventDataSync/1.0",
            timeout_secs: 30,
            concurrency: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct StorageSettings {
    pub data_dir: PathBuf,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("src/data"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub api: ApiSettings,
    pub storage: StorageSettings,
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden by the `SYNC_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new();

        if let Some(url) = lookup(ENV_BASE_URL) {
            config.api.base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(secs) = parse_number::<u64>(ENV_TIMEOUT_SECS, lookup(ENV_TIMEOUT_SECS)) {
            config.api.timeout_secs = secs;
        }
        if let Some(workers) = parse_number::<usize>(ENV_CONCURRENCY, lookup(ENV_CONCURRENCY)) {
            config.api.concurrency = workers.max(1);
        }
        if let Some(dir) = lookup(ENV_DATA_DIR) {
            config.storage.data_dir = PathBuf::from(dir);
        }

        config
    }

    pub fn with_data_dir(mut self, data_dir: Option<&Path>) -> Self {
        if let Some(dir) = data_dir {
            self.storage.data_dir = dir.to_path_buf();
        }
        self
    }
}

fn parse_number<T: FromStr>(key: &str, raw: Option<String>) -> Option<T> {
    let raw = raw?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring {}={:?}: not a valid number", key, raw);
            None
        }
    }
}
