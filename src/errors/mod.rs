use std::path::PathBuf;
use thiserror::Error;

/// Longest response body kept in a [`SyncError::RemoteFetch`].
pub const BODY_SNIPPET_CHARS: usize = 200;

/// Errors raised while fetching from the public API or touching the snapshots
#[derive(Error, Debug)]
pub enum SyncError {
    /// The API answered with a non-2xx status
    #[error("HTTP {status} for {url}: {body}")]
    RemoteFetch {
        url: String,
        status: u16,
        body: String,
    },

    /// A payload (remote or on disk) was not the JSON we expected
    #[error("Failed to decode {context}: {source}")]
    Decode {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The request never produced a response (connect, timeout, ...)
    #[error("Request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Filesystem error at {}: {source}", .path.display())]
    FileSystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SyncError {
    pub fn remote_fetch(url: &str, status: u16, body: &str) -> Self {
        SyncError::RemoteFetch {
            url: url.to_string(),
            status,
            body: body_snippet(body),
        }
    }

    pub fn decode(context: impl Into<String>, source: serde_json::Error) -> Self {
        SyncError::Decode {
            context: context.into(),
            source,
        }
    }

    pub fn file_system(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SyncError::FileSystem {
            path: path.into(),
            source,
        }
    }

    /// Missing files are tolerated in a few places (e.g. the event metadata).
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            SyncError::FileSystem { source, .. } if source.kind() == std::io::ErrorKind::NotFound
        )
    }
}

pub type SyncResult<T> = Result<T, SyncError>;

fn body_snippet(body: &str) -> String {
    body.chars().take(BODY_SNIPPET_CHARS).collect()
}
