//! Error types for license fetching, storage and configuration

use std::path::PathBuf;

/// Why a remote license check did not produce a record.
///
/// The resolver never returns these to its callers; they are logged and
/// turned into a fallback record.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("license API returned HTTP {status}: {body}")]
    Upstream { status: u16, body: String },
    #[error("invalid license API response ({reason}): {body}")]
    MalformedResponse { body: String, reason: String },
}

impl FetchError {
    /// HTTP status of the failed response, when one was received.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            FetchError::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not (de)serialize stored license record: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("lock poisoned: {0}")]
    LockPoisoned(String),
    #[error("could not determine config directory")]
    NoConfigDir,
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("could not serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("could not write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid configuration: {0}")]
    Invalid(String),
}
