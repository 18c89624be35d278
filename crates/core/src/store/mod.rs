//! Storage abstraction for license records
//!
//! Two capabilities, each behind its own trait:
//! - `ShortTermCache`: keyed, time-boxed entries (a pure optimisation)
//! - `DurableFallbackStore`: one slot holding the last good record, no expiry
//!
//! Both come in an in-memory flavour (`memory`) and a JSON-file flavour
//! (`file`). Implementations provide their own per-key atomicity; callers
//! add no locking on top.

pub mod file;
pub mod memory;

pub use file::{FileCache, FileFallbackStore};
pub use memory::{MemoryCache, MemoryFallbackStore};

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::record::LicenseRecord;

/// Directory name under the user config dir.
pub const APP_DIR: &str = "artefactum";

/// A record together with the moment it was cached and for how long.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub record: LicenseRecord,
    pub stored_at: u64,
    pub ttl_secs: u64,
}

impl CacheEntry {
    pub fn new(record: LicenseRecord, ttl: Duration, now: u64) -> Self {
        Self {
            record,
            stored_at: now,
            ttl_secs: ttl.as_secs(),
        }
    }

    /// Fresh while strictly less than `ttl_secs` have elapsed.
    pub fn is_fresh(&self, now: u64) -> bool {
        now.saturating_sub(self.stored_at) < self.ttl_secs
    }

    pub fn expires_at(&self) -> u64 {
        self.stored_at.saturating_add(self.ttl_secs)
    }
}

/// Time-boxed cache keyed by [`crate::domain::cache_key`].
pub trait ShortTermCache: Send + Sync {
    /// Returns the entry under `key` if it is still fresh at `now`.
    fn get(&self, key: &str, now: u64) -> Result<Option<CacheEntry>, StoreError>;

    /// Stores `entry` under `key`, replacing whatever was there.
    fn put(&self, key: &str, entry: CacheEntry) -> Result<(), StoreError>;

    /// Removes `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Last successfully fetched record, kept indefinitely.
pub trait DurableFallbackStore: Send + Sync {
    fn load(&self) -> Result<Option<LicenseRecord>, StoreError>;

    fn save(&self, record: &LicenseRecord) -> Result<(), StoreError>;

    /// Empties the slot. Clearing an empty slot is not an error.
    fn clear(&self) -> Result<(), StoreError>;
}

/// Returns `<config_dir>/artefactum/`, creating it if needed.
pub fn default_data_dir() -> Result<PathBuf, StoreError> {
    let dir = dirs::config_dir().ok_or(StoreError::NoConfigDir)?.join(APP_DIR);
    std::fs::create_dir_all(&dir).map_err(|e| StoreError::io(&dir, e))?;
    Ok(dir)
}
