//! JSON-file license stores under the user config directory
//!
//! Layout:
//! - `<dir>/cache/<key>.json`: one `CacheEntry` per cache key
//! - `<dir>/last_state.json`: the durable fallback record

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::StoreError;
use crate::record::LicenseRecord;

use super::{default_data_dir, CacheEntry, DurableFallbackStore, ShortTermCache};

const CACHE_DIRNAME: &str = "cache";
const LAST_STATE_FILENAME: &str = "last_state.json";

/// Short-term cache with one JSON file per key
#[derive(Debug, Clone)]
pub struct FileCache {
    dir: PathBuf,
}

impl FileCache {
    /// Cache rooted at `<data_dir>/cache`.
    pub fn new(data_dir: &Path) -> Self {
        Self {
            dir: data_dir.join(CACHE_DIRNAME),
        }
    }

    /// Cache rooted at `<config_dir>/artefactum/cache`.
    pub fn open_default() -> Result<Self, StoreError> {
        Ok(Self::new(&default_data_dir()?))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        let safe: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{safe}.json"))
    }
}

impl ShortTermCache for FileCache {
    fn get(&self, key: &str, now: u64) -> Result<Option<CacheEntry>, StoreError> {
        let path = self.entry_path(key);
        let Some(content) = read_optional(&path)? else {
            return Ok(None);
        };
        let entry: CacheEntry = serde_json::from_str(&content)?;
        Ok(entry.is_fresh(now).then_some(entry))
    }

    fn put(&self, key: &str, entry: CacheEntry) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.dir).map_err(|e| StoreError::io(&self.dir, e))?;
        let json = serde_json::to_string_pretty(&entry)?;
        write_replace(&self.entry_path(key), &json)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        remove_optional(&self.entry_path(key))
    }
}

/// Durable fallback kept in a single JSON file
#[derive(Debug, Clone)]
pub struct FileFallbackStore {
    path: PathBuf,
}

impl FileFallbackStore {
    /// Store at `<data_dir>/last_state.json`.
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(LAST_STATE_FILENAME),
        }
    }

    pub fn open_default() -> Result<Self, StoreError> {
        Ok(Self::new(&default_data_dir()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DurableFallbackStore for FileFallbackStore {
    fn load(&self) -> Result<Option<LicenseRecord>, StoreError> {
        match read_optional(&self.path)? {
            Some(content) => Ok(Some(serde_json::from_str(&content)?)),
            None => Ok(None),
        }
    }

    fn save(&self, record: &LicenseRecord) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }
        let json = serde_json::to_string_pretty(record)?;
        write_replace(&self.path, &json)
    }

    fn clear(&self) -> Result<(), StoreError> {
        remove_optional(&self.path)
    }
}

/// Writes `<path>.tmp` and renames it over `path`, so readers see either
/// the old file or the complete new one.
fn write_replace(path: &Path, contents: &str) -> Result<(), StoreError> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    std::fs::write(&tmp, contents).map_err(|e| StoreError::io(&tmp, e))?;
    std::fs::rename(&tmp, path).map_err(|e| StoreError::io(path, e))
}

fn read_optional(path: &Path) -> Result<Option<String>, StoreError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(StoreError::io(path, e)),
    }
}

fn remove_optional(path: &Path) -> Result<(), StoreError> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(StoreError::io(path, e)),
    }
}
