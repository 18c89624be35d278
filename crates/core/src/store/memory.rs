//! In-memory license stores

use std::collections::HashMap;
use std::sync::{Mutex, RwLock};

use crate::error::StoreError;
use crate::record::LicenseRecord;

use super::{CacheEntry, DurableFallbackStore, ShortTermCache};

/// In-memory short-term cache backed by `HashMap<String, CacheEntry>`
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries, fresh or not.
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Raw entry under `key`, ignoring expiry.
    pub fn peek(&self, key: &str) -> Option<CacheEntry> {
        self.entries.read().ok()?.get(key).cloned()
    }
}

impl ShortTermCache for MemoryCache {
    fn get(&self, key: &str, now: u64) -> Result<Option<CacheEntry>, StoreError> {
        let entries = self
            .entries
            .read()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))?;
        Ok(entries.get(key).filter(|e| e.is_fresh(now)).cloned())
    }

    fn put(&self, key: &str, entry: CacheEntry) -> Result<(), StoreError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))?;
        entries.insert(key.to_string(), entry);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))?;
        entries.remove(key);
        Ok(())
    }
}

/// In-memory single-slot fallback store
#[derive(Debug, Default)]
pub struct MemoryFallbackStore {
    slot: Mutex<Option<LicenseRecord>>,
}

impl MemoryFallbackStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with `record`.
    pub fn with_record(record: LicenseRecord) -> Self {
        Self {
            slot: Mutex::new(Some(record)),
        }
    }
}

impl DurableFallbackStore for MemoryFallbackStore {
    fn load(&self) -> Result<Option<LicenseRecord>, StoreError> {
        let slot = self
            .slot
            .lock()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))?;
        Ok(slot.clone())
    }

    fn save(&self, record: &LicenseRecord) -> Result<(), StoreError> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))?;
        *slot = Some(record.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))?;
        *slot = None;
        Ok(())
    }
}
