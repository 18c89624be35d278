//! Tests for the short-term cache and durable fallback stores

use artefactum_core::store::{
    CacheEntry, FileCache, FileFallbackStore, MemoryCache, MemoryFallbackStore,
};
use artefactum_core::{
    cache_key, DurableFallbackStore, LicenseMessage, LicenseRecord, LicenseStatus,
    MessagePriority, ShortTermCache,
};
use std::time::Duration;

const TTL: Duration = Duration::from_secs(4 * 60 * 60);

fn record(domain: &str, status: LicenseStatus) -> LicenseRecord {
    LicenseRecord {
        domain: domain.to_string(),
        valid: status == LicenseStatus::Active,
        status,
        license_key: Some("ART-1".to_string()),
        expiry_date: chrono::NaiveDate::from_ymd_opt(2030, 1, 1),
        days_remaining: None,
        grace_period: false,
        pre_warning: false,
        message: None,
        messages: vec![LicenseMessage::new("hello", MessagePriority::Info)],
    }
}

// --- CacheEntry ---

#[test]
fn entry_freshness_boundaries() {
    let entry = CacheEntry::new(record("a", LicenseStatus::Active), TTL, 1000);
    assert!(entry.is_fresh(1000));
    assert!(entry.is_fresh(1000 + TTL.as_secs() - 1));
    assert!(!entry.is_fresh(1000 + TTL.as_secs()));
    assert_eq!(entry.expires_at(), 1000 + TTL.as_secs());
}

#[test]
fn entry_is_fresh_when_clock_goes_backwards() {
    let entry = CacheEntry::new(record("a", LicenseStatus::Active), TTL, 1000);
    assert!(entry.is_fresh(10));
}

// --- Shared behaviour for both cache implementations ---

fn exercise_cache(cache: &dyn ShortTermCache) {
    let key = cache_key("example.com");
    assert!(cache.get(&key, 0).unwrap().is_none());

    let rec = record("example.com", LicenseStatus::Active);
    cache.put(&key, CacheEntry::new(rec.clone(), TTL, 100)).unwrap();

    let hit = cache.get(&key, 200).unwrap().unwrap();
    assert_eq!(hit.record, rec);
    assert!(cache.get(&key, 100 + TTL.as_secs()).unwrap().is_none());

    // Last writer wins
    let newer = record("example.com", LicenseStatus::Expired);
    cache
        .put(&key, CacheEntry::new(newer.clone(), TTL, 300))
        .unwrap();
    assert_eq!(cache.get(&key, 300).unwrap().unwrap().record, newer);

    cache.remove(&key).unwrap();
    assert!(cache.get(&key, 300).unwrap().is_none());
    cache.remove(&key).unwrap();
}

fn exercise_fallback(store: &dyn DurableFallbackStore) {
    assert_eq!(store.load().unwrap(), None);

    let rec = record("example.com", LicenseStatus::Active);
    store.save(&rec).unwrap();
    assert_eq!(store.load().unwrap(), Some(rec));

    let replaced = record("example.com", LicenseStatus::NotFound);
    store.save(&replaced).unwrap();
    assert_eq!(store.load().unwrap(), Some(replaced));

    store.clear().unwrap();
    assert_eq!(store.load().unwrap(), None);
    store.clear().unwrap();
}

#[test]
fn memory_cache_behaviour() {
    exercise_cache(&MemoryCache::new());
}

#[test]
fn memory_fallback_behaviour() {
    exercise_fallback(&MemoryFallbackStore::new());
}

#[test]
fn file_cache_behaviour() {
    let tmp = tempfile::tempdir().unwrap();
    exercise_cache(&FileCache::new(tmp.path()));
}

#[test]
fn file_fallback_behaviour() {
    let tmp = tempfile::tempdir().unwrap();
    exercise_fallback(&FileFallbackStore::new(tmp.path()));
}

// --- File specifics ---

#[test]
fn file_cache_survives_reopen() {
    let tmp = tempfile::tempdir().unwrap();
    let key = cache_key("example.com");
    let rec = record("example.com", LicenseStatus::Active);

    FileCache::new(tmp.path())
        .put(&key, CacheEntry::new(rec.clone(), TTL, 50))
        .unwrap();

    let reopened = FileCache::new(tmp.path());
    assert_eq!(reopened.get(&key, 60).unwrap().unwrap().record, rec);
    assert!(reopened.dir().join(format!("{key}.json")).exists());
}

#[test]
fn file_fallback_survives_reopen() {
    let tmp = tempfile::tempdir().unwrap();
    let rec = record("example.com", LicenseStatus::Active);

    FileFallbackStore::new(tmp.path()).save(&rec).unwrap();

    let reopened = FileFallbackStore::new(tmp.path());
    assert_eq!(reopened.load().unwrap(), Some(rec));
    assert!(reopened.path().ends_with("last_state.json"));
}

#[test]
fn file_fallback_replaces_whole_file_without_leftovers() {
    let tmp = tempfile::tempdir().unwrap();
    let store = FileFallbackStore::new(tmp.path());

    store.save(&record("example.com", LicenseStatus::Active)).unwrap();
    let expired = record("example.com", LicenseStatus::Expired);
    store.save(&expired).unwrap();

    assert_eq!(store.load().unwrap(), Some(expired));
    let names: Vec<String> = std::fs::read_dir(tmp.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["last_state.json".to_string()]);
}

#[test]
fn file_fallback_ignores_stale_partial_write() {
    let tmp = tempfile::tempdir().unwrap();
    let store = FileFallbackStore::new(tmp.path());
    let rec = record("example.com", LicenseStatus::Active);
    store.save(&rec).unwrap();

    // Leftover from a write that never got renamed into place.
    std::fs::write(tmp.path().join("last_state.json.tmp"), "{\"domain\":").unwrap();

    assert_eq!(store.load().unwrap(), Some(rec.clone()));
    store.save(&rec).unwrap();
    assert!(!tmp.path().join("last_state.json.tmp").exists());
}

#[test]
fn file_cache_put_leaves_no_temp_file() {
    let tmp = tempfile::tempdir().unwrap();
    let cache = FileCache::new(tmp.path());
    let key = cache_key("example.com");

    cache
        .put(&key, CacheEntry::new(record("example.com", LicenseStatus::Active), TTL, 0))
        .unwrap();

    let names: Vec<String> = std::fs::read_dir(cache.dir())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec![format!("{key}.json")]);
}

#[test]
fn corrupt_cache_file_is_an_error() {
    let tmp = tempfile::tempdir().unwrap();
    let cache = FileCache::new(tmp.path());
    let key = cache_key("example.com");

    std::fs::create_dir_all(cache.dir()).unwrap();
    std::fs::write(cache.dir().join(format!("{key}.json")), "{ not json").unwrap();

    assert!(cache.get(&key, 0).is_err());
}

#[test]
fn file_cache_key_is_sanitized() {
    let tmp = tempfile::tempdir().unwrap();
    let cache = FileCache::new(tmp.path());
    let rec = record("x", LicenseStatus::Active);

    cache
        .put("../escape", CacheEntry::new(rec, TTL, 0))
        .unwrap();

    assert!(cache.dir().join("___escape.json").exists());
    assert!(!tmp.path().join("escape.json").exists());
}

#[test]
fn stored_record_json_always_has_messages() {
    let mut rec = record("example.com", LicenseStatus::Active);
    rec.messages.clear();
    let json = serde_json::to_value(&rec).unwrap();
    assert_eq!(json["messages"], serde_json::json!([]));
    assert_eq!(json["status"], "active");
    assert_eq!(json["expiry_date"], "2030-01-01");
}
