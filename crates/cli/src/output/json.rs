//! JSON output formatting

use artefactum_core::store::CacheEntry;
use artefactum_core::{LicenseRecord, RecordSource};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct JsonOutput<'a> {
    pub record: &'a LicenseRecord,
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cached_until: Option<u64>,
}

impl<'a> JsonOutput<'a> {
    pub fn new(
        record: &'a LicenseRecord,
        source: RecordSource,
        cached_until: Option<u64>,
    ) -> Self {
        Self {
            record,
            source: source.to_string(),
            cached_until,
        }
    }
}

/// Expiry of `entry`, reported only when the record actually came from it.
///
/// A fallback or sentinel record never reports a cache expiry, even if an
/// older entry is still fresh.
pub fn cached_until(source: RecordSource, entry: Option<CacheEntry>) -> Option<u64> {
    match source {
        RecordSource::Cache | RecordSource::Remote => entry.map(|e| e.expires_at()),
        RecordSource::Fallback | RecordSource::Sentinel => None,
    }
}

pub fn print(output: &JsonOutput<'_>) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(output)?);
    Ok(())
}
