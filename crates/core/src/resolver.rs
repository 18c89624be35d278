//! License status resolution with a two-tier cache
//!
//! Flow of [`LicenseStatusResolver::resolve`]:
//! 1. Unless forced, serve a fresh short-term cache entry
//! 2. Sign the domain and ask the license server
//! 3. On any failure, serve the durable fallback (or the error sentinel)
//! 4. On success, normalize and write both tiers
//!
//! Resolution never fails. The worst outcome is a record with status `error`.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info, instrument, warn};

use crate::client::{LicenseRequest, LicenseTransport};
use crate::clock::{Clock, SystemClock};
use crate::config::ArtefactumConfig;
use crate::domain::cache_key;
use crate::error::{FetchError, StoreError};
use crate::normalize::parse_body;
use crate::record::LicenseRecord;
use crate::store::{CacheEntry, DurableFallbackStore, ShortTermCache};
use crate::token::sign_domain;

/// Settings the resolver needs from [`ArtefactumConfig`].
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    pub secret: String,
    pub default_email: Option<String>,
    pub ttl: Duration,
}

impl From<&ArtefactumConfig> for ResolverConfig {
    fn from(config: &ArtefactumConfig) -> Self {
        Self {
            secret: config.api.secret.clone(),
            default_email: config.api.default_email.clone(),
            ttl: config.cache.ttl(),
        }
    }
}

/// Where a resolved record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordSource {
    /// Fresh short-term cache entry
    Cache,
    /// Successful remote check
    Remote,
    /// Last durable record after a failed check
    Fallback,
    /// Nothing stored and the check failed
    Sentinel,
}

impl fmt::Display for RecordSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordSource::Cache => write!(f, "cache"),
            RecordSource::Remote => write!(f, "remote"),
            RecordSource::Fallback => write!(f, "fallback"),
            RecordSource::Sentinel => write!(f, "sentinel"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub record: LicenseRecord,
    pub source: RecordSource,
}

pub struct LicenseStatusResolver {
    config: ResolverConfig,
    transport: Arc<dyn LicenseTransport>,
    cache: Arc<dyn ShortTermCache>,
    fallback: Arc<dyn DurableFallbackStore>,
    clock: Arc<dyn Clock>,
}

impl LicenseStatusResolver {
    pub fn new(
        config: ResolverConfig,
        transport: Arc<dyn LicenseTransport>,
        cache: Arc<dyn ShortTermCache>,
        fallback: Arc<dyn DurableFallbackStore>,
    ) -> Self {
        Self {
            config,
            transport,
            cache,
            fallback,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replaces the system clock.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Current record for a normalized `domain`, sent with the default identity.
    pub fn resolve(&self, domain: &str, force_refresh: bool) -> LicenseRecord {
        self.resolve_as(domain, force_refresh, None)
    }

    /// Like [`resolve`](Self::resolve) with the caller's email as identity.
    pub fn resolve_as(
        &self,
        domain: &str,
        force_refresh: bool,
        caller_email: Option<&str>,
    ) -> LicenseRecord {
        self.resolve_with_source(domain, force_refresh, caller_email)
            .record
    }

    /// Resolves and reports which tier answered.
    #[instrument(level = "debug", skip(self, caller_email))]
    pub fn resolve_with_source(
        &self,
        domain: &str,
        force_refresh: bool,
        caller_email: Option<&str>,
    ) -> Resolution {
        let key = cache_key(domain);

        if !force_refresh {
            if let Some(entry) = self.fresh_entry(domain, &key) {
                debug!(domain, expires_at = entry.expires_at(), "license cache hit");
                return Resolution {
                    record: entry.record,
                    source: RecordSource::Cache,
                };
            }
        }

        let request = self.build_request(domain, caller_email);
        let fetched = self
            .transport
            .send(&request)
            .and_then(|body| parse_body(domain, &body));

        match fetched {
            Ok(record) => {
                self.store(domain, &key, &record);
                info!(
                    domain,
                    status = %record.status,
                    "license checked for {domain} - status: {}",
                    record.status
                );
                Resolution {
                    record,
                    source: RecordSource::Remote,
                }
            }
            Err(err) => {
                log_fetch_error(domain, &err);
                self.fall_back(domain)
            }
        }
    }

    /// Fresh short-term entry for `domain`, without touching the network.
    pub fn cached(&self, domain: &str) -> Option<CacheEntry> {
        self.fresh_entry(domain, &cache_key(domain))
    }

    /// Drops the short-term entry for `domain` and the durable fallback.
    pub fn clear_cache(&self, domain: &str) -> Result<(), StoreError> {
        self.clear_short_term(domain)?;
        self.fallback.clear()?;
        info!(domain, "license cache and last known state cleared");
        Ok(())
    }

    /// Drops only the short-term entry for `domain`.
    pub fn clear_short_term(&self, domain: &str) -> Result<(), StoreError> {
        self.cache.remove(&cache_key(domain))?;
        debug!(domain, "license cache entry removed");
        Ok(())
    }

    fn build_request(&self, domain: &str, caller_email: Option<&str>) -> LicenseRequest {
        let admin_email = caller_email
            .filter(|e| !e.trim().is_empty())
            .map(str::to_string)
            .or_else(|| self.config.default_email.clone())
            .unwrap_or_default();

        LicenseRequest {
            domain: domain.to_string(),
            token: sign_domain(&self.config.secret, domain),
            admin_email,
        }
    }

    fn fresh_entry(&self, domain: &str, key: &str) -> Option<CacheEntry> {
        match self.cache.get(key, self.clock.now_epoch()) {
            Ok(entry) => entry,
            Err(e) => {
                warn!(domain, error = %e, "license cache unreadable, treating as miss");
                None
            }
        }
    }

    fn store(&self, domain: &str, key: &str, record: &LicenseRecord) {
        let entry = CacheEntry::new(record.clone(), self.config.ttl, self.clock.now_epoch());
        if let Err(e) = self.cache.put(key, entry) {
            warn!(domain, error = %e, "could not write license cache");
        }
        if let Err(e) = self.fallback.save(record) {
            warn!(domain, error = %e, "could not persist last known license state");
        }
    }

    fn fall_back(&self, domain: &str) -> Resolution {
        match self.fallback.load() {
            Ok(Some(record)) => Resolution {
                record: record.for_domain(domain),
                source: RecordSource::Fallback,
            },
            Ok(None) => Resolution {
                record: LicenseRecord::error_sentinel(domain),
                source: RecordSource::Sentinel,
            },
            Err(e) => {
                warn!(domain, error = %e, "last known license state unreadable");
                Resolution {
                    record: LicenseRecord::error_sentinel(domain),
                    source: RecordSource::Sentinel,
                }
            }
        }
    }
}

fn log_fetch_error(domain: &str, err: &FetchError) {
    match err {
        FetchError::Transport(reason) => {
            warn!(domain, error = %reason, "license API error: {reason}");
        }
        FetchError::Upstream { status, body } => {
            warn!(
                domain,
                http_status = *status,
                body = %body,
                "license API returned HTTP {status}"
            );
        }
        FetchError::MalformedResponse { body, reason } => {
            error!(domain, reason = %reason, body = %body, "license API: invalid JSON response");
        }
    }
}
