//! Hostname normalization and cache key derivation

use sha2::{Digest, Sha256};

/// Prefix of every short-term cache key.
pub const CACHE_KEY_PREFIX: &str = "artefactum_licence_";

/// Domain used when no host is known.
pub const UNKNOWN_DOMAIN: &str = "unknown";

/// Normalizes a host into the form the license server knows it by.
///
/// Trims whitespace, drops a `:port` suffix, lowercases and strips one
/// leading `www.`. Empty input maps to [`UNKNOWN_DOMAIN`].
pub fn normalize_domain(host: &str) -> String {
    let host = host.trim();
    let host = match host.rsplit_once(':') {
        Some((name, port)) if port.chars().all(|c| c.is_ascii_digit()) => name,
        _ => host,
    };
    let lower = host.to_ascii_lowercase();
    let stripped = lower.strip_prefix("www.").unwrap_or(&lower);
    let stripped = stripped.trim_end_matches('.');

    if stripped.is_empty() {
        UNKNOWN_DOMAIN.to_string()
    } else {
        stripped.to_string()
    }
}

/// Stable short-term cache key for a normalized domain.
pub fn cache_key(domain: &str) -> String {
    let digest = Sha256::digest(domain.as_bytes());
    format!("{}{}", CACHE_KEY_PREFIX, &hex::encode(digest)[..32])
}
