//! Request token signing

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Signs a domain with the shared API secret.
///
/// Returns the lowercase hex HMAC-SHA256 of `domain` keyed by `secret`,
/// which is what the license server recomputes on its side.
pub fn sign_domain(secret: &str, domain: &str) -> String {
    let mut mac = match HmacSha256::new_from_slice(secret.as_bytes()) {
        Ok(mac) => mac,
        Err(_) => unreachable!("HMAC-SHA256 accepts keys of any length"),
    };
    mac.update(domain.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}
