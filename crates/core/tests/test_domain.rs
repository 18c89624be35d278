use artefactum_core::domain::{CACHE_KEY_PREFIX, UNKNOWN_DOMAIN};
use artefactum_core::{cache_key, normalize_domain, sign_domain};

// --- normalize_domain ---

#[test]
fn lowercases_and_strips_www() {
    assert_eq!(normalize_domain("WWW.Example.COM"), "example.com");
    assert_eq!(normalize_domain("www.example.com"), "example.com");
    assert_eq!(normalize_domain("shop.example.com"), "shop.example.com");
}

#[test]
fn strips_port_and_whitespace() {
    assert_eq!(normalize_domain("  WWW.Example.COM:8080 "), "example.com");
}

#[test]
fn www_inside_name_is_kept() {
    assert_eq!(normalize_domain("mywww.example.com"), "mywww.example.com");
    assert_eq!(normalize_domain("example.www.com"), "example.www.com");
}

#[test]
fn empty_host_is_unknown() {
    assert_eq!(normalize_domain(""), UNKNOWN_DOMAIN);
    assert_eq!(normalize_domain("www."), UNKNOWN_DOMAIN);
}

#[test]
fn normalization_is_idempotent() {
    for host in ["WWW.Example.COM:8080", "a.b.c", "Shop.Example.SK."] {
        let once = normalize_domain(host);
        assert_eq!(normalize_domain(&once), once);
    }
}

// --- cache_key ---

#[test]
fn cache_key_is_stable_and_prefixed() {
    let a = cache_key("example.com");
    let b = cache_key("example.com");
    assert_eq!(a, b);
    assert!(a.starts_with(CACHE_KEY_PREFIX));
    assert_eq!(a.len(), CACHE_KEY_PREFIX.len() + 32);
    assert!(a[CACHE_KEY_PREFIX.len()..]
        .chars()
        .all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn cache_key_differs_per_domain() {
    assert_ne!(cache_key("example.com"), cache_key("example.org"));
}

// --- sign_domain ---

#[test]
fn sign_domain_known_vector() {
    // RFC 4231 test case 2
    assert_eq!(
        sign_domain("Jefe", "what do ya want for nothing?"),
        "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
    );
}

#[test]
fn sign_domain_is_64_lowercase_hex() {
    let token = sign_domain("ART-SECRET", "example.com");
    assert_eq!(token.len(), 64);
    assert!(token
        .chars()
        .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
}

#[test]
fn sign_domain_depends_on_secret_and_domain() {
    let base = sign_domain("secret", "example.com");
    assert_ne!(base, sign_domain("other", "example.com"));
    assert_ne!(base, sign_domain("secret", "example.org"));
}
