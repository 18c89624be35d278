//! Artefactum Core - License status resolution
//!
//! This crate answers one question for a site: what is the state of its
//! license, right now. It provides:
//! - Hostname normalization and HMAC-signed requests to the license server
//! - Lenient normalization of server payloads into `LicenseRecord`s
//! - A time-boxed cache plus a durable last-known-state fallback
//! - Access policy (blocking, grace and pre-expiry notices) derived from a record

pub mod client;
pub mod clock;
pub mod config;
pub mod domain;
pub mod error;
pub mod normalize;
pub mod policy;
pub mod record;
pub mod resolver;
pub mod store;
pub mod token;

pub use client::{HttpTransport, LicenseRequest, LicenseTransport};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{ArtefactumConfig, PolicyConfig};
pub use domain::{cache_key, normalize_domain};
pub use error::{ConfigError, FetchError, StoreError};
pub use policy::{evaluate_access, notices, AccessDecision, CallerContext, LicenseNotice};
pub use record::{LicenseMessage, LicenseRecord, LicenseStatus, MessagePriority};
pub use resolver::{LicenseStatusResolver, RecordSource, Resolution, ResolverConfig};
pub use store::{DurableFallbackStore, ShortTermCache};
pub use token::sign_domain;

/// Artefactum version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
