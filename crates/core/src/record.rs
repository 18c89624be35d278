//! License record model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Message attached to the error sentinel returned before any check succeeded.
pub const API_UNAVAILABLE_MESSAGE: &str = "License API unavailable";

/// License status as reported by the license server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LicenseStatus {
    Active,
    Warning,
    Grace,
    Expired,
    NotFound,
    InvalidSubdomain,
    Error,
}

impl LicenseStatus {
    pub const ALL: [LicenseStatus; 7] = [
        LicenseStatus::Active,
        LicenseStatus::Warning,
        LicenseStatus::Grace,
        LicenseStatus::Expired,
        LicenseStatus::NotFound,
        LicenseStatus::InvalidSubdomain,
        LicenseStatus::Error,
    ];

    /// Wire name, e.g. `invalid_subdomain`.
    pub fn as_str(self) -> &'static str {
        match self {
            LicenseStatus::Active => "active",
            LicenseStatus::Warning => "warning",
            LicenseStatus::Grace => "grace",
            LicenseStatus::Expired => "expired",
            LicenseStatus::NotFound => "not_found",
            LicenseStatus::InvalidSubdomain => "invalid_subdomain",
            LicenseStatus::Error => "error",
        }
    }

    /// Parses a wire name. Unknown names return `None`.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s))
    }

    /// Statuses that stop an interactive session outright.
    pub fn is_blocking(self) -> bool {
        matches!(
            self,
            LicenseStatus::NotFound | LicenseStatus::InvalidSubdomain | LicenseStatus::Expired
        )
    }
}

impl fmt::Display for LicenseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum MessagePriority {
    #[default]
    Info,
    Warning,
    Critical,
}

impl MessagePriority {
    /// Parses a priority name, falling back to `Info` for anything unknown.
    pub fn parse_lenient(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "warning" => MessagePriority::Warning,
            "critical" => MessagePriority::Critical,
            _ => MessagePriority::Info,
        }
    }
}

impl fmt::Display for MessagePriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessagePriority::Info => write!(f, "info"),
            MessagePriority::Warning => write!(f, "warning"),
            MessagePriority::Critical => write!(f, "critical"),
        }
    }
}

/// Operator-supplied notice carried by a license record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseMessage {
    pub message: String,
    #[serde(default)]
    pub priority: MessagePriority,
}

impl LicenseMessage {
    pub fn new(message: impl Into<String>, priority: MessagePriority) -> Self {
        Self {
            message: message.into(),
            priority,
        }
    }
}

/// The authoritative license state of one domain.
///
/// Records are replaced wholesale on every refresh, never patched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseRecord {
    pub domain: String,
    pub valid: bool,
    pub status: LicenseStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days_remaining: Option<i64>,
    #[serde(default)]
    pub grace_period: bool,
    #[serde(default)]
    pub pre_warning: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default)]
    pub messages: Vec<LicenseMessage>,
}

impl LicenseRecord {
    /// Record returned when the server is unreachable and nothing was ever stored.
    pub fn error_sentinel(domain: &str) -> Self {
        Self {
            domain: domain.to_string(),
            valid: false,
            status: LicenseStatus::Error,
            license_key: None,
            expiry_date: None,
            days_remaining: None,
            grace_period: false,
            pre_warning: false,
            message: Some(API_UNAVAILABLE_MESSAGE.to_string()),
            messages: Vec::new(),
        }
    }

    /// Same record, attributed to `domain`.
    pub fn for_domain(self, domain: &str) -> Self {
        Self {
            domain: domain.to_string(),
            ..self
        }
    }

    pub fn is_blocking(&self) -> bool {
        self.status.is_blocking()
    }
}
