//! Access policy: blocking and notices derived from a license record
//!
//! The resolver only answers "what is the license state"; what an
//! interactive session is allowed to do with it is decided here. Nothing in
//! this module performs I/O.

use chrono::NaiveDate;

use crate::config::PolicyConfig;
use crate::record::{LicenseRecord, LicenseStatus, MessagePriority};

/// Who is asking, as determined by the host environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallerContext {
    /// Login name of the caller, if any.
    pub identity: Option<String>,
    /// Whether the host's role model considers the caller a site administrator.
    pub privileged: bool,
    /// `false` for background jobs, cron and programmatic API calls.
    pub interactive: bool,
}

impl CallerContext {
    /// An interactive administrator session.
    pub fn admin(identity: impl Into<String>) -> Self {
        Self {
            identity: Some(identity.into()),
            privileged: true,
            interactive: true,
        }
    }

    /// Cron, queue workers and API requests.
    pub fn background() -> Self {
        Self {
            identity: None,
            privileged: false,
            interactive: false,
        }
    }
}

/// Why the gate was skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NonInteractive,
    SuperAdmin,
    Unprivileged,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockReason {
    pub status: LicenseStatus,
    pub domain: String,
    pub license_key: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDecision {
    /// The gate does not apply to this caller.
    Skip(SkipReason),
    Allow,
    /// Hard stop: nothing else should be processed.
    Block(BlockReason),
}

impl AccessDecision {
    pub fn is_blocked(&self) -> bool {
        matches!(self, AccessDecision::Block(_))
    }
}

/// Decides whether an interactive session may continue.
pub fn evaluate_access(
    record: &LicenseRecord,
    caller: &CallerContext,
    policy: &PolicyConfig,
) -> AccessDecision {
    if !caller.interactive {
        return AccessDecision::Skip(SkipReason::NonInteractive);
    }
    if is_super_admin(caller, policy) {
        return AccessDecision::Skip(SkipReason::SuperAdmin);
    }
    if !caller.privileged {
        return AccessDecision::Skip(SkipReason::Unprivileged);
    }

    if record.status.is_blocking() {
        AccessDecision::Block(BlockReason {
            status: record.status,
            domain: record.domain.clone(),
            license_key: record.license_key.clone(),
        })
    } else {
        AccessDecision::Allow
    }
}

/// Exact, case-sensitive login match. An empty designation matches nobody.
pub fn is_super_admin(caller: &CallerContext, policy: &PolicyConfig) -> bool {
    !policy.super_admin.is_empty()
        && caller.identity.as_deref() == Some(policy.super_admin.as_str())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LicenseNotice {
    /// Operator message from the license server.
    Operator {
        message: String,
        priority: MessagePriority,
    },
    /// Past expiry, inside the grace window.
    GracePeriod {
        days_remaining: i64,
        expiry_date: Option<NaiveDate>,
        /// Configured length of the grace window.
        window_days: u32,
    },
    /// Expiry is approaching.
    PreExpiry {
        days_remaining: i64,
        expiry_date: Option<NaiveDate>,
        /// Configured length of the warning window.
        window_days: u32,
    },
}

impl LicenseNotice {
    pub fn priority(&self) -> MessagePriority {
        match self {
            LicenseNotice::Operator { priority, .. } => *priority,
            LicenseNotice::GracePeriod { .. } => MessagePriority::Critical,
            LicenseNotice::PreExpiry { .. } => MessagePriority::Warning,
        }
    }
}

/// Notices to surface for `record`, in display order.
///
/// Operator messages come first and are always included. At most one
/// expiry notice follows; grace period wins over pre-warning.
pub fn notices(record: &LicenseRecord, policy: &PolicyConfig) -> Vec<LicenseNotice> {
    let mut out: Vec<LicenseNotice> = record
        .messages
        .iter()
        .filter(|m| !m.message.trim().is_empty())
        .map(|m| LicenseNotice::Operator {
            message: m.message.clone(),
            priority: m.priority,
        })
        .collect();

    if let Some(notice) = expiry_notice(record, policy) {
        out.push(notice);
    }
    out
}

fn expiry_notice(record: &LicenseRecord, policy: &PolicyConfig) -> Option<LicenseNotice> {
    if record.status == LicenseStatus::Error {
        return None;
    }
    if !record.valid && record.status != LicenseStatus::Expired {
        return None;
    }

    let days_remaining = record.days_remaining.unwrap_or(0);
    let expiry_date = record.expiry_date;

    if record.grace_period {
        Some(LicenseNotice::GracePeriod {
            days_remaining,
            expiry_date,
            window_days: policy.grace_days,
        })
    } else if record.pre_warning {
        Some(LicenseNotice::PreExpiry {
            days_remaining,
            expiry_date,
            window_days: policy.warning_days,
        })
    } else {
        None
    }
}
