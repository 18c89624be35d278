use artefactum_core::policy::{is_super_admin, BlockReason, SkipReason};
use artefactum_core::{
    evaluate_access, notices, AccessDecision, CallerContext, LicenseMessage, LicenseNotice,
    LicenseRecord, LicenseStatus, MessagePriority, PolicyConfig,
};
use chrono::NaiveDate;

fn record(status: LicenseStatus, valid: bool) -> LicenseRecord {
    LicenseRecord {
        domain: "example.com".to_string(),
        valid,
        status,
        license_key: Some("ART-42".to_string()),
        expiry_date: NaiveDate::from_ymd_opt(2026, 10, 1),
        days_remaining: None,
        grace_period: false,
        pre_warning: false,
        message: None,
        messages: Vec::new(),
    }
}

fn policy() -> PolicyConfig {
    PolicyConfig::default()
}

// --- evaluate_access ---

#[test]
fn blocking_statuses_block_admins() {
    for status in [
        LicenseStatus::NotFound,
        LicenseStatus::InvalidSubdomain,
        LicenseStatus::Expired,
    ] {
        let decision = evaluate_access(
            &record(status, false),
            &CallerContext::admin("editor"),
            &policy(),
        );
        assert_eq!(
            decision,
            AccessDecision::Block(BlockReason {
                status,
                domain: "example.com".to_string(),
                license_key: Some("ART-42".to_string()),
            })
        );
        assert!(decision.is_blocked());
    }
}

#[test]
fn non_blocking_statuses_allow() {
    for status in [
        LicenseStatus::Active,
        LicenseStatus::Warning,
        LicenseStatus::Grace,
        LicenseStatus::Error,
    ] {
        let decision = evaluate_access(
            &record(status, true),
            &CallerContext::admin("editor"),
            &policy(),
        );
        assert_eq!(decision, AccessDecision::Allow, "{status} should allow");
    }
}

#[test]
fn super_admin_is_never_blocked() {
    let decision = evaluate_access(
        &record(LicenseStatus::Expired, false),
        &CallerContext::admin("artefactum"),
        &policy(),
    );
    assert_eq!(decision, AccessDecision::Skip(SkipReason::SuperAdmin));
}

#[test]
fn super_admin_match_is_exact() {
    let p = policy();
    assert!(is_super_admin(&CallerContext::admin("artefactum"), &p));
    assert!(!is_super_admin(&CallerContext::admin("Artefactum"), &p));
    assert!(!is_super_admin(&CallerContext::admin("artefactum2"), &p));
    assert!(!is_super_admin(&CallerContext::background(), &p));
}

#[test]
fn empty_super_admin_matches_nobody() {
    let p = PolicyConfig {
        super_admin: String::new(),
        ..PolicyConfig::default()
    };
    let caller = CallerContext {
        identity: Some(String::new()),
        privileged: true,
        interactive: true,
    };
    assert!(!is_super_admin(&caller, &p));
    assert!(evaluate_access(&record(LicenseStatus::Expired, false), &caller, &p).is_blocked());
}

#[test]
fn non_interactive_callers_skip_the_gate() {
    let decision = evaluate_access(
        &record(LicenseStatus::NotFound, false),
        &CallerContext::background(),
        &policy(),
    );
    assert_eq!(decision, AccessDecision::Skip(SkipReason::NonInteractive));

    let api_admin = CallerContext {
        interactive: false,
        ..CallerContext::admin("editor")
    };
    assert!(!evaluate_access(&record(LicenseStatus::Expired, false), &api_admin, &policy())
        .is_blocked());
}

#[test]
fn unprivileged_callers_skip_the_gate() {
    let subscriber = CallerContext {
        identity: Some("reader".to_string()),
        privileged: false,
        interactive: true,
    };
    let decision = evaluate_access(
        &record(LicenseStatus::Expired, false),
        &subscriber,
        &policy(),
    );
    assert_eq!(decision, AccessDecision::Skip(SkipReason::Unprivileged));
}

// --- notices ---

#[test]
fn grace_period_warns_without_blocking() {
    let mut rec = record(LicenseStatus::Active, true);
    rec.grace_period = true;
    rec.days_remaining = Some(3);

    let decision = evaluate_access(&rec, &CallerContext::admin("editor"), &policy());
    assert_eq!(decision, AccessDecision::Allow);

    let out = notices(&rec, &policy());
    assert_eq!(
        out,
        vec![LicenseNotice::GracePeriod {
            days_remaining: 3,
            expiry_date: NaiveDate::from_ymd_opt(2026, 10, 1),
            window_days: 28,
        }]
    );
    assert_eq!(out[0].priority(), MessagePriority::Critical);
}

#[test]
fn pre_warning_notice() {
    let mut rec = record(LicenseStatus::Warning, true);
    rec.pre_warning = true;
    rec.days_remaining = Some(14);

    let out = notices(&rec, &policy());
    assert_eq!(out.len(), 1);
    assert!(matches!(
        out[0],
        LicenseNotice::PreExpiry {
            days_remaining: 14,
            window_days: 30,
            ..
        }
    ));
    assert_eq!(out[0].priority(), MessagePriority::Warning);
}

#[test]
fn grace_wins_over_pre_warning() {
    let mut rec = record(LicenseStatus::Grace, true);
    rec.grace_period = true;
    rec.pre_warning = true;

    let out = notices(&rec, &policy());
    assert_eq!(out.len(), 1);
    assert!(matches!(
        out[0],
        LicenseNotice::GracePeriod {
            days_remaining: 0,
            ..
        }
    ));
}

#[test]
fn operator_messages_are_always_surfaced_first() {
    let mut rec = record(LicenseStatus::Expired, false);
    rec.grace_period = true;
    rec.messages = vec![
        LicenseMessage::new("Pay invoice 2026-17", MessagePriority::Critical),
        LicenseMessage::new("New features available", MessagePriority::Info),
    ];

    let out = notices(&rec, &policy());
    assert_eq!(out.len(), 3);
    assert_eq!(
        out[0],
        LicenseNotice::Operator {
            message: "Pay invoice 2026-17".to_string(),
            priority: MessagePriority::Critical,
        }
    );
    assert_eq!(out[1].priority(), MessagePriority::Info);
    assert!(matches!(out[2], LicenseNotice::GracePeriod { .. }));
}

#[test]
fn error_status_has_no_expiry_notice() {
    let mut rec = record(LicenseStatus::Error, false);
    rec.grace_period = true;
    rec.messages = vec![LicenseMessage::new("still shown", MessagePriority::Warning)];

    let out = notices(&rec, &policy());
    assert_eq!(out.len(), 1);
    assert!(matches!(out[0], LicenseNotice::Operator { .. }));
}

#[test]
fn invalid_non_expired_record_has_no_expiry_notice() {
    let mut rec = record(LicenseStatus::NotFound, false);
    rec.pre_warning = true;
    assert!(notices(&rec, &policy()).is_empty());
}

#[test]
fn active_record_without_flags_has_no_notices() {
    assert!(notices(&record(LicenseStatus::Active, true), &policy()).is_empty());
}
