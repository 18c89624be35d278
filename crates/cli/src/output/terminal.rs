//! Terminal output formatting

use artefactum_core::policy::{AccessDecision, SkipReason};
use artefactum_core::{LicenseNotice, LicenseRecord, LicenseStatus, MessagePriority, RecordSource};
use chrono::NaiveDate;
use colored::{ColoredString, Colorize};

/// Dates are shown the way site owners read them: `dd.mm.YYYY`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}

pub fn days_label(days: i64) -> String {
    if days.abs() == 1 {
        format!("{days} day")
    } else {
        format!("{days} days")
    }
}

pub fn status_label(status: LicenseStatus) -> ColoredString {
    let label = status.as_str().to_uppercase();
    match status {
        LicenseStatus::Active => label.green().bold(),
        LicenseStatus::Warning => label.yellow().bold(),
        LicenseStatus::Grace | LicenseStatus::Expired => label.red().bold(),
        LicenseStatus::NotFound | LicenseStatus::InvalidSubdomain => label.red(),
        LicenseStatus::Error => label.dimmed(),
    }
}

fn yes_no(value: bool) -> ColoredString {
    if value {
        "Yes".green()
    } else {
        "No".red()
    }
}

/// Short form used by `status`.
pub fn print_summary(record: &LicenseRecord, source: RecordSource) {
    println!("  {}: {}", "Status".bold(), status_label(record.status));
    println!("  {}: {}", "Valid".bold(), yes_no(record.valid));
    println!("  {}: {}", "Source".bold(), source.to_string().dimmed());
}

/// Every field, used by `check`.
pub fn print_details(record: &LicenseRecord, source: RecordSource) {
    println!("  {}: {}", "Domain".bold(), record.domain);
    println!(
        "  {}: {}",
        "License Key".bold(),
        record.license_key.as_deref().unwrap_or("N/A")
    );
    println!("  {}: {}", "Status".bold(), status_label(record.status));
    println!("  {}: {}", "Valid".bold(), yes_no(record.valid));
    println!(
        "  {}: {}",
        "Message".bold(),
        record.message.as_deref().unwrap_or("N/A")
    );
    if let Some(date) = record.expiry_date {
        println!("  {}: {}", "Expires".bold(), format_date(date));
    }
    if let Some(days) = record.days_remaining.filter(|d| *d != 0) {
        println!("  {}: {}", "Days remaining".bold(), days);
    }
    println!("  {}: {}", "Source".bold(), source.to_string().dimmed());

    if !record.messages.is_empty() {
        println!();
        for m in &record.messages {
            println!("  {}", format_operator_message(&m.message, m.priority));
        }
    }
}

fn priority_tag(priority: MessagePriority) -> ColoredString {
    let tag = format!("[{}]", priority.to_string().to_uppercase());
    match priority {
        MessagePriority::Info => tag.cyan(),
        MessagePriority::Warning => tag.yellow(),
        MessagePriority::Critical => tag.red().bold(),
    }
}

pub fn format_operator_message(message: &str, priority: MessagePriority) -> String {
    format!("{} {}", priority_tag(priority), message)
}

pub fn format_notice(notice: &LicenseNotice) -> String {
    match notice {
        LicenseNotice::Operator { message, priority } => {
            format_operator_message(message, *priority)
        }
        LicenseNotice::GracePeriod {
            days_remaining,
            expiry_date,
            window_days,
        } => format!(
            "{} License expired{}. {} left to renew (grace period of {}).",
            priority_tag(notice.priority()),
            expiry_suffix(*expiry_date),
            days_label(*days_remaining),
            days_label(i64::from(*window_days)),
        ),
        LicenseNotice::PreExpiry {
            days_remaining,
            expiry_date,
            ..
        } => format!(
            "{} License expires in {}{}.",
            priority_tag(notice.priority()),
            days_label(*days_remaining),
            expiry_suffix(*expiry_date),
        ),
    }
}

fn expiry_suffix(date: Option<NaiveDate>) -> String {
    date.map(|d| format!(" on {}", format_date(d)))
        .unwrap_or_default()
}

pub fn format_decision(decision: &AccessDecision) -> String {
    match decision {
        AccessDecision::Allow => format!("{} access allowed", "\u{2713}".green()),
        AccessDecision::Skip(reason) => {
            let why = match reason {
                SkipReason::NonInteractive => "non-interactive caller",
                SkipReason::SuperAdmin => "super admin",
                SkipReason::Unprivileged => "caller is not a site administrator",
            };
            format!("{} gate skipped ({})", "-".dimmed(), why)
        }
        AccessDecision::Block(reason) => {
            let what = match reason.status {
                LicenseStatus::NotFound => "no license found",
                LicenseStatus::InvalidSubdomain => "subdomain is not licensed",
                LicenseStatus::Expired => "license expired",
                _ => "license not valid",
            };
            let key = reason
                .license_key
                .as_deref()
                .map(|k| format!(", key {k}"))
                .unwrap_or_default();
            format!(
                "{} access blocked: {} for {}{}",
                "\u{2717}".red().bold(),
                what,
                reason.domain,
                key
            )
        }
    }
}
