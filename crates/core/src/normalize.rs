//! Normalization of license server payloads into [`LicenseRecord`]s
//!
//! The license server is loose about types: booleans arrive as
//! `0`/`1` or strings, numbers as strings, and older deployments send the
//! notice list as `custom_message` instead of `messages`. Everything here
//! accepts those shapes and produces a clean record.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::{Map, Value};

use crate::error::FetchError;
use crate::record::{LicenseMessage, LicenseRecord, LicenseStatus, MessagePriority};

/// Legacy name of the `messages` array.
pub const LEGACY_MESSAGES_FIELD: &str = "custom_message";

/// Parses a response body into a normalized record for `domain`.
pub fn parse_body(domain: &str, body: &str) -> Result<LicenseRecord, FetchError> {
    let value: Value = serde_json::from_str(body).map_err(|e| FetchError::MalformedResponse {
        body: body.to_string(),
        reason: e.to_string(),
    })?;

    match value {
        Value::Object(map) => Ok(normalize(domain, &map)),
        other => Err(FetchError::MalformedResponse {
            body: body.to_string(),
            reason: format!("expected a JSON object, got {}", json_kind(&other)),
        }),
    }
}

/// Builds a record from a decoded payload object.
///
/// `messages` is always an array afterwards. When `custom_message` is an
/// array it replaces `messages` entirely.
pub fn normalize(domain: &str, payload: &Map<String, Value>) -> LicenseRecord {
    let status = payload
        .get("status")
        .and_then(Value::as_str)
        .and_then(LicenseStatus::parse)
        .unwrap_or(LicenseStatus::Error);

    let mut messages = match payload.get("messages") {
        Some(Value::Array(items)) => parse_messages(items),
        _ => Vec::new(),
    };
    if let Some(Value::Array(legacy)) = payload.get(LEGACY_MESSAGES_FIELD) {
        messages = parse_messages(legacy);
    }

    LicenseRecord {
        domain: domain.to_string(),
        valid: payload.get("valid").map(coerce_bool).unwrap_or(false),
        status,
        license_key: payload.get("license_key").and_then(coerce_string),
        expiry_date: payload
            .get("expiry_date")
            .and_then(Value::as_str)
            .and_then(parse_date),
        days_remaining: payload.get("days_remaining").and_then(coerce_int),
        grace_period: payload.get("grace_period").map(coerce_bool).unwrap_or(false),
        pre_warning: payload.get("pre_warning").map(coerce_bool).unwrap_or(false),
        message: payload.get("message").and_then(coerce_string),
        messages,
    }
}

fn parse_messages(items: &[Value]) -> Vec<LicenseMessage> {
    items
        .iter()
        .filter_map(|item| {
            let obj = item.as_object()?;
            let text = obj.get("message").and_then(coerce_string)?;
            let priority = obj
                .get("priority")
                .and_then(Value::as_str)
                .map(MessagePriority::parse_lenient)
                .unwrap_or_default();
            Some(LicenseMessage::new(text, priority))
        })
        .collect()
}

/// Accepts `YYYY-MM-DD`, `YYYY-MM-DD HH:MM:SS` and RFC 3339.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
                .ok()
                .map(|dt| dt.date())
        })
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

fn coerce_bool(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        ),
        _ => false,
    }
}

fn coerce_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Non-empty string, or a number rendered as one.
fn coerce_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
