//! Timestamp normalization.
//!
//! Reports carry their creation time either as a store-native timestamp
//! (`{"seconds": .., "nanoseconds": ..}`) or as a string written by older
//! clients. Everything resolves to a single `DateTime<Utc>`; anything that
//! cannot be read falls back to the supplied `now`.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde_json::Value;

/// Where a resolved timestamp came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampSource {
    Native,
    Parsed,
    EpochMillis,
    Fallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedTimestamp {
    pub value: DateTime<Utc>,
    pub source: TimestampSource,
}

/// Resolve a raw timestamp field.
///
/// Order: store-native object, then string parse, then epoch millis,
/// then `now`.
pub fn resolve_timestamp(raw: Option<&Value>, now: DateTime<Utc>) -> ResolvedTimestamp {
    let resolved = match raw {
        Some(Value::Object(_)) => raw
            .and_then(native_timestamp)
            .map(|v| (v, TimestampSource::Native)),
        Some(Value::String(s)) => parse_timestamp_str(s).map(|v| (v, TimestampSource::Parsed)),
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .and_then(|ms| Utc.timestamp_millis_opt(ms).single())
            .map(|v| (v, TimestampSource::EpochMillis)),
        _ => None,
    };

    match resolved {
        Some((value, source)) => ResolvedTimestamp { value, source },
        None => ResolvedTimestamp {
            value: now,
            source: TimestampSource::Fallback,
        },
    }
}

/// Shorthand when the source does not matter.
pub fn normalize_timestamp(raw: Option<&Value>, now: DateTime<Utc>) -> DateTime<Utc> {
    resolve_timestamp(raw, now).value
}

/// Convert a store-native timestamp object.
pub fn native_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    let obj = value.as_object()?;
    let seconds = obj
        .get("seconds")
        .or_else(|| obj.get("_seconds"))?
        .as_i64()?;
    // Absent nanoseconds mean zero; present but unreadable ones reject the
    // whole timestamp.
    let nanos = match obj.get("nanoseconds").or_else(|| obj.get("_nanoseconds")) {
        None => 0,
        Some(raw) => raw
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .filter(|n| *n < 1_000_000_000)?,
    };
    Utc.timestamp_opt(seconds, nanos).single()
}

/// Store-native representation of `at`, as the store writes it.
pub fn to_native_timestamp(at: DateTime<Utc>) -> Value {
    serde_json::json!({
        "seconds": at.timestamp(),
        "nanoseconds": at.timestamp_subsec_nanos(),
    })
}

/// Parse the string forms clients have written: RFC 3339, naive
/// date-time (taken as UTC), or a bare date (midnight UTC).
pub fn parse_timestamp_str(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
