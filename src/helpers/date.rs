//! Publication date helpers
//!
//! Timestamps arrive from the content API as ISO 8601 strings and stay
//! strings in the models; anything that needs an actual instant parses
//! them here. Ordering is strict: two posts published at the exact same
//! instant are neither before nor after each other.

use chrono::{DateTime, Datelike, FixedOffset};
use thiserror::Error;

/// A timestamp that does not parse to a valid instant
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid publication timestamp: {0:?}")]
pub struct InvalidDate(pub String);

/// Parse a timestamp as delivered by the content API
///
/// Accepts RFC 3339 (`2021-03-15T19:25:28+00:00`), the compact-offset
/// variant some backends emit (`2021-03-15T19:25:28+0000`), and bare
/// dates (`2021-03-15`, taken as midnight UTC).
pub fn parse_timestamp(ts: &str) -> Result<DateTime<FixedOffset>, InvalidDate> {
    let ts = ts.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(ts) {
        return Ok(dt);
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S%z", "%Y-%m-%dT%H:%M:%S%.f%z"] {
        if let Ok(dt) = DateTime::parse_from_str(ts, fmt) {
            return Ok(dt);
        }
    }

    if let Ok(date) = chrono::NaiveDate::parse_from_str(ts, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            let utc = FixedOffset::east_opt(0).unwrap();
            return Ok(DateTime::from_naive_utc_and_offset(midnight, utc));
        }
    }

    Err(InvalidDate(ts.to_string()))
}

/// `true` when `a` names an instant strictly after `b`
pub fn is_after(a: &str, b: &str) -> Result<bool, InvalidDate> {
    Ok(parse_timestamp(a)? > parse_timestamp(b)?)
}

/// `true` when `a` names an instant strictly before `b`
pub fn is_before(a: &str, b: &str) -> Result<bool, InvalidDate> {
    Ok(parse_timestamp(a)? < parse_timestamp(b)?)
}

/// Format a timestamp for display: zero-padded day, abbreviated month
/// name, four-digit year (`15 Mar 2021`)
///
/// Callers decide what to show for a missing date; there is no
/// placeholder output here.
pub fn format_display(ts: &str, language: &str) -> Result<String, InvalidDate> {
    let dt = parse_timestamp(ts)?;
    Ok(format!(
        "{:02} {} {}",
        dt.day(),
        month_abbrev(language, dt.month()),
        dt.year()
    ))
}

/// Month abbreviation for the given language, falling back to English
fn month_abbrev(language: &str, month: u32) -> &'static str {
    const EN: [&str; 12] = [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ];
    const PT_BR: [&str; 12] = [
        "jan", "fev", "mar", "abr", "mai", "jun", "jul", "ago", "set", "out", "nov", "dez",
    ];

    let idx = (month as usize).saturating_sub(1).min(11);
    match language {
        "pt-br" | "pt" => PT_BR[idx],
        _ => EN[idx],
    }
}
