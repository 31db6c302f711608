//! Timestamp normalization for JSON log lines.
//!
//! Accepts RFC 3339 strings, `YYYY-MM-DD HH:MM:SS[.fff]` strings (UTC
//! assumed) and numeric Unix epochs. Epoch units are guessed from magnitude.

use std::fmt;

use jiff::civil::DateTime;
use jiff::tz::TimeZone;
use serde_json::{Number, Value};

/// Display format: UTC with millisecond precision, e.g.
/// `2026-01-15T10:30:00.123Z`.
pub const DISPLAY_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

const CIVIL_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"];

/// Parsed point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timestamp(pub jiff::Timestamp);

impl Timestamp {
    /// Parse a timestamp field value. Returns `None` for values that are not
    /// recognizable times.
    pub fn from_json_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Self::parse_str(s),
            Value::Number(n) => Self::from_epoch(n),
            _ => None,
        }
    }

    pub fn parse_str(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Ok(ts) = s.parse::<jiff::Timestamp>() {
            return Some(Self(ts));
        }
        CIVIL_FORMATS.iter().find_map(|format| {
            let civil = DateTime::strptime(format, s).ok()?;
            let zoned = civil.to_zoned(TimeZone::UTC).ok()?;
            Some(Self(zoned.timestamp()))
        })
    }

    /// Below 1e12 seconds, below 1e15 milliseconds, nanoseconds above.
    fn from_epoch(n: &Number) -> Option<Self> {
        if let Some(i) = n.as_i64() {
            let ts = if i.abs() < 1_000_000_000_000 {
                jiff::Timestamp::from_second(i)
            } else if i.abs() < 1_000_000_000_000_000 {
                jiff::Timestamp::from_millisecond(i)
            } else {
                jiff::Timestamp::from_nanosecond(i128::from(i))
            };
            return ts.ok().map(Self);
        }

        let f = n.as_f64()?;
        #[allow(clippy::cast_possible_truncation)]
        let ts = if f.abs() < 1e12 {
            jiff::Timestamp::new(f.trunc() as i64, (f.fract() * 1e9) as i32)
        } else {
            jiff::Timestamp::from_millisecond(f as i64)
        };
        ts.ok().map(Self)
    }

    pub fn format_with(&self, format: &str) -> String {
        self.0.to_zoned(TimeZone::UTC).strftime(format).to_string()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with(DISPLAY_FORMAT))
    }
}

/// Display text for a timestamp field: normalized when parseable, the
/// original string otherwise.
pub fn display_value(value: &Value) -> Option<String> {
    match (Timestamp::from_json_value(value), value) {
        (Some(ts), _) => Some(ts.to_string()),
        (None, Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
        _ => None,
    }
}
