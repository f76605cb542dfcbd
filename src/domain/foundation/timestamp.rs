//! Timestamp value object for immutable points in time.
//!
//! Besides the usual comparisons this type owns the two pieces of date
//! handling the rest of the crate depends on: lenient parsing of the many
//! encodings stored client-side, and calendar-aware month/year addition.

use chrono::{DateTime, Duration, Months, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Naive layouts accepted in addition to RFC 3339. Interpreted as UTC.
const NAIVE_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Immutable point in time, always UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a timestamp from a DateTime<Utc>.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Returns the inner DateTime.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Parses a timestamp from the string encodings found in stored records
    /// and API payloads.
    ///
    /// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS[.f]`, `YYYY-MM-DDTHH:MM:SS[.f]`
    /// and bare `YYYY-MM-DD` (midnight). Values without an offset are UTC.
    pub fn parse_lenient(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(Self(dt.with_timezone(&Utc)));
        }

        for format in NAIVE_DATETIME_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
                return Some(Self(naive.and_utc()));
            }
        }

        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| Self(naive.and_utc()))
    }

    /// Parses a timestamp out of an arbitrary JSON value.
    ///
    /// Strings go through [`Timestamp::parse_lenient`]; numbers are Unix
    /// epoch milliseconds. Anything else yields `None`.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Self::parse_lenient(s),
            Value::Number(n) => {
                let millis = n.as_i64().or_else(|| n.as_f64().map(|f| f as i64))?;
                Utc.timestamp_millis_opt(millis).single().map(Self)
            }
            _ => None,
        }
    }

    /// Checks if this timestamp is after another.
    pub fn is_after(&self, other: &Timestamp) -> bool {
        self.0 > other.0
    }

    /// Returns the duration from another timestamp to this one.
    ///
    /// Returns negative duration if other is after self.
    pub fn duration_since(&self, other: &Timestamp) -> Duration {
        self.0.signed_duration_since(other.0)
    }

    /// Creates a new timestamp by adding the specified number of days.
    pub fn checked_add_days(&self, days: i64) -> Option<Self> {
        self.0.checked_add_signed(Duration::days(days)).map(Self)
    }

    /// Creates a new timestamp by adding the specified number of hours.
    pub fn checked_add_hours(&self, hours: i64) -> Option<Self> {
        self.0.checked_add_signed(Duration::hours(hours)).map(Self)
    }

    /// Adds calendar months.
    ///
    /// A day that does not exist in the target month is clamped to that
    /// month's last day (Jan 31 + 1 month = Feb 29 in a leap year).
    pub fn checked_add_months(&self, months: u32) -> Option<Self> {
        self.0.checked_add_months(Months::new(months)).map(Self)
    }

    /// Adds calendar years, clamping Feb 29 to Feb 28 in non-leap years.
    pub fn checked_add_years(&self, years: u32) -> Option<Self> {
        years
            .checked_mul(12)
            .and_then(|months| self.checked_add_months(months))
    }

    /// Whole days from `from` until this timestamp, rounding any partial
    /// day up. Negative when this timestamp is already behind `from`.
    pub fn days_after_ceil(&self, from: &Timestamp) -> i64 {
        let millis = self.duration_since(from).num_milliseconds();
        (millis + MILLIS_PER_DAY - 1).div_euclid(MILLIS_PER_DAY)
    }

    /// RFC 3339 rendering with millisecond precision, as sent to the API.
    pub fn to_rfc3339(&self) -> String {
        self.0.to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d %H:%M:%S UTC"))
    }
}
