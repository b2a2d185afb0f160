//! Time related utils.

use chrono::{TimeZone, Utc};

use crate::{Error, Result};

/// DateTime is the alias for `chrono::DateTime<Utc>`.
pub type DateTime = chrono::DateTime<Utc>;

/// Create datetime of now.
pub fn now() -> DateTime {
    Utc::now()
}

/// Format time into date: `2022-03-13`
pub fn format_date(t: DateTime) -> String {
    t.format("%Y-%m-%d").to_string()
}

/// Format time into ISO 8601 with separators: `2022-03-13T07:20:04Z`
pub fn format_iso8601(t: DateTime) -> String {
    t.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// Build a datetime from unix seconds.
pub fn from_timestamp(secs: i64) -> Result<DateTime> {
    Utc.timestamp_opt(secs, 0)
        .single()
        .ok_or_else(|| Error::unexpected(format!("timestamp {secs} is out of range")))
}
