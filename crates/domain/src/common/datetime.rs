//! DateTime formatting and parsing with consistent error handling.
//!
//! Timestamps written by this crate use the browser's `toISOString` shape:
//! UTC, exactly three fractional digits, `Z` suffix.

use chrono::{DateTime, SecondsFormat, Utc};

/// Parses an RFC3339 timestamp string, returning an error if parsing fails.
///
/// # Examples
///
/// ```
/// use squiggle_domain::common::parse_datetime;
/// use chrono::Datelike;
///
/// let dt = parse_datetime("2024-01-15T10:30:00Z").unwrap();
/// assert_eq!(dt.year(), 2024);
/// ```
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(s).map(|dt| dt.with_timezone(&Utc))
}

/// Formats a timestamp as `YYYY-MM-DDTHH:MM:SS.mmmZ`.
///
/// ```
/// use squiggle_domain::common::format_iso_millis;
/// use chrono::{TimeZone, Utc};
///
/// let dt = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
/// assert_eq!(format_iso_millis(&dt), "2024-01-15T10:30:00.000Z");
/// ```
pub fn format_iso_millis(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// UTC calendar date portion (`YYYY-MM-DD`) of a timestamp.
pub fn iso_date(dt: &DateTime<Utc>) -> String {
    dt.format("%Y-%m-%d").to_string()
}

/// Serde adapter that writes [`format_iso_millis`] and reads any RFC3339 string.
pub mod iso_millis {
    use chrono::{DateTime, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_iso_millis(dt))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_datetime(&raw).map_err(de::Error::custom)
    }
}
