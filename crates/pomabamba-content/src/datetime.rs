//! Lenient date parsing for API payloads.
//!
//! The content API sends dates as plain strings and is not consistent about
//! offsets. Timestamps without an offset are read as UTC; calendar dates also
//! accept a full timestamp and keep its date part as written.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{de, Deserialize, Deserializer};

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse an RFC 3339 timestamp, an offset-less timestamp (as UTC) or a bare
/// date (midnight UTC).
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, DATE_FORMAT)
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .map(|naive| naive.and_utc())
}

/// Parse a calendar date, accepting full timestamps too.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();

    if let Ok(date) = NaiveDate::parse_from_str(raw, DATE_FORMAT) {
        return Some(date);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }

    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.date())
}

pub(crate) fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).ok_or_else(|| de::Error::custom(format!("invalid timestamp '{}'", raw)))
}

pub(crate) fn deserialize_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date(&raw).ok_or_else(|| de::Error::custom(format!("invalid date '{}'", raw)))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_timestamp_rfc3339_with_offset() {
        let ts = parse_timestamp("2026-08-11T07:00:00-05:00").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2026, 8, 11, 12, 0, 0).unwrap());
    }

    #[test]
    fn test_timestamp_without_offset_is_utc() {
        let ts = parse_timestamp("2026-08-11T07:00:00").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2026, 8, 11, 7, 0, 0).unwrap());

        let short = parse_timestamp("2026-08-11T07:00").unwrap();
        assert_eq!(short, ts);

        let fractional = parse_timestamp("2026-08-11T07:00:00.250").unwrap();
        assert_eq!(fractional.timestamp(), ts.timestamp());
    }

    #[test]
    fn test_timestamp_bare_date_is_midnight() {
        let ts = parse_timestamp("2026-02-14").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2026, 2, 14, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_timestamp_garbage_rejected() {
        assert!(parse_timestamp("mañana temprano").is_none());
        assert!(parse_timestamp("").is_none());
    }

    #[test]
    fn test_date_accepts_timestamps() {
        let expected = NaiveDate::from_ymd_opt(2026, 10, 4).unwrap();
        assert_eq!(parse_date("2026-10-04"), Some(expected));
        assert_eq!(parse_date("2026-10-04T00:00:00.000Z"), Some(expected));
        assert_eq!(parse_date("2026-10-04T23:30:00-05:00"), Some(expected));
        assert_eq!(parse_date("2026-10-04T08:00:00"), Some(expected));
        assert!(parse_date("04/10/2026").is_none());
    }
}
