//! Lenient parsing for the timestamps and calendar dates the route API emits.
//!
//! The HOS service serializes timestamps either as RFC 3339 or as naive ISO
//! strings without an offset. Naive values are read as UTC.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, de::Error as _};

pub type Timestamp = DateTime<FixedOffset>;

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

pub fn parse_timestamp(raw: &str) -> Option<Timestamp> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed);
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc().fixed_offset())
}

/// Accepts `YYYY-MM-DD` or any timestamp accepted by [`parse_timestamp`].
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| parse_timestamp(raw).map(|ts| ts.date_naive()))
}

pub fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<Timestamp, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).ok_or_else(|| D::Error::custom(format!("invalid timestamp `{raw}`")))
}

pub fn deserialize_calendar_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_calendar_date(&raw).ok_or_else(|| D::Error::custom(format!("invalid date `{raw}`")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn parses_rfc3339_with_offset() {
        let ts = parse_timestamp("2024-03-04T08:30:00-05:00").unwrap();
        assert_eq!(ts.hour(), 8);
        assert_eq!(ts.offset().local_minus_utc(), -5 * 3600);
    }

    #[test]
    fn naive_timestamps_are_utc() {
        let ts = parse_timestamp("2024-03-04T08:30:00.250").unwrap();
        assert_eq!(ts.offset().local_minus_utc(), 0);
        assert_eq!(ts.minute(), 30);

        let spaced = parse_timestamp("2024-03-04 08:30:00").unwrap();
        assert_eq!(spaced.hour(), 8);
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_timestamp("yesterday").is_none());
        assert!(parse_calendar_date("04/03/2024").is_none());
    }

    #[test]
    fn calendar_date_accepts_timestamps() {
        let date = parse_calendar_date("2024-03-04T23:00:00Z").unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (2024, 3, 4));
        let plain = parse_calendar_date("2024-12-31").unwrap();
        assert_eq!(plain.day(), 31);
    }
}
