use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer};

use crate::error::{Error, Result};

pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Calendar day used for expiration checks.
pub fn today_of(instant: DateTime<Utc>) -> NaiveDate {
    instant.date_naive()
}

/// Strict `YYYY-MM-DD` parsing for dates coming from query strings.
pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    let raw = raw.trim();
    if raw.len() != 10 {
        return Err(Error::InvalidArgument(format!(
            "date must be formatted as YYYY-MM-DD, got '{}'",
            raw
        )));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|e| {
        Error::InvalidArgument(format!("invalid date '{}': {}", raw, e))
    })
}

/// Serde adapter applying [`parse_date`] to body fields.
pub fn deserialize_date<'de, D>(deserializer: D) -> std::result::Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date(&raw).map_err(serde::de::Error::custom)
}

pub fn deserialize_optional_date<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) => parse_date(&raw).map(Some).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn strict_dates_only() {
        assert_eq!(
            parse_date("2024-02-29").unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
        assert!(parse_date("2023-02-29").is_err());
        assert!(parse_date("2024-2-9").is_err());
        assert!(parse_date("invalid_date").is_err());
    }

    #[test]
    fn today_is_the_utc_calendar_day() {
        let instant = Utc.with_ymd_and_hms(2024, 6, 30, 23, 59, 0).unwrap();
        assert_eq!(today_of(instant), NaiveDate::from_ymd_opt(2024, 6, 30).unwrap());
    }
}
