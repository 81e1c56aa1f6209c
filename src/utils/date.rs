use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use crate::core::library::{LibraryError, LibraryResult};

pub const DATE_FMT: &str = "%Y-%m-%dT%H:%M:%S%.f";

// current calendar day, the reference point for every expiry check
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

// Shifts a date by a number of days; out of range shifts are rejected
// instead of panicking.
pub fn add_days(date: NaiveDate, days: i64) -> LibraryResult<NaiveDate> {
    Duration::try_days(days)
        .and_then(|delta| date.checked_add_signed(delta))
        .ok_or_else(|| LibraryError::validation(
            format!("Cannot shift {} by {} days", date, days).as_str()))
}

// Accepts RFC 3339 as well as a space separated or zone-less timestamp,
// the latter read as UTC.
pub fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(time) = DateTime::parse_from_rfc3339(s) {
        return Some(time.with_timezone(&Utc));
    }
    let t_separated = s.replacen(' ', "T", 1);
    if let Ok(time) = DateTime::parse_from_rfc3339(t_separated.as_str()) {
        return Some(time.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(t_separated.as_str(), DATE_FMT).ok()
        .map(|time| time.and_utc())
}

pub mod serializer {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use serde::de::Error;
    use crate::utils::date::parse_datetime;

    pub fn serialize<S: Serializer>(time: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        time.to_rfc3339().serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let str_time: String = Deserialize::deserialize(deserializer)?;
        parse_datetime(str_time.as_str())
            .ok_or_else(|| D::Error::custom(format!("invalid timestamp {}", str_time)))
    }
}

pub mod opt_serializer {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use serde::de::Error;
    use crate::utils::date::parse_datetime;

    pub fn serialize<S: Serializer>(time: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error> {
        time.map(|t| t.to_rfc3339()).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error> {
        let str_time: Option<String> = Deserialize::deserialize(deserializer)?;
        match str_time {
            Some(s) if !s.is_empty() => parse_datetime(s.as_str())
                .map(Some)
                .ok_or_else(|| D::Error::custom(format!("invalid timestamp {}", s))),
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, NaiveDate, Timelike};
    use crate::core::library::LibraryError;
    use crate::utils::date::{add_days, parse_datetime};

    #[test]
    fn test_should_add_days() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 27).expect("should build date");
        assert_eq!(NaiveDate::from_ymd_opt(2024, 3, 1), add_days(date, 3).ok());
        assert_eq!(NaiveDate::from_ymd_opt(2024, 2, 20), add_days(date, -7).ok());
    }

    #[test]
    fn test_should_reject_out_of_range_days() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 27).expect("should build date");
        assert!(matches!(add_days(date, i64::MAX), Err(LibraryError::Validation { .. })));
        assert!(matches!(add_days(date, 1_000_000_000), Err(LibraryError::Validation { .. })));
    }

    #[test]
    fn test_should_parse_rfc3339() {
        let time = parse_datetime("2024-05-01T10:20:30+02:00").expect("should parse");
        assert_eq!(8, time.hour());
    }

    #[test]
    fn test_should_parse_space_separated() {
        let time = parse_datetime("2024-05-01 10:20:30.123456+00:00").expect("should parse");
        assert_eq!(10, time.hour());
        assert_eq!(5, time.month());
    }

    #[test]
    fn test_should_parse_naive_as_utc() {
        let time = parse_datetime("2024-05-01T10:20:30.5").expect("should parse");
        assert_eq!(20, time.minute());
        assert!(parse_datetime("yesterday").is_none());
    }
}
