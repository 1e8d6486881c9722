//! Time-of-day and duration handling for split sheets
//!
//! Split sheets record the wall-clock time at which a skier passed each
//! checkpoint (`HH:MM:SS`). Seeding thresholds are durations written the same
//! way, except that the hour field is not limited to 23.

use chrono::{Duration, NaiveTime, Timelike};
use serde::{Deserialize, Deserializer};

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Parse a wall-clock split time such as `07:20:00` or `07:20:00.4`
pub fn parse_time_of_day(value: &str) -> Option<NaiveTime> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S%.f"))
        .ok()
}

/// Parse a duration written as `H:MM:SS` (hours may exceed 23)
///
/// `MM:SS` is accepted too. Minutes and seconds must be below 60.
pub fn parse_duration(value: &str) -> Option<Duration> {
    let parts: Vec<&str> = value.trim().split(':').collect();
    let (hours, minutes, seconds) = match parts.as_slice() {
        [h, m, s] => (h.parse::<i64>().ok()?, m.parse::<i64>().ok()?, s.parse::<i64>().ok()?),
        [m, s] => (0, m.parse::<i64>().ok()?, s.parse::<i64>().ok()?),
        _ => return None,
    };

    if hours < 0 || !(0..60).contains(&minutes) || !(0..60).contains(&seconds) {
        return None;
    }

    Some(Duration::seconds(hours * 3600 + minutes * 60 + seconds))
}

/// Seconds since midnight, including the fractional part
pub fn seconds_of_day(time: NaiveTime) -> f64 {
    f64::from(time.num_seconds_from_midnight()) + f64::from(time.nanosecond()) / 1e9
}

/// Inverse of [`seconds_of_day`], rounded to the millisecond
///
/// `None` when the value falls outside a single day.
pub fn time_from_seconds(seconds: f64) -> Option<NaiveTime> {
    if !seconds.is_finite() {
        return None;
    }
    let millis = (seconds * 1000.0).round();
    if !(0.0..SECONDS_PER_DAY * 1000.0).contains(&millis) {
        return None;
    }
    let millis = millis as u64;
    NaiveTime::from_num_seconds_from_midnight_opt(
        (millis / 1000) as u32,
        ((millis % 1000) * 1_000_000) as u32,
    )
}

/// Format a duration as `H:MM:SS`, with a leading `-` for negative values
pub fn format_duration(duration: Duration) -> String {
    let total = duration.num_seconds();
    let sign = if total < 0 { "-" } else { "" };
    let total = total.abs();
    format!(
        "{}{}:{:02}:{:02}",
        sign,
        total / 3600,
        (total % 3600) / 60,
        total % 60
    )
}

/// Serde adapter for `H:MM:SS` duration strings in config files
pub fn deserialize_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_duration(&raw).ok_or_else(|| {
        serde::de::Error::custom(format!("invalid duration '{}': expected H:MM:SS", raw))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_time_of_day() {
        let t = parse_time_of_day("07:20:00").unwrap();
        assert_eq!(t, NaiveTime::from_hms_opt(7, 20, 0).unwrap());
    }

    #[test]
    fn test_parse_time_of_day_trims_whitespace() {
        assert!(parse_time_of_day(" 06:00:00 ").is_some());
    }

    #[test]
    fn test_parse_time_of_day_fractional() {
        let t = parse_time_of_day("06:00:01.5").unwrap();
        assert_eq!(seconds_of_day(t), 6.0 * 3600.0 + 1.5);
    }

    #[test]
    fn test_parse_time_of_day_rejects_garbage() {
        assert!(parse_time_of_day("DNF").is_none());
        assert!(parse_time_of_day("25:00:00").is_none());
        assert!(parse_time_of_day("").is_none());
    }

    #[test]
    fn test_parse_duration_allows_long_hours() {
        assert_eq!(parse_duration("2:30:00"), Some(Duration::minutes(150)));
        assert_eq!(parse_duration("26:00:00"), Some(Duration::hours(26)));
        assert_eq!(parse_duration("45:10"), Some(Duration::seconds(2710)));
    }

    #[test]
    fn test_parse_duration_rejects_out_of_range_fields() {
        assert!(parse_duration("1:60:00").is_none());
        assert!(parse_duration("1:00:75").is_none());
        assert!(parse_duration("-1:00:00").is_none());
        assert!(parse_duration("soon").is_none());
    }

    #[test]
    fn test_time_from_seconds_inverse() {
        let t = NaiveTime::from_hms_opt(6, 40, 0).unwrap();
        assert_eq!(time_from_seconds(seconds_of_day(t)), Some(t));
    }

    #[test]
    fn test_time_from_seconds_absorbs_float_noise() {
        let t = NaiveTime::from_hms_opt(6, 45, 0).unwrap();
        assert_eq!(time_from_seconds(24_299.999_999_99), Some(t));
    }

    #[test]
    fn test_time_from_seconds_out_of_range() {
        assert!(time_from_seconds(-1.0).is_none());
        assert!(time_from_seconds(SECONDS_PER_DAY).is_none());
        assert!(time_from_seconds(f64::NAN).is_none());
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::seconds(3661)), "1:01:01");
        assert_eq!(format_duration(Duration::seconds(-90)), "-0:01:30");
    }
}
