//! Time constants and duration helpers for the simulation timeline
//!
//! The engine measures time with `chrono::DateTime<Utc>` timestamps and
//! `chrono::Duration` spans. Capacity arithmetic is done in floating-point
//! seconds, so this module provides the conversions in one place.

use chrono::{DateTime, Duration, NaiveTime, Utc};

/// Hours in one day
pub const HOURS_PER_DAY: i64 = 24;

/// Days in one (non-leap) simulated year
pub const DAYS_PER_YEAR: i64 = 365;

/// Seconds in one hour
pub const SECONDS_PER_HOUR: i64 = 3600;

/// Reference window used when ranking runway configurations by throughput
pub const REFERENCE_WINDOW_SECONDS: f64 = 3600.0;

/// Unix timestamp of 2023-01-01T00:00:00Z, the default simulation start
const DEFAULT_START_UNIX_SECONDS: i64 = 1_672_531_200;

/// Length of one simulated year (365 days)
///
/// # Example
/// ```
/// use airport_capacity_core_rs::core::time::year_duration;
///
/// assert_eq!(year_duration().num_seconds(), 365 * 24 * 3600);
/// ```
pub fn year_duration() -> Duration {
    Duration::days(DAYS_PER_YEAR)
}

/// Default simulation start: midnight UTC on 2023-01-01 (a non-leap year)
pub fn default_start() -> DateTime<Utc> {
    DateTime::UNIX_EPOCH + Duration::seconds(DEFAULT_START_UNIX_SECONDS)
}

/// Convert a duration to fractional seconds
///
/// Sub-second precision is preserved down to nanoseconds.
pub fn seconds_f64(duration: Duration) -> f64 {
    duration.num_seconds() as f64 + f64::from(duration.subsec_nanos()) / 1e9
}

/// Convert fractional seconds to a duration (millisecond resolution)
///
/// Returns `None` for non-finite input or anything outside the range a
/// `Duration` can hold.
pub fn duration_from_seconds(seconds: f64) -> Option<Duration> {
    let millis = (seconds * 1000.0).round();
    if !millis.is_finite() || millis <= i64::MIN as f64 || millis >= i64::MAX as f64 {
        return None;
    }
    Duration::try_milliseconds(millis as i64)
}

/// Midnight (UTC) of the day containing `timestamp`
pub fn start_of_day(timestamp: DateTime<Utc>) -> DateTime<Utc> {
    timestamp.date_naive().and_time(NaiveTime::MIN).and_utc()
}

/// Serde adapter storing a `chrono::Duration` as a number of seconds
///
/// ```rust,ignore
/// #[serde(with = "crate::core::time::duration_seconds")]
/// pub minimum_separation: Duration,
/// ```
pub mod duration_seconds {
    use super::{duration_from_seconds, seconds_f64};
    use chrono::Duration;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(seconds_f64(*duration))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let seconds = f64::deserialize(deserializer)?;
        duration_from_seconds(seconds).ok_or_else(|| {
            serde::de::Error::custom(format!("duration of {seconds} seconds is out of range"))
        })
    }
}
