//! Builders for common wind schedules
//!
//! Each function returns a list of [`WindChange`]s suitable for
//! [`ScheduledWindPolicy`](super::ScheduledWindPolicy). Combine several with
//! [`combine_wind_schedules`].

use crate::core::time::start_of_day;
use crate::policy::wind::{WindChange, WindVector};
use crate::policy::PolicyError;
use crate::selection::wind::{angle_difference, normalize_direction};
use chrono::{DateTime, Duration, NaiveDate, Utc};

/// Typical daily cycle: calm at midnight, then morning (06:00), afternoon
/// (15:00) and evening (21:00) speeds, all from one direction
pub fn diurnal_wind_pattern(
    start_date: DateTime<Utc>,
    days: u32,
    morning_speed: f64,
    afternoon_speed: f64,
    evening_speed: f64,
    direction_true: f64,
) -> Vec<WindChange> {
    let first_day = start_of_day(start_date);
    let mut schedule = Vec::with_capacity(days as usize * 4);

    for day in 0..i64::from(days) {
        let midnight = first_day + Duration::days(day);
        for (hour, speed) in [
            (0, 0.0),
            (6, morning_speed),
            (15, afternoon_speed),
            (21, evening_speed),
        ] {
            schedule.push(WindChange::new(
                midnight + Duration::hours(hour),
                WindVector::new(speed, direction_true),
            ));
        }
    }
    schedule
}

/// One wind from `timestamp` onwards
pub fn constant_wind_pattern(timestamp: DateTime<Utc>, wind: WindVector) -> Vec<WindChange> {
    vec![WindChange::new(timestamp, wind)]
}

/// Pre-frontal wind one hour before passage, post-frontal wind at passage
pub fn frontal_passage_pattern(
    passage: DateTime<Utc>,
    pre_frontal: WindVector,
    post_frontal: WindVector,
) -> Vec<WindChange> {
    vec![
        WindChange::new(passage - Duration::hours(1), pre_frontal),
        WindChange::new(passage, post_frontal),
    ]
}

/// Evenly spaced interpolation from `initial` to `last` over `duration`
///
/// Direction turns the short way round (never more than 180 degrees).
///
/// # Example
/// ```
/// use airport_capacity_core_rs::policy::wind_patterns::linear_wind_transition;
/// use airport_capacity_core_rs::policy::WindVector;
/// use airport_capacity_core_rs::core::time::default_start;
/// use chrono::Duration;
///
/// let schedule = linear_wind_transition(
///     default_start(),
///     Duration::hours(2),
///     3,
///     WindVector::new(10.0, 350.0),
///     WindVector::new(20.0, 10.0),
/// ).unwrap();
///
/// assert_eq!(schedule[1].speed_knots, 15.0);
/// assert_eq!(schedule[1].direction_true, 0.0);
/// assert_eq!(schedule[2].timestamp, default_start() + Duration::hours(2));
/// ```
pub fn linear_wind_transition(
    start: DateTime<Utc>,
    duration: Duration,
    steps: u32,
    initial: WindVector,
    last: WindVector,
) -> Result<Vec<WindChange>, PolicyError> {
    if steps < 2 {
        return Err(PolicyError::invalid(
            "LinearWindTransition",
            format!("steps must be at least 2, got {}", steps),
        ));
    }

    let direction_delta = angle_difference(initial.direction_true, last.direction_true);
    let speed_delta = last.speed_knots - initial.speed_knots;
    let intervals = steps - 1;
    let step_duration = duration / intervals as i32;

    Ok((0..steps)
        .map(|i| {
            let progress = f64::from(i) / f64::from(intervals);
            WindChange::new(
                start + step_duration * i as i32,
                WindVector::new(
                    initial.speed_knots + speed_delta * progress,
                    normalize_direction(initial.direction_true + direction_delta * progress),
                ),
            )
        })
        .collect())
}

/// Seasonal winds starting on Jan 1, Mar 20, Jun 21 and Sep 22 of `year`
pub fn seasonal_wind_pattern(
    year: i32,
    winter: WindVector,
    spring: WindVector,
    summer: WindVector,
    autumn: WindVector,
) -> Result<Vec<WindChange>, PolicyError> {
    [(1, 1, winter), (3, 20, spring), (6, 21, summer), (9, 22, autumn)]
        .into_iter()
        .map(|(month, day, wind)| {
            NaiveDate::from_ymd_opt(year, month, day)
                .and_then(|date| date.and_hms_opt(0, 0, 0))
                .map(|midnight| WindChange::new(midnight.and_utc(), wind))
                .ok_or_else(|| {
                    PolicyError::invalid("SeasonalWindPattern", format!("year {} out of range", year))
                })
        })
        .collect()
}

/// Merge schedules into one chronological schedule
///
/// Entries with equal timestamps keep their input order.
pub fn combine_wind_schedules(schedules: &[Vec<WindChange>]) -> Vec<WindChange> {
    let mut combined: Vec<WindChange> = schedules.iter().flatten().copied().collect();
    combined.sort_by_key(|change| change.timestamp);
    combined
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::time::default_start;

    #[test]
    fn test_steps_below_two_rejected() {
        let result = linear_wind_transition(
            default_start(),
            Duration::hours(1),
            1,
            WindVector::calm(),
            WindVector::calm(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_frontal_passage_one_hour_apart() {
        let passage = default_start() + Duration::hours(12);
        let schedule = frontal_passage_pattern(
            passage,
            WindVector::new(15.0, 180.0),
            WindVector::new(25.0, 270.0),
        );
        assert_eq!(schedule[1].timestamp - schedule[0].timestamp, Duration::hours(1));
        assert_eq!(schedule[1].direction_true, 270.0);
    }
}
