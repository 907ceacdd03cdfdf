//! Curfew policy
//!
//! Closes the airport for a configured period. A daily curfew repeats every
//! day at the same time of day as its first occurrence; a one-off curfew
//! happens once.

use crate::core::time::start_of_day;
use crate::events::types::Event;
use crate::policy::{EventWorld, Policy, PolicyError};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

const POLICY: &str = "CurfewPolicy";

/// Longest curfew accepted
pub fn max_curfew_duration() -> Duration {
    Duration::days(30)
}

/// How often a curfew repeats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurfewRecurrence {
    /// Every day at the same time of day (duration must be under 24h)
    #[default]
    Daily,
    /// A single closure
    Once,
}

/// Airport-wide operating curfew
///
/// # Example
/// ```
/// use airport_capacity_core_rs::policy::CurfewPolicy;
/// use airport_capacity_core_rs::core::time::default_start;
/// use chrono::Duration;
///
/// // 23:00 - 06:00 every night
/// let start = default_start() + Duration::hours(23);
/// let policy = CurfewPolicy::daily(start, start + Duration::hours(7)).unwrap();
/// assert_eq!(policy.duration(), Duration::hours(7));
///
/// assert!(CurfewPolicy::daily(start, start).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CurfewPolicy {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    recurrence: CurfewRecurrence,
}

impl CurfewPolicy {
    /// Curfew with an explicit recurrence
    pub fn new(
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        recurrence: CurfewRecurrence,
    ) -> Result<Self, PolicyError> {
        if end <= start {
            return Err(PolicyError::invalid(POLICY, "curfew end time must be after start time"));
        }
        let duration = end - start;
        if duration > max_curfew_duration() {
            return Err(PolicyError::invalid(
                POLICY,
                format!(
                    "curfew duration of {}h exceeds maximum of {}h",
                    duration.num_hours(),
                    max_curfew_duration().num_hours()
                ),
            ));
        }
        if recurrence == CurfewRecurrence::Daily && duration >= Duration::days(1) {
            return Err(PolicyError::invalid(
                POLICY,
                "a daily curfew must last less than 24 hours",
            ));
        }
        Ok(Self {
            start,
            end,
            recurrence,
        })
    }

    /// Curfew repeating daily at `start`'s time of day
    pub fn daily(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, PolicyError> {
        Self::new(start, end, CurfewRecurrence::Daily)
    }

    /// Single curfew from `start` to `end`
    pub fn once(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, PolicyError> {
        Self::new(start, end, CurfewRecurrence::Once)
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    pub fn recurrence(&self) -> CurfewRecurrence {
        self.recurrence
    }

    /// Every curfew period overlapping `[window_start, window_end)`
    pub fn periods(
        &self,
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
    ) -> Vec<(DateTime<Utc>, DateTime<Utc>)> {
        let overlaps = |s: DateTime<Utc>, e: DateTime<Utc>| e > window_start && s < window_end;

        match self.recurrence {
            CurfewRecurrence::Once => {
                if overlaps(self.start, self.end) {
                    vec![(self.start, self.end)]
                } else {
                    Vec::new()
                }
            }
            CurfewRecurrence::Daily => {
                let time_of_day = self.start - start_of_day(self.start);
                let duration = self.duration();
                // Yesterday's curfew may still be running at the window start
                let mut day = start_of_day(window_start) - Duration::days(1);
                let mut periods = Vec::new();
                while day < window_end {
                    let s = day + time_of_day;
                    let e = s + duration;
                    if overlaps(s, e) {
                        periods.push((s, e));
                    }
                    day += Duration::days(1);
                }
                periods
            }
        }
    }
}

impl Policy for CurfewPolicy {
    fn name(&self) -> String {
        POLICY.to_string()
    }

    fn generate_events(&self, world: &dyn EventWorld) -> Result<(), PolicyError> {
        let window_start = world.start_time();
        for (start, end) in self.periods(window_start, world.end_time()) {
            world.schedule_event(Event::curfew_start(start.max(window_start)));
            world.schedule_event(Event::curfew_end(end));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::time::default_start;
    use crate::events::EventType;
    use crate::policy::test_support::RecordingWorld;

    #[test]
    fn test_daily_curfew_two_events_per_day() {
        let window_start = default_start() + Duration::hours(6);
        let world = RecordingWorld::new(window_start, window_start + Duration::days(3), &["09"]);
        let curfew_start = default_start() + Duration::hours(23);
        CurfewPolicy::daily(curfew_start, curfew_start + Duration::hours(7))
            .unwrap()
            .generate_events(&world)
            .unwrap();

        let events = world.sorted_events();
        assert_eq!(events.len(), 6);
        assert_eq!(events[0].event_type(), EventType::CurfewStart);
        assert_eq!(events[0].timestamp(), curfew_start);
        assert_eq!(events[5].timestamp(), window_start + Duration::days(3));
    }

    #[test]
    fn test_curfew_in_progress_at_start_clamped() {
        let world = RecordingWorld::new(default_start(), default_start() + Duration::days(1), &["09"]);
        let curfew_start = default_start() + Duration::hours(23);
        CurfewPolicy::daily(curfew_start, curfew_start + Duration::hours(7))
            .unwrap()
            .generate_events(&world)
            .unwrap();

        let events = world.sorted_events();
        // 00:00 start (clamped), 06:00 end, 23:00 start, 06:00 next-day end
        assert_eq!(events.len(), 4);
        assert_eq!(events[0].timestamp(), default_start());
        assert_eq!(events[0].event_type(), EventType::CurfewStart);
        assert_eq!(events[1].timestamp(), default_start() + Duration::hours(6));
    }

    #[test]
    fn test_once_outside_window_generates_nothing() {
        let world = RecordingWorld::new(default_start(), default_start() + Duration::days(1), &["09"]);
        let start = default_start() + Duration::days(5);
        CurfewPolicy::once(start, start + Duration::hours(2))
            .unwrap()
            .generate_events(&world)
            .unwrap();
        assert!(world.sorted_events().is_empty());
    }

    #[test]
    fn test_too_long_rejected() {
        let start = default_start();
        assert!(CurfewPolicy::once(start, start + Duration::days(31)).is_err());
        assert!(CurfewPolicy::daily(start, start + Duration::hours(24)).is_err());
        assert!(CurfewPolicy::once(start, start + Duration::days(30)).is_ok());
    }
}
