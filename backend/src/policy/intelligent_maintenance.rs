//! Curfew-aware, coordinated runway maintenance
//!
//! Like [`MaintenancePolicy`](super::MaintenancePolicy), but each window is
//! placed to cost as little capacity as possible:
//!
//! 1. Runways are staggered evenly across the maintenance frequency.
//! 2. For each window the first acceptable slot wins, searched in order:
//!    fully inside a curfew, ending as a curfew starts, starting as a curfew
//!    ends, then the preferred start.
//! 3. A slot is acceptable only if enough runways stay operational while it
//!    runs.

use crate::core::time::{duration_seconds, start_of_day};
use crate::events::types::Event;
use crate::policy::{ensure_runways_exist, ensure_schedule_in_range, EventWorld, Policy, PolicyError};
use chrono::{DateTime, Duration, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

const POLICY: &str = "IntelligentMaintenancePolicy";

/// A daily time-of-day window; wraps past midnight when `end < start`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyWindow {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl DailyWindow {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    /// Concrete occurrences touching `[from, to]`, in chronological order
    pub fn occurrences(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> Vec<TimeWindow> {
        let mut windows = Vec::new();
        let mut day = start_of_day(from);
        while day < to {
            let start = day.date_naive().and_time(self.start).and_utc();
            let mut end = day.date_naive().and_time(self.end).and_utc();
            if self.end < self.start {
                end += Duration::days(1);
            }
            if start <= to && end >= from {
                windows.push(TimeWindow { start, end });
            }
            day += Duration::days(1);
        }
        windows
    }
}

/// A concrete `[start, end)` interval
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    fn overlaps(&self, other: &TimeWindow) -> bool {
        self.start < other.end && self.end > other.start
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntelligentMaintenanceSchedule {
    pub runway_designations: Vec<String>,

    #[serde(rename = "duration_seconds", with = "duration_seconds")]
    pub duration: Duration,

    #[serde(rename = "frequency_seconds", with = "duration_seconds")]
    pub frequency: Duration,

    /// Runways that must stay operational (0 means the default of 1)
    #[serde(default)]
    pub minimum_operational_runways: usize,

    /// Daily curfew to hide maintenance inside, if any
    #[serde(default)]
    pub curfew: Option<DailyWindow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IntelligentMaintenancePolicy {
    schedule: IntelligentMaintenanceSchedule,
}

impl IntelligentMaintenancePolicy {
    pub fn new(mut schedule: IntelligentMaintenanceSchedule) -> Result<Self, PolicyError> {
        if schedule.runway_designations.is_empty() {
            return Err(PolicyError::invalid(POLICY, "at least one runway is required"));
        }
        if schedule.duration <= Duration::zero() {
            return Err(PolicyError::invalid(POLICY, "maintenance duration must be positive"));
        }
        if schedule.frequency <= Duration::zero() {
            return Err(PolicyError::invalid(POLICY, "maintenance frequency must be positive"));
        }
        if schedule.minimum_operational_runways == 0 {
            schedule.minimum_operational_runways = 1;
        }
        Ok(Self { schedule })
    }

    pub fn schedule(&self) -> &IntelligentMaintenanceSchedule {
        &self.schedule
    }

    /// Whether another window over `proposed` keeps enough runways open
    fn coordination_allows(&self, proposed: &TimeWindow, scheduled: &[TimeWindow]) -> bool {
        let total = self.schedule.runway_designations.len();
        if total == 1 {
            return true;
        }
        let concurrent = scheduled.iter().filter(|w| w.overlaps(proposed)).count();
        let max_concurrent = total.saturating_sub(self.schedule.minimum_operational_runways);
        concurrent < max_concurrent
    }

    fn find_slot(
        &self,
        preferred: DateTime<Utc>,
        end: DateTime<Utc>,
        curfews: &[TimeWindow],
        scheduled: &[TimeWindow],
    ) -> Option<DateTime<Utc>> {
        let duration = self.schedule.duration;
        let slot = |start: DateTime<Utc>| TimeWindow {
            start,
            end: start + duration,
        };

        let inside_curfew = curfews.iter().find(|c| {
            c.start >= preferred
                && c.end - c.start >= duration
                && c.start + duration <= end
                && self.coordination_allows(&slot(c.start), scheduled)
        });
        if let Some(curfew) = inside_curfew {
            return Some(curfew.start);
        }

        let before_curfew = curfews.iter().map(|c| c.start - duration).find(|&start| {
            start >= preferred && start + duration <= end && self.coordination_allows(&slot(start), scheduled)
        });
        if before_curfew.is_some() {
            return before_curfew;
        }

        let after_curfew = curfews.iter().map(|c| c.end).find(|&start| {
            start >= preferred && start + duration <= end && self.coordination_allows(&slot(start), scheduled)
        });
        if after_curfew.is_some() {
            return after_curfew;
        }

        self.coordination_allows(&slot(preferred), scheduled)
            .then_some(preferred)
    }
}

impl Policy for IntelligentMaintenancePolicy {
    fn name(&self) -> String {
        POLICY.to_string()
    }

    fn generate_events(&self, world: &dyn EventWorld) -> Result<(), PolicyError> {
        ensure_runways_exist(world, &self.schedule.runway_designations)?;
        ensure_schedule_in_range(POLICY, world, self.schedule.duration, self.schedule.frequency)?;

        let start = world.start_time();
        let end = world.end_time();
        let frequency_ms = self.schedule.frequency.num_milliseconds().max(1);
        let windows_per_runway = ((end - start).num_milliseconds() / frequency_ms).max(1);

        let curfews = self
            .schedule
            .curfew
            .map(|daily| daily.occurrences(start, end))
            .unwrap_or_default();

        let runway_count = self.schedule.runway_designations.len() as i32;
        let stagger = self.schedule.frequency / runway_count;
        let mut scheduled: Vec<TimeWindow> = Vec::new();

        for (index, runway) in self.schedule.runway_designations.iter().enumerate() {
            let mut preferred = start + stagger * index as i32;

            for _ in 0..windows_per_runway {
                let slot_start = match self.find_slot(preferred, end, &curfews, &scheduled) {
                    Some(slot_start) => slot_start,
                    None => {
                        warn!(
                            runway = %runway,
                            at = %preferred,
                            "no slot keeps enough runways open, using preferred start"
                        );
                        preferred
                    }
                };
                let slot_end = slot_start + self.schedule.duration;
                if slot_end > end {
                    break;
                }

                world.schedule_event(Event::maintenance_start(slot_start, runway.clone()));
                world.schedule_event(Event::maintenance_end(slot_end, runway.clone()));
                scheduled.push(TimeWindow {
                    start: slot_start,
                    end: slot_end,
                });

                preferred += self.schedule.frequency;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::time::default_start;
    use crate::events::{EventKind, EventType};
    use crate::policy::test_support::RecordingWorld;

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn schedule(runways: &[&str]) -> IntelligentMaintenanceSchedule {
        IntelligentMaintenanceSchedule {
            runway_designations: runways.iter().map(|s| s.to_string()).collect(),
            duration: Duration::hours(4),
            frequency: Duration::days(7),
            minimum_operational_runways: 0,
            curfew: None,
        }
    }

    #[test]
    fn test_minimum_defaults_to_one() {
        let policy = IntelligentMaintenancePolicy::new(schedule(&["09"])).unwrap();
        assert_eq!(policy.schedule().minimum_operational_runways, 1);
    }

    #[test]
    fn test_overnight_curfew_occurrences() {
        let daily = DailyWindow::new(hm(23, 0), hm(6, 0));
        let windows = daily.occurrences(default_start(), default_start() + Duration::days(2));
        assert_eq!(windows.len(), 2);
        assert_eq!(windows[0].start, default_start() + Duration::hours(23));
        assert_eq!(windows[0].end, default_start() + Duration::hours(30));
    }

    #[test]
    fn test_maintenance_hidden_in_curfew() {
        let world = RecordingWorld::new(default_start(), default_start() + Duration::days(7), &["09"]);
        let mut s = schedule(&["09"]);
        s.curfew = Some(DailyWindow::new(hm(23, 0), hm(6, 0)));
        IntelligentMaintenancePolicy::new(s).unwrap().generate_events(&world).unwrap();

        let events = world.sorted_events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].event_type(), EventType::RunwayMaintenanceStart);
        assert_eq!(events[0].timestamp(), default_start() + Duration::hours(23));
    }

    #[test]
    fn test_runways_staggered_without_overlap() {
        let world = RecordingWorld::new(default_start(), default_start() + Duration::days(14), &["09", "27"]);
        IntelligentMaintenancePolicy::new(schedule(&["09", "27"]))
            .unwrap()
            .generate_events(&world)
            .unwrap();

        let starts: Vec<_> = world
            .sorted_events()
            .into_iter()
            .filter_map(|e| match e.kind() {
                EventKind::RunwayMaintenanceStart { runway } => Some((runway.clone(), e.timestamp())),
                _ => None,
            })
            .collect();
        assert_eq!(starts.len(), 4);
        assert_eq!(starts[0], ("09".to_string(), default_start()));
        assert_eq!(
            starts[1],
            ("27".to_string(), default_start() + Duration::hours(84))
        );
    }

    #[test]
    fn test_duration_beyond_time_range_rejected() {
        let world = RecordingWorld::new(default_start(), default_start() + Duration::days(14), &["09", "27"]);
        let mut huge = schedule(&["09", "27"]);
        huge.duration = Duration::seconds(10_000_000_000_000);
        huge.frequency = Duration::seconds(10_000_000_000_000);

        let result = IntelligentMaintenancePolicy::new(huge).unwrap().generate_events(&world);
        assert!(matches!(result, Err(PolicyError::InvalidParameter { policy: POLICY, .. })));
        assert!(world.sorted_events().is_empty());
    }
}
