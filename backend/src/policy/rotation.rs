//! Runway rotation policy
//!
//! Rotating traffic between runways (for noise sharing or preferential-use
//! rules) costs throughput. Each strategy maps to an efficiency multiplier
//! applied to the whole airport's capacity, either permanently or only
//! during scheduled hours.

use crate::core::time::start_of_day;
use crate::events::types::Event;
use crate::policy::{EventWorld, Policy, PolicyError};
use chrono::{DateTime, Datelike, Duration, Utc, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

const POLICY: &str = "RunwayRotationPolicy";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RotationStrategy {
    NoRotation,
    TimeBasedRotation,
    PreferentialRunway,
    NoiseOptimizedRotation,
}

impl fmt::Display for RotationStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RotationStrategy::NoRotation => "NoRotation",
            RotationStrategy::TimeBasedRotation => "TimeBasedRotation",
            RotationStrategy::PreferentialRunway => "PreferentialRunway",
            RotationStrategy::NoiseOptimizedRotation => "NoiseOptimizedRotation",
        };
        f.write_str(name)
    }
}

/// Efficiency multiplier per strategy, each in (0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RotationEfficiencies {
    pub no_rotation: f64,
    pub time_based_rotation: f64,
    pub preferential_runway: f64,
    pub noise_optimized_rotation: f64,
}

impl Default for RotationEfficiencies {
    fn default() -> Self {
        Self {
            no_rotation: 1.0,
            time_based_rotation: 0.95,
            preferential_runway: 0.90,
            noise_optimized_rotation: 0.80,
        }
    }
}

impl RotationEfficiencies {
    pub fn multiplier(&self, strategy: RotationStrategy) -> f64 {
        match strategy {
            RotationStrategy::NoRotation => self.no_rotation,
            RotationStrategy::TimeBasedRotation => self.time_based_rotation,
            RotationStrategy::PreferentialRunway => self.preferential_runway,
            RotationStrategy::NoiseOptimizedRotation => self.noise_optimized_rotation,
        }
    }

    fn validate(&self) -> Result<(), PolicyError> {
        let all = [
            (RotationStrategy::NoRotation, self.no_rotation),
            (RotationStrategy::TimeBasedRotation, self.time_based_rotation),
            (RotationStrategy::PreferentialRunway, self.preferential_runway),
            (RotationStrategy::NoiseOptimizedRotation, self.noise_optimized_rotation),
        ];
        for (strategy, value) in all {
            if !(value > 0.0 && value <= 1.0) {
                return Err(PolicyError::invalid(
                    POLICY,
                    format!("efficiency for {} must be in (0, 1], got {}", strategy, value),
                ));
            }
        }
        Ok(())
    }
}

/// Hours during which rotation applies; wraps past midnight when
/// `end_hour <= start_hour`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotationSchedule {
    pub start_hour: u32,
    pub end_hour: u32,
    /// Days the rotation starts on (`None` = every day)
    #[serde(default)]
    pub days_of_week: Option<Vec<Weekday>>,
}

impl RotationSchedule {
    fn applies_on(&self, day: Weekday) -> bool {
        self.days_of_week
            .as_ref()
            .map(|days| days.contains(&day))
            .unwrap_or(true)
    }
}

/// Applies a rotation strategy's efficiency penalty
///
/// # Example
/// ```
/// use airport_capacity_core_rs::policy::{Policy, RotationStrategy, RunwayRotationPolicy};
///
/// let policy = RunwayRotationPolicy::with_defaults(RotationStrategy::PreferentialRunway);
/// assert_eq!(policy.multiplier(), 0.90);
/// assert_eq!(policy.name(), "RunwayRotationPolicy(PreferentialRunway)");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RunwayRotationPolicy {
    strategy: RotationStrategy,
    efficiencies: RotationEfficiencies,
    schedule: Option<RotationSchedule>,
}

impl RunwayRotationPolicy {
    pub fn new(
        strategy: RotationStrategy,
        efficiencies: RotationEfficiencies,
        schedule: Option<RotationSchedule>,
    ) -> Result<Self, PolicyError> {
        efficiencies.validate()?;
        if let Some(schedule) = &schedule {
            if schedule.start_hour > 23 || schedule.end_hour > 23 {
                return Err(PolicyError::invalid(POLICY, "schedule hours must be in 0-23"));
            }
            if schedule.days_of_week.as_ref().is_some_and(|days| days.is_empty()) {
                return Err(PolicyError::invalid(POLICY, "schedule days must not be empty"));
            }
        }
        Ok(Self {
            strategy,
            efficiencies,
            schedule,
        })
    }

    /// Always-on rotation with the default efficiency table
    pub fn with_defaults(strategy: RotationStrategy) -> Self {
        Self {
            strategy,
            efficiencies: RotationEfficiencies::default(),
            schedule: None,
        }
    }

    pub fn strategy(&self) -> RotationStrategy {
        self.strategy
    }

    pub fn multiplier(&self) -> f64 {
        self.efficiencies.multiplier(self.strategy)
    }

    /// Rotation periods overlapping `[from, to)`
    fn periods(
        &self,
        schedule: &RotationSchedule,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Vec<(DateTime<Utc>, DateTime<Utc>)> {
        let start_offset = Duration::hours(i64::from(schedule.start_hour));
        let mut length = Duration::hours(i64::from(schedule.end_hour) - i64::from(schedule.start_hour));
        if length <= Duration::zero() {
            length += Duration::days(1);
        }

        let mut periods = Vec::new();
        let mut day = start_of_day(from) - Duration::days(1);
        while day < to {
            if schedule.applies_on(day.weekday()) {
                let start = day + start_offset;
                let end = start + length;
                if end > from && start < to {
                    periods.push((start, end));
                }
            }
            day += Duration::days(1);
        }
        periods
    }
}

impl Policy for RunwayRotationPolicy {
    fn name(&self) -> String {
        format!("{}({})", POLICY, self.strategy)
    }

    fn generate_events(&self, world: &dyn EventWorld) -> Result<(), PolicyError> {
        let start = world.start_time();
        let end = world.end_time();
        let multiplier = self.multiplier();

        let Some(schedule) = &self.schedule else {
            world.schedule_event(Event::rotation_change(start, multiplier));
            return Ok(());
        };

        for (period_start, period_end) in self.periods(schedule, start, end) {
            world.schedule_event(Event::rotation_change(period_start.max(start), multiplier));
            if period_end < end {
                world.schedule_event(Event::rotation_change(period_end, 1.0));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::time::default_start;
    use crate::events::EventKind;
    use crate::policy::test_support::RecordingWorld;

    fn multipliers(world: &RecordingWorld) -> Vec<f64> {
        world
            .sorted_events()
            .iter()
            .filter_map(|e| match e.kind() {
                EventKind::RotationChange { multiplier } => Some(*multiplier),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_unscheduled_single_event() {
        let world = RecordingWorld::new(default_start(), default_start() + Duration::days(10), &["09"]);
        RunwayRotationPolicy::with_defaults(RotationStrategy::NoiseOptimizedRotation)
            .generate_events(&world)
            .unwrap();
        assert_eq!(multipliers(&world), vec![0.80]);
    }

    #[test]
    fn test_scheduled_daytime_pairs() {
        let world = RecordingWorld::new(default_start(), default_start() + Duration::days(3), &["09"]);
        let schedule = RotationSchedule {
            start_hour: 8,
            end_hour: 20,
            days_of_week: None,
        };
        RunwayRotationPolicy::new(
            RotationStrategy::TimeBasedRotation,
            RotationEfficiencies::default(),
            Some(schedule),
        )
        .unwrap()
        .generate_events(&world)
        .unwrap();
        assert_eq!(multipliers(&world), vec![0.95, 1.0, 0.95, 1.0, 0.95, 1.0]);
    }

    #[test]
    fn test_weekday_filter() {
        // 2023-01-01 is a Sunday
        let world = RecordingWorld::new(default_start(), default_start() + Duration::days(7), &["09"]);
        let schedule = RotationSchedule {
            start_hour: 8,
            end_hour: 20,
            days_of_week: Some(vec![Weekday::Sat, Weekday::Sun]),
        };
        RunwayRotationPolicy::new(
            RotationStrategy::PreferentialRunway,
            RotationEfficiencies::default(),
            Some(schedule),
        )
        .unwrap()
        .generate_events(&world)
        .unwrap();
        assert_eq!(world.sorted_events().len(), 4);
    }

    #[test]
    fn test_out_of_range_efficiency_rejected() {
        let efficiencies = RotationEfficiencies {
            preferential_runway: 1.2,
            ..RotationEfficiencies::default()
        };
        assert!(RunwayRotationPolicy::new(RotationStrategy::NoRotation, efficiencies, None).is_err());
    }
}
