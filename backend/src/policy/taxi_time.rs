//! Taxi time policy
//!
//! Taxi-in and taxi-out time extend every gate turnaround. The engine only
//! applies this overhead while a gate ceiling is in force.

use crate::core::time::duration_seconds;
use crate::events::types::Event;
use crate::policy::{EventWorld, Policy, PolicyError};
use chrono::Duration;
use serde::{Deserialize, Serialize};

const POLICY: &str = "TaxiTimePolicy";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxiTimeConfiguration {
    /// Runway to gate
    #[serde(rename = "average_taxi_in_seconds", with = "duration_seconds")]
    pub average_taxi_in: Duration,

    /// Gate to runway
    #[serde(rename = "average_taxi_out_seconds", with = "duration_seconds")]
    pub average_taxi_out: Duration,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaxiTimePolicy {
    config: TaxiTimeConfiguration,
}

impl TaxiTimePolicy {
    pub fn new(config: TaxiTimeConfiguration) -> Result<Self, PolicyError> {
        if config.average_taxi_in < Duration::zero() {
            return Err(PolicyError::invalid(POLICY, "average taxi-in time cannot be negative"));
        }
        if config.average_taxi_out < Duration::zero() {
            return Err(PolicyError::invalid(POLICY, "average taxi-out time cannot be negative"));
        }
        Ok(Self { config })
    }

    /// Total taxi overhead per aircraft cycle
    pub fn total_overhead(&self) -> Duration {
        self.config.average_taxi_in + self.config.average_taxi_out
    }
}

impl Policy for TaxiTimePolicy {
    fn name(&self) -> String {
        POLICY.to_string()
    }

    fn generate_events(&self, world: &dyn EventWorld) -> Result<(), PolicyError> {
        world.schedule_event(Event::taxi_time(world.start_time(), self.total_overhead()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::time::default_start;
    use crate::events::EventKind;
    use crate::policy::test_support::RecordingWorld;

    #[test]
    fn test_overhead_is_sum_at_start() {
        let world = RecordingWorld::new(default_start(), default_start() + Duration::days(1), &["09"]);
        TaxiTimePolicy::new(TaxiTimeConfiguration {
            average_taxi_in: Duration::minutes(8),
            average_taxi_out: Duration::minutes(12),
        })
        .unwrap()
        .generate_events(&world)
        .unwrap();

        let events = world.sorted_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].timestamp(), default_start());
        assert_eq!(
            events[0].kind(),
            &EventKind::TaxiTimeAdjustment {
                overhead: Duration::minutes(20)
            }
        );
    }

    #[test]
    fn test_negative_rejected() {
        let result = TaxiTimePolicy::new(TaxiTimeConfiguration {
            average_taxi_in: Duration::minutes(-1),
            average_taxi_out: Duration::zero(),
        });
        assert!(result.is_err());
    }
}
