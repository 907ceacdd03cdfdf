//! Gate capacity policy
//!
//! Gates bound sustained throughput independently of the runways: with `G`
//! gates and an average turnaround of `T` hours, at most `G / T` aircraft
//! arrive per hour, and every arrival implies a departure.

use crate::core::time::{duration_seconds, seconds_f64, SECONDS_PER_HOUR};
use crate::events::types::Event;
use crate::policy::{EventWorld, Policy, PolicyError};
use chrono::Duration;
use serde::{Deserialize, Serialize};

const POLICY: &str = "GateCapacityPolicy";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateCapacityConstraint {
    pub total_gates: u32,

    /// Average time an aircraft occupies a gate
    #[serde(rename = "average_turnaround_seconds", with = "duration_seconds")]
    pub average_turnaround: Duration,
}

/// # Example
/// ```
/// use airport_capacity_core_rs::policy::{GateCapacityConstraint, GateCapacityPolicy};
/// use chrono::Duration;
///
/// let policy = GateCapacityPolicy::new(GateCapacityConstraint {
///     total_gates: 50,
///     average_turnaround: Duration::hours(2),
/// }).unwrap();
/// // 25 arrivals/hour -> 50 movements/hour
/// assert!((policy.movements_per_second() * 3600.0 - 50.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GateCapacityPolicy {
    constraint: GateCapacityConstraint,
}

impl GateCapacityPolicy {
    pub fn new(constraint: GateCapacityConstraint) -> Result<Self, PolicyError> {
        if constraint.total_gates == 0 {
            return Err(PolicyError::invalid(POLICY, "total gates must be positive"));
        }
        if constraint.average_turnaround <= Duration::zero() {
            return Err(PolicyError::invalid(
                POLICY,
                "average turnaround time must be positive",
            ));
        }
        Ok(Self { constraint })
    }

    /// Gate-limited movements per second
    pub fn movements_per_second(&self) -> f64 {
        let turnaround_hours = seconds_f64(self.constraint.average_turnaround) / SECONDS_PER_HOUR as f64;
        let arrivals_per_hour = f64::from(self.constraint.total_gates) / turnaround_hours;
        arrivals_per_hour * 2.0 / SECONDS_PER_HOUR as f64
    }
}

impl Policy for GateCapacityPolicy {
    fn name(&self) -> String {
        POLICY.to_string()
    }

    fn generate_events(&self, world: &dyn EventWorld) -> Result<(), PolicyError> {
        world.schedule_event(Event::gate_capacity(world.start_time(), self.movements_per_second()));
        Ok(())
    }
}
