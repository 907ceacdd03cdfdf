//! Periodic runway maintenance
//!
//! Every listed runway is closed for `duration` once per `frequency`,
//! starting at the simulation start. Windows that would run past the
//! simulation end are not scheduled.

use crate::core::time::duration_seconds;
use crate::events::types::Event;
use crate::policy::{ensure_runways_exist, ensure_schedule_in_range, EventWorld, Policy, PolicyError};
use chrono::Duration;
use serde::{Deserialize, Serialize};

const POLICY: &str = "MaintenancePolicy";

/// Which runways to maintain and how often
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceSchedule {
    pub runway_designations: Vec<String>,

    /// Length of each maintenance window
    #[serde(rename = "duration_seconds", with = "duration_seconds")]
    pub duration: Duration,

    /// Interval between the starts of consecutive windows
    #[serde(rename = "frequency_seconds", with = "duration_seconds")]
    pub frequency: Duration,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MaintenancePolicy {
    schedule: MaintenanceSchedule,
}

impl MaintenancePolicy {
    pub fn new(schedule: MaintenanceSchedule) -> Result<Self, PolicyError> {
        if schedule.runway_designations.is_empty() {
            return Err(PolicyError::invalid(POLICY, "at least one runway is required"));
        }
        if schedule.duration <= Duration::zero() {
            return Err(PolicyError::invalid(POLICY, "maintenance duration must be positive"));
        }
        if schedule.frequency < schedule.duration {
            return Err(PolicyError::invalid(
                POLICY,
                "maintenance frequency must be at least the maintenance duration",
            ));
        }
        Ok(Self { schedule })
    }

    pub fn schedule(&self) -> &MaintenanceSchedule {
        &self.schedule
    }
}

impl Policy for MaintenancePolicy {
    fn name(&self) -> String {
        POLICY.to_string()
    }

    fn generate_events(&self, world: &dyn EventWorld) -> Result<(), PolicyError> {
        ensure_runways_exist(world, &self.schedule.runway_designations)?;
        ensure_schedule_in_range(POLICY, world, self.schedule.duration, self.schedule.frequency)?;

        let end = world.end_time();
        for runway in &self.schedule.runway_designations {
            let mut window_start = world.start_time();
            while window_start + self.schedule.duration <= end {
                let window_end = window_start + self.schedule.duration;
                world.schedule_event(Event::maintenance_start(window_start, runway.clone()));
                world.schedule_event(Event::maintenance_end(window_end, runway.clone()));
                window_start += self.schedule.frequency;
            }
        }
        Ok(())
    }
}
