//! Event-generating policies
//!
//! A policy turns an operational rule (curfew hours, maintenance windows,
//! rotation strategy, gate and taxi limits, wind) into timeline events.
//!
//! # Policy Interface
//!
//! Every policy implements [`Policy`] and sees the world only through
//! [`EventWorld`]: it can schedule events and read the simulation window and
//! runway ids, but it can never mutate world state directly.
//!
//! ```rust
//! use airport_capacity_core_rs::events::Event;
//! use airport_capacity_core_rs::policy::{EventWorld, Policy, PolicyError};
//!
//! #[derive(Debug)]
//! struct FullRotationPenalty;
//!
//! impl Policy for FullRotationPenalty {
//!     fn name(&self) -> String {
//!         "FullRotationPenalty".to_string()
//!     }
//!
//!     fn generate_events(&self, world: &dyn EventWorld) -> Result<(), PolicyError> {
//!         world.schedule_event(Event::rotation_change(world.start_time(), 0.5));
//!         Ok(())
//!     }
//! }
//! ```
//!
//! Policies are `Send + Sync`: a simulation runs all of them concurrently
//! against one shared event queue.
//!
//! Validation happens in two places. Parameter errors are rejected by each
//! policy's constructor; references to runways the airport does not have
//! are rejected by `generate_events`.

use crate::events::types::Event;
use chrono::{DateTime, Duration, Utc};
use std::fmt;
use thiserror::Error;

pub mod curfew;
pub mod gate_capacity;
pub mod intelligent_maintenance;
pub mod maintenance;
pub mod rotation;
pub mod taxi_time;
pub mod wind;
pub mod wind_patterns;

pub use curfew::{CurfewPolicy, CurfewRecurrence};
pub use gate_capacity::{GateCapacityConstraint, GateCapacityPolicy};
pub use intelligent_maintenance::{
    DailyWindow, IntelligentMaintenancePolicy, IntelligentMaintenanceSchedule,
};
pub use maintenance::{MaintenancePolicy, MaintenanceSchedule};
pub use rotation::{RotationEfficiencies, RotationSchedule, RotationStrategy, RunwayRotationPolicy};
pub use taxi_time::{TaxiTimeConfiguration, TaxiTimePolicy};
pub use wind::{ScheduledWindPolicy, WindChange, WindPolicy, WindVector};

/// Errors raised while constructing a policy or generating its events
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PolicyError {
    #[error("invalid {policy} parameter: {reason}")]
    InvalidParameter { policy: &'static str, reason: String },

    #[error("runway {0} not found in airport")]
    UnknownRunway(String),
}

impl PolicyError {
    pub(crate) fn invalid(policy: &'static str, reason: impl Into<String>) -> Self {
        PolicyError::InvalidParameter {
            policy,
            reason: reason.into(),
        }
    }
}

/// The part of the world a policy is allowed to see
pub trait EventWorld {
    /// Add an event to the shared queue
    fn schedule_event(&self, event: Event);

    /// Number of events currently queued
    fn event_queue_len(&self) -> usize;

    fn start_time(&self) -> DateTime<Utc>;

    fn end_time(&self) -> DateTime<Utc>;

    /// Designations of every runway at the airport
    fn runway_ids(&self) -> Vec<String>;
}

/// A rule that produces timeline events
pub trait Policy: Send + Sync + fmt::Debug {
    /// Human-readable policy name, used in logs and reports
    fn name(&self) -> String;

    /// Schedule this policy's events for the world's simulation window
    fn generate_events(&self, world: &dyn EventWorld) -> Result<(), PolicyError>;
}

/// Fail with `UnknownRunway` for the first designation the world lacks
pub(crate) fn ensure_runways_exist(world: &dyn EventWorld, runways: &[String]) -> Result<(), PolicyError> {
    let known = world.runway_ids();
    match runways.iter().find(|id| !known.contains(id)) {
        Some(missing) => Err(PolicyError::UnknownRunway(missing.clone())),
        None => Ok(()),
    }
}

/// Fail unless a repeating schedule of `duration` every `frequency` can be
/// laid over the world's window without leaving the representable time range
///
/// Every timestamp such a schedule computes lies within `duration + frequency`
/// of the window.
pub(crate) fn ensure_schedule_in_range(
    policy: &'static str,
    world: &dyn EventWorld,
    duration: Duration,
    frequency: Duration,
) -> Result<(), PolicyError> {
    let fits = duration.checked_add(&frequency).is_some_and(|reach| {
        world.end_time().checked_add_signed(reach).is_some()
            && world.start_time().checked_sub_signed(reach).is_some()
    });
    if fits {
        Ok(())
    } else {
        Err(PolicyError::invalid(
            policy,
            "maintenance duration and frequency exceed the supported time range",
        ))
    }
}
