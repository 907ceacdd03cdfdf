//! Timeline event types
//!
//! An event is an immutable (timestamp, kind) pair. Policies create events,
//! the engine consumes each one exactly once in timestamp order, applying it
//! to the world.
//!
//! # Design Principles
//!
//! 1. **Self-contained**: every event carries all data needed to apply it
//! 2. **Immutable**: events are never modified after construction
//! 3. **Snapshots**: configuration-changed events own a copy of the configuration

use crate::core::time::duration_seconds;
use crate::models::runway::Runway;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// ============================================================================
// Active Configuration
// ============================================================================

/// End of the runway an active runway is operated from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Along the runway's true bearing
    #[default]
    Forward,
    /// Along the reciprocal bearing
    Reverse,
}

/// What an active runway is used for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationType {
    Takeoff,
    Landing,
    #[default]
    Mixed,
}

/// One runway in the active configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveRunwayInfo {
    pub runway_designation: String,
    pub operation_type: OperationType,
    pub direction: Direction,
    pub runway: Runway,
}

impl ActiveRunwayInfo {
    /// Bearing actually flown given the chosen direction
    pub fn operating_bearing(&self) -> f64 {
        match self.direction {
            Direction::Forward => self.runway.true_bearing,
            Direction::Reverse => self.runway.reciprocal_bearing(),
        }
    }
}

/// Runways currently in force, keyed by designation
pub type ActiveConfiguration = BTreeMap<String, ActiveRunwayInfo>;

// ============================================================================
// Events
// ============================================================================

/// Discriminant of an event, used for logging and counting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventType {
    CurfewStart,
    CurfewEnd,
    RunwayMaintenanceStart,
    RunwayMaintenanceEnd,
    RotationChange,
    GateCapacityConstraint,
    TaxiTimeAdjustment,
    WindChange,
    ActiveRunwayConfigurationChanged,
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EventType::CurfewStart => "CurfewStart",
            EventType::CurfewEnd => "CurfewEnd",
            EventType::RunwayMaintenanceStart => "RunwayMaintenanceStart",
            EventType::RunwayMaintenanceEnd => "RunwayMaintenanceEnd",
            EventType::RotationChange => "RotationChange",
            EventType::GateCapacityConstraint => "GateCapacityConstraint",
            EventType::TaxiTimeAdjustment => "TaxiTimeAdjustment",
            EventType::WindChange => "WindChange",
            EventType::ActiveRunwayConfigurationChanged => "ActiveRunwayConfigurationChanged",
        };
        f.write_str(name)
    }
}

/// Payload of an event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventKind {
    /// All runway operations stop
    CurfewStart,

    /// Runway operations resume
    CurfewEnd,

    /// Runway taken out of service
    RunwayMaintenanceStart { runway: String },

    /// Runway returned to service
    RunwayMaintenanceEnd { runway: String },

    /// New rotation efficiency multiplier (0-1)
    RotationChange { multiplier: f64 },

    /// Gate-derived ceiling on movements per second (0 = none)
    GateCapacityConstraint { max_movements_per_second: f64 },

    /// Taxi time added to every turnaround
    TaxiTimeAdjustment {
        #[serde(rename = "overhead_seconds", with = "duration_seconds")]
        overhead: Duration,
    },

    /// New wind vector
    WindChange { speed_knots: f64, direction_true: f64 },

    /// Runway selector produced a new active configuration
    ActiveRunwayConfigurationChanged { configuration: ActiveConfiguration },
}

/// A timestamped state change
///
/// # Example
/// ```
/// use airport_capacity_core_rs::events::{Event, EventType};
/// use airport_capacity_core_rs::core::time::default_start;
///
/// let event = Event::curfew_start(default_start());
/// assert_eq!(event.event_type(), EventType::CurfewStart);
/// assert_eq!(event.timestamp(), default_start());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    timestamp: DateTime<Utc>,
    kind: EventKind,
}

impl Event {
    pub fn new(timestamp: DateTime<Utc>, kind: EventKind) -> Self {
        Self { timestamp, kind }
    }

    pub fn curfew_start(timestamp: DateTime<Utc>) -> Self {
        Self::new(timestamp, EventKind::CurfewStart)
    }

    pub fn curfew_end(timestamp: DateTime<Utc>) -> Self {
        Self::new(timestamp, EventKind::CurfewEnd)
    }

    pub fn maintenance_start(timestamp: DateTime<Utc>, runway: impl Into<String>) -> Self {
        Self::new(timestamp, EventKind::RunwayMaintenanceStart { runway: runway.into() })
    }

    pub fn maintenance_end(timestamp: DateTime<Utc>, runway: impl Into<String>) -> Self {
        Self::new(timestamp, EventKind::RunwayMaintenanceEnd { runway: runway.into() })
    }

    pub fn rotation_change(timestamp: DateTime<Utc>, multiplier: f64) -> Self {
        Self::new(timestamp, EventKind::RotationChange { multiplier })
    }

    pub fn gate_capacity(timestamp: DateTime<Utc>, max_movements_per_second: f64) -> Self {
        Self::new(
            timestamp,
            EventKind::GateCapacityConstraint {
                max_movements_per_second,
            },
        )
    }

    pub fn taxi_time(timestamp: DateTime<Utc>, overhead: Duration) -> Self {
        Self::new(timestamp, EventKind::TaxiTimeAdjustment { overhead })
    }

    pub fn wind_change(timestamp: DateTime<Utc>, speed_knots: f64, direction_true: f64) -> Self {
        Self::new(
            timestamp,
            EventKind::WindChange {
                speed_knots,
                direction_true,
            },
        )
    }

    pub fn configuration_changed(timestamp: DateTime<Utc>, configuration: ActiveConfiguration) -> Self {
        Self::new(
            timestamp,
            EventKind::ActiveRunwayConfigurationChanged { configuration },
        )
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn kind(&self) -> &EventKind {
        &self.kind
    }

    pub fn event_type(&self) -> EventType {
        match &self.kind {
            EventKind::CurfewStart => EventType::CurfewStart,
            EventKind::CurfewEnd => EventType::CurfewEnd,
            EventKind::RunwayMaintenanceStart { .. } => EventType::RunwayMaintenanceStart,
            EventKind::RunwayMaintenanceEnd { .. } => EventType::RunwayMaintenanceEnd,
            EventKind::RotationChange { .. } => EventType::RotationChange,
            EventKind::GateCapacityConstraint { .. } => EventType::GateCapacityConstraint,
            EventKind::TaxiTimeAdjustment { .. } => EventType::TaxiTimeAdjustment,
            EventKind::WindChange { .. } => EventType::WindChange,
            EventKind::ActiveRunwayConfigurationChanged { .. } => {
                EventType::ActiveRunwayConfigurationChanged
            }
        }
    }
}
