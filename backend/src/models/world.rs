//! World: mutable simulation state
//!
//! The world holds everything that changes over the simulated timeline:
//! runway availability, the curfew flag, wind, the rotation multiplier and
//! the gate/taxi constraints, plus the active runway configuration last
//! reported by the runway selector.
//!
//! Events mutate the world exclusively through the [`WorldState`] contract.
//! Policies only see the narrower [`EventWorld`] contract and can schedule
//! events but never mutate state directly.

use crate::events::queue::EventQueue;
use crate::events::types::{ActiveConfiguration, Event};
use crate::models::airport::Airport;
use crate::models::runway::Runway;
use crate::policy::EventWorld;
use crate::selection::manager::RunwayManager;
use crate::selection::wind::normalize_direction;
use chrono::{DateTime, Duration, Utc};
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors raised by world mutators
#[derive(Debug, Error, Clone, PartialEq)]
pub enum WorldError {
    #[error("runway {0} not found")]
    UnknownRunway(String),

    #[error("gate capacity constraint cannot be negative: {0}")]
    NegativeGateCapacity(f64),

    #[error("taxi time overhead cannot be negative: {0}s")]
    NegativeTaxiOverhead(i64),

    #[error("wind speed cannot be negative: {0}")]
    NegativeWindSpeed(f64),

    #[error("wind must be finite, got {speed_knots} kt from {direction_true}°")]
    NonFiniteWind { speed_knots: f64, direction_true: f64 },
}

/// Typed state contract that events apply themselves against
pub trait WorldState {
    fn current_time(&self) -> DateTime<Utc>;

    fn set_curfew_active(&mut self, active: bool);
    fn is_curfew_active(&self) -> bool;

    fn set_runway_available(&mut self, runway_id: &str, available: bool) -> Result<(), WorldError>;
    fn is_runway_available(&self, runway_id: &str) -> Result<bool, WorldError>;

    fn set_rotation_multiplier(&mut self, multiplier: f64);
    fn rotation_multiplier(&self) -> f64;

    /// Set the gate ceiling in movements/second (0 clears it)
    fn set_gate_capacity_constraint(&mut self, max_movements_per_second: f64) -> Result<(), WorldError>;
    /// Gate ceiling in movements/second, `None` when unconstrained
    fn gate_capacity_constraint(&self) -> Option<f64>;

    fn set_taxi_time_overhead(&mut self, overhead: Duration) -> Result<(), WorldError>;
    fn taxi_time_overhead(&self) -> Duration;

    /// Update the wind, recompute the configuration and schedule a
    /// configuration-changed event at `timestamp`
    fn set_wind(&mut self, speed_knots: f64, direction_true: f64, timestamp: DateTime<Utc>) -> Result<(), WorldError>;
    /// Current wind as (speed knots, direction degrees true)
    fn wind(&self) -> (f64, f64);

    /// Tell the selector a runway changed availability and schedule the
    /// resulting configuration-changed event at `timestamp`
    fn notify_runway_availability_change(
        &mut self,
        runway_id: &str,
        available: bool,
        timestamp: DateTime<Utc>,
    ) -> Result<(), WorldError>;

    /// Tell the selector the curfew changed and schedule the resulting
    /// configuration-changed event at `timestamp`
    fn notify_curfew_change(&mut self, active: bool, timestamp: DateTime<Utc>) -> Result<(), WorldError>;

    fn set_active_runway_configuration(&mut self, configuration: ActiveConfiguration);
    fn active_runway_configuration(&self) -> ActiveConfiguration;
}

/// Simulation state for one airport over one `[start, end)` window
///
/// # Example
/// ```
/// use airport_capacity_core_rs::{Airport, Runway, World, WorldState};
/// use airport_capacity_core_rs::core::time::{default_start, year_duration};
/// use chrono::Duration;
///
/// let airport = Airport::new("Demo", vec![Runway::new("09", 90.0, Duration::seconds(60))]);
/// let mut world = World::new(airport, default_start(), default_start() + year_duration());
///
/// world.set_runway_available("09", false).unwrap();
/// assert_eq!(world.available_runways().len(), 0);
/// assert!(world.set_runway_available("27", false).is_err());
/// ```
#[derive(Debug)]
pub struct World {
    airport: Airport,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    current_time: DateTime<Utc>,

    events: EventQueue,
    runway_manager: RunwayManager,
    active_configuration: ActiveConfiguration,

    availability: BTreeMap<String, bool>,
    curfew_active: bool,
    wind_speed_knots: f64,
    wind_direction_true: f64,
    rotation_multiplier: f64,
    gate_capacity_constraint: f64,
    taxi_time_overhead: Duration,
}

impl World {
    /// Fresh world: all runways available, calm wind, no curfew, no penalties
    pub fn new(airport: Airport, start_time: DateTime<Utc>, end_time: DateTime<Utc>) -> Self {
        let availability = airport
            .runways
            .iter()
            .map(|r| (r.designation.clone(), true))
            .collect();
        let runway_manager = RunwayManager::new(
            airport.runways.clone(),
            airport.runway_compatibility.clone(),
        );
        let active_configuration = runway_manager.active_configuration();

        Self {
            airport,
            start_time,
            end_time,
            current_time: start_time,
            events: EventQueue::new(),
            runway_manager,
            active_configuration,
            availability,
            curfew_active: false,
            wind_speed_knots: 0.0,
            wind_direction_true: 0.0,
            rotation_multiplier: 1.0,
            gate_capacity_constraint: 0.0,
            taxi_time_overhead: Duration::zero(),
        }
    }

    pub fn airport(&self) -> &Airport {
        &self.airport
    }

    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    pub fn end_time(&self) -> DateTime<Utc> {
        self.end_time
    }

    /// Move the simulation clock forward (never backwards)
    pub fn advance_to(&mut self, timestamp: DateTime<Utc>) {
        if timestamp > self.current_time {
            self.current_time = timestamp;
        }
    }

    pub fn events(&self) -> &EventQueue {
        &self.events
    }

    pub fn schedule_event(&self, event: Event) {
        self.events.push(event);
    }

    pub fn runway_manager(&self) -> &RunwayManager {
        &self.runway_manager
    }

    /// Runways currently marked available, in declaration order
    pub fn available_runways(&self) -> Vec<&Runway> {
        self.airport
            .runways
            .iter()
            .filter(|r| self.availability.get(&r.designation).copied().unwrap_or(false))
            .collect()
    }

    pub fn count_available_runways(&self) -> usize {
        self.availability.values().filter(|available| **available).count()
    }

    fn schedule_configuration_snapshot(&self, timestamp: DateTime<Utc>) {
        let configuration = self.runway_manager.active_configuration();
        self.events.push(Event::configuration_changed(timestamp, configuration));
    }
}

impl WorldState for World {
    fn current_time(&self) -> DateTime<Utc> {
        self.current_time
    }

    fn set_curfew_active(&mut self, active: bool) {
        self.curfew_active = active;
    }

    fn is_curfew_active(&self) -> bool {
        self.curfew_active
    }

    fn set_runway_available(&mut self, runway_id: &str, available: bool) -> Result<(), WorldError> {
        let flag = self
            .availability
            .get_mut(runway_id)
            .ok_or_else(|| WorldError::UnknownRunway(runway_id.to_string()))?;
        *flag = available;
        Ok(())
    }

    fn is_runway_available(&self, runway_id: &str) -> Result<bool, WorldError> {
        self.availability
            .get(runway_id)
            .copied()
            .ok_or_else(|| WorldError::UnknownRunway(runway_id.to_string()))
    }

    fn set_rotation_multiplier(&mut self, multiplier: f64) {
        self.rotation_multiplier = multiplier;
    }

    fn rotation_multiplier(&self) -> f64 {
        self.rotation_multiplier
    }

    fn set_gate_capacity_constraint(&mut self, max_movements_per_second: f64) -> Result<(), WorldError> {
        if max_movements_per_second < 0.0 {
            return Err(WorldError::NegativeGateCapacity(max_movements_per_second));
        }
        self.gate_capacity_constraint = max_movements_per_second;
        Ok(())
    }

    fn gate_capacity_constraint(&self) -> Option<f64> {
        (self.gate_capacity_constraint > 0.0).then_some(self.gate_capacity_constraint)
    }

    fn set_taxi_time_overhead(&mut self, overhead: Duration) -> Result<(), WorldError> {
        if overhead < Duration::zero() {
            return Err(WorldError::NegativeTaxiOverhead(overhead.num_seconds()));
        }
        self.taxi_time_overhead = overhead;
        Ok(())
    }

    fn taxi_time_overhead(&self) -> Duration {
        self.taxi_time_overhead
    }

    fn set_wind(&mut self, speed_knots: f64, direction_true: f64, timestamp: DateTime<Utc>) -> Result<(), WorldError> {
        if !speed_knots.is_finite() || !direction_true.is_finite() {
            return Err(WorldError::NonFiniteWind {
                speed_knots,
                direction_true,
            });
        }
        if speed_knots < 0.0 {
            return Err(WorldError::NegativeWindSpeed(speed_knots));
        }
        self.wind_speed_knots = speed_knots;
        self.wind_direction_true = normalize_direction(direction_true);
        self.runway_manager
            .on_wind_changed(self.wind_speed_knots, self.wind_direction_true);
        self.schedule_configuration_snapshot(timestamp);
        Ok(())
    }

    fn wind(&self) -> (f64, f64) {
        (self.wind_speed_knots, self.wind_direction_true)
    }

    fn notify_runway_availability_change(
        &mut self,
        runway_id: &str,
        available: bool,
        timestamp: DateTime<Utc>,
    ) -> Result<(), WorldError> {
        if !self.availability.contains_key(runway_id) {
            return Err(WorldError::UnknownRunway(runway_id.to_string()));
        }
        if available {
            self.runway_manager.on_runway_available(runway_id);
        } else {
            self.runway_manager.on_runway_unavailable(runway_id);
        }
        self.schedule_configuration_snapshot(timestamp);
        Ok(())
    }

    fn notify_curfew_change(&mut self, active: bool, timestamp: DateTime<Utc>) -> Result<(), WorldError> {
        self.runway_manager.on_curfew_changed(active);
        self.schedule_configuration_snapshot(timestamp);
        Ok(())
    }

    fn set_active_runway_configuration(&mut self, configuration: ActiveConfiguration) {
        self.active_configuration = configuration;
    }

    fn active_runway_configuration(&self) -> ActiveConfiguration {
        self.active_configuration.clone()
    }
}

impl EventWorld for World {
    fn schedule_event(&self, event: Event) {
        self.events.push(event);
    }

    fn event_queue_len(&self) -> usize {
        self.events.len()
    }

    fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    fn end_time(&self) -> DateTime<Utc> {
        self.end_time
    }

    fn runway_ids(&self) -> Vec<String> {
        self.airport.runway_ids()
    }
}
