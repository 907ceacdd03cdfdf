//! Timeline integrator
//!
//! The engine drains the world's event queue in timestamp order and turns
//! discrete state changes into one capacity figure.
//!
//! # Architecture
//!
//! ```text
//! previous = start
//! for each event, earliest first:
//!   1. event before start   -> skip
//!   2. event at/after end   -> stop
//!   3. capacity += window_capacity(event.time - previous)   (pre-event state)
//!   4. advance clock, apply event
//!   5. previous = event.time
//! capacity += window_capacity(end - previous)
//! ```
//!
//! Integration always uses the state that held *before* the event, which is
//! why the engine is strictly sequential.
//!
//! # Window capacity
//!
//! ```text
//! curfew active                      -> 0
//! runways = Σ duration / separation  (over the capacity basis)
//! runways *= rotation multiplier
//! gate ceiling g set:
//!   effective = 1 / (1/g + taxi_overhead_seconds)
//!   capacity  = min(runways, effective * duration)
//! ```

use crate::core::time::seconds_f64;
use crate::events::types::EventType;
use crate::models::airport::AirportError;
use crate::models::world::{World, WorldError, WorldState};
use crate::policy::PolicyError;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error, info};

// ============================================================================
// Errors
// ============================================================================

/// Errors that abort a simulation run
#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Airport error: {0}")]
    Airport(#[from] AirportError),

    #[error("Policy {policy} failed: {source}")]
    Policy {
        policy: String,
        #[source]
        source: PolicyError,
    },

    #[error("Failed to apply {event_type} event at {timestamp}: {source}")]
    EventApplication {
        event_type: EventType,
        timestamp: DateTime<Utc>,
        #[source]
        source: WorldError,
    },
}

// ============================================================================
// Engine
// ============================================================================

/// Which runways contribute to a window's capacity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapacityBasis {
    /// Every runway marked available
    #[default]
    AvailableRunways,
    /// Only runways in the world's active configuration
    ActiveConfiguration,
}

/// Counters from one engine run
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EngineOutcome {
    /// Movements integrated over `[start, end)`
    pub total_capacity: f64,
    /// Events applied to the world
    pub events_processed: usize,
    /// Events dropped for falling before the window start
    pub events_skipped: usize,
    /// Events left in the queue at or after the window end
    pub events_remaining: usize,
}

/// Sequential timeline integrator
///
/// # Example
/// ```
/// use airport_capacity_core_rs::{Airport, Engine, Runway, World};
/// use airport_capacity_core_rs::core::time::{default_start, year_duration};
/// use chrono::Duration;
///
/// let airport = Airport::new("Demo", vec![Runway::new("09", 90.0, Duration::seconds(60))]);
/// let mut world = World::new(airport, default_start(), default_start() + year_duration());
///
/// let capacity = Engine::new().calculate(&mut world).unwrap();
/// assert!((capacity - 525_600.0).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Engine {
    capacity_basis: CapacityBasis,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity_basis(mut self, basis: CapacityBasis) -> Self {
        self.capacity_basis = basis;
        self
    }

    pub fn capacity_basis(&self) -> CapacityBasis {
        self.capacity_basis
    }

    /// Drain the queue and return the total capacity
    pub fn calculate(&self, world: &mut World) -> Result<f64, SimulationError> {
        self.run(world).map(|outcome| outcome.total_capacity)
    }

    /// Drain the queue and return capacity plus event counters
    pub fn run(&self, world: &mut World) -> Result<EngineOutcome, SimulationError> {
        let start = world.start_time();
        let end = world.end_time();

        info!(
            airport = %world.airport().name,
            %start,
            %end,
            queued_events = world.events().len(),
            basis = ?self.capacity_basis,
            "starting capacity calculation"
        );

        let mut outcome = EngineOutcome {
            total_capacity: 0.0,
            events_processed: 0,
            events_skipped: 0,
            events_remaining: 0,
        };

        if end <= start {
            outcome.events_remaining = world.events().len();
            return Ok(outcome);
        }

        let mut previous = start;

        while let Some(event) = world.events().pop() {
            let timestamp = event.timestamp();

            if timestamp < start {
                debug!(event = %event.event_type(), %timestamp, "skipping event before simulation start");
                outcome.events_skipped += 1;
                continue;
            }

            if timestamp >= end {
                // Put it back so the remaining count is accurate
                world.events().push(event);
                break;
            }

            outcome.total_capacity += self.integrate(world, previous, timestamp);

            world.advance_to(timestamp);
            if let Err(source) = event.apply(world) {
                error!(event = %event.event_type(), %timestamp, error = %source, "event application failed");
                return Err(SimulationError::EventApplication {
                    event_type: event.event_type(),
                    timestamp,
                    source,
                });
            }
            outcome.events_processed += 1;
            previous = timestamp;
        }

        outcome.total_capacity += self.integrate(world, previous, end);
        outcome.events_remaining = world.events().len();

        info!(
            events_processed = outcome.events_processed,
            events_skipped = outcome.events_skipped,
            total_capacity = outcome.total_capacity,
            "capacity calculation complete"
        );

        Ok(outcome)
    }

    fn integrate(&self, world: &World, from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
        let capacity = self.window_capacity(world, to - from);
        if to > from {
            debug!(window_start = %from, window_end = %to, capacity, "window integrated");
        }
        capacity
    }

    /// Movements possible over `window` given the world's current state
    pub fn window_capacity(&self, world: &World, window: Duration) -> f64 {
        let seconds = seconds_f64(window);
        if seconds <= 0.0 || world.is_curfew_active() {
            return 0.0;
        }

        let runway_capacity: f64 = match self.capacity_basis {
            CapacityBasis::AvailableRunways => world
                .available_runways()
                .iter()
                .map(|runway| runway.movements_in(seconds))
                .sum(),
            CapacityBasis::ActiveConfiguration => world
                .active_runway_configuration()
                .values()
                .map(|info| info.runway.movements_in(seconds))
                .sum(),
        };

        let mut capacity = runway_capacity * world.rotation_multiplier();

        if let Some(ceiling) = world.gate_capacity_constraint() {
            let taxi_seconds = seconds_f64(world.taxi_time_overhead());
            let effective = if taxi_seconds > 0.0 {
                1.0 / (1.0 / ceiling + taxi_seconds)
            } else {
                ceiling
            };
            let gate_capacity = effective * seconds;
            if gate_capacity < capacity {
                debug!(
                    runway_capacity = capacity,
                    gate_capacity,
                    taxi_seconds,
                    "gate ceiling limits window capacity"
                );
                capacity = gate_capacity;
            }
        }

        capacity
    }
}
