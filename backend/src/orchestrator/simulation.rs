//! Simulation runner
//!
//! Ties the pieces together for one run:
//!
//! ```text
//! 1. Validate airport and window
//! 2. Build a fresh World
//! 3. Run every policy concurrently against the shared event queue
//!    (all run to completion; the first error wins)
//! 4. Drive the Engine over the queue
//! 5. Report
//! ```

use crate::core::time::{default_start, year_duration};
use crate::events::types::Event;
use crate::models::airport::Airport;
use crate::models::world::World;
use crate::orchestrator::config::SimulationConfig;
use crate::orchestrator::engine::{CapacityBasis, Engine, SimulationError};
use crate::policy::{
    CurfewPolicy, EventWorld, GateCapacityConstraint, GateCapacityPolicy, MaintenancePolicy,
    MaintenanceSchedule, Policy, RotationStrategy, RunwayRotationPolicy, TaxiTimeConfiguration,
    TaxiTimePolicy, WindPolicy,
};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use rayon::prelude::*;
use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, info, info_span, warn};
use uuid::Uuid;

/// Result of one simulation run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationReport {
    pub run_id: Uuid,
    pub airport: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Movements possible over the window
    pub total_capacity: f64,
    pub events_processed: usize,
    pub events_skipped: usize,
    /// Policy names in registration order
    pub policies: Vec<String>,
}

/// Builder and runner for one airport capacity simulation
///
/// # Example
/// ```
/// use airport_capacity_core_rs::{Airport, Runway, Simulation};
/// use chrono::Duration;
///
/// let airport = Airport::new("Demo", vec![Runway::new("09", 90.0, Duration::seconds(60))]);
/// let report = Simulation::new(airport)
///     .unwrap()
///     .add_rotation_policy(airport_capacity_core_rs::policy::RotationStrategy::NoRotation)
///     .run()
///     .unwrap();
///
/// assert!((report.total_capacity - 525_600.0).abs() < 1e-6);
/// ```
#[derive(Debug)]
pub struct Simulation {
    airport: Airport,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    capacity_basis: CapacityBasis,
    policies: Vec<Box<dyn Policy>>,
}

impl Simulation {
    /// Simulation over one year from 2023-01-01 with no policies
    pub fn new(airport: Airport) -> Result<Self, SimulationError> {
        airport.validate()?;
        let start = default_start();
        Ok(Self {
            airport,
            start,
            end: start + year_duration(),
            capacity_basis: CapacityBasis::default(),
            policies: Vec::new(),
        })
    }

    /// Build from a configuration, validating every policy
    pub fn from_config(config: SimulationConfig) -> Result<Self, SimulationError> {
        let end = config.end_time();
        let mut simulation = Self::new(config.airport)?
            .with_period(config.start, end)
            .with_capacity_basis(config.capacity_basis);

        for policy_config in &config.policies {
            let policy = policy_config
                .build()
                .map_err(|source| SimulationError::Policy {
                    policy: policy_config.label().to_string(),
                    source,
                })?;
            simulation.policies.push(policy);
        }
        Ok(simulation)
    }

    pub fn with_period(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.start = start;
        self.end = end;
        self
    }

    pub fn with_capacity_basis(mut self, basis: CapacityBasis) -> Self {
        self.capacity_basis = basis;
        self
    }

    pub fn add_policy(mut self, policy: impl Policy + 'static) -> Self {
        self.policies.push(Box::new(policy));
        self
    }

    pub fn add_boxed_policy(mut self, policy: Box<dyn Policy>) -> Self {
        self.policies.push(policy);
        self
    }

    // ========================================================================
    // Convenience adders
    // ========================================================================

    pub fn add_curfew_policy(self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, SimulationError> {
        let policy = CurfewPolicy::daily(start, end).map_err(|source| SimulationError::Policy {
            policy: "CurfewPolicy".to_string(),
            source,
        })?;
        Ok(self.add_policy(policy))
    }

    pub fn add_maintenance_policy(self, schedule: MaintenanceSchedule) -> Result<Self, SimulationError> {
        let policy = MaintenancePolicy::new(schedule).map_err(|source| SimulationError::Policy {
            policy: "MaintenancePolicy".to_string(),
            source,
        })?;
        Ok(self.add_policy(policy))
    }

    pub fn add_rotation_policy(self, strategy: RotationStrategy) -> Self {
        self.add_policy(RunwayRotationPolicy::with_defaults(strategy))
    }

    pub fn add_gate_capacity_policy(self, constraint: GateCapacityConstraint) -> Result<Self, SimulationError> {
        let policy = GateCapacityPolicy::new(constraint).map_err(|source| SimulationError::Policy {
            policy: "GateCapacityPolicy".to_string(),
            source,
        })?;
        Ok(self.add_policy(policy))
    }

    pub fn add_taxi_time_policy(self, config: TaxiTimeConfiguration) -> Result<Self, SimulationError> {
        let policy = TaxiTimePolicy::new(config).map_err(|source| SimulationError::Policy {
            policy: "TaxiTimePolicy".to_string(),
            source,
        })?;
        Ok(self.add_policy(policy))
    }

    pub fn add_wind_policy(self, speed_knots: f64, direction_true: f64) -> Result<Self, SimulationError> {
        let policy = WindPolicy::new(speed_knots, direction_true).map_err(|source| SimulationError::Policy {
            policy: "WindPolicy".to_string(),
            source,
        })?;
        Ok(self.add_policy(policy))
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn airport(&self) -> &Airport {
        &self.airport
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn policy_names(&self) -> Vec<String> {
        self.policies.iter().map(|p| p.name()).collect()
    }

    // ========================================================================
    // Execution
    // ========================================================================

    /// Run policies and the engine, returning the capacity report
    pub fn run(&self) -> Result<SimulationReport, SimulationError> {
        if self.end <= self.start {
            return Err(SimulationError::InvalidConfig(format!(
                "simulation end {} must be after start {}",
                self.end, self.start
            )));
        }

        let run_id = Uuid::new_v4();
        let span = info_span!("simulation", %run_id, airport = %self.airport.name);
        let _guard = span.enter();

        info!(
            policies = self.policies.len(),
            runways = self.airport.runways.len(),
            "simulation starting"
        );

        let mut world = World::new(self.airport.clone(), self.start, self.end);
        self.generate_policy_events(&world)?;

        let outcome = Engine::new()
            .with_capacity_basis(self.capacity_basis)
            .run(&mut world)?;

        Ok(SimulationReport {
            run_id,
            airport: self.airport.name.clone(),
            start: self.start,
            end: self.end,
            total_capacity: outcome.total_capacity,
            events_processed: outcome.events_processed,
            events_skipped: outcome.events_skipped,
            policies: self.policy_names(),
        })
    }

    /// Run every policy concurrently; all finish, the first error is returned
    fn generate_policy_events(&self, world: &World) -> Result<(), SimulationError> {
        let first_error: Mutex<Option<SimulationError>> = Mutex::new(None);

        self.policies.par_iter().for_each(|policy| {
            let counting = CountingWorld::new(world);
            match policy.generate_events(&counting) {
                Ok(()) => debug!(
                    policy = %policy.name(),
                    events = counting.scheduled(),
                    "policy events generated"
                ),
                Err(source) => {
                    let mut slot = first_error.lock();
                    if slot.is_none() {
                        *slot = Some(SimulationError::Policy {
                            policy: policy.name(),
                            source,
                        });
                    } else {
                        warn!(policy = %policy.name(), error = %source, "policy error superseded by earlier failure");
                    }
                }
            }
        });

        match first_error.into_inner() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// Forwards to the world while counting what one policy schedules
struct CountingWorld<'a> {
    inner: &'a World,
    scheduled: AtomicUsize,
}

impl<'a> CountingWorld<'a> {
    fn new(inner: &'a World) -> Self {
        Self {
            inner,
            scheduled: AtomicUsize::new(0),
        }
    }

    fn scheduled(&self) -> usize {
        self.scheduled.load(Ordering::Relaxed)
    }
}

impl EventWorld for CountingWorld<'_> {
    fn schedule_event(&self, event: Event) {
        self.scheduled.fetch_add(1, Ordering::Relaxed);
        EventWorld::schedule_event(self.inner, event);
    }

    fn event_queue_len(&self) -> usize {
        self.inner.event_queue_len()
    }

    fn start_time(&self) -> DateTime<Utc> {
        EventWorld::start_time(self.inner)
    }

    fn end_time(&self) -> DateTime<Utc> {
        EventWorld::end_time(self.inner)
    }

    fn runway_ids(&self) -> Vec<String> {
        self.inner.runway_ids()
    }
}
