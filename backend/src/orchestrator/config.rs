//! Serializable simulation configuration
//!
//! A complete run can be described in JSON: the airport, the simulation
//! window, the capacity basis and a list of policies. Policy parameters are
//! validated when the configuration is turned into a
//! [`Simulation`](super::Simulation).
//!
//! # Example
//!
//! ```json
//! {
//!   "airport": { "name": "Demo", "runways": [ ... ] },
//!   "start": "2023-01-01T00:00:00Z",
//!   "policies": [
//!     { "type": "curfew", "start": "2023-01-01T23:00:00Z", "end": "2023-01-02T06:00:00Z" },
//!     { "type": "gate_capacity", "total_gates": 50, "average_turnaround_seconds": 7200 }
//!   ]
//! }
//! ```

use crate::core::time::{default_start, year_duration};
use crate::models::airport::Airport;
use crate::orchestrator::engine::CapacityBasis;
use crate::policy::{
    CurfewPolicy, CurfewRecurrence, GateCapacityConstraint, GateCapacityPolicy,
    IntelligentMaintenancePolicy, IntelligentMaintenanceSchedule, MaintenancePolicy,
    MaintenanceSchedule, Policy, PolicyError, RotationEfficiencies, RotationSchedule,
    RotationStrategy, RunwayRotationPolicy, ScheduledWindPolicy, TaxiTimeConfiguration,
    TaxiTimePolicy, WindChange, WindPolicy,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Policy selection and parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PolicyConfig {
    Curfew {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        #[serde(default)]
        recurrence: CurfewRecurrence,
    },

    Maintenance(MaintenanceSchedule),

    IntelligentMaintenance(IntelligentMaintenanceSchedule),

    Rotation {
        strategy: RotationStrategy,
        #[serde(default)]
        efficiencies: RotationEfficiencies,
        #[serde(default)]
        schedule: Option<RotationSchedule>,
    },

    GateCapacity(GateCapacityConstraint),

    TaxiTime(TaxiTimeConfiguration),

    Wind {
        speed_knots: f64,
        direction_true: f64,
    },

    ScheduledWind {
        schedule: Vec<WindChange>,
    },
}

impl PolicyConfig {
    /// Construct (and validate) the configured policy
    pub fn build(&self) -> Result<Box<dyn Policy>, PolicyError> {
        let policy: Box<dyn Policy> = match self {
            PolicyConfig::Curfew {
                start,
                end,
                recurrence,
            } => Box::new(CurfewPolicy::new(*start, *end, *recurrence)?),
            PolicyConfig::Maintenance(schedule) => Box::new(MaintenancePolicy::new(schedule.clone())?),
            PolicyConfig::IntelligentMaintenance(schedule) => {
                Box::new(IntelligentMaintenancePolicy::new(schedule.clone())?)
            }
            PolicyConfig::Rotation {
                strategy,
                efficiencies,
                schedule,
            } => Box::new(RunwayRotationPolicy::new(
                *strategy,
                *efficiencies,
                schedule.clone(),
            )?),
            PolicyConfig::GateCapacity(constraint) => {
                Box::new(GateCapacityPolicy::new(constraint.clone())?)
            }
            PolicyConfig::TaxiTime(config) => Box::new(TaxiTimePolicy::new(config.clone())?),
            PolicyConfig::Wind {
                speed_knots,
                direction_true,
            } => Box::new(WindPolicy::new(*speed_knots, *direction_true)?),
            PolicyConfig::ScheduledWind { schedule } => {
                Box::new(ScheduledWindPolicy::new(schedule.clone())?)
            }
        };
        Ok(policy)
    }

    /// Short label used in error messages before a policy exists
    pub fn label(&self) -> &'static str {
        match self {
            PolicyConfig::Curfew { .. } => "curfew",
            PolicyConfig::Maintenance(_) => "maintenance",
            PolicyConfig::IntelligentMaintenance(_) => "intelligent_maintenance",
            PolicyConfig::Rotation { .. } => "rotation",
            PolicyConfig::GateCapacity(_) => "gate_capacity",
            PolicyConfig::TaxiTime(_) => "taxi_time",
            PolicyConfig::Wind { .. } => "wind",
            PolicyConfig::ScheduledWind { .. } => "scheduled_wind",
        }
    }
}

/// Complete description of one simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub airport: Airport,

    #[serde(default = "default_start")]
    pub start: DateTime<Utc>,

    /// Defaults to one 365-day year after `start`
    #[serde(default)]
    pub end: Option<DateTime<Utc>>,

    #[serde(default)]
    pub capacity_basis: CapacityBasis,

    #[serde(default)]
    pub policies: Vec<PolicyConfig>,
}

impl SimulationConfig {
    pub fn new(airport: Airport) -> Self {
        Self {
            airport,
            start: default_start(),
            end: None,
            capacity_basis: CapacityBasis::default(),
            policies: Vec::new(),
        }
    }

    pub fn end_time(&self) -> DateTime<Utc> {
        self.end.unwrap_or(self.start + year_duration())
    }

    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
