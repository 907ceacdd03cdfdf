//! Airport Capacity Core - Rust Engine
//!
//! Event-driven calculation of an airport's theoretical maximum movement
//! capacity. A chronological stream of operational state changes (curfews,
//! maintenance, wind, rotation, gate and taxi limits) is replayed over a
//! simulated period and instantaneous runway throughput is integrated over
//! time.
//!
//! # Architecture
//!
//! - **core**: Time constants and duration helpers
//! - **models**: Runways, compatibility graph, airport, world state
//! - **events**: Event types, application, concurrent event queue
//! - **selection**: Wind decomposition, clique search, runway selector
//! - **policy**: Event-generating operational rules
//! - **orchestrator**: Timeline integrator, configuration, runner
//!
//! # Critical Invariants
//!
//! 1. Events are applied one at a time in timestamp order
//! 2. Capacity for a window uses the state in force *before* the next event
//! 3. Active configurations are always handed out as independent copies
//! 4. The compatibility graph never changes after the airport is validated

pub mod core;
pub mod events;
pub mod models;
pub mod orchestrator;
pub mod policy;
pub mod selection;

// Re-exports for convenience
pub use events::{
    ActiveConfiguration, ActiveRunwayInfo, Direction, Event, EventKind, EventQueue, EventType,
    OperationType,
};
pub use models::{
    airport::{Airport, AirportError},
    compatibility::{CompatibilityError, RunwayCompatibility},
    runway::{Runway, SurfaceType},
    world::{World, WorldError, WorldState},
};
pub use orchestrator::{
    CapacityBasis, Engine, EngineOutcome, PolicyConfig, Simulation, SimulationConfig,
    SimulationError, SimulationReport,
};
pub use policy::{EventWorld, Policy, PolicyError};
pub use selection::RunwayManager;
