//! Orchestration: the timeline integrator, configuration and the runner
//!
//! See `engine.rs` for the integration loop and `simulation.rs` for how
//! policies and the engine are combined into one run.

pub mod config;
pub mod engine;
pub mod simulation;

pub use config::{PolicyConfig, SimulationConfig};
pub use engine::{CapacityBasis, Engine, EngineOutcome, SimulationError};
pub use simulation::{Simulation, SimulationReport};
