//! Domain models: runways, compatibility graph, airport and world state

pub mod airport;
pub mod compatibility;
pub mod runway;
pub mod world;

pub use airport::{Airport, AirportError};
pub use compatibility::{CompatibilityError, RunwayCompatibility};
pub use runway::{Runway, SurfaceType};
pub use world::{World, WorldError, WorldState};
