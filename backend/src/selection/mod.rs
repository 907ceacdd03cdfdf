//! Runway selection: wind decomposition, clique search and the selector

pub mod cliques;
pub mod manager;
pub mod wind;

pub use manager::{choose_direction, RunwayManager};
pub use wind::{wind_components, WindComponents};
