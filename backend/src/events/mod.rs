//! Timeline events, their application to the world, and the event queue

pub mod handler;
pub mod queue;
pub mod types;

pub use queue::EventQueue;
pub use types::{
    ActiveConfiguration, ActiveRunwayInfo, Direction, Event, EventKind, EventType, OperationType,
};
