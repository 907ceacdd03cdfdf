//! Core primitives shared by every layer of the engine

pub mod time;
