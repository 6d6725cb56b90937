//! Elevator - movement and service cycle
//!
//! See `engine.rs` for the cycle itself, `movement.rs` for floor-by-floor
//! travel and `config.rs` for per-session parameters.

pub mod config;
pub mod engine;
pub mod movement;

pub use config::{ConfigError, ElevatorConfig};
pub use engine::{Elevator, RequestError, ServiceOutcome};
pub use movement::{FloorStep, Movement};
