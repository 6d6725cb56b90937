//! Elevator Simulator Core - Rust Engine
//!
//! Dispatch core for a single-car elevator simulation with deterministic,
//! headless execution.
//!
//! # Architecture
//!
//! - **core**: Clock abstraction (real and simulated time)
//! - **models**: Domain types (Button, Door, RequestSet, Direction, Event, Building)
//! - **policy**: Dispatch policies (scan, nearest-floor baseline)
//! - **elevator**: Configuration, service cycle, floor-by-floor movement
//! - **rng**: Deterministic random number generation
//!
//! # Critical Invariants
//!
//! 1. Direction is `Idle` exactly when nothing is pending (after a cycle settles)
//! 2. The car never leaves the configured floor range
//! 3. All randomness is deterministic (seeded RNG)
//! 4. All waits go through the injected clock

pub mod core;
pub mod elevator;
pub mod models;
pub mod policy;
pub mod rng;

// Re-exports for convenience
pub use self::core::time::{Clock, RealClock, SharedClock, SimulatedClock};
pub use elevator::{
    ConfigError, Elevator, ElevatorConfig, FloorStep, Movement, RequestError, ServiceOutcome,
};
pub use models::{
    building::{Building, BuildingError},
    button::Button,
    direction::Direction,
    door::{Door, DoorState},
    event::{Event, EventLog, RequestSource},
    request_set::RequestSet,
    FloorNumber,
};
pub use policy::{DispatchDecision, DispatchPolicy, DispatchView, PolicyConfig, ScanPolicy};
pub use rng::RngManager;
