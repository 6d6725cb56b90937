//! Shared helpers for integration tests

#![allow(dead_code)]

use std::sync::Arc;

use elevator_sim_core_rs::{Elevator, ElevatorConfig, SimulatedClock};

/// Default-config elevator on a simulated clock, plus a handle to that clock
pub fn simulated_elevator(seed: u64) -> (Elevator, SimulatedClock) {
    simulated_elevator_with(ElevatorConfig::default(), seed)
}

pub fn simulated_elevator_with(config: ElevatorConfig, seed: u64) -> (Elevator, SimulatedClock) {
    let clock = SimulatedClock::new();
    let elevator = Elevator::new("A", config, Arc::new(clock.clone()), seed)
        .expect("test config must be valid");
    (elevator, clock)
}
