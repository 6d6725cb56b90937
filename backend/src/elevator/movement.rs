//! Floor-by-floor travel
//!
//! [`Movement`] is the only way the car changes floors. Presentation code
//! iterates it to render each intermediate floor; the service cycle simply
//! drains it. The sequence is finite (one item per floor crossed) and fused.

use std::iter::FusedIterator;

use super::engine::Elevator;
use crate::models::{Direction, FloorNumber};

/// The car has just arrived at `floor`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FloorStep {
    pub floor: FloorNumber,
    pub direction: Direction,
    /// Floors still to go before the target
    pub remaining: u32,
}

impl FloorStep {
    pub fn is_arrival(&self) -> bool {
        self.remaining == 0
    }
}

/// Lazy traversal toward a target floor
///
/// Created by [`Elevator::move_to_floor`]. Nothing moves until `next()` is
/// called; each call waits one movement delay.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use elevator_sim_core_rs::{Elevator, ElevatorConfig, SimulatedClock};
///
/// let mut elevator =
///     Elevator::new("A", ElevatorConfig::default(), Arc::new(SimulatedClock::new()), 1).unwrap();
///
/// let floors: Vec<i32> = elevator
///     .move_to_floor(4)
///     .unwrap()
///     .map(|step| step.floor)
///     .collect();
///
/// assert_eq!(floors, vec![2, 3, 4]);
/// assert_eq!(elevator.current_floor(), 4);
/// ```
#[derive(Debug)]
pub struct Movement<'a> {
    elevator: &'a mut Elevator,
    target: FloorNumber,
    finished: bool,
}

impl<'a> Movement<'a> {
    pub(crate) fn new(elevator: &'a mut Elevator, target: FloorNumber) -> Self {
        Self {
            elevator,
            target,
            finished: false,
        }
    }

    pub fn target(&self) -> FloorNumber {
        self.target
    }

    fn remaining(&self) -> u32 {
        if self.finished {
            return 0;
        }
        (self.target - self.elevator.current_floor()).unsigned_abs()
    }
}

impl Iterator for Movement<'_> {
    type Item = FloorStep;

    fn next(&mut self) -> Option<FloorStep> {
        if self.finished {
            return None;
        }
        match self.elevator.step_toward(self.target) {
            Some(floor) => Some(FloorStep {
                floor,
                direction: self.elevator.direction(),
                remaining: (self.target - floor).unsigned_abs(),
            }),
            None => {
                self.finished = true;
                None
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining() as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Movement<'_> {}

impl FusedIterator for Movement<'_> {}
