//! Building
//!
//! A named collection of independent elevators. Cars share no state and are
//! never coordinated; the building only owns them and hands them out.

use thiserror::Error;

use crate::elevator::Elevator;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildingError {
    #[error("No elevator at index {index} (building has {count})")]
    ElevatorNotFound { index: usize, count: usize },
}

/// # Example
/// ```
/// use std::sync::Arc;
/// use elevator_sim_core_rs::{Building, Elevator, ElevatorConfig, SimulatedClock};
///
/// let clock = Arc::new(SimulatedClock::new());
/// let mut building = Building::new("TechCorp Building");
/// for (seed, id) in ["A", "B"].iter().enumerate() {
///     building.add_elevator(
///         Elevator::new(*id, ElevatorConfig::default(), clock.clone(), seed as u64).unwrap(),
///     );
/// }
///
/// assert_eq!(building.len(), 2);
/// assert_eq!(building.elevator(1).unwrap().id(), "B");
/// assert!(building.elevator(2).is_none());
/// ```
#[derive(Debug)]
pub struct Building {
    name: String,
    elevators: Vec<Elevator>,
}

impl Building {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            elevators: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn add_elevator(&mut self, elevator: Elevator) {
        self.elevators.push(elevator);
    }

    pub fn elevator(&self, index: usize) -> Option<&Elevator> {
        self.elevators.get(index)
    }

    pub fn elevator_mut(&mut self, index: usize) -> Option<&mut Elevator> {
        self.elevators.get_mut(index)
    }

    /// Like [`Building::elevator_mut`], with a typed error for callers that
    /// propagate with `?`
    pub fn select(&mut self, index: usize) -> Result<&mut Elevator, BuildingError> {
        let count = self.elevators.len();
        self.elevators
            .get_mut(index)
            .ok_or(BuildingError::ElevatorNotFound { index, count })
    }

    pub fn elevators(&self) -> &[Elevator] {
        &self.elevators
    }

    pub fn len(&self) -> usize {
        self.elevators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elevators.is_empty()
    }
}
