//! Dispatch Policy Module
//!
//! A dispatch policy decides which pending floor the car services next.
//!
//! # Policy Interface
//!
//! Policies are pure: they read a [`DispatchView`] and return a
//! [`DispatchDecision`] carrying both the floor and the direction the car
//! should adopt. The elevator applies the direction itself, so asking for a
//! preview never mutates anything.
//!
//! ```rust
//! use elevator_sim_core_rs::policy::{DispatchDecision, DispatchPolicy, DispatchView};
//!
//! struct LowestFirst;
//!
//! impl DispatchPolicy for LowestFirst {
//!     fn name(&self) -> &'static str {
//!         "lowest_first"
//!     }
//!
//!     fn next_floor(&self, view: &DispatchView<'_>) -> Option<DispatchDecision> {
//!         let floor = view.pending.lowest()?;
//!         Some(DispatchDecision::toward(view.current_floor, floor))
//!     }
//! }
//! ```
//!
//! Available policies:
//! 1. **Scan**: closest floor in the direction of travel, reverse when the
//!    direction is exhausted (default)
//! 2. **Nearest**: closest floor regardless of direction (baseline)

use serde::{Deserialize, Serialize};

use crate::models::{Direction, FloorNumber, RequestSet};

pub mod nearest;
pub mod scan;

pub use nearest::NearestPolicy;
pub use scan::ScanPolicy;

/// Read-only inputs to a dispatch decision
#[derive(Debug, Clone, Copy)]
pub struct DispatchView<'a> {
    pub current_floor: FloorNumber,
    pub direction: Direction,
    pub pending: &'a RequestSet,
}

/// Next floor to service plus the direction the car should hold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchDecision {
    pub floor: FloorNumber,
    pub direction: Direction,
}

impl DispatchDecision {
    /// Decision for `floor` with the direction pointing at it from `current`
    pub fn toward(current: FloorNumber, floor: FloorNumber) -> Self {
        Self {
            floor,
            direction: Direction::toward(current, floor),
        }
    }
}

/// Strategy for picking the next floor
pub trait DispatchPolicy: Send {
    /// Short identifier used in logs and configuration
    fn name(&self) -> &'static str;

    /// Select the next floor, or `None` when nothing is pending
    fn next_floor(&self, view: &DispatchView<'_>) -> Option<DispatchDecision>;
}

/// Policy selection in configuration files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PolicyConfig {
    #[default]
    Scan,
    Nearest,
}

impl PolicyConfig {
    pub fn build(self) -> Box<dyn DispatchPolicy> {
        match self {
            PolicyConfig::Scan => Box::new(ScanPolicy::new()),
            PolicyConfig::Nearest => Box::new(NearestPolicy::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_config_builds_named_policy() {
        assert_eq!(PolicyConfig::Scan.build().name(), "scan");
        assert_eq!(PolicyConfig::Nearest.build().name(), "nearest");
    }

    #[test]
    fn test_policy_config_deserializes_snake_case() {
        let config: PolicyConfig = serde_json::from_str("\"nearest\"").unwrap();
        assert_eq!(config, PolicyConfig::Nearest);
    }
}
