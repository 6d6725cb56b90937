//! Per-session elevator configuration
//!
//! Immutable once an elevator is built. Loaded from JSON by the CLI; every
//! field has a default so partial files work.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::FloorNumber;
use crate::policy::PolicyConfig;

/// Widest floor range a car may serve; one button is built per floor
pub const MAX_FLOOR_SPAN: i64 = 1_000;

/// Errors raised while loading or validating a configuration
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error(
        "Invalid floor range: min_floor {min} must be below max_floor {max}, at most {} floors apart",
        MAX_FLOOR_SPAN
    )]
    InvalidFloorRange { min: FloorNumber, max: FloorNumber },

    #[error("Invalid delay for {name}: {value} (must be finite and non-negative)")]
    InvalidDelay { name: &'static str, value: f64 },

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Elevator configuration
///
/// # Example
/// ```
/// use elevator_sim_core_rs::ElevatorConfig;
///
/// let config = ElevatorConfig::from_json(r#"{ "max_floor": 20 }"#).unwrap();
/// assert_eq!(config.min_floor, 1);
/// assert_eq!(config.max_floor, 20);
/// assert_eq!(config.movement_delay_secs, 2.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElevatorConfig {
    /// Travel time between adjacent floors (seconds)
    pub movement_delay_secs: f64,

    /// Time a full door open or close takes (seconds)
    pub door_delay_secs: f64,

    /// Lowest reachable floor (inclusive)
    pub min_floor: FloorNumber,

    /// Highest reachable floor (inclusive)
    pub max_floor: FloorNumber,

    /// Dispatch strategy
    pub policy: PolicyConfig,
}

impl Default for ElevatorConfig {
    fn default() -> Self {
        Self {
            movement_delay_secs: 2.0,
            door_delay_secs: 3.0,
            min_floor: 1,
            max_floor: 15,
            policy: PolicyConfig::Scan,
        }
    }
}

impl ElevatorConfig {
    /// Parse and validate a JSON configuration
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: ElevatorConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let span = self.span();
        if span <= 0 || span > MAX_FLOOR_SPAN {
            return Err(ConfigError::InvalidFloorRange {
                min: self.min_floor,
                max: self.max_floor,
            });
        }
        check_delay("movement_delay_secs", self.movement_delay_secs)?;
        check_delay("door_delay_secs", self.door_delay_secs)?;
        Ok(())
    }

    pub fn contains(&self, floor: FloorNumber) -> bool {
        (self.min_floor..=self.max_floor).contains(&floor)
    }

    pub fn floors(&self) -> std::ops::RangeInclusive<FloorNumber> {
        self.min_floor..=self.max_floor
    }

    /// Cap on pending requests that random stops may push towards
    pub fn random_stop_cap(&self) -> usize {
        usize::try_from(self.span()).unwrap_or(0)
    }

    /// Zero for a delay that does not validate
    pub fn movement_delay(&self) -> Duration {
        Duration::try_from_secs_f64(self.movement_delay_secs).unwrap_or_default()
    }

    /// Zero for a delay that does not validate
    pub fn door_delay(&self) -> Duration {
        Duration::try_from_secs_f64(self.door_delay_secs).unwrap_or_default()
    }

    fn span(&self) -> i64 {
        i64::from(self.max_floor) - i64::from(self.min_floor)
    }
}

fn check_delay(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value >= 0.0 && Duration::try_from_secs_f64(value).is_ok() {
        Ok(())
    } else {
        Err(ConfigError::InvalidDelay { name, value })
    }
}
