//! Travel direction of the car

use std::fmt;

use serde::{Deserialize, Serialize};

use super::FloorNumber;

/// Travel intent of the car
///
/// Used both to move and to bias dispatch: the scan policy keeps serving
/// floors in the current direction before it reverses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Up,
    Down,
    #[default]
    Idle,
}

impl Direction {
    /// Direction of travel from `from` to `to`
    ///
    /// Anything that is not strictly above counts as `Down`, matching how an
    /// idle car picks its initial direction.
    pub fn toward(from: FloorNumber, to: FloorNumber) -> Self {
        if to > from {
            Direction::Up
        } else {
            Direction::Down
        }
    }

    /// The reverse direction; `Idle` stays `Idle`
    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Idle => Direction::Idle,
        }
    }

    pub fn is_idle(self) -> bool {
        self == Direction::Idle
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Up => "UP",
            Direction::Down => "DOWN",
            Direction::Idle => "IDLE",
        }
    }

    /// Arrow used when rendering floor-by-floor travel
    pub fn arrow(self) -> &'static str {
        match self {
            Direction::Up => "^",
            Direction::Down => "v",
            Direction::Idle => "-",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toward() {
        assert_eq!(Direction::toward(1, 4), Direction::Up);
        assert_eq!(Direction::toward(4, 1), Direction::Down);
        assert_eq!(Direction::toward(3, 3), Direction::Down);
    }

    #[test]
    fn test_opposite() {
        assert_eq!(Direction::Up.opposite(), Direction::Down);
        assert_eq!(Direction::Down.opposite(), Direction::Up);
        assert_eq!(Direction::Idle.opposite(), Direction::Idle);
    }

    #[test]
    fn test_display() {
        assert_eq!(Direction::Up.to_string(), "UP");
        assert_eq!(Direction::Idle.to_string(), "IDLE");
    }
}
