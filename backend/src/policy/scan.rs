//! Scan (directional) dispatch policy
//!
//! The car keeps serving the closest pending floor in its direction of travel
//! and reverses only when that direction has nothing left.
//!
//! # Behavior
//!
//! - `Up`: smallest pending floor strictly above the car; if none, flip to
//!   `Down`
//! - `Down`: largest pending floor strictly below the car; if none, flip to
//!   `Up`
//! - `Idle`: head `Up` when the lowest pending floor is above the car,
//!   otherwise `Down`, then scan as above
//! - Nothing pending: no decision
//!
//! A pending floor equal to the car's floor is neither above nor below. When
//! it is the only one left it is served in place without changing direction.

use super::{DispatchDecision, DispatchPolicy, DispatchView};
use crate::models::{Direction, FloorNumber, RequestSet};

/// Closest-in-direction, reverse-on-exhaustion policy
///
/// # Example
///
/// ```
/// use elevator_sim_core_rs::policy::{DispatchPolicy, DispatchView, ScanPolicy};
/// use elevator_sim_core_rs::{Direction, RequestSet};
///
/// let pending: RequestSet = [3, 8].into_iter().collect();
/// let view = DispatchView {
///     current_floor: 12,
///     direction: Direction::Up,
///     pending: &pending,
/// };
///
/// let decision = ScanPolicy.next_floor(&view).unwrap();
/// assert_eq!(decision.floor, 8);
/// assert_eq!(decision.direction, Direction::Down);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ScanPolicy;

impl ScanPolicy {
    pub fn new() -> Self {
        Self
    }
}

fn closest_in_direction(
    pending: &RequestSet,
    current: FloorNumber,
    direction: Direction,
) -> Option<FloorNumber> {
    match direction {
        Direction::Up => pending.closest_above(current),
        Direction::Down => pending.closest_below(current),
        Direction::Idle => None,
    }
}

impl DispatchPolicy for ScanPolicy {
    fn name(&self) -> &'static str {
        "scan"
    }

    fn next_floor(&self, view: &DispatchView<'_>) -> Option<DispatchDecision> {
        let lowest = view.pending.lowest()?;
        let current = view.current_floor;

        let resolved = match view.direction {
            Direction::Idle => Direction::toward(current, lowest),
            moving => moving,
        };

        let mut direction = resolved;
        for _ in 0..2 {
            if let Some(floor) = closest_in_direction(view.pending, current, direction) {
                return Some(DispatchDecision { floor, direction });
            }
            direction = direction.opposite();
        }

        // Both sides empty: the only pending floor is the current one
        Some(DispatchDecision {
            floor: current,
            direction: resolved,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decide(
        current: FloorNumber,
        direction: Direction,
        floors: &[FloorNumber],
    ) -> Option<DispatchDecision> {
        let pending: RequestSet = floors.iter().copied().collect();
        ScanPolicy::new().next_floor(&DispatchView {
            current_floor: current,
            direction,
            pending: &pending,
        })
    }

    #[test]
    fn test_up_takes_minimum_above() {
        let decision = decide(5, Direction::Up, &[3, 8, 10]).unwrap();
        assert_eq!(decision.floor, 8);
        assert_eq!(decision.direction, Direction::Up);
    }

    #[test]
    fn test_up_exhausted_flips_down() {
        let decision = decide(12, Direction::Up, &[3, 8]).unwrap();
        assert_eq!(decision.floor, 8);
        assert_eq!(decision.direction, Direction::Down);
    }

    #[test]
    fn test_down_takes_maximum_below() {
        let decision = decide(9, Direction::Down, &[2, 6, 12]).unwrap();
        assert_eq!(decision.floor, 6);
        assert_eq!(decision.direction, Direction::Down);
    }

    #[test]
    fn test_down_exhausted_flips_up() {
        let decision = decide(2, Direction::Down, &[6, 12]).unwrap();
        assert_eq!(decision.floor, 6);
        assert_eq!(decision.direction, Direction::Up);
    }

    #[test]
    fn test_idle_resolves_from_lowest_pending() {
        // lowest pending (2) is above the car
        let decision = decide(1, Direction::Idle, &[4, 2]).unwrap();
        assert_eq!(decision.floor, 2);
        assert_eq!(decision.direction, Direction::Up);

        // lowest pending (3) is below the car even though 9 is above
        let decision = decide(5, Direction::Idle, &[3, 9]).unwrap();
        assert_eq!(decision.floor, 3);
        assert_eq!(decision.direction, Direction::Down);
    }

    #[test]
    fn test_empty_set_has_no_decision() {
        assert_eq!(decide(5, Direction::Up, &[]), None);
        assert_eq!(decide(5, Direction::Idle, &[]), None);
    }

    #[test]
    fn test_only_current_floor_served_in_place() {
        let decision = decide(7, Direction::Up, &[7]).unwrap();
        assert_eq!(decision.floor, 7);
        assert_eq!(decision.direction, Direction::Up);

        let decision = decide(7, Direction::Idle, &[7]).unwrap();
        assert_eq!(decision.floor, 7);
        assert_eq!(decision.direction, Direction::Down);
    }

    #[test]
    fn test_current_floor_skipped_while_others_pending() {
        let decision = decide(7, Direction::Up, &[7, 9]).unwrap();
        assert_eq!(decision.floor, 9);
    }
}
