//! Nearest-floor Policy
//!
//! Baseline for comparison with [`super::ScanPolicy`]: always go to the
//! closest pending floor, whatever the current direction. Prone to starving
//! far floors under a steady stream of nearby requests.
//!
//! Ties go to the floor in the current direction of travel, then to the
//! lower floor.

use super::{DispatchDecision, DispatchPolicy, DispatchView};
use crate::models::Direction;

#[derive(Debug, Clone, Copy, Default)]
pub struct NearestPolicy;

impl NearestPolicy {
    pub fn new() -> Self {
        Self
    }
}

impl DispatchPolicy for NearestPolicy {
    fn name(&self) -> &'static str {
        "nearest"
    }

    fn next_floor(&self, view: &DispatchView<'_>) -> Option<DispatchDecision> {
        let current = view.current_floor;
        if view.pending.contains(current) {
            let direction = match view.direction {
                Direction::Idle => Direction::Down,
                moving => moving,
            };
            return Some(DispatchDecision {
                floor: current,
                direction,
            });
        }

        let above = view.pending.closest_above(current);
        let below = view.pending.closest_below(current);

        let floor = match (above, below) {
            (None, None) => return None,
            (Some(up), None) => up,
            (None, Some(down)) => down,
            (Some(up), Some(down)) => {
                let up_distance = up - current;
                let down_distance = current - down;
                if up_distance < down_distance
                    || (up_distance == down_distance && view.direction == Direction::Up)
                {
                    up
                } else {
                    down
                }
            }
        };

        Some(DispatchDecision::toward(current, floor))
    }
}
