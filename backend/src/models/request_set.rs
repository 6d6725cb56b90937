//! Pending floor requests
//!
//! An ordered set so the scan policy can ask for "closest above" and
//! "closest below" directly.

use std::collections::BTreeSet;
use std::ops::Bound::{Excluded, Unbounded};

use super::FloorNumber;

/// Floors awaiting service; re-adding a pending floor is a no-op
///
/// # Example
/// ```
/// use elevator_sim_core_rs::RequestSet;
///
/// let mut requests = RequestSet::new();
/// requests.insert(3);
/// requests.insert(8);
/// requests.insert(10);
///
/// assert_eq!(requests.closest_above(5), Some(8));
/// assert_eq!(requests.closest_below(5), Some(3));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestSet {
    floors: BTreeSet<FloorNumber>,
}

impl RequestSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a floor; returns `true` if it was not already pending
    pub fn insert(&mut self, floor: FloorNumber) -> bool {
        self.floors.insert(floor)
    }

    /// Remove a floor; returns `true` if it was pending
    pub fn remove(&mut self, floor: FloorNumber) -> bool {
        self.floors.remove(&floor)
    }

    pub fn contains(&self, floor: FloorNumber) -> bool {
        self.floors.contains(&floor)
    }

    pub fn len(&self) -> usize {
        self.floors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.floors.is_empty()
    }

    pub fn lowest(&self) -> Option<FloorNumber> {
        self.floors.first().copied()
    }

    pub fn highest(&self) -> Option<FloorNumber> {
        self.floors.last().copied()
    }

    /// Smallest pending floor strictly above `floor`
    pub fn closest_above(&self, floor: FloorNumber) -> Option<FloorNumber> {
        self.floors.range((Excluded(floor), Unbounded)).next().copied()
    }

    /// Largest pending floor strictly below `floor`
    pub fn closest_below(&self, floor: FloorNumber) -> Option<FloorNumber> {
        self.floors.range(..floor).next_back().copied()
    }

    /// Pending floors in ascending order
    pub fn iter(&self) -> impl Iterator<Item = FloorNumber> + '_ {
        self.floors.iter().copied()
    }

    /// Owned copy for callers that display or compare the set
    pub fn snapshot(&self) -> BTreeSet<FloorNumber> {
        self.floors.clone()
    }
}

impl FromIterator<FloorNumber> for RequestSet {
    fn from_iter<I: IntoIterator<Item = FloorNumber>>(iter: I) -> Self {
        Self {
            floors: iter.into_iter().collect(),
        }
    }
}
