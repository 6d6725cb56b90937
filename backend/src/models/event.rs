//! Event logging for elevator sessions.
//!
//! Every state change in the dispatch core is captured as an [`Event`]
//! stamped with the clock's elapsed milliseconds. The log lets tests assert
//! on exact service order and door cycles, and lets the presentation layer
//! replay what happened without reaching into elevator internals.
//!
//! # Example
//!
//! ```rust
//! use elevator_sim_core_rs::models::{Event, EventLog, RequestSource};
//!
//! let mut log = EventLog::new();
//! log.log(Event::RequestAdded {
//!     at_ms: 0,
//!     floor: 7,
//!     source: RequestSource::Button,
//! });
//!
//! assert_eq!(log.events_of_type("RequestAdded").len(), 1);
//! assert_eq!(log.events_at_floor(7).len(), 1);
//! ```

use super::{Direction, DoorState, FloorNumber};

/// Where a pending request came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestSource {
    /// A passenger pressed the floor button
    Button,
    /// Injected by a narrative event
    RandomStop,
}

/// Elevator event capturing a state change.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Floor button accepted the press
    ButtonPressed { at_ms: u64, floor: FloorNumber },

    /// Floor request refused (out of bounds or stuck button)
    RequestRejected {
        at_ms: u64,
        floor: FloorNumber,
        reason: String,
    },

    /// Floor joined the pending set
    RequestAdded {
        at_ms: u64,
        floor: FloorNumber,
        source: RequestSource,
    },

    /// Travel direction changed
    DirectionChanged {
        at_ms: u64,
        from: Direction,
        to: Direction,
    },

    /// Car moved one floor
    FloorReached {
        at_ms: u64,
        floor: FloorNumber,
        direction: Direction,
    },

    /// Door moved to a new state
    DoorChanged {
        at_ms: u64,
        floor: FloorNumber,
        from: DoorState,
        to: DoorState,
    },

    /// Pending request cleared and its button released
    RequestServiced { at_ms: u64, floor: FloorNumber },
}

impl Event {
    /// Logical time when this event occurred
    pub fn at_ms(&self) -> u64 {
        match self {
            Event::ButtonPressed { at_ms, .. } => *at_ms,
            Event::RequestRejected { at_ms, .. } => *at_ms,
            Event::RequestAdded { at_ms, .. } => *at_ms,
            Event::DirectionChanged { at_ms, .. } => *at_ms,
            Event::FloorReached { at_ms, .. } => *at_ms,
            Event::DoorChanged { at_ms, .. } => *at_ms,
            Event::RequestServiced { at_ms, .. } => *at_ms,
        }
    }

    /// Get a short description of the event type
    pub fn event_type(&self) -> &'static str {
        match self {
            Event::ButtonPressed { .. } => "ButtonPressed",
            Event::RequestRejected { .. } => "RequestRejected",
            Event::RequestAdded { .. } => "RequestAdded",
            Event::DirectionChanged { .. } => "DirectionChanged",
            Event::FloorReached { .. } => "FloorReached",
            Event::DoorChanged { .. } => "DoorChanged",
            Event::RequestServiced { .. } => "RequestServiced",
        }
    }

    /// Floor the event concerns, if any
    pub fn floor(&self) -> Option<FloorNumber> {
        match self {
            Event::ButtonPressed { floor, .. } => Some(*floor),
            Event::RequestRejected { floor, .. } => Some(*floor),
            Event::RequestAdded { floor, .. } => Some(*floor),
            Event::FloorReached { floor, .. } => Some(*floor),
            Event::DoorChanged { floor, .. } => Some(*floor),
            Event::RequestServiced { floor, .. } => Some(*floor),
            Event::DirectionChanged { .. } => None,
        }
    }
}

/// Event log for storing and querying elevator events.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn log(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Get events of a specific type
    pub fn events_of_type(&self, event_type: &str) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.event_type() == event_type)
            .collect()
    }

    /// Get events concerning a specific floor
    pub fn events_at_floor(&self, floor: FloorNumber) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.floor() == Some(floor))
            .collect()
    }

    /// Floors serviced so far, in order
    pub fn serviced_floors(&self) -> Vec<FloorNumber> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::RequestServiced { floor, .. } => Some(*floor),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type_and_floor() {
        let event = Event::DoorChanged {
            at_ms: 3000,
            floor: 4,
            from: DoorState::Opening,
            to: DoorState::Open,
        };
        assert_eq!(event.event_type(), "DoorChanged");
        assert_eq!(event.floor(), Some(4));
        assert_eq!(event.at_ms(), 3000);
    }

    #[test]
    fn test_direction_change_has_no_floor() {
        let event = Event::DirectionChanged {
            at_ms: 0,
            from: Direction::Idle,
            to: Direction::Up,
        };
        assert_eq!(event.floor(), None);
    }

    #[test]
    fn test_serviced_floors_in_order() {
        let mut log = EventLog::new();
        log.log(Event::RequestServiced { at_ms: 10, floor: 2 });
        log.log(Event::FloorReached {
            at_ms: 12,
            floor: 3,
            direction: Direction::Up,
        });
        log.log(Event::RequestServiced { at_ms: 20, floor: 4 });

        assert_eq!(log.serviced_floors(), vec![2, 4]);
        assert_eq!(log.events_at_floor(3).len(), 1);
    }

    #[test]
    fn test_event_log_clear() {
        let mut log = EventLog::new();
        log.log(Event::ButtonPressed { at_ms: 0, floor: 1 });
        assert_eq!(log.len(), 1);

        log.clear();
        assert!(log.is_empty());
    }
}
