//! Elevator Engine
//!
//! Ties the buttons, door, pending requests and dispatch policy into the
//! movement and service cycle:
//!
//! ```text
//! press_floor_button(f) ─► button.press() ─► pending += f ─► (Idle? head toward f)
//!
//! process_next_request():
//!   1. Ask the policy for the next floor (apply its direction)
//!   2. Travel there one floor at a time (movement delay per floor)
//!   3. Open the door
//!   4. Release the button, drop the floor from pending
//!   5. Close the door
//!   6. Nothing left pending → Idle
//! ```
//!
//! Callers that render travel floor by floor use [`Elevator::plan_next_request`],
//! [`Elevator::move_to_floor`] and [`Elevator::service_current_floor`] directly
//! instead of writing elevator state.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use elevator_sim_core_rs::{Direction, Elevator, ElevatorConfig, ServiceOutcome, SimulatedClock};
//!
//! let clock = SimulatedClock::new();
//! let mut elevator = Elevator::new("A", ElevatorConfig::default(), Arc::new(clock), 42).unwrap();
//!
//! elevator.press_floor_button(4).unwrap();
//! elevator.press_floor_button(2).unwrap();
//! assert_eq!(elevator.direction(), Direction::Up);
//!
//! assert_eq!(elevator.process_next_request(), ServiceOutcome::Serviced { floor: 2 });
//! assert_eq!(elevator.process_next_request(), ServiceOutcome::Serviced { floor: 4 });
//! assert_eq!(elevator.process_next_request(), ServiceOutcome::Idle);
//! assert_eq!(elevator.direction(), Direction::Idle);
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, trace};

use super::config::{ConfigError, ElevatorConfig};
use super::movement::Movement;
use crate::core::time::SharedClock;
use crate::models::{
    Button, Direction, Door, Event, EventLog, FloorNumber, RequestSet, RequestSource,
};
use crate::policy::{DispatchPolicy, DispatchView};
use crate::rng::RngManager;

/// Reasons a floor request is refused
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RequestError {
    #[error("Floor {floor} is outside the served range {min}..={max}")]
    OutOfBounds {
        floor: FloorNumber,
        min: FloorNumber,
        max: FloorNumber,
    },

    #[error("Button for floor {floor} is stuck")]
    ButtonStuck { floor: FloorNumber },
}

/// Result of one service cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceOutcome {
    /// Car travelled to `floor`, cycled the door and cleared the request
    Serviced { floor: FloorNumber },
    /// Nothing pending; direction is now `Idle`
    Idle,
}

impl ServiceOutcome {
    pub fn is_serviced(&self) -> bool {
        matches!(self, ServiceOutcome::Serviced { .. })
    }

    pub fn floor(&self) -> Option<FloorNumber> {
        match self {
            ServiceOutcome::Serviced { floor } => Some(*floor),
            ServiceOutcome::Idle => None,
        }
    }
}

/// A single elevator car
///
/// Owns its door, buttons, pending requests, dispatch policy and random
/// source. Not shared between threads; one caller drives it per session.
pub struct Elevator {
    id: String,
    config: ElevatorConfig,
    current_floor: FloorNumber,
    direction: Direction,
    door: Door,
    requests: RequestSet,
    buttons: BTreeMap<FloorNumber, Button>,
    policy: Box<dyn DispatchPolicy>,
    clock: SharedClock,
    rng: RngManager,
    events: EventLog,
}

impl Elevator {
    /// Create an idle car with closed doors at the lowest floor
    ///
    /// # Arguments
    /// * `id` - Short label ("A", "B", ...)
    /// * `config` - Validated before use
    /// * `clock` - Source of every movement and door wait
    /// * `rng_seed` - Seed for random stop injection
    ///
    /// # Errors
    /// [`ConfigError`] when the configuration does not validate.
    pub fn new(
        id: impl Into<String>,
        config: ElevatorConfig,
        clock: SharedClock,
        rng_seed: u64,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let buttons = config
            .floors()
            .map(|floor| (floor, Button::new(floor)))
            .collect();

        Ok(Self {
            id: id.into(),
            current_floor: config.min_floor,
            direction: Direction::Idle,
            door: Door::new(config.door_delay(), Arc::clone(&clock)),
            requests: RequestSet::new(),
            buttons,
            policy: config.policy.build(),
            clock,
            rng: RngManager::new(rng_seed),
            events: EventLog::new(),
            config,
        })
    }

    /// Replace the dispatch policy chosen by the configuration
    pub fn with_policy(mut self, policy: Box<dyn DispatchPolicy>) -> Self {
        self.policy = policy;
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn config(&self) -> &ElevatorConfig {
        &self.config
    }

    pub fn current_floor(&self) -> FloorNumber {
        self.current_floor
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn door(&self) -> &Door {
        &self.door
    }

    /// Direct door access; transitions made through it are logged on the
    /// next elevator operation
    pub fn door_mut(&mut self) -> &mut Door {
        &mut self.door
    }

    /// Snapshot of pending floors
    pub fn requested_floors(&self) -> BTreeSet<FloorNumber> {
        self.requests.snapshot()
    }

    pub fn pending_count(&self) -> usize {
        self.requests.len()
    }

    pub fn has_pending_requests(&self) -> bool {
        !self.requests.is_empty()
    }

    pub fn button(&self, floor: FloorNumber) -> Option<&Button> {
        self.buttons.get(&floor)
    }

    pub fn button_mut(&mut self, floor: FloorNumber) -> Option<&mut Button> {
        self.buttons.get_mut(&floor)
    }

    pub fn policy_name(&self) -> &'static str {
        self.policy.name()
    }

    pub fn events(&self) -> &EventLog {
        &self.events
    }

    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    /// One-line summary for display
    pub fn status(&self) -> String {
        format!(
            "Elevator {}: Floor {}, Direction: {}, Doors: {}, Requests: {:?}",
            self.id,
            self.current_floor,
            self.direction,
            self.door.state(),
            self.requests.iter().collect::<Vec<_>>()
        )
    }

    // ========================================================================
    // Requests
    // ========================================================================

    /// Press the in-car button for `floor`
    ///
    /// On success the floor becomes pending and, if the car was idle, its
    /// direction points at the floor.
    ///
    /// # Errors
    /// - [`RequestError::OutOfBounds`] for floors outside the configured range
    /// - [`RequestError::ButtonStuck`] when the button ignores the press
    ///
    /// Neither error changes any state.
    pub fn press_floor_button(&mut self, floor: FloorNumber) -> Result<(), RequestError> {
        let Some(button) = self.buttons.get_mut(&floor) else {
            let error = RequestError::OutOfBounds {
                floor,
                min: self.config.min_floor,
                max: self.config.max_floor,
            };
            self.reject(floor, &error);
            return Err(error);
        };

        if !button.press() {
            let error = RequestError::ButtonStuck { floor };
            self.reject(floor, &error);
            return Err(error);
        }

        self.record(|at_ms| Event::ButtonPressed { at_ms, floor });
        self.add_request(floor, RequestSource::Button);
        Ok(())
    }

    /// Inject a stop on a random floor
    ///
    /// The floor is drawn uniformly from the configured range. Nothing is
    /// added when the draw hits the current floor or when the pending set
    /// already holds `max_floor - min_floor` floors.
    ///
    /// Returns the injected floor.
    pub fn add_random_stop(&mut self) -> Option<FloorNumber> {
        if self.requests.len() >= self.config.random_stop_cap() {
            trace!(elevator = %self.id, pending = self.requests.len(), "random stop refused: cap reached");
            return None;
        }

        let floor = self
            .rng
            .range_inclusive(self.config.min_floor, self.config.max_floor);
        if floor == self.current_floor {
            trace!(elevator = %self.id, floor, "random stop refused: current floor");
            return None;
        }

        self.add_request(floor, RequestSource::RandomStop);
        Some(floor)
    }

    /// Clear a request and release its button
    ///
    /// Idempotent: returns `false` and changes nothing when the floor is not
    /// pending.
    pub fn resolve_request(&mut self, floor: FloorNumber) -> bool {
        if let Some(button) = self.buttons.get_mut(&floor) {
            button.release();
        }
        if !self.requests.remove(floor) {
            return false;
        }
        self.record(|at_ms| Event::RequestServiced { at_ms, floor });
        true
    }

    // ========================================================================
    // Dispatch
    // ========================================================================

    /// Floor the policy would service next; changes nothing
    pub fn next_floor_preview(&self) -> Option<FloorNumber> {
        self.policy
            .next_floor(&self.dispatch_view())
            .map(|decision| decision.floor)
    }

    /// Ask the policy for the next floor and adopt its direction
    ///
    /// With nothing pending the car goes `Idle` and `None` is returned.
    pub fn plan_next_request(&mut self) -> Option<FloorNumber> {
        match self.policy.next_floor(&self.dispatch_view()) {
            Some(decision) => {
                debug!(
                    elevator = %self.id,
                    policy = self.policy.name(),
                    from = self.current_floor,
                    to = decision.floor,
                    direction = %decision.direction,
                    "dispatch decision"
                );
                self.set_direction(decision.direction);
                Some(decision.floor)
            }
            None => {
                self.set_direction(Direction::Idle);
                None
            }
        }
    }

    /// Run one full service cycle
    pub fn process_next_request(&mut self) -> ServiceOutcome {
        let Some(floor) = self.plan_next_request() else {
            return ServiceOutcome::Idle;
        };

        match self.move_to_floor(floor) {
            Ok(movement) => movement.for_each(drop),
            Err(error) => {
                debug!(elevator = %self.id, floor, %error, "dispatch target unreachable");
                return ServiceOutcome::Idle;
            }
        }
        self.service_current_floor();

        ServiceOutcome::Serviced { floor }
    }

    /// Service every pending request; returns floors in visiting order
    pub fn run_until_idle(&mut self) -> Vec<FloorNumber> {
        let mut visited = Vec::new();
        while let ServiceOutcome::Serviced { floor } = self.process_next_request() {
            visited.push(floor);
        }
        visited
    }

    // ========================================================================
    // Movement and door
    // ========================================================================

    /// Lazily travel to `target`, one floor per iteration
    ///
    /// Sets the direction toward the target right away; each `next()` waits
    /// the movement delay and yields the floor just reached. Already at the
    /// target means an empty iterator.
    pub fn move_to_floor(&mut self, target: FloorNumber) -> Result<Movement<'_>, RequestError> {
        if !self.config.contains(target) {
            return Err(RequestError::OutOfBounds {
                floor: target,
                min: self.config.min_floor,
                max: self.config.max_floor,
            });
        }
        if target != self.current_floor {
            self.set_direction(Direction::toward(self.current_floor, target));
        }
        Ok(Movement::new(self, target))
    }

    /// Move a single floor toward `target`
    ///
    /// Closes the door first if needed. Returns the new floor, or `None`
    /// when already at the target or the target is out of range.
    pub fn step_toward(&mut self, target: FloorNumber) -> Option<FloorNumber> {
        if target == self.current_floor || !self.config.contains(target) {
            return None;
        }
        if !self.door.is_closed() {
            self.door.close();
            self.drain_door_events();
        }

        let direction = Direction::toward(self.current_floor, target);
        self.set_direction(direction);
        self.clock.sleep(self.config.movement_delay());
        self.current_floor += match direction {
            Direction::Up => 1,
            _ => -1,
        };

        let floor = self.current_floor;
        self.record(|at_ms| Event::FloorReached {
            at_ms,
            floor,
            direction,
        });
        Some(floor)
    }

    /// Open the door, clear this floor's request, close the door
    ///
    /// Returns whether a pending request was cleared. When the pending set
    /// ends up empty the car goes `Idle`.
    pub fn service_current_floor(&mut self) -> bool {
        let floor = self.current_floor;

        if !self.door.is_open() {
            self.door.open();
        }
        self.drain_door_events();

        let cleared = self.resolve_request(floor);

        if !self.door.is_closed() {
            self.door.close();
        }
        self.drain_door_events();

        if self.requests.is_empty() {
            self.set_direction(Direction::Idle);
        }
        cleared
    }

    pub fn open_door(&mut self) {
        self.door.open();
        self.drain_door_events();
    }

    pub fn close_door(&mut self) {
        self.door.close();
        self.drain_door_events();
    }

    /// Force a closing door back open; `false` unless it was closing
    pub fn force_open_door(&mut self) -> bool {
        let opened = self.door.force_open();
        self.drain_door_events();
        opened
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn dispatch_view(&self) -> DispatchView<'_> {
        DispatchView {
            current_floor: self.current_floor,
            direction: self.direction,
            pending: &self.requests,
        }
    }

    fn add_request(&mut self, floor: FloorNumber, source: RequestSource) {
        if self.requests.insert(floor) {
            self.record(|at_ms| Event::RequestAdded {
                at_ms,
                floor,
                source,
            });
        }
        if self.direction.is_idle() {
            self.set_direction(Direction::toward(self.current_floor, floor));
        }
    }

    fn set_direction(&mut self, to: Direction) {
        let from = self.direction;
        if from == to {
            return;
        }
        self.direction = to;
        self.record(|at_ms| Event::DirectionChanged { at_ms, from, to });
    }

    fn reject(&mut self, floor: FloorNumber, error: &RequestError) {
        trace!(elevator = %self.id, floor, %error, "request rejected");
        let reason = error.to_string();
        self.record(|at_ms| Event::RequestRejected {
            at_ms,
            floor,
            reason,
        });
    }

    fn drain_door_events(&mut self) {
        let floor = self.current_floor;
        for transition in self.door.take_transitions() {
            self.events.log(Event::DoorChanged {
                at_ms: transition.at_ms,
                floor,
                from: transition.from,
                to: transition.to,
            });
        }
    }

    fn record(&mut self, make: impl FnOnce(u64) -> Event) {
        // Door changes made through `door_mut` land before anything newer
        self.drain_door_events();
        let event = make(self.clock.elapsed_ms());
        self.events.log(event);
    }
}

impl fmt::Debug for Elevator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Elevator")
            .field("id", &self.id)
            .field("current_floor", &self.current_floor)
            .field("direction", &self.direction)
            .field("door", &self.door)
            .field("requests", &self.requests)
            .field("policy", &self.policy.name())
            .field("event_count", &self.events.len())
            .finish()
    }
}
