//! Car door state machine
//!
//! ```text
//!            open()                 close()
//! Closed ──► Opening ──(delay)──► Open ──► Closing ──(delay)──► Closed
//!                ▲                            │
//!                └──────── force_open() ◄─────┘   (half delay)
//! ```
//!
//! Every wait goes through the injected clock. The door records each state
//! change as a [`DoorTransition`]; the owning elevator drains them into its
//! event log.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::time::SharedClock;

/// Door lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum DoorState {
    #[default]
    Closed,
    Opening,
    Open,
    Closing,
}

impl DoorState {
    pub fn as_str(self) -> &'static str {
        match self {
            DoorState::Closed => "CLOSED",
            DoorState::Opening => "OPENING",
            DoorState::Open => "OPEN",
            DoorState::Closing => "CLOSING",
        }
    }
}

impl fmt::Display for DoorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single recorded state change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DoorTransition {
    pub at_ms: u64,
    pub from: DoorState,
    pub to: DoorState,
}

/// Doors of one car
pub struct Door {
    state: DoorState,
    transition_delay: Duration,
    clock: SharedClock,
    transitions: Vec<DoorTransition>,
}

impl Door {
    /// Create a closed door
    ///
    /// # Arguments
    /// * `transition_delay` - Time a full open or close takes
    /// * `clock` - Clock used for every wait
    pub fn new(transition_delay: Duration, clock: SharedClock) -> Self {
        Self {
            state: DoorState::Closed,
            transition_delay,
            clock,
            transitions: Vec::new(),
        }
    }

    pub fn state(&self) -> DoorState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == DoorState::Open
    }

    pub fn is_closed(&self) -> bool {
        self.state == DoorState::Closed
    }

    pub fn transition_delay(&self) -> Duration {
        self.transition_delay
    }

    /// Open the door and wait for it to finish
    ///
    /// No-op when already open.
    pub fn open(&mut self) {
        if self.state == DoorState::Open {
            return;
        }
        self.set_state(DoorState::Opening);
        self.finish_transition();
    }

    /// Close the door and wait for it to finish
    ///
    /// No-op when already closed.
    pub fn close(&mut self) {
        if self.state == DoorState::Closed {
            return;
        }
        self.begin_close();
        self.finish_transition();
    }

    /// Start closing without waiting
    ///
    /// This is the window in which [`Door::force_open`] can interrupt.
    /// Returns `false` when the door is already closed or closing.
    pub fn begin_close(&mut self) -> bool {
        match self.state {
            DoorState::Open | DoorState::Opening => {
                self.set_state(DoorState::Closing);
                true
            }
            DoorState::Closed | DoorState::Closing => false,
        }
    }

    /// Wait out an in-progress `Opening` or `Closing`
    ///
    /// Resting states are left alone.
    pub fn finish_transition(&mut self) {
        let target = match self.state {
            DoorState::Opening => DoorState::Open,
            DoorState::Closing => DoorState::Closed,
            DoorState::Open | DoorState::Closed => return,
        };
        self.clock.sleep(self.transition_delay);
        self.set_state(target);
    }

    /// Interrupt a closing door and bring it back open
    ///
    /// Only valid while `Closing`; takes half the normal transition time.
    /// Any other state returns `false` with no change.
    pub fn force_open(&mut self) -> bool {
        if self.state != DoorState::Closing {
            return false;
        }
        self.set_state(DoorState::Opening);
        self.clock.sleep(self.transition_delay / 2);
        self.set_state(DoorState::Open);
        true
    }

    /// Transitions recorded since the last call
    pub fn take_transitions(&mut self) -> Vec<DoorTransition> {
        std::mem::take(&mut self.transitions)
    }

    fn set_state(&mut self, to: DoorState) {
        let from = self.state;
        self.state = to;
        self.transitions.push(DoorTransition {
            at_ms: self.clock.elapsed_ms(),
            from,
            to,
        });
    }
}

impl fmt::Debug for Door {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Door")
            .field("state", &self.state)
            .field("transition_delay", &self.transition_delay)
            .field("pending_transitions", &self.transitions.len())
            .finish()
    }
}
