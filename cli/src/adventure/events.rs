//! Narrative events that interrupt an adventure ride
//!
//! Each event offers three choices. Outcomes may touch the car (door,
//! buttons, random stops) and report whether the ride was delayed.

use elevator_sim_core_rs::{Elevator, FloorNumber, RngManager};
use tracing::debug;

/// What a choice did to the ride
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventOutcome {
    pub causes_delay: bool,
    pub message: &'static str,
}

impl EventOutcome {
    fn calm(message: &'static str) -> Self {
        Self {
            causes_delay: false,
            message,
        }
    }

    fn delayed(message: &'static str) -> Self {
        Self {
            causes_delay: true,
            message,
        }
    }

    pub fn is_success(&self) -> bool {
        self.message.contains("[SUCCESS]")
    }
}

pub trait ElevatorEvent {
    /// Floor the event happens on
    fn floor(&self) -> FloorNumber;

    fn resolved(&self) -> bool;

    fn description(&self) -> String;

    fn choices(&self) -> [&'static str; 3];

    /// Apply a 1-based choice; anything besides 1 and 2 takes the third branch
    fn handle_choice(
        &mut self,
        choice: usize,
        elevator: &mut Elevator,
        rng: &mut RngManager,
    ) -> EventOutcome;
}

/// Draw one of the four event kinds uniformly
pub fn random_event(
    floor: FloorNumber,
    elevator: &Elevator,
    rng: &mut RngManager,
) -> Box<dyn ElevatorEvent> {
    let event: Box<dyn ElevatorEvent> = match rng.range_inclusive(0, 3) {
        0 => Box::new(MusicEvent::new(floor)),
        1 => {
            let config = elevator.config();
            let button_floor = rng.range_inclusive(config.min_floor, config.max_floor);
            Box::new(StuckButtonEvent::new(floor, button_floor))
        }
        2 => Box::new(UnexpectedStopEvent::new(floor)),
        _ => Box::new(WeirdSoundEvent::new(floor)),
    };
    debug!(floor, description = %event.description(), "event triggered");
    event
}

#[derive(Debug)]
pub struct MusicEvent {
    floor: FloorNumber,
    resolved: bool,
}

impl MusicEvent {
    pub fn new(floor: FloorNumber) -> Self {
        Self {
            floor,
            resolved: false,
        }
    }
}

impl ElevatorEvent for MusicEvent {
    fn floor(&self) -> FloorNumber {
        self.floor
    }

    fn resolved(&self) -> bool {
        self.resolved
    }

    fn description(&self) -> String {
        format!(
            "The elevator music suddenly gets VERY loud on floor {}...",
            self.floor
        )
    }

    fn choices(&self) -> [&'static str; 3] {
        [
            "Cover your ears and wait it out",
            "Try to find the volume control",
            "Press all the buttons in frustration",
        ]
    }

    fn handle_choice(
        &mut self,
        choice: usize,
        elevator: &mut Elevator,
        rng: &mut RngManager,
    ) -> EventOutcome {
        match choice {
            1 => EventOutcome::calm("You endure the loud music. Your patience decreases slightly."),
            2 if rng.chance(0.5) => {
                self.resolved = true;
                EventOutcome::calm(
                    "[SUCCESS] You find a hidden volume control and turn it down! The music stops.",
                )
            }
            2 => EventOutcome::delayed(
                "[FAILED] You can't find the volume control. The music continues.",
            ),
            _ => {
                elevator.add_random_stop();
                EventOutcome::delayed(
                    "[WARNING] You press random buttons! The elevator stops briefly...",
                )
            }
        }
    }
}

/// A button on the car panel is acting up
#[derive(Debug)]
pub struct StuckButtonEvent {
    floor: FloorNumber,
    button_floor: FloorNumber,
    resolved: bool,
}

impl StuckButtonEvent {
    pub fn new(floor: FloorNumber, button_floor: FloorNumber) -> Self {
        Self {
            floor,
            button_floor,
            resolved: false,
        }
    }
}

impl ElevatorEvent for StuckButtonEvent {
    fn floor(&self) -> FloorNumber {
        self.floor
    }

    fn resolved(&self) -> bool {
        self.resolved
    }

    fn description(&self) -> String {
        format!("You notice a button is stuck on floor {}!", self.floor)
    }

    fn choices(&self) -> [&'static str; 3] {
        [
            "Ignore it",
            "Try to unstick it carefully",
            "Press it repeatedly",
        ]
    }

    fn handle_choice(
        &mut self,
        choice: usize,
        elevator: &mut Elevator,
        rng: &mut RngManager,
    ) -> EventOutcome {
        match choice {
            1 => EventOutcome::calm("You decide to ignore it. Nothing happens."),
            2 if rng.chance(0.7) => {
                if let Some(button) = elevator.button_mut(self.button_floor) {
                    button.set_stuck(false);
                }
                self.resolved = true;
                EventOutcome::calm("[SUCCESS] You carefully fix the stuck button! It works now.")
            }
            2 => EventOutcome::delayed(
                "[FAILED] You try to fix it but make it worse. The elevator shudders!",
            ),
            _ => EventOutcome::delayed("[WARNING] You press it too hard! The elevator jolts and stops."),
        }
    }
}

#[derive(Debug)]
pub struct UnexpectedStopEvent {
    floor: FloorNumber,
    resolved: bool,
}

impl UnexpectedStopEvent {
    pub fn new(floor: FloorNumber) -> Self {
        Self {
            floor,
            resolved: false,
        }
    }
}

impl ElevatorEvent for UnexpectedStopEvent {
    fn floor(&self) -> FloorNumber {
        self.floor
    }

    fn resolved(&self) -> bool {
        self.resolved
    }

    fn description(&self) -> String {
        format!(
            "The elevator stops unexpectedly on floor {}! The doors don't open...",
            self.floor
        )
    }

    fn choices(&self) -> [&'static str; 3] {
        [
            "Wait calmly",
            "Press the door open button",
            "Look for the emergency phone",
        ]
    }

    fn handle_choice(
        &mut self,
        choice: usize,
        elevator: &mut Elevator,
        _rng: &mut RngManager,
    ) -> EventOutcome {
        match choice {
            1 => {
                self.resolved = true;
                EventOutcome::delayed(
                    "You wait patiently. The doors open after a moment. False alarm!",
                )
            }
            2 => {
                // Doors were mid-close when the button was hit
                elevator.open_door();
                elevator.door_mut().begin_close();
                elevator.force_open_door();
                self.resolved = true;
                EventOutcome::delayed("[SUCCESS] You press the door button and the doors open!")
            }
            _ => EventOutcome::delayed(
                "You find the emergency phone but don't need it. The doors eventually open.",
            ),
        }
    }
}

#[derive(Debug)]
pub struct WeirdSoundEvent {
    floor: FloorNumber,
    resolved: bool,
}

impl WeirdSoundEvent {
    pub fn new(floor: FloorNumber) -> Self {
        Self {
            floor,
            resolved: false,
        }
    }
}

impl ElevatorEvent for WeirdSoundEvent {
    fn floor(&self) -> FloorNumber {
        self.floor
    }

    fn resolved(&self) -> bool {
        self.resolved
    }

    fn description(&self) -> String {
        format!("You hear a strange CLUNK sound on floor {}...", self.floor)
    }

    fn choices(&self) -> [&'static str; 3] {
        [
            "Ignore it - elevators make weird sounds",
            "Get worried and check the emergency button",
            "Press the next floor button quickly",
        ]
    }

    fn handle_choice(
        &mut self,
        choice: usize,
        elevator: &mut Elevator,
        rng: &mut RngManager,
    ) -> EventOutcome {
        match choice {
            1 if rng.chance(0.8) => EventOutcome::calm(
                "Good call! It was just a normal elevator sound. Nothing happens.",
            ),
            1 => EventOutcome::delayed("[WARNING] The elevator slows down... but eventually continues."),
            2 => EventOutcome::calm(
                "You check the emergency button but don't press it. The sound stops.",
            ),
            _ => {
                elevator.add_random_stop();
                EventOutcome::delayed(
                    "[WARNING] You panic and hit the button! The elevator stops unnecessarily.",
                )
            }
        }
    }
}
