//! Interactive mode: ride a single car by picking floors
//!
//! Each requested floor is dispatched through the car's policy, so floors
//! queued while the car is busy are served in scan order. The door stays
//! open after arrival and closes when the car next departs.

use std::io::{BufRead, Write};
use std::time::Duration;

use anyhow::Result;
use elevator_sim_core_rs::{Direction, Elevator, FloorNumber, RequestError};
use tracing::debug;

use crate::console::{Console, STORY_DELAY, TRAVEL_DELAY};

pub struct InteractiveMode<R, W> {
    console: Console<R, W>,
    elevator: Elevator,
}

impl<R: BufRead, W: Write> InteractiveMode<R, W> {
    pub fn new(console: Console<R, W>, elevator: Elevator) -> Self {
        Self { console, elevator }
    }

    #[cfg(test)]
    pub fn into_parts(self) -> (Console<R, W>, Elevator) {
        (self.console, self.elevator)
    }

    /// Run until the user quits or input ends
    pub fn run(&mut self) -> Result<()> {
        let (min, max) = (self.elevator.config().min_floor, self.elevator.config().max_floor);

        self.console.banner("INTERACTIVE ELEVATOR MODE")?;
        self.console.pause(Duration::from_millis(300));
        self.console
            .print_slow("\nWelcome to Interactive Elevator Mode!", STORY_DELAY)?;
        self.console.print_slow(
            &format!("The building has floors {} to {}", min, max),
            STORY_DELAY,
        )?;
        self.console.print_slow(
            &format!("Current floor: {}", self.elevator.current_floor()),
            STORY_DELAY,
        )?;
        self.console
            .print_slow("Select floors to travel to. Type 'q' to quit.\n", STORY_DELAY)?;

        loop {
            self.print_status()?;

            let Some(floor) = self.read_floor()? else {
                self.console
                    .line("\nExiting Interactive Elevator Mode. Goodbye!")?;
                return Ok(());
            };

            if floor == self.elevator.current_floor() {
                self.console.line(&format!("\nAlready at floor {}!", floor))?;
                continue;
            }

            match self.elevator.press_floor_button(floor) {
                Ok(()) => {}
                Err(RequestError::ButtonStuck { .. }) => {
                    self.console.line(&format!(
                        "\n[WARNING] Button for floor {} is stuck! Try another floor.",
                        floor
                    ))?;
                    continue;
                }
                Err(error) => {
                    self.console.line(&format!("\n{}", error))?;
                    continue;
                }
            }

            self.console.line(&format!("\nFloor {} requested.", floor))?;
            self.serve_pending()?;
        }
    }

    fn print_status(&mut self) -> Result<()> {
        self.console.line("")?;
        self.console.rule()?;
        self.console
            .line(&format!("Current Floor: {}", self.elevator.current_floor()))?;
        self.console
            .line(&format!("Direction: {}", self.elevator.direction()))?;
        self.console
            .line(&format!("Doors: {}", self.elevator.door().state()))?;
        let pending = self.elevator.requested_floors();
        if !pending.is_empty() {
            let pending: Vec<_> = pending.into_iter().collect();
            self.console
                .line(&format!("Pending Requests: {:?}", pending))?;
        }
        self.console.rule()?;
        Ok(())
    }

    /// Prompt until a floor in range or a quit; `None` means quit
    fn read_floor(&mut self) -> Result<Option<FloorNumber>> {
        let (min, max) = (self.elevator.config().min_floor, self.elevator.config().max_floor);
        let prompt = format!("\nEnter floor number ({}-{}) or 'q' to quit: ", min, max);

        loop {
            let Some(answer) = self.console.read_line(&prompt)? else {
                return Ok(None);
            };
            if answer.eq_ignore_ascii_case("q") {
                return Ok(None);
            }
            match answer.parse::<FloorNumber>() {
                Ok(floor) if self.elevator.config().contains(floor) => return Ok(Some(floor)),
                Ok(_) => self
                    .console
                    .line(&format!("Floor must be between {} and {}", min, max))?,
                Err(_) => self
                    .console
                    .line("Please enter a valid floor number or 'q' to quit")?,
            }
        }
    }

    fn serve_pending(&mut self) -> Result<()> {
        while let Some(next) = self.elevator.plan_next_request() {
            debug!(next, pending = self.elevator.pending_count(), "serving request");
            self.travel_to(next)?;
        }
        Ok(())
    }

    fn travel_to(&mut self, target: FloorNumber) -> Result<()> {
        if self.elevator.door().is_open() {
            self.console.print_slow("Doors closing...", STORY_DELAY)?;
            self.elevator.close_door();
        }

        let start = self.elevator.current_floor();
        if start != target {
            let heading = match Direction::toward(start, target) {
                Direction::Up => "up",
                _ => "down",
            };
            self.console.line("")?;
            self.console.rule()?;
            self.console.print_slow(
                &format!("Elevator starting at floor {}", start),
                TRAVEL_DELAY,
            )?;
            self.console.print_slow(
                &format!("Traversing {} to floor {}...", heading, target),
                TRAVEL_DELAY,
            )?;
            self.console.rule()?;
            self.console.line("")?;
            self.console.pause(Duration::from_millis(300));

            for step in self.elevator.move_to_floor(target)? {
                let arrow = step.direction.arrow();
                self.console.print_slow(
                    &format!("{} Now at floor {} {}", arrow, step.floor, arrow),
                    TRAVEL_DELAY,
                )?;
            }
        }

        self.console.line("")?;
        self.console.rule()?;
        self.console
            .print_slow(&format!("ARRIVED AT FLOOR {}!", target), STORY_DELAY)?;
        self.console.rule()?;

        if !self.elevator.door().is_open() {
            self.console.print_slow("\nDoors opening...", STORY_DELAY)?;
            self.elevator.open_door();
            self.console.pause(Duration::from_millis(300));
        }
        self.elevator.resolve_request(target);
        Ok(())
    }
}
