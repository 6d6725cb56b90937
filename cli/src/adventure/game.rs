//! Adventure game loop
//!
//! The player picks one of three cars in the building and rides it to a
//! target floor. The car's dispatch policy drives the ride one floor at a
//! time; stops injected by events are served on the way. Between floors,
//! events and idle worries wear down the player's patience.

use std::io::{BufRead, Write};
use std::time::Duration;

use anyhow::{Context, Result};
use elevator_sim_core_rs::{
    Building, Elevator, ElevatorConfig, FloorNumber, RngManager, SharedClock,
};
use tracing::{debug, info};

use super::events::{random_event, ElevatorEvent};
use super::player::Player;
use crate::console::{Console, STORY_DELAY, TRAVEL_DELAY};

const BUILDING_NAME: &str = "TechCorp Building";
const DEFAULT_NAME: &str = "Adventurer";
const LOWEST_TARGET: FloorNumber = 5;
const QUIRKY_BUTTON: FloorNumber = 5;
const EVENT_CHANCE: f64 = 0.5;
const SUSPENSE_CHANCE: f64 = 0.2;

const FURY: &str =
    "\n[FURY] You've lost all patience! You decide to take the stairs instead.";

const ELEVATOR_CHOICES: [&str; 3] = [
    "Elevator A (looks new and shiny)",
    "Elevator B (looks reliable)",
    "Elevator C (has a 'strange' button)",
];

const SUSPENSE_LINES: [&str; 4] = [
    "The elevator feels slower than usual...",
    "You wonder if you'll make it on time...",
    "This is taking longer than expected...",
    "Your coffee is getting cold...",
];

/// How a game ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameOutcome {
    /// Reached the target floor with this much patience left
    Arrived { floor: FloorNumber, patience: u32 },
    /// Ran out of patience on `floor`
    GaveUp { floor: FloorNumber },
    /// Input ended before the game did
    Abandoned,
}

pub struct AdventureGame<R, W> {
    console: Console<R, W>,
    building: Building,
    rng: RngManager,
}

impl<R: BufRead, W: Write> AdventureGame<R, W> {
    /// Set up the building with cars A, B and C
    ///
    /// Car C's floor-5 button starts stuck half of the time.
    pub fn new(
        console: Console<R, W>,
        config: ElevatorConfig,
        clock: SharedClock,
        seed: u64,
    ) -> Result<Self> {
        let mut rng = RngManager::new(seed);
        let mut building = Building::new(BUILDING_NAME);

        for (offset, id) in ["A", "B", "C"].into_iter().enumerate() {
            let elevator = Elevator::new(
                id,
                config.clone(),
                clock.clone(),
                seed.wrapping_add(offset as u64 + 1),
            )
            .with_context(|| format!("Failed to build elevator {}", id))?;
            building.add_elevator(elevator);
        }

        let stuck = rng.chance(0.5);
        if let Some(button) = building
            .elevator_mut(2)
            .and_then(|car| car.button_mut(QUIRKY_BUTTON))
        {
            button.set_stuck(stuck);
        }
        debug!(stuck, "elevator C quirk");

        Ok(Self {
            console,
            building,
            rng,
        })
    }

    #[cfg(test)]
    pub fn building(&self) -> &Building {
        &self.building
    }

    #[cfg(test)]
    pub fn building_mut(&mut self) -> &mut Building {
        &mut self.building
    }

    #[cfg(test)]
    pub fn into_console(self) -> Console<R, W> {
        self.console
    }

    pub fn run(&mut self) -> Result<GameOutcome> {
        self.console.banner("ELEVATOR ADVENTURE")?;
        self.console.pause(Duration::from_millis(500));
        self.console.print_slow(
            "\nYou step into the grand lobby of the TechCorp building.",
            STORY_DELAY,
        )?;
        self.console.print_slow(
            "The day is sunny, your coffee is warm, and you have somewhere to be.",
            STORY_DELAY,
        )?;
        if !self.console.wait_for_enter("\nPress Enter to continue...")? {
            return Ok(GameOutcome::Abandoned);
        }

        let Some(name) = self
            .console
            .read_line("\nWhat's your name, brave elevator rider? ")?
        else {
            return Ok(GameOutcome::Abandoned);
        };
        let name = if name.is_empty() {
            DEFAULT_NAME.to_string()
        } else {
            name
        };
        let mut player = Player::new(name);

        let config = self.config();
        let low = LOWEST_TARGET.clamp(config.min_floor, config.max_floor);
        let mut target = self.rng.range_inclusive(low, config.max_floor);
        info!(player = player.name(), target, "adventure started");

        self.console.print_slow(
            &format!(
                "\nWelcome, {}! Today you need to get to floor {}.",
                player.name(),
                target
            ),
            STORY_DELAY,
        )?;
        self.console.print_slow(
            &format!(
                "The building is {} stories tall. This should be easy, right?",
                config.max_floor
            ),
            STORY_DELAY,
        )?;
        if !self.console.wait_for_enter("\nPress Enter to continue...")? {
            return Ok(GameOutcome::Abandoned);
        }

        self.console.line("")?;
        self.console.rule()?;
        self.console.print_slow(
            "You approach the elevator bank. Three elevators are available.",
            STORY_DELAY,
        )?;
        let Some(choice) = self
            .console
            .choose("Which elevator do you choose?", &ELEVATOR_CHOICES)?
        else {
            return Ok(GameOutcome::Abandoned);
        };
        match choice {
            1 => {
                self.console
                    .print_slow("\nYou choose Elevator A. It looks pristine!", STORY_DELAY)?;
                player.increase_patience(10);
            }
            2 => {
                self.console
                    .print_slow("\nYou choose Elevator B. The safe choice!", STORY_DELAY)?;
            }
            _ => {
                self.console.print_slow(
                    "\nYou choose Elevator C. You like to live dangerously!",
                    STORY_DELAY,
                )?;
                player.decrease_patience(10);
            }
        }
        let index = choice - 1;
        if !self.console.wait_for_enter("\nPress Enter to continue...")? {
            return Ok(GameOutcome::Abandoned);
        }

        self.console.line("")?;
        self.console.rule()?;
        self.console.print_slow(
            &format!("You press the button for floor {}...", target),
            STORY_DELAY,
        )?;
        let car = self.building.select(index)?;
        if car.press_floor_button(target).is_err() {
            self.console.print_slow(
                "[WARNING] The button is stuck! You'll have to try another floor.",
                STORY_DELAY,
            )?;
            let others: Vec<FloorNumber> =
                config.floors().filter(|floor| *floor != target).collect();
            if let Some(&other) = self.rng.pick(&others) {
                target = other;
            }
            // If this one is stuck too nothing is pending and the ride ends early
            if let Err(error) = car.press_floor_button(target) {
                debug!(%error, "second press refused");
            }
            self.console.print_slow(
                &format!("You press floor {} instead...", target),
                STORY_DELAY,
            )?;
        }
        self.console
            .print_slow("*ding* The elevator arrives!", STORY_DELAY)?;
        if !self.console.wait_for_enter("\nPress Enter to continue...")? {
            return Ok(GameOutcome::Abandoned);
        }

        let car = self.building.select(index)?;
        self.console.line("")?;
        self.console.rule()?;
        self.console
            .print_slow("The doors slide open. You step inside.", STORY_DELAY)?;
        self.console.print_slow(
            &format!("Current floor: {}", car.current_floor()),
            STORY_DELAY,
        )?;
        self.console
            .print_slow(&format!("Destination: Floor {}", target), STORY_DELAY)?;
        self.console.print_slow(
            &format!("Patience level: {}%", player.patience()),
            STORY_DELAY,
        )?;
        if !self.console.wait_for_enter("\nPress Enter to continue...")? {
            return Ok(GameOutcome::Abandoned);
        }

        let outcome = self.ride(index, target, &mut player)?;
        if let GameOutcome::Arrived { .. } = outcome {
            self.celebrate(target, &player)?;
            // Last prompt; end of input here changes nothing
            self.console.wait_for_enter("\n\nPress Enter to exit...")?;
        }
        info!(?outcome, patience = player.patience(), "adventure finished");
        Ok(outcome)
    }

    fn config(&self) -> ElevatorConfig {
        self.building
            .elevator(0)
            .map(|car| car.config().clone())
            .unwrap_or_default()
    }

    /// Drive the chosen car until it reaches `target` or the player gives up
    fn ride(
        &mut self,
        index: usize,
        target: FloorNumber,
        player: &mut Player,
    ) -> Result<GameOutcome> {
        let Self {
            console,
            building,
            rng,
        } = self;
        let car = building.select(index)?;

        console.line("")?;
        console.rule()?;
        console.line("ELEVATOR JOURNEY BEGINNING")?;
        console.rule()?;

        let start = car.current_floor();
        let heading = if target > start { "up" } else { "down" };
        console.line("")?;
        console.rule()?;
        console.print_slow(
            &format!("Elevator starting at floor {}", start),
            TRAVEL_DELAY,
        )?;
        console.print_slow(
            &format!("Traversing {} to floor {}...", heading, target),
            TRAVEL_DELAY,
        )?;
        console.rule()?;
        console.line("")?;
        console.pause(Duration::from_millis(500));

        loop {
            let Some(next) = car.plan_next_request() else {
                let floor = car.current_floor();
                console.line("")?;
                console.rule()?;
                console.line("GAME OVER")?;
                console.rule()?;
                console.line("\nThe elevator won't budge, so you give up!")?;
                console.line("Maybe next time you'll take the stairs?")?;
                return Ok(GameOutcome::GaveUp { floor });
            };

            if next != car.current_floor() {
                let Some(floor) = car.step_toward(next) else {
                    return Ok(GameOutcome::GaveUp {
                        floor: car.current_floor(),
                    });
                };
                let arrow = car.direction().arrow();
                console.print_slow(
                    &format!("{} Now at floor {} {}", arrow, floor, arrow),
                    TRAVEL_DELAY,
                )?;

                if floor != target {
                    if rng.chance(EVENT_CHANCE) {
                        let mut event = random_event(floor, car, rng);
                        if !handle_event(console, player, car, rng, event.as_mut())? {
                            return Ok(GameOutcome::Abandoned);
                        }
                        if !player.has_patience() {
                            console.line(FURY)?;
                            return Ok(GameOutcome::GaveUp { floor });
                        }
                    }

                    if rng.chance(SUSPENSE_CHANCE) {
                        if let Some(line) = rng.pick(&SUSPENSE_LINES) {
                            console.print_slow(&format!("\n{}", line), TRAVEL_DELAY)?;
                        }
                        player.decrease_patience(2);
                        if !player.has_patience() {
                            console.line(FURY)?;
                            return Ok(GameOutcome::GaveUp { floor });
                        }
                    }
                }

                if floor != next {
                    continue;
                }
            }

            if next == target {
                break;
            }
            console.print_slow(
                &format!("\nThe elevator stops at floor {}. Nobody gets on.", next),
                TRAVEL_DELAY,
            )?;
            car.service_current_floor();
        }

        console.line("")?;
        console.rule()?;
        console.print_slow(&format!("ARRIVED AT FLOOR {}!", target), STORY_DELAY)?;
        console.rule()?;
        if !car.door().is_open() {
            console.print_slow("\nDoors opening...", STORY_DELAY)?;
            car.open_door();
            console.pause(Duration::from_millis(500));
        }
        car.resolve_request(target);

        Ok(GameOutcome::Arrived {
            floor: car.current_floor(),
            patience: player.patience(),
        })
    }

    fn celebrate(&mut self, target: FloorNumber, player: &Player) -> Result<()> {
        self.console.line("")?;
        self.console.rule()?;
        self.console.line("SUCCESS!")?;
        self.console.rule()?;
        self.console.print_slow(
            &format!("\n[SUCCESS] You made it to floor {}!", target),
            STORY_DELAY,
        )?;
        self.console
            .print_slow("The doors open smoothly...", STORY_DELAY)?;

        let verdict = match player.patience() {
            p if p >= 80 => "\nYou kept your cool the whole way! You're an elevator master!",
            p if p >= 50 => "\nYou made it! A bit stressed, but successful.",
            _ => "\nYou made it, but that was rough! Your patience was tested.",
        };
        self.console.print_slow(verdict, STORY_DELAY)?;
        self.console.print_slow(
            &format!("\nYour final patience level: {}%", player.patience()),
            STORY_DELAY,
        )?;
        self.console.print_slow(
            "\nGreat work! You completed your elevator adventure!",
            STORY_DELAY,
        )?;
        Ok(())
    }
}

/// Present an event, apply the player's choice, adjust patience
///
/// `false` when input ended at the choice prompt.
fn handle_event<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    player: &mut Player,
    car: &mut Elevator,
    rng: &mut RngManager,
    event: &mut dyn ElevatorEvent,
) -> Result<bool> {
    console.print_slow(&format!("\n{}", event.description()), STORY_DELAY)?;
    let Some(choice) = console.choose("What do you do?", &event.choices())? else {
        return Ok(false);
    };

    let outcome = event.handle_choice(choice, car, rng);
    console.print_slow(&format!("\n{}", outcome.message), STORY_DELAY)?;

    if outcome.causes_delay {
        let loss = rng.range_inclusive(5, 20) as u32;
        player.decrease_patience(loss);
        console.pause(Duration::from_secs(1));
    } else if outcome.is_success() {
        player.increase_patience(5);
    }
    debug!(
        floor = event.floor(),
        choice,
        delayed = outcome.causes_delay,
        patience = player.patience(),
        "event handled"
    );
    Ok(true)
}
