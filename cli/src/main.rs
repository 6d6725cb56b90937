//! Elevator simulator command-line front end
//!
//! Two modes share one console:
//! - `interactive`: ride a single car by choosing floors
//! - `adventure`: story mode with events and a patience meter
//!
//! Narrative output goes to stdout; diagnostics go to stderr through
//! `tracing` (set `RUST_LOG=debug` to watch dispatch decisions).

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use elevator_sim_core_rs::{Elevator, ElevatorConfig, RealClock, SharedClock, SimulatedClock};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod adventure;
mod console;
mod interactive;

use adventure::{AdventureGame, GameOutcome};
use console::Console;
use interactive::InteractiveMode;

#[derive(Parser, Debug)]
#[command(name = "elevator-sim", version, about = "Single-car elevator simulator")]
struct Args {
    /// JSON configuration file (missing fields use defaults)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for every random draw (default: derived from the system time)
    #[arg(long)]
    seed: Option<u64>,

    /// Real-time scale factor; 0.5 runs twice as fast
    #[arg(long, default_value_t = 1.0)]
    speed: f64,

    /// Skip all waiting (simulated clock)
    #[arg(long)]
    instant: bool,

    /// Print text at once instead of with a typing effect
    #[arg(long)]
    no_typing: bool,

    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Direct control of a single elevator
    Interactive,
    /// Interactive story with random events
    Adventure,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let config = load_config(args.config.as_deref())?;
    let seed = args.seed.unwrap_or_else(seed_from_time);
    let clock: SharedClock = if args.instant {
        Arc::new(SimulatedClock::new())
    } else {
        Arc::new(RealClock::with_scale(args.speed))
    };
    info!(seed, policy = ?config.policy, instant = args.instant, "starting session");

    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout(), clock.clone());
    if args.no_typing {
        console = console.without_typing();
    }

    let mode = match args.mode {
        Some(mode) => mode,
        None => match show_menu(&mut console)? {
            Some(mode) => mode,
            None => return Ok(()),
        },
    };

    match mode {
        Mode::Interactive => {
            let elevator = Elevator::new("A", config, clock, seed)?;
            InteractiveMode::new(console, elevator).run()?;
        }
        Mode::Adventure => {
            let outcome = AdventureGame::new(console, config, clock, seed)?.run()?;
            if outcome == GameOutcome::Abandoned {
                println!("\n\nGame interrupted. Thanks for playing!");
            }
        }
    }
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<ElevatorConfig> {
    let Some(path) = path else {
        return Ok(ElevatorConfig::default());
    };
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let config = ElevatorConfig::from_json(&json)
        .with_context(|| format!("Invalid config file {}", path.display()))?;
    Ok(config)
}

fn seed_from_time() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or(1)
}

/// Main menu; `None` when input ends
fn show_menu<R: BufRead, W: Write>(console: &mut Console<R, W>) -> Result<Option<Mode>> {
    console.line("")?;
    console.rule()?;
    console.line("THE ELEVATOR")?;
    console.rule()?;

    let choice = console.choose(
        "Select a mode:",
        &[
            "Interactive Elevator Mode - direct control of the elevator",
            "Adventure Mode - reach your floor before your patience runs out",
        ],
    )?;
    Ok(choice.map(|choice| match choice {
        1 => Mode::Interactive,
        _ => Mode::Adventure,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::testing::scripted;

    #[test]
    fn test_args_parse_subcommand_and_flags() {
        let args = Args::try_parse_from([
            "elevator-sim",
            "--seed",
            "7",
            "--instant",
            "--no-typing",
            "adventure",
        ])
        .unwrap();

        assert_eq!(args.seed, Some(7));
        assert!(args.instant);
        assert!(args.no_typing);
        assert_eq!(args.mode, Some(Mode::Adventure));
        assert_eq!(args.speed, 1.0);
    }

    #[test]
    fn test_menu_maps_choices() {
        let clock = SimulatedClock::new();
        let mut console = scripted("2\n", &clock).without_typing();
        assert_eq!(show_menu(&mut console).unwrap(), Some(Mode::Adventure));

        let mut console = scripted("", &clock).without_typing();
        assert_eq!(show_menu(&mut console).unwrap(), None);
    }

    #[test]
    fn test_load_config_from_file() {
        let path = std::env::temp_dir().join(format!("elevator-sim-{}.json", std::process::id()));
        let mut file = fs::File::create(&path).unwrap();
        write!(file, r#"{{ "max_floor": 9, "policy": "nearest" }}"#).unwrap();

        let config = load_config(Some(path.as_path())).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(config.max_floor, 9);
        assert_eq!(config.min_floor, 1);
    }

    #[test]
    fn test_load_config_reports_path() {
        let err = load_config(Some(Path::new("/nonexistent/elevator.json")))
            .unwrap_err();
        assert!(err.to_string().contains("/nonexistent/elevator.json"));
    }
}
