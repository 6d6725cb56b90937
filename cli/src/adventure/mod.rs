//! Adventure mode: a story-driven ride to a random floor

pub mod events;
pub mod game;
pub mod player;

pub use game::{AdventureGame, GameOutcome};
