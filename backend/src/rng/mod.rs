//! Deterministic random number generation
//!
//! All randomness in the simulator goes through this module. Nothing reads a
//! process-wide generator.

mod xorshift;

pub use xorshift::RngManager;
