//! xorshift64* random number generator
//!
//! Small, fast and deterministic. Same seed, same sequence: random stops,
//! stuck-button seeding and narrative event outcomes all replay exactly,
//! which is what makes event and dispatch tests reproducible.

use serde::{Deserialize, Serialize};

/// Seedable random source owned by a session
///
/// # Example
/// ```
/// use elevator_sim_core_rs::RngManager;
///
/// let mut rng = RngManager::new(12345);
/// let floor = rng.range_inclusive(1, 15);
/// assert!((1..=15).contains(&floor));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngManager {
    state: u64,
}

impl RngManager {
    /// Create a new RNG with given seed
    ///
    /// A zero seed is replaced by 1 (xorshift never leaves the zero state).
    pub fn new(seed: u64) -> Self {
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Advance the generator and return the next raw value
    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545F4914F6CDD1D)
    }

    /// Uniform integer in `[min, max]`
    ///
    /// # Panics
    /// Panics if `min > max`
    pub fn range_inclusive(&mut self, min: i32, max: i32) -> i32 {
        assert!(min <= max, "min must not exceed max");

        let span = (i64::from(max) - i64::from(min) + 1) as u64;
        let offset = self.next_u64() % span;
        (i64::from(min) + offset as i64) as i32
    }

    /// Uniform f64 in `[0.0, 1.0)`
    pub fn next_f64(&mut self) -> f64 {
        let value = self.next_u64();
        (value >> 11) as f64 * (1.0 / ((1u64 << 53) as f64))
    }

    /// `true` with probability `p`
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Uniformly pick one element, `None` for an empty slice
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let index = (self.next_u64() % items.len() as u64) as usize;
        items.get(index)
    }

    /// Current internal state, enough to resume the sequence via `new`
    pub fn get_state(&self) -> u64 {
        self.state
    }
}
