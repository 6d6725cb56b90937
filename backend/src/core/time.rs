//! Time management for the simulation
//!
//! Every delay in the dispatch core (door transitions, per-floor travel) is a
//! logical wait that goes through the [`Clock`] trait. Real sessions sleep the
//! thread; tests use [`SimulatedClock`], which only advances a counter.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Source of waits and elapsed time for an elevator.
///
/// Implementations:
/// - [`RealClock`]: blocks the calling thread
/// - [`SimulatedClock`]: advances virtual time instantly
pub trait Clock: Send + Sync {
    /// Wait for `duration` of (real or logical) time
    fn sleep(&self, duration: Duration);

    /// Time elapsed since the clock was created
    fn elapsed(&self) -> Duration;

    /// Elapsed time in whole milliseconds, used to stamp log events
    fn elapsed_ms(&self) -> u64 {
        self.elapsed().as_millis() as u64
    }
}

/// Clock handle shared between an elevator and its door.
pub type SharedClock = Arc<dyn Clock>;

/// Wall-clock time with an optional speed factor
///
/// # Example
/// ```
/// use elevator_sim_core_rs::core::time::{Clock, RealClock};
/// use std::time::Duration;
///
/// // 1000x faster than real time
/// let clock = RealClock::with_scale(0.001);
/// clock.sleep(Duration::from_secs(1)); // sleeps ~1ms
/// ```
#[derive(Debug, Clone)]
pub struct RealClock {
    start: Instant,
    scale: f64,
}

impl RealClock {
    /// Slowest supported playback: one logical second lasts this many real seconds
    pub const MAX_SCALE: f64 = 1_000.0;

    pub fn new() -> Self {
        Self::with_scale(1.0)
    }

    /// Create a clock whose sleeps last `scale` times the requested duration
    ///
    /// Negative or non-finite scales are treated as zero (no sleeping);
    /// scales above [`RealClock::MAX_SCALE`] are clamped to it.
    pub fn with_scale(scale: f64) -> Self {
        let scale = if scale.is_finite() && scale > 0.0 {
            scale.min(Self::MAX_SCALE)
        } else {
            0.0
        };
        Self {
            start: Instant::now(),
            scale,
        }
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }
}

impl Default for RealClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for RealClock {
    fn sleep(&self, duration: Duration) {
        if self.scale > 0.0 {
            let scaled = Duration::try_from_secs_f64(duration.as_secs_f64() * self.scale)
                .unwrap_or(Duration::MAX);
            std::thread::sleep(scaled);
        }
    }

    fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

/// Virtual clock for deterministic, headless runs
///
/// Sleeping returns immediately and adds the requested duration to the
/// virtual time. Clones share the same counter, so a test can keep one handle
/// and inspect how much logical time an elevator spent.
///
/// # Example
/// ```
/// use elevator_sim_core_rs::core::time::{Clock, SimulatedClock};
/// use std::time::Duration;
///
/// let clock = SimulatedClock::new();
/// let handle = clock.clone();
///
/// clock.sleep(Duration::from_secs(3));
/// assert_eq!(handle.elapsed(), Duration::from_secs(3));
/// assert_eq!(handle.sleep_count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SimulatedClock {
    elapsed_nanos: Arc<AtomicU64>,
    sleeps: Arc<AtomicU64>,
}

impl SimulatedClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance virtual time without counting a sleep
    pub fn advance(&self, duration: Duration) {
        self.elapsed_nanos
            .fetch_add(duration.as_nanos() as u64, Ordering::SeqCst);
    }

    /// Number of `sleep` calls made so far
    pub fn sleep_count(&self) -> u64 {
        self.sleeps.load(Ordering::SeqCst)
    }
}

impl Clock for SimulatedClock {
    fn sleep(&self, duration: Duration) {
        self.advance(duration);
        self.sleeps.fetch_add(1, Ordering::SeqCst);
    }

    fn elapsed(&self) -> Duration {
        Duration::from_nanos(self.elapsed_nanos.load(Ordering::SeqCst))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulated_clock_starts_at_zero() {
        let clock = SimulatedClock::new();
        assert_eq!(clock.elapsed(), Duration::ZERO);
        assert_eq!(clock.sleep_count(), 0);
    }

    #[test]
    fn test_advance_does_not_count_as_sleep() {
        let clock = SimulatedClock::new();
        clock.advance(Duration::from_millis(250));
        assert_eq!(clock.elapsed_ms(), 250);
        assert_eq!(clock.sleep_count(), 0);
    }

    #[test]
    fn test_invalid_scale_disables_sleeping() {
        assert_eq!(RealClock::with_scale(-1.0).scale(), 0.0);
        assert_eq!(RealClock::with_scale(f64::NAN).scale(), 0.0);
        assert_eq!(RealClock::with_scale(0.5).scale(), 0.5);
    }

    #[test]
    fn test_huge_scale_is_clamped() {
        let clock = RealClock::with_scale(1e300);
        assert_eq!(clock.scale(), RealClock::MAX_SCALE);
        clock.sleep(Duration::ZERO);
    }
}
