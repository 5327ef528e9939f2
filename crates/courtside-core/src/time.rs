//! Clock abstraction for testable cache expiry.
//!
//! Production code uses [`RealClock`]; tests inject a [`TestClock`] and
//! advance it past the roster TTL without sleeping.

use std::{
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
    time::{Duration, Instant},
};

/// Monotonic time source.
pub trait Clock: Send + Sync + std::fmt::Debug {
    /// Returns the current instant for expiry comparisons.
    fn now(&self) -> Instant;
}

/// Real clock backed by system monotonic time.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealClock;

impl RealClock {
    /// Creates a new real clock instance.
    pub fn new() -> Self {
        Self
    }
}

impl Clock for RealClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Test clock with manually controlled progression.
///
/// Cloning shares the underlying counter, so a clone handed to a cache can
/// be advanced from the test body.
#[derive(Debug, Clone)]
pub struct TestClock {
    elapsed_ns: Arc<AtomicU64>,
    base_instant: Instant,
}

impl TestClock {
    /// Creates a test clock starting at the current instant.
    pub fn new() -> Self {
        Self { elapsed_ns: Arc::new(AtomicU64::new(0)), base_instant: Instant::now() }
    }

    /// Advances the clock by the given duration.
    pub fn advance(&self, duration: Duration) {
        let duration_ns = u64::try_from(duration.as_nanos().min(u128::from(u64::MAX))).unwrap_or(0);
        self.elapsed_ns.fetch_add(duration_ns, Ordering::AcqRel);
    }

    /// Returns elapsed time since clock creation.
    pub fn elapsed(&self) -> Duration {
        Duration::from_nanos(self.elapsed_ns.load(Ordering::Acquire))
    }
}

impl Default for TestClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for TestClock {
    fn now(&self) -> Instant {
        self.base_instant + self.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_advances() {
        let clock = TestClock::new();
        let start = clock.now();

        clock.advance(Duration::from_secs(10));

        assert_eq!(clock.now().duration_since(start), Duration::from_secs(10));
    }

    #[test]
    fn cloned_test_clock_shares_time() {
        let clock = TestClock::new();
        let shared = clock.clone();

        clock.advance(Duration::from_secs(5));

        assert_eq!(shared.elapsed(), Duration::from_secs(5));
    }

    #[test]
    fn real_clock_is_monotonic() {
        let clock = RealClock::new();
        let first = clock.now();
        let second = clock.now();
        assert!(second >= first);
    }
}
