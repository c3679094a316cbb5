//! Wall-clock abstraction for the rate limiter.

use std::time::{SystemTime, UNIX_EPOCH};

/// Source of the current time, in whole seconds since the Unix epoch.
///
/// The limiter takes its clock as a type parameter so tests can drive time
/// deterministically. Production callers use [`SystemClock`].
pub trait Clock: Send + Sync {
    /// Current time in seconds since the Unix epoch.
    fn now(&self) -> u64;
}

/// System wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_secs())
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::Clock;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;

    /// Manually-driven clock for deterministic tests.
    #[derive(Debug, Clone, Default)]
    pub struct ManualClock {
        now: Arc<AtomicU64>,
    }

    impl ManualClock {
        pub fn new(start: u64) -> Self {
            Self {
                now: Arc::new(AtomicU64::new(start)),
            }
        }

        pub fn advance(&self, secs: u64) {
            self.now.fetch_add(secs, Ordering::Relaxed);
        }

        pub fn set(&self, secs: u64) {
            self.now.store(secs, Ordering::Relaxed);
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> u64 {
            self.now.load(Ordering::Relaxed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::ManualClock;
    use super::*;

    #[test]
    fn test_system_clock_is_past_epoch() {
        let clock = SystemClock;
        assert!(clock.now() > 0);
    }

    #[test]
    fn test_manual_clock_advances() {
        let clock = ManualClock::new(100);
        assert_eq!(clock.now(), 100);

        clock.advance(60);
        assert_eq!(clock.now(), 160);

        clock.set(30);
        assert_eq!(clock.now(), 30);
    }
}
