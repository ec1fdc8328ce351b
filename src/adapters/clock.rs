//! Clock adapters.

use std::sync::RwLock;

use crate::domain::foundation::Timestamp;
use crate::ports::Clock;

/// Production clock backed by the system time.
#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

/// Deterministic clock for tests; the current moment is set explicitly.
///
/// # Panics
///
/// Methods panic if the internal lock is poisoned. This is acceptable
/// for test code but this adapter should NOT be used in production.
#[derive(Debug)]
pub struct FixedClock {
    now: RwLock<Timestamp>,
}

impl FixedClock {
    /// Creates a clock pinned at the given moment.
    pub fn at(now: Timestamp) -> Self {
        Self {
            now: RwLock::new(now),
        }
    }

    /// Moves the clock to a new moment.
    pub fn set(&self, now: Timestamp) {
        *self.now.write().expect("FixedClock: lock poisoned") = now;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        *self.now.read().expect("FixedClock: lock poisoned")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_returns_the_pinned_moment() {
        let moment = Timestamp::from_unix_secs(1_000);
        let clock = FixedClock::at(moment);
        assert_eq!(clock.now(), moment);
    }

    #[test]
    fn fixed_clock_can_be_advanced() {
        let clock = FixedClock::at(Timestamp::from_unix_secs(1_000));
        let later = Timestamp::from_unix_secs(2_000);
        clock.set(later);
        assert_eq!(clock.now(), later);
    }
}
