//! Clock abstraction for cache freshness.
//!
//! TTL checks read the time through [`Clock`] so tests can move time forward
//! instead of sleeping.

use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Manually driven clock. Shared behind an `Arc`, so advancing it is visible
/// to every cache holding the same handle.
#[derive(Debug)]
pub struct MockClock {
    current: Mutex<DateTime<Utc>>,
}

impl MockClock {
    pub fn at(time: DateTime<Utc>) -> Self {
        Self {
            current: Mutex::new(time),
        }
    }

    pub fn set(&self, time: DateTime<Utc>) {
        *self.current.lock() = time;
    }

    pub fn advance(&self, by: Duration) {
        *self.current.lock() += by;
    }
}

impl Default for MockClock {
    fn default() -> Self {
        Self::at(Utc::now())
    }
}

impl Clock for MockClock {
    fn now(&self) -> DateTime<Utc> {
        *self.current.lock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_tracks_wall_time() {
        let drift = Utc::now() - SystemClock.now();
        assert!(drift.num_milliseconds().abs() < 1000);
    }

    #[test]
    fn test_mock_clock_advances() {
        let start = Utc::now();
        let clock = MockClock::at(start);
        clock.advance(Duration::hours(3));
        assert_eq!(clock.now() - start, Duration::hours(3));

        clock.set(start);
        assert_eq!(clock.now(), start);
    }
}
